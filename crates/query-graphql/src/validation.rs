use std::fmt;

use serde_json::Value;

use crate::entity::ScalarKind;

/// A single problem found in an input value, located by a path such as `filter.or[1].name`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {kind}")]
pub struct ValidationError {
    pub path: String,
    pub kind: ValidationErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationErrorKind {
    #[error("a value is required")]
    Required,
    #[error("expected an object, found {0}")]
    ExpectedObject(&'static str),
    #[error("expected a list, found {0}")]
    ExpectedList(&'static str),
    #[error("must be a non-empty object")]
    EmptyObject,
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("unknown comparison operator `{0}`")]
    UnknownOperator(String),
    #[error("operator `{operator}` cannot be used on {scalar} fields")]
    UnsupportedOperator { operator: String, scalar: ScalarKind },
    #[error("expected {expected}, found {found}")]
    InvalidOperand { expected: String, found: &'static str },
}

/// Every problem found while validating one input value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn push(&mut self, path: impl Into<String>, kind: ValidationErrorKind) {
        self.0.push(ValidationError {
            path: path.into(),
            kind,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> + '_ {
        self.0.iter()
    }

    pub(crate) fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx != 0 {
                f.write_str("; ")?;
            }

            write!(f, "{error}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
