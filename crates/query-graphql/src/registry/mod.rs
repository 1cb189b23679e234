//! Schema description records.
//!
//! Generated types carry their GraphQL metadata in these records so a schema-binding
//! layer can read them without any knowledge of how they were produced.

mod export_sdl;

use indexmap::IndexMap;
use serde::Serialize;

pub use self::export_sdl::export_sdl;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetaInputValue {
    pub name: String,
    pub description: Option<String>,
    /// GraphQL type including wrappers, e.g. `AuthorFilter!` or `[String!]`.
    pub ty: String,
}

impl MetaInputValue {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty: ty.into(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.ty.ends_with('!')
    }

    /// The type name without list and non-null wrappers.
    pub fn named_type(&self) -> &str {
        self.ty.trim_matches(|c| c == '[' || c == ']' || c == '!')
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub input_fields: IndexMap<String, MetaInputValue>,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>, input_fields: impl IntoIterator<Item = MetaInputValue>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_fields: input_fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn field(&self, name: &str) -> Option<&MetaInputValue> {
        self.input_fields.get(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetaField {
    pub name: String,
    pub description: Option<String>,
    pub args: IndexMap<String, MetaInputValue>,
    pub ty: String,
}

impl MetaField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            args: IndexMap::new(),
            ty: ty.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, MetaField>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = MetaField>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: fields.into_iter().map(|field| (field.name.clone(), field)).collect(),
        }
    }
}

/// Any type registered in a [`crate::MetadataStorage`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum MetaType {
    InputObject(InputObjectType),
    Object(ObjectType),
}

impl MetaType {
    pub fn name(&self) -> &str {
        match self {
            MetaType::InputObject(input) => &input.name,
            MetaType::Object(object) => &object.name,
        }
    }
}

impl From<InputObjectType> for MetaType {
    fn from(value: InputObjectType) -> Self {
        MetaType::InputObject(value)
    }
}

impl From<ObjectType> for MetaType {
    fn from(value: ObjectType) -> Self {
        MetaType::Object(value)
    }
}
