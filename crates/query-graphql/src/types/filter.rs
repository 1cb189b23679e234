use std::{str::FromStr, sync::Arc};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use crate::{
    entity::{EntityDescriptor, EntityId, ScalarKind},
    names::{validate_graphql_name, DtoNames},
    registry::{InputObjectType, MetaInputValue},
    validation::{json_type, ValidationErrorKind, ValidationErrors},
    MetadataStorage, Result,
};

pub const INPUT_FIELD_AND: &str = "and";
pub const INPUT_FIELD_OR: &str = "or";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum ComparisonOperator {
    Is,
    IsNot,
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    #[strum(serialize = "iLike")]
    ILike,
    #[strum(serialize = "notILike")]
    NotILike,
    In,
    NotIn,
}

impl ComparisonOperator {
    pub fn applies_to(self, scalar: ScalarKind) -> bool {
        match self {
            ComparisonOperator::Is | ComparisonOperator::IsNot => true,
            ComparisonOperator::Like
            | ComparisonOperator::NotLike
            | ComparisonOperator::ILike
            | ComparisonOperator::NotILike => scalar.is_string_like(),
            _ => scalar != ScalarKind::Boolean,
        }
    }

    /// GraphQL type of the operand in the comparison input type.
    pub fn operand_type(self, scalar: ScalarKind) -> String {
        match self {
            ComparisonOperator::Is | ComparisonOperator::IsNot => String::from("Boolean"),
            ComparisonOperator::In | ComparisonOperator::NotIn => format!("[{scalar}!]"),
            ComparisonOperator::Like
            | ComparisonOperator::NotLike
            | ComparisonOperator::ILike
            | ComparisonOperator::NotILike => String::from("String"),
            _ => scalar.to_string(),
        }
    }

    fn check_operand(self, scalar: ScalarKind, operand: &Value, path: &str, errors: &mut ValidationErrors) {
        let invalid = |expected: String| ValidationErrorKind::InvalidOperand {
            expected,
            found: json_type(operand),
        };

        match self {
            ComparisonOperator::Is | ComparisonOperator::IsNot => {
                if !(operand.is_boolean() || operand.is_null()) {
                    errors.push(path, invalid(String::from("a boolean or null")));
                }
            }
            ComparisonOperator::In | ComparisonOperator::NotIn => {
                let Some(items) = operand.as_array() else {
                    errors.push(path, ValidationErrorKind::ExpectedList(json_type(operand)));
                    return;
                };

                for (idx, item) in items.iter().enumerate() {
                    if !scalar.accepts(item) {
                        errors.push(
                            format!("{path}[{idx}]"),
                            ValidationErrorKind::InvalidOperand {
                                expected: format!("a value of type {scalar}!"),
                                found: json_type(item),
                            },
                        );
                    }
                }
            }
            ComparisonOperator::Like
            | ComparisonOperator::NotLike
            | ComparisonOperator::ILike
            | ComparisonOperator::NotILike => {
                if !operand.is_string() {
                    errors.push(path, invalid(String::from("a value of type String")));
                }
            }
            _ => {
                if !scalar.accepts(operand) {
                    errors.push(path, invalid(format!("a value of type {scalar}")));
                }
            }
        }
    }
}

/// The comparison input type listing every operator usable on a field of `scalar`.
pub fn comparison_type(scalar: ScalarKind) -> InputObjectType {
    let fields = ComparisonOperator::iter()
        .filter(|operator| operator.applies_to(scalar))
        .map(|operator| MetaInputValue::new(operator.to_string(), operator.operand_type(scalar)));

    InputObjectType::new(scalar.comparison_type_name(), fields)
}

/// The operators applied to one field, keyed by operator.
pub type FieldComparison = IndexMap<ComparisonOperator, Value>;

/// A validated filter value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    pub and: Vec<Filter>,
    pub or: Vec<Filter>,
    pub fields: IndexMap<String, FieldComparison>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.and.is_empty() && self.or.is_empty() && self.fields.is_empty()
    }
}

/// The generated `<Prefix><Entity>Filter` input type.
#[derive(Debug)]
pub struct FilterType {
    entity: EntityId,
    input_object: InputObjectType,
    fields: IndexMap<String, ScalarKind>,
}

impl FilterType {
    pub fn new(entity: &EntityDescriptor, name: String) -> Self {
        let fields: IndexMap<_, _> = entity
            .filterable_fields()
            .map(|field| (field.name.to_string(), field.scalar))
            .collect();

        let nested = format!("[{name}!]");
        let mut input_fields = vec![
            MetaInputValue::new(INPUT_FIELD_AND, nested.as_str()),
            MetaInputValue::new(INPUT_FIELD_OR, nested.as_str()),
        ];

        input_fields.extend(
            fields
                .iter()
                .map(|(field, scalar)| MetaInputValue::new(field.as_str(), scalar.comparison_type_name())),
        );

        Self {
            entity: entity.id,
            input_object: InputObjectType::new(name, input_fields),
            fields,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn name(&self) -> &str {
        &self.input_object.name
    }

    pub fn input_object(&self) -> &InputObjectType {
        &self.input_object
    }

    /// The scalar type of a filterable field.
    pub fn field_scalar(&self, field: &str) -> Option<ScalarKind> {
        self.fields.get(field).copied()
    }

    pub(crate) fn parse_object(&self, object: &Map<String, Value>, path: &str, errors: &mut ValidationErrors) -> Filter {
        let mut filter = Filter::default();

        for (key, value) in object {
            let field_path = format!("{path}.{key}");

            match key.as_str() {
                INPUT_FIELD_AND => filter.and = self.parse_list(value, &field_path, errors),
                INPUT_FIELD_OR => filter.or = self.parse_list(value, &field_path, errors),
                field => {
                    let Some(scalar) = self.field_scalar(field) else {
                        errors.push(field_path, ValidationErrorKind::UnknownField(key.clone()));
                        continue;
                    };

                    if value.is_null() {
                        continue;
                    }

                    let comparison = parse_comparison(scalar, value, &field_path, errors);
                    filter.fields.insert(key.clone(), comparison);
                }
            }
        }

        filter
    }

    fn parse_list(&self, value: &Value, path: &str, errors: &mut ValidationErrors) -> Vec<Filter> {
        let items = match value {
            Value::Null => return Vec::new(),
            Value::Array(items) => items,
            other => {
                errors.push(path, ValidationErrorKind::ExpectedList(json_type(other)));
                return Vec::new();
            }
        };

        let mut filters = Vec::with_capacity(items.len());

        for (idx, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{idx}]");

            match item {
                Value::Object(object) => filters.push(self.parse_object(object, &item_path, errors)),
                Value::Null => errors.push(item_path, ValidationErrorKind::Required),
                other => errors.push(item_path, ValidationErrorKind::ExpectedObject(json_type(other))),
            }
        }

        filters
    }
}

fn parse_comparison(scalar: ScalarKind, value: &Value, path: &str, errors: &mut ValidationErrors) -> FieldComparison {
    let mut comparison = FieldComparison::new();

    let Some(operators) = value.as_object() else {
        errors.push(path, ValidationErrorKind::ExpectedObject(json_type(value)));
        return comparison;
    };

    for (key, operand) in operators {
        let operator_path = format!("{path}.{key}");

        let Ok(operator) = ComparisonOperator::from_str(key) else {
            errors.push(operator_path, ValidationErrorKind::UnknownOperator(key.clone()));
            continue;
        };

        if !operator.applies_to(scalar) {
            errors.push(
                operator_path,
                ValidationErrorKind::UnsupportedOperator {
                    operator: key.clone(),
                    scalar,
                },
            );
            continue;
        }

        operator.check_operand(scalar, operand, &operator_path, errors);
        comparison.insert(operator, operand.clone());
    }

    comparison
}

/// Builds the filter type of an entity.
pub trait FilterTypeFactory {
    fn filter_type(
        &self,
        storage: &MetadataStorage,
        entity: &EntityDescriptor,
        prefix: Option<&str>,
    ) -> Result<Arc<FilterType>>;
}

/// Generates filter types from the filterable fields of an entity and caches them per
/// entity and prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFilterTypes;

impl FilterTypeFactory for DefaultFilterTypes {
    fn filter_type(
        &self,
        storage: &MetadataStorage,
        entity: &EntityDescriptor,
        prefix: Option<&str>,
    ) -> Result<Arc<FilterType>> {
        if let Some(existing) = storage.get_filter_type(entity.id, prefix) {
            return Ok(existing);
        }

        if let Some(prefix) = prefix {
            validate_graphql_name(prefix)?;
        }

        let names = DtoNames::from_base_name(entity.name)?;
        let filter = FilterType::new(entity, names.filter(prefix));

        if filter.fields.is_empty() {
            return Err(crate::Error::NoFilterableFields(entity.name.to_string()));
        }

        storage.check_type(&filter.input_object().clone().into())?;

        for scalar in filter.fields.values() {
            storage.create_type(comparison_type(*scalar))?;
        }

        storage.add_filter_type(entity.id, prefix, filter)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{entity::EntityField, registry::MetaType, Entity, Error};

    struct Book;

    impl Entity for Book {
        const NAME: &'static str = "Book";

        fn fields() -> Vec<EntityField> {
            vec![
                EntityField::filterable("id", ScalarKind::Id),
                EntityField::filterable("title", ScalarKind::String),
                EntityField::filterable("pages", ScalarKind::Int),
                EntityField::filterable("published", ScalarKind::Boolean),
                EntityField::new("summary", ScalarKind::String),
            ]
        }
    }

    struct Tag;

    impl Entity for Tag {
        const NAME: &'static str = "Tag";

        fn fields() -> Vec<EntityField> {
            vec![EntityField::new("label", ScalarKind::String)]
        }
    }

    fn book_filter(storage: &MetadataStorage) -> Arc<FilterType> {
        DefaultFilterTypes
            .filter_type(storage, &EntityDescriptor::of::<Book>(), None)
            .unwrap()
    }

    #[test]
    fn filter_type_fields() {
        let storage = MetadataStorage::new();
        let filter = book_filter(&storage);

        assert_eq!(filter.name(), "BookFilter");

        let fields: Vec<_> = filter
            .input_object()
            .input_fields
            .values()
            .map(|field| format!("{}: {}", field.name, field.ty))
            .collect();

        assert_eq!(
            fields,
            [
                "and: [BookFilter!]",
                "or: [BookFilter!]",
                "id: IDFilterComparison",
                "title: StringFieldComparison",
                "pages: IntFieldComparison",
                "published: BooleanFieldComparison",
            ]
        );
    }

    #[test]
    fn filter_types_are_cached_per_prefix() {
        let storage = MetadataStorage::new();
        let entity = EntityDescriptor::of::<Book>();

        let first = book_filter(&storage);
        let second = book_filter(&storage);
        let prefixed = DefaultFilterTypes
            .filter_type(&storage, &entity, Some("Library"))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &prefixed));
        assert_eq!(prefixed.name(), "LibraryBookFilter");
        assert!(storage.lookup_type("LibraryBookFilter").is_some());
    }

    #[test]
    fn comparison_types_are_registered_before_the_filter() {
        let storage = MetadataStorage::new();
        book_filter(&storage);

        let names: Vec<_> = storage.types().iter().map(|ty| ty.name().to_string()).collect();

        assert_eq!(
            names,
            [
                "IDFilterComparison",
                "StringFieldComparison",
                "IntFieldComparison",
                "BooleanFieldComparison",
                "BookFilter",
            ]
        );

        let Some(MetaType::InputObject(boolean)) = storage.lookup_type("BooleanFieldComparison") else {
            unreachable!("BooleanFieldComparison must be registered");
        };

        let operators: Vec<_> = boolean.input_fields.keys().map(String::as_str).collect();
        assert_eq!(operators, ["is", "isNot"]);
    }

    #[test]
    fn string_comparison_type() {
        let fields: Vec<_> = comparison_type(ScalarKind::String)
            .input_fields
            .into_values()
            .map(|field| format!("{}: {}", field.name, field.ty))
            .collect();

        assert_eq!(
            fields,
            [
                "is: Boolean",
                "isNot: Boolean",
                "eq: String",
                "neq: String",
                "gt: String",
                "gte: String",
                "lt: String",
                "lte: String",
                "like: String",
                "notLike: String",
                "iLike: String",
                "notILike: String",
                "in: [String!]",
                "notIn: [String!]",
            ]
        );
    }

    #[test]
    fn entity_without_filterable_fields() {
        let storage = MetadataStorage::new();
        let error = DefaultFilterTypes
            .filter_type(&storage, &EntityDescriptor::of::<Tag>(), None)
            .unwrap_err();

        assert!(matches!(error, Error::NoFilterableFields(ref name) if name == "Tag"));
        assert_eq!(error.to_string(), "No fields found to create GraphQLFilter for Tag");
        assert!(storage.types().is_empty());
    }

    #[test]
    fn invalid_prefix() {
        let storage = MetadataStorage::new();
        let error = DefaultFilterTypes
            .filter_type(&storage, &EntityDescriptor::of::<Book>(), Some("my-prefix"))
            .unwrap_err();

        assert!(matches!(error, Error::InvalidTypeName { ref name, .. } if name == "my-prefix"));
    }

    #[test]
    fn parse_nested_filter() {
        let storage = MetadataStorage::new();
        let filter = book_filter(&storage);
        let mut errors = ValidationErrors::default();

        let value = json!({
            "title": { "iLike": "%rust%" },
            "or": [
                { "pages": { "gte": 100 } },
                { "id": { "in": ["1", 2] } }
            ]
        });

        let parsed = filter.parse_object(value.as_object().unwrap(), "filter", &mut errors);

        assert!(errors.is_empty(), "{errors}");
        assert_eq!(parsed.or.len(), 2);
        assert_eq!(parsed.fields["title"][&ComparisonOperator::ILike], json!("%rust%"));
        assert_eq!(parsed.or[0].fields["pages"][&ComparisonOperator::Gte], json!(100));
    }

    #[test]
    fn parse_reports_every_problem() {
        let storage = MetadataStorage::new();
        let filter = book_filter(&storage);
        let mut errors = ValidationErrors::default();

        let value = json!({
            "summary": { "eq": "x" },
            "published": { "like": "yes" },
            "pages": { "between": 1, "in": [1, "two"] },
            "and": [null, 3]
        });

        filter.parse_object(value.as_object().unwrap(), "filter", &mut errors);

        let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();

        assert_eq!(
            messages,
            [
                "filter.summary: unknown field `summary`",
                "filter.published.like: operator `like` cannot be used on Boolean fields",
                "filter.pages.between: unknown comparison operator `between`",
                "filter.pages.in[1]: expected a value of type Int!, found a string",
                "filter.and[0]: a value is required",
                "filter.and[1]: expected an object, found a number",
            ]
        );
    }

    #[rstest::rstest]
    #[case(json!({ "title": { "is": "x" } }), "filter.title.is: expected a boolean or null, found a string")]
    #[case(json!({ "pages": { "isNot": 0 } }), "filter.pages.isNot: expected a boolean or null, found a number")]
    #[case(json!({ "title": { "in": "Ann" } }), "filter.title.in: expected a list, found a string")]
    #[case(json!({ "id": { "notIn": { "eq": "1" } } }), "filter.id.notIn: expected a list, found an object")]
    #[case(json!({ "title": { "like": 3 } }), "filter.title.like: expected a value of type String, found a number")]
    fn rejects_operands_of_the_wrong_shape(#[case] value: Value, #[case] expected: &str) {
        let storage = MetadataStorage::new();
        let filter = book_filter(&storage);
        let mut errors = ValidationErrors::default();

        filter.parse_object(value.as_object().unwrap(), "filter", &mut errors);

        let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(messages, [expected]);
    }

    #[rstest::rstest]
    #[case(json!({ "published": { "is": true } }))]
    #[case(json!({ "title": { "isNot": null } }))]
    #[case(json!({ "pages": { "notIn": [] } }))]
    fn accepts_operands_of_the_right_shape(#[case] value: Value) {
        let storage = MetadataStorage::new();
        let filter = book_filter(&storage);
        let mut errors = ValidationErrors::default();

        filter.parse_object(value.as_object().unwrap(), "filter", &mut errors);

        assert!(errors.is_empty(), "{errors}");
    }
}
