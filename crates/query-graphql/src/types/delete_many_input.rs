use std::sync::Arc;

use serde_json::Value;

use crate::{
    entity::{Entity, EntityDescriptor, EntityId},
    metadata::metadata_storage,
    names::DtoNames,
    registry::{InputObjectType, MetaInputValue},
    types::filter::{DefaultFilterTypes, Filter, FilterType, FilterTypeFactory},
    validation::{json_type, ValidationErrorKind, ValidationErrors},
    MetadataStorage, ResolverOpts, Result,
};

pub const INPUT_FIELD_FILTER: &str = "filter";

/// The generated `DeleteMany<Entities>Input` type.
///
/// ```graphql
/// input DeleteManyAuthorsInput {
///   """
///   Filter to find records to delete
///   """
///   filter: AuthorFilter!
/// }
/// ```
#[derive(Debug)]
pub struct DeleteManyInputType {
    entity: EntityId,
    input_object: InputObjectType,
    filter: Arc<FilterType>,
}

/// A validated `DeleteMany<Entities>Input` value.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteManyInput {
    pub filter: Filter,
}

impl DeleteManyInputType {
    pub fn new(name: String, filter: Arc<FilterType>) -> Self {
        let filter_field = MetaInputValue::new(INPUT_FIELD_FILTER, format!("{}!", filter.name()))
            .with_description("Filter to find records to delete");

        Self {
            entity: filter.entity(),
            input_object: InputObjectType::new(name, [filter_field]),
            filter,
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

    pub fn filter_type(&self) -> &Arc<FilterType> {
        &self.filter
    }

    /// Validates a caller-supplied input value.
    ///
    /// `filter` must be a non-empty object conforming to the filter type. Every problem is
    /// reported, not only the first.
    pub fn parse(&self, value: &Value) -> std::result::Result<DeleteManyInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let Some(object) = value.as_object() else {
            errors.push("input", ValidationErrorKind::ExpectedObject(json_type(value)));
            return Err(errors);
        };

        for key in object.keys().filter(|key| *key != INPUT_FIELD_FILTER) {
            errors.push(key.as_str(), ValidationErrorKind::UnknownField(key.clone()));
        }

        let filter = match object.get(INPUT_FIELD_FILTER) {
            None | Some(Value::Null) => {
                errors.push(INPUT_FIELD_FILTER, ValidationErrorKind::Required);
                Filter::default()
            }
            Some(Value::Object(filter)) if filter.is_empty() => {
                errors.push(INPUT_FIELD_FILTER, ValidationErrorKind::EmptyObject);
                Filter::default()
            }
            Some(Value::Object(filter)) => self.filter.parse_object(filter, INPUT_FIELD_FILTER, &mut errors),
            Some(other) => {
                errors.push(INPUT_FIELD_FILTER, ValidationErrorKind::ExpectedObject(json_type(other)));
                Filter::default()
            }
        };

        errors.into_result(DeleteManyInput { filter })
    }
}

/// Returns the delete-many input type of `E` from the process-wide storage, generating it
/// on first use.
pub fn delete_many_input_type<E: Entity>(opts: &ResolverOpts) -> Result<Arc<DeleteManyInputType>> {
    metadata_storage().delete_many_input_type::<E>(opts, &DefaultFilterTypes)
}

impl MetadataStorage {
    /// Returns the delete-many input type of `E`, generating it on first use.
    ///
    /// Once generated, the same type is returned for every later call regardless of `opts`.
    pub fn delete_many_input_type<E: Entity>(
        &self,
        opts: &ResolverOpts,
        filter_types: &dyn FilterTypeFactory,
    ) -> Result<Arc<DeleteManyInputType>> {
        let entity = EntityId::of::<E>();

        if let Some(existing) = self.get_delete_many_input_type(entity) {
            tracing::trace!(entity = E::NAME, "delete many input type already generated");
            return Ok(existing);
        }

        let names = DtoNames::new::<E>(opts)?;
        let descriptor = EntityDescriptor::of::<E>();
        let filter = filter_types.filter_type(self, &descriptor, opts.federation_prefix.as_deref())?;

        let input = DeleteManyInputType::new(names.delete_many_input(), filter);

        tracing::debug!(entity = E::NAME, type_name = input.name(), "generated delete many input type");

        self.add_delete_many_input_type(entity, input)
    }
}
