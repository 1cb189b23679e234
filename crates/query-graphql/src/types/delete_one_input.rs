use std::sync::Arc;

use serde_json::Value;

use crate::{
    entity::{Entity, EntityId, ScalarKind},
    names::DtoNames,
    registry::{InputObjectType, MetaInputValue},
    validation::{json_type, ValidationErrorKind, ValidationErrors},
    MetadataStorage, ResolverOpts, Result,
};

pub const INPUT_FIELD_ID: &str = "id";

/// The generated `DeleteOne<Entity>Input` type, selecting a single record by id.
#[derive(Debug)]
pub struct DeleteOneInputType {
    entity: EntityId,
    input_object: InputObjectType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteOneInput {
    pub id: String,
}

impl DeleteOneInputType {
    pub fn new(entity: EntityId, name: String) -> Self {
        let id = MetaInputValue::new(INPUT_FIELD_ID, "ID!").with_description("The id of the record to delete.");

        Self {
            entity,
            input_object: InputObjectType::new(name, [id]),
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

    pub fn parse(&self, value: &Value) -> std::result::Result<DeleteOneInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let Some(object) = value.as_object() else {
            errors.push("input", ValidationErrorKind::ExpectedObject(json_type(value)));
            return Err(errors);
        };

        for key in object.keys().filter(|key| *key != INPUT_FIELD_ID) {
            errors.push(key.as_str(), ValidationErrorKind::UnknownField(key.clone()));
        }

        let id = match object.get(INPUT_FIELD_ID) {
            None | Some(Value::Null) => {
                errors.push(INPUT_FIELD_ID, ValidationErrorKind::Required);
                String::new()
            }
            Some(Value::String(id)) => id.clone(),
            Some(id) if ScalarKind::Id.accepts(id) => id.to_string(),
            Some(other) => {
                errors.push(
                    INPUT_FIELD_ID,
                    ValidationErrorKind::InvalidOperand {
                        expected: String::from("a value of type ID"),
                        found: json_type(other),
                    },
                );
                String::new()
            }
        };

        errors.into_result(DeleteOneInput { id })
    }
}

impl MetadataStorage {
    /// Returns the delete-one input type of `E`, generating it on first use.
    pub fn delete_one_input_type<E: Entity>(&self, opts: &ResolverOpts) -> Result<Arc<DeleteOneInputType>> {
        let entity = EntityId::of::<E>();

        if let Some(existing) = self.get_delete_one_input_type(entity) {
            return Ok(existing);
        }

        let names = DtoNames::new::<E>(opts)?;
        let input = DeleteOneInputType::new(entity, names.delete_one_input());

        tracing::debug!(entity = E::NAME, type_name = input.name(), "generated delete one input type");

        self.add_delete_one_input_type(entity, input)
    }
}
