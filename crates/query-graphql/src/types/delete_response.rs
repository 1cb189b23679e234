use crate::{
    entity::EntityDescriptor,
    registry::{MetaField, ObjectType},
};

pub const DELETE_MANY_RESPONSE_TYPE: &str = "DeleteManyResponse";
pub const OUTPUT_FIELD_DELETED_COUNT: &str = "deletedCount";

/// Payload of every delete-many mutation.
pub fn delete_many_response_type() -> ObjectType {
    let mut deleted_count = MetaField::new(OUTPUT_FIELD_DELETED_COUNT, "Int!");
    deleted_count.description = Some(String::from("The number of records deleted."));

    ObjectType::new(DELETE_MANY_RESPONSE_TYPE, [deleted_count])
}

/// Payload of a delete-one mutation: the deleted record, with every field nullable since
/// the record no longer exists.
pub fn delete_one_response_type(name: String, entity: &EntityDescriptor) -> ObjectType {
    let fields = entity
        .fields
        .iter()
        .map(|field| MetaField::new(field.name, field.scalar.to_string()));

    ObjectType::new(name, fields)
}
