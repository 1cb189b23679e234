//! GraphQL input types generated from entities.
//!
//! The central operation is [`delete_many_input_type`], which returns the
//! `DeleteMany<Entities>Input` type of an entity: a single required `filter` field typed
//! by the entity's generated filter type. Generated types are memoized per entity in a
//! [`MetadataStorage`], so every caller observes the same instance.
//!
//! Entities implement [`Entity`]; the filter type of an entity lists its filterable fields
//! and is produced by a [`FilterTypeFactory`]. Every generated type carries its schema
//! description ([`registry::InputObjectType`]) and can be rendered as SDL through
//! [`MetadataStorage::export_sdl`].

mod entity;
mod error;
mod metadata;
mod names;
mod options;
pub mod registry;
pub mod resolvers;
pub mod types;
mod validation;

pub use self::{
    entity::{Entity, EntityDescriptor, EntityField, EntityId, ScalarKind},
    error::{Error, Result},
    metadata::{metadata_storage, MetadataStorage, MUTATION_TYPE},
    names::{validate_graphql_name, DtoNames},
    options::{DeleteResolverOpts, ResolverMethodOpts, ResolverOpts},
    resolvers::{delete_resolver, DeleteResolverSchema},
    types::{delete_many_input_type, DeleteManyInput, DeleteManyInputType, Filter, FilterType, FilterTypeFactory},
    validation::{ValidationError, ValidationErrorKind, ValidationErrors},
};
