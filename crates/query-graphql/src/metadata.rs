use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use indexmap::IndexMap;

use crate::{
    entity::EntityId,
    error::{Error, Result},
    registry::{export_sdl, MetaField, MetaType, ObjectType},
    types::{DeleteManyInputType, DeleteOneInputType, FilterType},
};

pub const MUTATION_TYPE: &str = "Mutation";

static METADATA_STORAGE: OnceLock<MetadataStorage> = OnceLock::new();

/// The process-wide storage used by [`crate::delete_many_input_type`].
pub fn metadata_storage() -> &'static MetadataStorage {
    METADATA_STORAGE.get_or_init(MetadataStorage::default)
}

type FilterKey = (EntityId, Option<String>);

/// Holds every type generated for the entities of a schema.
///
/// Generated types are insert-once: the first value added for a key is kept and returned
/// to every later caller, including callers that lost a race while building their own.
#[derive(Debug, Default)]
pub struct MetadataStorage {
    types: RwLock<IndexMap<String, MetaType>>,
    filter_types: RwLock<HashMap<FilterKey, Arc<FilterType>>>,
    delete_many_input_types: RwLock<HashMap<EntityId, Arc<DeleteManyInputType>>>,
    delete_one_input_types: RwLock<HashMap<EntityId, Arc<DeleteOneInputType>>>,
}

impl MetadataStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_delete_many_input_type(&self, entity: EntityId) -> Option<Arc<DeleteManyInputType>> {
        read(&self.delete_many_input_types).get(&entity).cloned()
    }

    pub fn add_delete_many_input_type(
        &self,
        entity: EntityId,
        input: DeleteManyInputType,
    ) -> Result<Arc<DeleteManyInputType>> {
        let schema = input.input_object().clone().into();
        self.publish(&self.delete_many_input_types, entity, input, schema)
    }

    pub fn get_delete_one_input_type(&self, entity: EntityId) -> Option<Arc<DeleteOneInputType>> {
        read(&self.delete_one_input_types).get(&entity).cloned()
    }

    pub fn add_delete_one_input_type(
        &self,
        entity: EntityId,
        input: DeleteOneInputType,
    ) -> Result<Arc<DeleteOneInputType>> {
        let schema = input.input_object().clone().into();
        self.publish(&self.delete_one_input_types, entity, input, schema)
    }

    pub fn get_filter_type(&self, entity: EntityId, prefix: Option<&str>) -> Option<Arc<FilterType>> {
        read(&self.filter_types)
            .get(&(entity, prefix.map(ToOwned::to_owned)))
            .cloned()
    }

    pub fn add_filter_type(&self, entity: EntityId, prefix: Option<&str>, filter: FilterType) -> Result<Arc<FilterType>> {
        let schema = filter.input_object().clone().into();
        let key = (entity, prefix.map(ToOwned::to_owned));

        self.publish(&self.filter_types, key, filter, schema)
    }

    /// Registers a schema type unless an identical one exists already.
    ///
    /// Returns whether the type was added, or `DuplicateTypeName` if the name is taken by a
    /// different definition.
    pub fn create_type(&self, ty: impl Into<MetaType>) -> Result<bool> {
        register_type(&mut write(&self.types), ty.into())
    }

    /// Fails with `DuplicateTypeName` if `ty` could not be registered as is.
    pub fn check_type(&self, ty: &MetaType) -> Result<()> {
        match read(&self.types).get(ty.name()) {
            Some(registered) if registered != ty => Err(Error::DuplicateTypeName(ty.name().to_string())),
            _ => Ok(()),
        }
    }

    /// Caches `value` under `key` and registers its schema type, unless another value was
    /// published for `key` first. The first published value is returned to every caller.
    fn publish<K, V>(&self, map: &RwLock<HashMap<K, Arc<V>>>, key: K, value: V, schema: MetaType) -> Result<Arc<V>>
    where
        K: Eq + Hash,
    {
        // Lock order: types, then the cache map.
        let mut types = write(&self.types);
        let mut map = write(map);

        if let Some(existing) = map.get(&key) {
            return Ok(Arc::clone(existing));
        }

        register_type(&mut types, schema)?;

        let value = Arc::new(value);
        map.insert(key, Arc::clone(&value));

        Ok(value)
    }

    pub fn lookup_type(&self, name: &str) -> Option<MetaType> {
        read(&self.types).get(name).cloned()
    }

    /// Adds or replaces a field of the root mutation type.
    pub fn push_mutation(&self, mutation: MetaField) {
        let mut types = write(&self.types);

        let entry = types
            .entry(MUTATION_TYPE.to_string())
            .or_insert_with(|| ObjectType::new(MUTATION_TYPE, []).into());

        match entry {
            MetaType::Object(object) => {
                tracing::debug!(field = %mutation.name, "registering mutation");
                object.fields.insert(mutation.name.clone(), mutation);
            }
            MetaType::InputObject(_) => {
                tracing::warn!("{MUTATION_TYPE} is registered as an input type, ignoring {}", mutation.name);
            }
        }
    }

    /// A snapshot of every registered type, in registration order.
    pub fn types(&self) -> Vec<MetaType> {
        read(&self.types).values().cloned().collect()
    }

    pub fn export_sdl(&self) -> String {
        export_sdl(read(&self.types).values())
    }
}

fn register_type(types: &mut IndexMap<String, MetaType>, ty: MetaType) -> Result<bool> {
    match types.get(ty.name()) {
        Some(registered) if *registered == ty => Ok(false),
        Some(_) => {
            tracing::warn!(type_name = ty.name(), "a different type with this name is already registered");
            Err(Error::DuplicateTypeName(ty.name().to_string()))
        }
        None => {
            tracing::debug!(type_name = ty.name(), "registering type");
            types.insert(ty.name().to_string(), ty);
            Ok(true)
        }
    }
}

// Writers never leave the maps in a partial state, so a poisoned lock is still usable.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
