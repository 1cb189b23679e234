//! Entities are the plain data shapes exposed through the API.
//!
//! An entity is any `'static` Rust type implementing [`Entity`]. Generated types are
//! keyed by the entity's [`EntityId`], which is derived from its `TypeId`, so two
//! entities sharing a GraphQL name still get separate generated types.

use std::any::TypeId;

use serde_json::Value;

/// A domain type whose records can be filtered and deleted through the API.
pub trait Entity: 'static {
    /// The GraphQL object name of the entity, e.g. `Author`.
    const NAME: &'static str;

    fn fields() -> Vec<EntityField>;
}

/// Identity of an entity type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(TypeId);

impl EntityId {
    pub fn of<E: Entity>() -> Self {
        Self(TypeId::of::<E>())
    }
}

/// The scalar types an entity field can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum ScalarKind {
    #[strum(serialize = "ID")]
    Id,
    String,
    Int,
    Float,
    Boolean,
    DateTime,
}

impl ScalarKind {
    /// Name of the comparison input type used to filter a field of this scalar.
    pub fn comparison_type_name(self) -> &'static str {
        match self {
            ScalarKind::Id => "IDFilterComparison",
            ScalarKind::String => "StringFieldComparison",
            ScalarKind::Int => "IntFieldComparison",
            ScalarKind::Float => "FloatFieldComparison",
            ScalarKind::Boolean => "BooleanFieldComparison",
            ScalarKind::DateTime => "DateFieldComparison",
        }
    }

    /// `like`-style operators only make sense on these.
    pub fn is_string_like(self) -> bool {
        matches!(self, ScalarKind::Id | ScalarKind::String)
    }

    /// Checks the JSON shape of a single operand.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ScalarKind::Id => value.is_string() || value.is_i64() || value.is_u64(),
            ScalarKind::String | ScalarKind::DateTime => value.is_string(),
            ScalarKind::Int => value.is_i64() || value.is_u64(),
            ScalarKind::Float => value.is_number(),
            ScalarKind::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityField {
    pub name: &'static str,
    pub scalar: ScalarKind,
    pub nullable: bool,
    pub filterable: bool,
}

impl EntityField {
    pub fn new(name: &'static str, scalar: ScalarKind) -> Self {
        Self {
            name,
            scalar,
            nullable: false,
            filterable: false,
        }
    }

    /// Shorthand for a non-null field that can be used in filters.
    pub fn filterable(name: &'static str, scalar: ScalarKind) -> Self {
        Self::new(name, scalar).with_filterable(true)
    }

    #[must_use]
    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// A resolved view of an [`Entity`] implementation.
#[derive(Clone, Debug)]
pub struct EntityDescriptor {
    pub id: EntityId,
    pub name: &'static str,
    pub fields: Vec<EntityField>,
}

impl EntityDescriptor {
    pub fn of<E: Entity>() -> Self {
        Self {
            id: EntityId::of::<E>(),
            name: E::NAME,
            fields: E::fields(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&EntityField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn filterable_fields(&self) -> impl Iterator<Item = &EntityField> + '_ {
        self.fields.iter().filter(|field| field.filterable)
    }
}
