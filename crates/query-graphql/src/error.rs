pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while generating schema types for an entity.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A derived or configured name is not usable as a GraphQL name.
    #[error("`{name}` is not a valid GraphQL name: {reason}")]
    InvalidTypeName { name: String, reason: &'static str },
    /// The filter type of an entity needs at least one filterable field.
    #[error("No fields found to create GraphQLFilter for {0}")]
    NoFilterableFields(String),
    /// Two entities produced different definitions under the same type name.
    #[error("A different type named {0} is already registered")]
    DuplicateTypeName(String),
    #[error("invalid resolver options: {0}")]
    Config(#[from] toml::de::Error),
}
