mod delete;

pub use self::delete::{delete_resolver, DeleteResolverSchema, INPUT_ARG_INPUT};
