use crate::{
    entity::{Entity, EntityDescriptor},
    metadata::metadata_storage,
    names::DtoNames,
    options::DeleteResolverOpts,
    registry::{MetaField, MetaInputValue},
    types::{
        delete_many_response_type, delete_one_response_type, DefaultFilterTypes, FilterTypeFactory,
        DELETE_MANY_RESPONSE_TYPE,
    },
    MetadataStorage, Result,
};

pub const INPUT_ARG_INPUT: &str = "input";

/// The mutation fields generated for deleting records of one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteResolverSchema {
    pub mutations: Vec<MetaField>,
}

impl DeleteResolverSchema {
    pub fn mutation(&self, name: &str) -> Option<&MetaField> {
        self.mutations.iter().find(|mutation| mutation.name == name)
    }
}

/// Registers the delete mutations of `E` in the process-wide storage.
pub fn delete_resolver<E: Entity>(opts: &DeleteResolverOpts) -> Result<DeleteResolverSchema> {
    metadata_storage().delete_resolver::<E>(opts, &DefaultFilterTypes)
}

impl MetadataStorage {
    /// Generates the input and payload types of the delete mutations of `E` and adds the
    /// enabled mutations to the root mutation type.
    ///
    /// ```graphql
    /// type Mutation {
    ///   deleteOneAuthor(input: DeleteOneAuthorInput!): AuthorDeleteResponse!
    ///   deleteManyAuthors(input: DeleteManyAuthorsInput!): DeleteManyResponse!
    /// }
    /// ```
    pub fn delete_resolver<E: Entity>(
        &self,
        opts: &DeleteResolverOpts,
        filter_types: &dyn FilterTypeFactory,
    ) -> Result<DeleteResolverSchema> {
        let mut schema = DeleteResolverSchema::default();

        if !opts.one_enabled() && !opts.many_enabled() {
            tracing::debug!(entity = E::NAME, "delete resolver disabled");
            return Ok(schema);
        }

        let resolver_opts = opts.resolver_opts();
        let names = DtoNames::new::<E>(&resolver_opts)?;

        let one_response = opts
            .one_enabled()
            .then(|| delete_one_response_type(names.delete_one_response(), &EntityDescriptor::of::<E>()));
        let many_response = opts.many_enabled().then(delete_many_response_type);

        for response in one_response.iter().chain(&many_response) {
            self.check_type(&response.clone().into())?;
        }

        // Everything that can fail runs before the payload types and mutations are registered.
        let many_input = if opts.many_enabled() {
            Some(self.delete_many_input_type::<E>(&resolver_opts, filter_types)?)
        } else {
            None
        };

        let one_input = if opts.one_enabled() {
            Some(self.delete_one_input_type::<E>(&resolver_opts)?)
        } else {
            None
        };

        if let (Some(input), Some(response)) = (one_input, one_response) {
            let response_type = format!("{}!", response.name);
            self.create_type(response)?;

            let name = opts.one.name.clone().unwrap_or_else(|| names.mutation_delete_one());
            let mut field = MetaField::new(name, response_type);

            field.description = Some(
                opts.one
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Delete one {} by id", names.base_name)),
            );

            field.args = [(
                INPUT_ARG_INPUT.to_string(),
                MetaInputValue::new(INPUT_ARG_INPUT, format!("{}!", input.name())),
            )]
            .into();

            schema.mutations.push(field);
        }

        if let (Some(input), Some(response)) = (many_input, many_response) {
            self.create_type(response)?;

            let name = opts.many.name.clone().unwrap_or_else(|| names.mutation_delete_many());
            let mut field = MetaField::new(name, format!("{DELETE_MANY_RESPONSE_TYPE}!"));

            field.description = Some(
                opts.many
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Delete multiple {} by a filter", names.plural_base_name)),
            );

            field.args = [(
                INPUT_ARG_INPUT.to_string(),
                MetaInputValue::new(INPUT_ARG_INPUT, format!("{}!", input.name())),
            )]
            .into();

            schema.mutations.push(field);
        }

        for mutation in &schema.mutations {
            self.push_mutation(mutation.clone());
        }

        Ok(schema)
    }
}
