use std::sync::OnceLock;

use inflector::Inflector;
use regex::Regex;

use crate::{entity::Entity, Error, ResolverOpts};

static NAME_REGEX: OnceLock<Regex> = OnceLock::new();

/// Checks that `name` can be used as (part of) a GraphQL type or field name.
pub fn validate_graphql_name(name: &str) -> Result<(), Error> {
    let name_regex = NAME_REGEX.get_or_init(|| Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").expect("must be a valid regex"));

    if name.is_empty() {
        return Err(Error::InvalidTypeName {
            name: name.to_string(),
            reason: "names cannot be empty",
        });
    }

    if !name_regex.is_match(name) {
        return Err(Error::InvalidTypeName {
            name: name.to_string(),
            reason: "names must be alphanumeric and cannot start with a number",
        });
    }

    Ok(())
}

/// The names every generated type of an entity is derived from.
///
/// CONVENTIONS:
///     - The base name is the entity name unless `dto_name` overrides it.
///     - Plural names are used for types acting on many records, e.g. `DeleteManyAuthorsInput`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtoNames {
    pub base_name: String,
    pub base_name_lower: String,
    pub plural_base_name: String,
    pub plural_base_name_lower: String,
}

impl DtoNames {
    pub fn new<E: Entity>(opts: &ResolverOpts) -> Result<Self, Error> {
        Self::from_base_name(opts.dto_name.as_deref().unwrap_or(E::NAME))
    }

    pub fn from_base_name(base_name: &str) -> Result<Self, Error> {
        validate_graphql_name(base_name)?;

        let base_name_lower = lower_case_first(base_name);

        Ok(Self {
            plural_base_name: pluralize(base_name),
            plural_base_name_lower: pluralize(&base_name_lower),
            base_name: base_name.to_string(),
            base_name_lower,
        })
    }

    pub fn delete_many_input(&self) -> String {
        format!("DeleteMany{}Input", self.plural_base_name)
    }

    pub fn delete_one_input(&self) -> String {
        format!("DeleteOne{}Input", self.base_name)
    }

    pub fn delete_one_response(&self) -> String {
        format!("{}DeleteResponse", self.base_name)
    }

    pub fn mutation_delete_one(&self) -> String {
        format!("deleteOne{}", self.base_name)
    }

    pub fn mutation_delete_many(&self) -> String {
        format!("deleteMany{}", self.plural_base_name)
    }

    pub fn filter(&self, prefix: Option<&str>) -> String {
        format!("{}{}Filter", prefix.unwrap_or_default(), self.base_name)
    }
}

/// Nouns whose plural Inflector gets wrong inside PascalCase names (`Persons`, `Childs`).
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Pluralizes the last word of a PascalCase or camelCase name.
fn pluralize(name: &str) -> String {
    let last_word_start = name
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_uppercase())
        .map_or(0, |(idx, _)| idx);

    let (head, last_word) = name.split_at(last_word_start);

    let irregular = IRREGULAR_PLURALS
        .iter()
        .find(|(singular, _)| last_word.eq_ignore_ascii_case(singular));

    match irregular {
        Some((_, plural)) if last_word.starts_with(char::is_uppercase) => {
            format!("{head}{}", upper_case_first(plural))
        }
        Some((_, plural)) => format!("{head}{plural}"),
        None => name.to_plural(),
    }
}

fn upper_case_first(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_case_first(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Author;

    impl Entity for Author {
        const NAME: &'static str = "Author";

        fn fields() -> Vec<crate::EntityField> {
            Vec::new()
        }
    }

    #[test]
    fn entity_names() {
        let names = DtoNames::new::<Author>(&ResolverOpts::default()).unwrap();

        assert_eq!(
            names,
            DtoNames {
                base_name: "Author".into(),
                base_name_lower: "author".into(),
                plural_base_name: "Authors".into(),
                plural_base_name_lower: "authors".into(),
            }
        );

        assert_eq!(names.delete_many_input(), "DeleteManyAuthorsInput");
        assert_eq!(names.delete_one_input(), "DeleteOneAuthorInput");
        assert_eq!(names.mutation_delete_many(), "deleteManyAuthors");
        assert_eq!(names.filter(None), "AuthorFilter");
        assert_eq!(names.filter(Some("Library")), "LibraryAuthorFilter");
    }

    #[test]
    fn dto_name_overrides_the_entity_name() {
        let opts = ResolverOpts::default().with_dto_name("Writer");
        let names = DtoNames::new::<Author>(&opts).unwrap();

        assert_eq!(names.plural_base_name, "Writers");
        assert_eq!(names.delete_many_input(), "DeleteManyWritersInput");
    }

    #[rstest::rstest]
    #[case("Category", "Categories", "categories")]
    #[case("TodoItem", "TodoItems", "todoItems")]
    #[case("Person", "People", "people")]
    #[case("Child", "Children", "children")]
    #[case("SalesPerson", "SalesPeople", "salesPeople")]
    fn pluralization(#[case] base_name: &str, #[case] plural: &str, #[case] plural_lower: &str) {
        let names = DtoNames::from_base_name(base_name).unwrap();

        assert_eq!(names.plural_base_name, plural);
        assert_eq!(names.plural_base_name_lower, plural_lower);
    }

    #[rstest::rstest]
    #[case("")]
    #[case("1Author")]
    #[case("Author Book")]
    #[case("Auteur-é")]
    fn invalid_names(#[case] name: &str) {
        assert!(matches!(
            DtoNames::from_base_name(name),
            Err(Error::InvalidTypeName { .. })
        ));
    }
}
