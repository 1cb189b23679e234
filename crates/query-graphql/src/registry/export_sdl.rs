use std::fmt::Write;

use super::{InputObjectType, MetaField, MetaInputValue, MetaType, ObjectType};

/// Renders the given types as GraphQL SDL, in iteration order.
pub fn export_sdl<'a>(types: impl IntoIterator<Item = &'a MetaType>) -> String {
    let mut sdl = String::new();

    for (idx, ty) in types.into_iter().enumerate() {
        if idx != 0 {
            writeln!(sdl).ok();
        }

        export_type(ty, &mut sdl);
    }

    sdl
}

fn export_type(ty: &MetaType, sdl: &mut String) {
    match ty {
        MetaType::InputObject(InputObjectType {
            name,
            description,
            input_fields,
        }) => {
            export_description(sdl, description.as_deref(), "");
            write!(sdl, "input {name}").ok();

            if !input_fields.is_empty() {
                writeln!(sdl, " {{").ok();
                for field in input_fields.values() {
                    export_description(sdl, field.description.as_deref(), "\t");
                    writeln!(sdl, "\t{}", export_input_value(field)).ok();
                }
                writeln!(sdl, "}}").ok();
            } else {
                writeln!(sdl).ok();
            }
        }
        MetaType::Object(ObjectType {
            name,
            description,
            fields,
        }) => {
            export_description(sdl, description.as_deref(), "");
            write!(sdl, "type {name}").ok();

            if !fields.is_empty() {
                writeln!(sdl, " {{").ok();
                export_fields(sdl, fields.values());
                writeln!(sdl, "}}").ok();
            } else {
                writeln!(sdl).ok();
            }
        }
    }
}

fn export_fields<'a, I: Iterator<Item = &'a MetaField>>(sdl: &mut String, it: I) {
    for field in it {
        export_description(sdl, field.description.as_deref(), "\t");

        if !field.args.is_empty() {
            write!(sdl, "\t{}(", field.name).ok();
            for (i, arg) in field.args.values().enumerate() {
                if i != 0 {
                    sdl.push_str(", ");
                }
                sdl.push_str(&export_input_value(arg));
            }
            writeln!(sdl, "): {}", field.ty).ok();
        } else {
            writeln!(sdl, "\t{}: {}", field.name, field.ty).ok();
        }
    }
}

fn export_description(sdl: &mut String, description: Option<&str>, indent: &str) {
    if let Some(description) = description {
        let description = description.replace('\n', &format!("\n{indent}"));
        writeln!(sdl, "{indent}\"\"\"\n{indent}{description}\n{indent}\"\"\"").ok();
    }
}

fn export_input_value(input_value: &MetaInputValue) -> String {
    format!("{}: {}", input_value.name, input_value.ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state() {
        assert!(export_sdl(Vec::<MetaType>::new().iter()).is_empty());
    }

    #[test]
    fn input_and_object_types() {
        let mut delete_one = MetaField::new("deleteOneAuthor", "AuthorDeleteResponse!");
        delete_one.description = Some(String::from("Delete one Author"));
        delete_one
            .args
            .insert("input".into(), MetaInputValue::new("input", "DeleteOneAuthorInput!"));

        let types = [
            MetaType::from(
                InputObjectType::new(
                    "DeleteOneAuthorInput",
                    [MetaInputValue::new("id", "ID!").with_description("The id of the record to delete.")],
                )
                .with_description(Some(String::from("Deletes a single Author"))),
            ),
            MetaType::from(ObjectType::new("Mutation", [delete_one])),
        ];

        let sdl = export_sdl(&types);

        let expected = concat!(
            "\"\"\"\n",
            "Deletes a single Author\n",
            "\"\"\"\n",
            "input DeleteOneAuthorInput {\n",
            "\t\"\"\"\n",
            "\tThe id of the record to delete.\n",
            "\t\"\"\"\n",
            "\tid: ID!\n",
            "}\n",
            "\n",
            "type Mutation {\n",
            "\t\"\"\"\n",
            "\tDelete one Author\n",
            "\t\"\"\"\n",
            "\tdeleteOneAuthor(input: DeleteOneAuthorInput!): AuthorDeleteResponse!\n",
            "}\n",
        );

        assert_eq!(sdl, expected);
    }

    #[test]
    fn multiline_descriptions_are_indented() {
        let input = InputObjectType::new(
            "AuthorFilter",
            [MetaInputValue::new("and", "[AuthorFilter!]").with_description("All of\nthese")],
        );

        let sdl = export_sdl(&[MetaType::from(input)]);

        assert_eq!(
            sdl,
            "input AuthorFilter {\n\t\"\"\"\n\tAll of\n\tthese\n\t\"\"\"\n\tand: [AuthorFilter!]\n}\n"
        );
    }
}
