//! Enumerations: one member per literal, in declaration order.

use std::collections::HashSet;
use std::sync::Arc;

use schemata_define::{EnumValue, SchemaNode, SchemaType};

use crate::context::GenerationContext;
use crate::decl::{DeclarationBody, EnumMember};
use crate::errors::GeneratorError;
use crate::locate::LocatedElement;
use crate::names::NameKind;

/// The declared type, else the kind of the first non-null literal, else
/// string.
pub fn underlying_kind(node: &SchemaNode) -> SchemaType {
    node.schema_type
        .or_else(|| node.enum_values.iter().find_map(EnumValue::schema_type))
        .unwrap_or(SchemaType::String)
}

/// The raw key a literal's member name is formatted from.
fn member_key(value: &EnumValue) -> String {
    match value {
        EnumValue::Integer(i) if *i < 0 => format!("minus {}", i.unsigned_abs()),
        EnumValue::Float(x) => x.to_string().replace('-', "minus ").replace('.', " point "),
        other => other.to_string(),
    }
}

fn accepts(underlying: SchemaType, value: &EnumValue) -> bool {
    match (underlying, value.schema_type()) {
        (_, None) => true,
        (SchemaType::Number, Some(SchemaType::Integer)) => true,
        (expected, Some(actual)) => expected == actual,
    }
}

/// ## Errors
///
/// `UnsupportedSchemaShape` when a literal does not match the underlying
/// kind or two literals format to the same member name.
pub fn generate<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
    node: &'a SchemaNode,
    underlying: SchemaType,
) -> Result<DeclarationBody, GeneratorError> {
    let mut seen = HashSet::new();
    let mut members = Vec::with_capacity(node.enum_values.len());

    for value in &node.enum_values {
        if !accepts(underlying, value) {
            return Err(GeneratorError::UnsupportedSchemaShape {
                path: element.path().clone(),
                reason: format!("literal {value} is not a {underlying}"),
            });
        }

        let name = context.names().format(NameKind::EnumMember, &member_key(value));
        if !seen.insert(name.clone()) {
            return Err(GeneratorError::UnsupportedSchemaShape {
                path: element.path().clone(),
                reason: format!("literal {value} collides with another member named {name}"),
            });
        }
        members.push(EnumMember {
            name,
            value: value.clone(),
        });
    }

    Ok(DeclarationBody::Enum { underlying, members })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::Compiler;
    use crate::config::GeneratorSettings;
    use crate::decl::Annotation;
    use crate::test_utils::declaration;
    use schemata_define::ApiDocument;

    #[test]
    fn color_has_three_members_and_string_conversion() {
        let doc = ApiDocument::new("Paint").with_schema("Color", SchemaNode::string_enum(["Red", "Green", "Blue"]));
        let output = Compiler::new(&doc, GeneratorSettings::new("paint")).unwrap().compile();

        let color = declaration(&output, "Color");
        let DeclarationBody::Enum { underlying, members } = &color.body else {
            panic!("Expected enum, got: {:?}", color.body);
        };
        assert_eq!(*underlying, SchemaType::String);
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Red", "Green", "Blue"]);
        assert!(color.has_annotation(|a| *a == Annotation::StringConversion));
    }

    #[test]
    fn integer_enum_has_no_string_conversion() {
        let doc = ApiDocument::new("Codes").with_schema("Level", SchemaNode::integer_enum([1, 2, -3]));
        let output = Compiler::new(&doc, GeneratorSettings::new("codes")).unwrap().compile();

        let level = declaration(&output, "Level");
        assert!(!level.has_annotation(|a| *a == Annotation::StringConversion));
        let DeclarationBody::Enum { members, .. } = &level.body else {
            panic!("Expected enum");
        };
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Value1", "Value2", "Minus3"]);
    }

    #[test]
    fn mismatched_literal_is_rejected() {
        let mut node = SchemaNode::integer_enum([1]);
        node.enum_values.push(EnumValue::from("two"));
        let doc = ApiDocument::new("Codes").with_schema("Level", node);
        let output = Compiler::new(&doc, GeneratorSettings::new("codes")).unwrap().compile();

        assert_eq!(output.failures.len(), 1);
        assert!(output.declarations.is_empty());
    }

    #[test]
    fn underlying_kind_defaults_to_string() {
        let mut node = SchemaNode::default();
        node.enum_values = vec![EnumValue::Null];
        assert_eq!(underlying_kind(&node), SchemaType::String);
    }
}
