//! Schema generator dispatch.
//!
//! Every schema position is classified into exactly one [`SchemaShape`] and
//! handed to the generator for that shape. Classification precedence:
//!
//! 1. `$ref` → [`SchemaShape::Reference`] (alias of the canonical target)
//! 2. `allOf` → single-base inheritance ([`all_of`])
//! 3. `oneOf` → exclusive union ([`one_of`])
//! 4. `anyOf` → non-exclusive union ([`one_of`])
//! 5. `type: object`, or untyped with properties → class ([`object`])
//! 6. any other schema with literals → enumeration ([`enumeration`])
//! 7. `type: array` → list alias ([`alias`])
//! 8. everything else → scalar alias ([`alias`])

pub mod alias;
pub mod all_of;
pub mod enumeration;
pub mod object;
pub mod one_of;

use std::sync::Arc;

use schemata_define::{SchemaNode, SchemaRef, SchemaType};

use crate::context::{GeneratedElement, GenerationContext};
use crate::errors::GeneratorError;
use crate::locate::LocatedElement;

/// The structural shape of a schema position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaShape {
    Reference,
    AllOf,
    OneOf,
    AnyOf,
    Object,
    /// Enumeration with its underlying kind.
    Enum(SchemaType),
    Array,
    /// Scalar; `None` when the schema declares no type.
    Primitive(Option<SchemaType>),
}

impl SchemaShape {
    /// Classifies a schema position.
    ///
    /// ## Examples
    ///
    /// ```
    /// use schemata_define::{SchemaNode, SchemaRef, SchemaType};
    /// use schemata_gen::schema::SchemaShape;
    ///
    /// let color = SchemaRef::inline(SchemaNode::string_enum(["Red", "Green"]));
    /// assert_eq!(SchemaShape::classify(&color), SchemaShape::Enum(SchemaType::String));
    /// assert_eq!(SchemaShape::classify(&SchemaRef::reference("Pet")), SchemaShape::Reference);
    /// ```
    pub fn classify(schema: &SchemaRef) -> Self {
        match schema {
            SchemaRef::Reference(_) => SchemaShape::Reference,
            SchemaRef::Inline(node) => Self::of_node(node),
        }
    }

    /// Classifies an inline schema.
    pub fn of_node(node: &SchemaNode) -> Self {
        let is_object = node.schema_type == Some(SchemaType::Object)
            || (node.schema_type.is_none() && !node.properties.is_empty());

        if !node.all_of.is_empty() {
            SchemaShape::AllOf
        } else if !node.one_of.is_empty() {
            SchemaShape::OneOf
        } else if !node.any_of.is_empty() {
            SchemaShape::AnyOf
        } else if is_object {
            SchemaShape::Object
        } else if !node.enum_values.is_empty() {
            SchemaShape::Enum(enumeration::underlying_kind(node))
        } else if node.schema_type == Some(SchemaType::Array) {
            SchemaShape::Array
        } else {
            SchemaShape::Primitive(node.schema_type)
        }
    }

    /// Whether an inline schema of this shape becomes a declaration of its
    /// own rather than a scalar or list type.
    pub fn is_declared(self) -> bool {
        !matches!(self, SchemaShape::Array | SchemaShape::Primitive(_))
    }
}

/// Generates the declaration for the schema at `element`.
pub fn generate<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
    shape: SchemaShape,
) -> Result<GeneratedElement, GeneratorError> {
    let Some(schema) = element.schema() else {
        return Err(GeneratorError::UnsupportedSchemaShape {
            path: element.path().clone(),
            reason: "element is not a schema".to_string(),
        });
    };

    let mut dependencies = Vec::new();
    let body = match (shape, schema) {
        (SchemaShape::Reference, _) => alias::generate_reference(context, element, schema)?,
        (_, SchemaRef::Reference(_)) => {
            return Err(GeneratorError::UnsupportedSchemaShape {
                path: element.path().clone(),
                reason: format!("a reference cannot have the {shape:?} shape"),
            });
        }
        (SchemaShape::AllOf, SchemaRef::Inline(node)) => {
            all_of::generate(context, element, node, &mut dependencies)?
        }
        (SchemaShape::OneOf, SchemaRef::Inline(node)) => {
            one_of::generate(context, element, "oneOf", &node.one_of, true, &mut dependencies)?
        }
        (SchemaShape::AnyOf, SchemaRef::Inline(node)) => {
            one_of::generate(context, element, "anyOf", &node.any_of, false, &mut dependencies)?
        }
        (SchemaShape::Object, SchemaRef::Inline(node)) => {
            object::generate(context, element, node, &mut dependencies)?
        }
        (SchemaShape::Enum(underlying), SchemaRef::Inline(node)) => {
            enumeration::generate(context, element, node, underlying)?
        }
        (SchemaShape::Array | SchemaShape::Primitive(_), SchemaRef::Inline(node)) => {
            alias::generate(context, element, node, &mut dependencies)?
        }
    };

    context.finish(element, body, dependencies)
}
