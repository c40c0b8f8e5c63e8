//! Aliases for schemas that need a name but no structure of their own:
//! scalars, lists and components that are a bare reference.

use std::sync::Arc;

use schemata_define::{SchemaNode, SchemaRef, SchemaType};

use crate::context::GenerationContext;
use crate::decl::{DeclarationBody, TypeRef};
use crate::errors::GeneratorError;
use crate::locate::{ElementPath, LocatedElement};

/// Aliases a scalar or list schema.
pub fn generate<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
    node: &'a SchemaNode,
    dependencies: &mut Vec<ElementPath>,
) -> Result<DeclarationBody, GeneratorError> {
    let target = match node.schema_type {
        Some(SchemaType::Array) => {
            let item = match node.items.as_deref() {
                Some(items) => context.type_ref_for(element, &["items"], items, dependencies)?,
                None => TypeRef::Any,
            };
            TypeRef::List(Box::new(item))
        }
        Some(kind) => TypeRef::Primitive {
            kind,
            format: node.format.clone(),
        },
        None => TypeRef::Any,
    };
    Ok(DeclarationBody::Alias { target })
}

/// Aliases the canonical target of a component that is a bare reference.
pub fn generate_reference<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
    schema: &'a SchemaRef,
) -> Result<DeclarationBody, GeneratorError> {
    let Some(reference) = schema.as_reference() else {
        return Err(GeneratorError::UnsupportedSchemaShape {
            path: element.path().clone(),
            reason: "expected a reference".to_string(),
        });
    };
    let target = context.resolver().resolve(reference, element.path())?;
    Ok(DeclarationBody::Alias {
        target: context.named(&target),
    })
}
