//! `allOf` compositions as single-base inheritance.
//!
//! Members are visited in declaration order. The first member that is a
//! named reference becomes the base class; that happens at most once.
//! Inline members contribute their properties directly. A named reference
//! seen after the base is fixed contributes nothing: its properties are
//! neither inherited nor flattened. The schema's own properties come before
//! any member's.

use std::sync::Arc;

use schemata_define::{SchemaNode, SchemaRef};
use tracing::debug;

use crate::context::GenerationContext;
use crate::decl::{DeclarationBody, TypeRef};
use crate::errors::GeneratorError;
use crate::locate::{ElementPath, LocatedElement};

use super::object;

pub fn generate<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
    node: &'a SchemaNode,
    dependencies: &mut Vec<ElementPath>,
) -> Result<DeclarationBody, GeneratorError> {
    let is_required = |member: &SchemaNode, key: &str| node.is_required(key) || member.is_required(key);

    let mut base: Option<TypeRef> = None;
    let mut properties = object::properties(context, element, &[], node, |key| node.is_required(key), dependencies)?;

    for (index, member) in node.all_of.iter().enumerate() {
        let index = index.to_string();
        match member {
            SchemaRef::Reference(reference) => {
                let from = element.path().child("allOf").child(index.as_str());
                if base.is_some() {
                    // dangling references still fail the element
                    context.resolver().resolve(reference, &from)?;
                    debug!(path = %from, %reference, "base already fixed, reference contributes nothing");
                    continue;
                }
                if let Some((_, type_ref)) = context.require_reference(member, &from, dependencies)? {
                    base = Some(type_ref);
                }
            }
            SchemaRef::Inline(inline) => {
                let inline: &'a SchemaNode = inline;
                let flattened = object::properties(
                    context,
                    element,
                    &["allOf", index.as_str()],
                    inline,
                    |key| is_required(inline, key),
                    dependencies,
                )?;
                properties.extend(flattened);
            }
        }
    }

    Ok(DeclarationBody::Class { base, properties })
}
