//! Object schemas become classes with one property per schema property.

use std::sync::Arc;

use schemata_define::SchemaNode;

use crate::context::GenerationContext;
use crate::decl::{DeclarationBody, PropertyDeclaration};
use crate::errors::GeneratorError;
use crate::locate::{ElementPath, LocatedElement};
use crate::names::NameKind;

/// Generates a base-less class for `node`.
pub fn generate<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
    node: &'a SchemaNode,
    dependencies: &mut Vec<ElementPath>,
) -> Result<DeclarationBody, GeneratorError> {
    let properties = properties(context, element, &[], node, |key| node.is_required(key), dependencies)?;
    Ok(DeclarationBody::Class {
        base: None,
        properties,
    })
}

/// One property declaration per property of `node`, in declaration order.
///
/// `prefix` locates `node` below `element`; property schemas live at
/// `{prefix}/properties/{key}`.
pub fn properties<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
    prefix: &[&str],
    node: &'a SchemaNode,
    is_required: impl Fn(&str) -> bool,
    dependencies: &mut Vec<ElementPath>,
) -> Result<Vec<PropertyDeclaration>, GeneratorError> {
    node.properties
        .iter()
        .map(|(key, schema)| {
            let segments: Vec<&str> = prefix
                .iter()
                .copied()
                .chain(["properties", key.as_str()])
                .collect();
            let type_ref = context.type_ref_for(element, &segments, schema, dependencies)?;

            Ok(PropertyDeclaration {
                name: context.names().format(NameKind::Property, key),
                raw_name: key.clone(),
                type_ref,
                required: is_required(key),
            })
        })
        .collect()
}
