//! `oneOf` / `anyOf` compositions as closed unions.
//!
//! Every branch must be a named reference. Each branch target is generated
//! before the union and contributes one variant wrapping exactly one value
//! of that type, in branch order. `anyOf` unions use the same mechanics but
//! are marked non-exclusive.

use std::collections::HashSet;
use std::sync::Arc;

use schemata_define::SchemaRef;

use crate::context::GenerationContext;
use crate::decl::{DeclarationBody, UnionVariant};
use crate::errors::GeneratorError;
use crate::locate::{ElementPath, LocatedElement};

/// Generates a union over `branches`, found under `keyword` at `element`.
///
/// ## Errors
///
/// `UnsupportedSchemaShape` naming the branch path when a branch is an
/// inline schema or repeats an earlier branch's type.
pub fn generate<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
    keyword: &str,
    branches: &'a [SchemaRef],
    exclusive: bool,
    dependencies: &mut Vec<ElementPath>,
) -> Result<DeclarationBody, GeneratorError> {
    let mut seen = HashSet::new();
    let mut variants = Vec::with_capacity(branches.len());

    for (index, branch) in branches.iter().enumerate() {
        let path = element.path().child(keyword).child(index.to_string());
        let Some((target, type_ref)) = context.require_reference(branch, &path, dependencies)? else {
            return Err(GeneratorError::UnsupportedSchemaShape {
                path,
                reason: "union branches must be named references".to_string(),
            });
        };

        let name = context.names().type_name(&target);
        if !seen.insert(name.clone()) {
            return Err(GeneratorError::UnsupportedSchemaShape {
                path,
                reason: format!("branch type {name} appears more than once"),
            });
        }
        variants.push(UnionVariant { name, type_ref });
    }

    Ok(DeclarationBody::Union { exclusive, variants })
}
