//! Response types: one variant per declared status.

use std::sync::Arc;

use crate::context::{GeneratedElement, GenerationContext};
use crate::decl::{DeclarationBody, ResponseVariant};
use crate::errors::GeneratorError;
use crate::locate::{ElementRef, LocatedElement};
use crate::names::case::to_pascal_case;

/// The variant name for a status key.
///
/// ```
/// use schemata_gen::request::status_variant_name;
///
/// assert_eq!(status_variant_name("200"), "Status200");
/// assert_eq!(status_variant_name("default"), "Default");
/// ```
pub fn status_variant_name(status: &str) -> String {
    if status.eq_ignore_ascii_case("default") {
        "Default".to_string()
    } else {
        format!("Status{}", to_pascal_case(status))
    }
}

pub fn generate_responses<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
) -> Result<GeneratedElement, GeneratorError> {
    let ElementRef::Response(_, responses) = element.element() else {
        return Err(GeneratorError::UnsupportedSchemaShape {
            path: element.path().clone(),
            reason: "element is not a response map".to_string(),
        });
    };

    let mut dependencies = Vec::new();
    let variants = responses
        .iter()
        .map(|(status, response)| {
            let body = response
                .schema
                .as_ref()
                .map(|schema| context.type_ref_for(element, &[status.as_str()], schema, &mut dependencies))
                .transpose()?;
            Ok(ResponseVariant {
                name: status_variant_name(status),
                status: status.clone(),
                body,
            })
        })
        .collect::<Result<Vec<_>, GeneratorError>>()?;

    context.finish(element, DeclarationBody::Response { variants }, dependencies)
}
