//! The four-step request-construction method.

use crate::config::ProtocolTypes;
use crate::decl::{MethodDeclaration, RequestStep, UriSource};
use crate::names::{NameKind, NameFormatterSelector};

/// Builds the request-construction method for an operation declared under
/// `verb_key`.
///
/// Steps, in order: create the message from the mapped verb and the
/// request's own URI, populate headers, assign content, return the message.
///
/// ## Examples
///
/// ```
/// use schemata_gen::config::ProtocolTypes;
/// use schemata_gen::decl::{RequestStep, Verb};
/// use schemata_gen::names::NameFormatterSelector;
/// use schemata_gen::request::build_request_method;
///
/// let protocol = ProtocolTypes::default();
/// let method = build_request_method("Purge", &protocol, &NameFormatterSelector::default());
///
/// assert_eq!(method.name, "BuildRequest");
/// assert!(matches!(
///     &method.steps[0],
///     RequestStep::CreateMessage { verb: Verb::Custom(v), .. } if v == "PURGE"
/// ));
/// assert_eq!(method.steps[3], RequestStep::Return);
/// ```
pub fn build_request_method(
    verb_key: &str,
    protocol: &ProtocolTypes,
    formatters: &NameFormatterSelector,
) -> MethodDeclaration {
    MethodDeclaration {
        name: formatters.format(NameKind::Method, "build request"),
        annotations: Vec::new(),
        steps: vec![
            RequestStep::CreateMessage {
                verb: protocol.verb(verb_key),
                uri: UriSource::BuildUri,
            },
            RequestStep::AddHeaders,
            RequestStep::AssignContent,
            RequestStep::Return,
        ],
    }
}
