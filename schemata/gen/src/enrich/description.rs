use crate::decl::{Annotation, Node, NodeKind};
use crate::locate::{ElementRef, SourceKind};

use super::{EnrichmentContext, Enricher};

/// Copies schema, operation and tag descriptions into documentation.
///
/// Runs early (priority -10) so later stages see documented declarations.
/// Type declarations receive doc lines; request methods receive
/// [`Annotation::Doc`] markers carrying the operation summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionEnricher;

impl DescriptionEnricher {
    fn description<'a>(context: &EnrichmentContext<'_, 'a>) -> Option<&'a str> {
        match context.element().element() {
            ElementRef::Schema(_) => context.schema().and_then(|s| s.description.as_deref()),
            ElementRef::Operation(op) => op
                .operation
                .description
                .as_deref()
                .or(op.operation.summary.as_deref()),
            ElementRef::Response(..) => None,
            ElementRef::Tag(tag) => tag.description.as_deref(),
        }
    }
}

impl Enricher for DescriptionEnricher {
    fn name(&self) -> &str {
        "DescriptionEnricher"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn applies_to(&self, node: NodeKind, _source: SourceKind) -> bool {
        node != NodeKind::Response
    }

    fn enrich(&self, node: Node, context: &EnrichmentContext<'_, '_>) -> Node {
        match node {
            Node::Type(decl) => {
                let Some(description) = Self::description(context) else {
                    return Node::Type(decl);
                };
                let decl = description
                    .lines()
                    .fold(decl, |decl, line| decl.with_doc(line.trim_end()));
                Node::Type(decl)
            }
            Node::Method(method) => {
                let summary = context.operation().and_then(|op| op.operation.summary.as_deref());
                match summary {
                    Some(summary) => Node::Method(method.with_annotation(Annotation::Doc(summary.to_string()))),
                    None => Node::Method(method),
                }
            }
        }
    }
}
