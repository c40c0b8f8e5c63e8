use crate::decl::{Annotation, Node, NodeKind};
use crate::locate::SourceKind;

use super::{EnrichmentContext, Enricher};

/// Marks the request-construction method of a deprecated operation obsolete.
///
/// The message names the exact operation identifier:
/// `Operation {operationId} has been marked deprecated.`
///
/// An operation without an `operationId` is named by its verb key and path
/// template instead, e.g. `Operation Get /pets has been marked deprecated.`
/// (see [`OperationRef::identifier`](crate::locate::OperationRef::identifier)).
#[derive(Debug, Clone, Copy, Default)]
pub struct DeprecatedOperationEnricher;

impl Enricher for DeprecatedOperationEnricher {
    fn name(&self) -> &str {
        "DeprecatedOperationEnricher"
    }

    fn applies_to(&self, node: NodeKind, source: SourceKind) -> bool {
        node == NodeKind::Method && source == SourceKind::Operation
    }

    fn enrich(&self, node: Node, context: &EnrichmentContext<'_, '_>) -> Node {
        let Some(operation) = context.operation().filter(|op| op.operation.deprecated) else {
            return node;
        };
        match node {
            Node::Method(method) => Node::Method(method.with_annotation(Annotation::Obsolete {
                message: format!("Operation {} has been marked deprecated.", operation.identifier()),
            })),
            other => other,
        }
    }
}

/// Marks declarations generated from deprecated schemas obsolete.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeprecatedSchemaEnricher;

impl Enricher for DeprecatedSchemaEnricher {
    fn name(&self) -> &str {
        "DeprecatedSchemaEnricher"
    }

    fn applies_to(&self, node: NodeKind, source: SourceKind) -> bool {
        source == SourceKind::Schema
            && matches!(
                node,
                NodeKind::Class | NodeKind::Enum | NodeKind::Union | NodeKind::Alias
            )
    }

    fn enrich(&self, node: Node, context: &EnrichmentContext<'_, '_>) -> Node {
        if !context.schema().is_some_and(|schema| schema.deprecated) {
            return node;
        }
        match node {
            Node::Type(decl) => {
                let message = format!("Schema {} has been marked deprecated.", decl.name);
                Node::Type(decl.with_annotation(Annotation::Obsolete { message }))
            }
            other => other,
        }
    }
}
