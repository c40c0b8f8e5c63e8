//! Priority-ordered enrichment of generated declarations.
//!
//! After a generator builds a base declaration, the [`EnrichmentPipeline`]
//! folds it through every applicable [`Enricher`] in ascending priority
//! order (ties keep registration order). Each enricher receives the previous
//! stage's node plus an immutable [`EnrichmentContext`] and returns a
//! replacement node of the same structural kind. Enrichers are pure
//! functions of their inputs, so unrelated elements can be enriched in any
//! order or concurrently.
//!
//! ## Built-in enrichers
//!
//! | Enricher | Priority | Effect |
//! |----------|----------|--------|
//! | [`DescriptionEnricher`] | -10 | copies descriptions into docs |
//! | [`StringEnumEnricher`] | 0 | marks string-backed enums for string conversion |
//! | [`DeprecatedOperationEnricher`] | 0 | marks deprecated operations' request methods obsolete |
//! | [`DeprecatedSchemaEnricher`] | 0 | marks deprecated schemas obsolete |

mod deprecated;
mod description;
mod pipeline;
mod string_enum;

use std::fmt;
use std::sync::Arc;

use schemata_define::SchemaNode;

use crate::decl::{Node, NodeKind};
use crate::locate::{ElementPath, LocatedElement, OperationRef, SourceKind};

pub use deprecated::{DeprecatedOperationEnricher, DeprecatedSchemaEnricher};
pub use description::DescriptionEnricher;
pub use pipeline::EnrichmentPipeline;
pub use string_enum::StringEnumEnricher;

/// A post-processing stage over generated nodes.
pub trait Enricher: fmt::Debug + Send + Sync {
    /// Identity reported in contract violations.
    fn name(&self) -> &str;

    /// Lower priorities run first.
    fn priority(&self) -> i32 {
        0
    }

    /// Whether this enricher handles `node` generated from `source`.
    fn applies_to(&self, node: NodeKind, source: SourceKind) -> bool;

    /// Returns the replacement node. Must return the same [`NodeKind`].
    fn enrich(&self, node: Node, context: &EnrichmentContext<'_, '_>) -> Node;
}

/// Read-only view of the element a node was generated from.
#[derive(Debug, Clone, Copy)]
pub struct EnrichmentContext<'e, 'a> {
    element: &'e LocatedElement<'a>,
}

impl<'e, 'a> EnrichmentContext<'e, 'a> {
    pub fn new(element: &'e LocatedElement<'a>) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &'e LocatedElement<'a> {
        self.element
    }

    pub fn path(&self) -> &'e ElementPath {
        self.element.path()
    }

    pub fn source_kind(&self) -> SourceKind {
        self.element.kind()
    }

    /// The inline schema the node was generated from, if any.
    pub fn schema(&self) -> Option<&'a SchemaNode> {
        self.element.schema().and_then(|schema| schema.as_inline())
    }

    /// The operation at or above the element, if any.
    pub fn operation(&self) -> Option<OperationRef<'a>> {
        self.element.operation()
    }

    /// The element followed by its ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'e LocatedElement<'a>> {
        self.element.ancestors()
    }
}

/// The built-in enrichers in registration order.
pub fn default_enrichers() -> Vec<Arc<dyn Enricher>> {
    vec![
        Arc::new(DescriptionEnricher),
        Arc::new(StringEnumEnricher),
        Arc::new(DeprecatedOperationEnricher),
        Arc::new(DeprecatedSchemaEnricher),
    ]
}
