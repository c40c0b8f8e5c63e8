use std::sync::Arc;

use tracing::trace;

use crate::decl::Node;
use crate::errors::GeneratorError;

use super::{EnrichmentContext, Enricher};

/// Enrichers sorted by ascending priority, ties in registration order.
///
/// ## Examples
///
/// ```
/// use schemata_gen::enrich::{EnrichmentPipeline, default_enrichers};
///
/// let pipeline = EnrichmentPipeline::new(default_enrichers());
/// assert_eq!(pipeline.names()[0], "DescriptionEnricher");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnrichmentPipeline {
    enrichers: Vec<Arc<dyn Enricher>>,
}

impl EnrichmentPipeline {
    pub fn new(enrichers: impl IntoIterator<Item = Arc<dyn Enricher>>) -> Self {
        let mut enrichers: Vec<_> = enrichers.into_iter().collect();
        // stable: equal priorities keep registration order
        enrichers.sort_by_key(|enricher| enricher.priority());
        Self { enrichers }
    }

    /// Enricher names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.enrichers.iter().map(|e| e.name()).collect()
    }

    /// Folds `node` through every applicable enricher.
    ///
    /// ## Errors
    ///
    /// Returns `EnricherContractViolation` naming the first enricher that
    /// changes the node's structural kind.
    pub fn apply(&self, node: Node, context: &EnrichmentContext<'_, '_>) -> Result<Node, GeneratorError> {
        let expected = node.kind();
        let source = context.source_kind();

        self.enrichers
            .iter()
            .filter(|enricher| enricher.applies_to(expected, source))
            .try_fold(node, |node, enricher| {
                let enriched = enricher.enrich(node, context);
                let actual = enriched.kind();
                if actual != expected {
                    return Err(GeneratorError::EnricherContractViolation {
                        enricher: enricher.name().to_string(),
                        path: context.path().clone(),
                        expected,
                        actual,
                    });
                }
                trace!(enricher = enricher.name(), path = %context.path(), "enriched");
                Ok(enriched)
            })
    }
}
