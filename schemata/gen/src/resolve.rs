//! Reference and location resolution.
//!
//! A [`ReferenceResolver`] maps a named reference to the schema position it
//! points at. [`DocumentResolver`] builds on it to produce the canonical
//! [`LocatedElement`] of a reference: chains of pure references are followed
//! until a defining schema is reached, so every referencing site shares the
//! defining site's identity.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use schemata_define::{ApiDocument, Reference, SchemaRef};
use tracing::trace;

use crate::errors::GeneratorError;
use crate::locate::{ElementPath, ElementRef, LocatedElement};

/// Locates the schema a reference points at.
pub trait ReferenceResolver: fmt::Debug + Send + Sync {
    /// Returns the target's defining path and schema, or `None` when the
    /// reference has no target in `document`.
    fn locate<'a>(
        &self,
        document: &'a ApiDocument,
        reference: &Reference,
    ) -> Option<(ElementPath, &'a SchemaRef)>;
}

/// Resolves `#/components/schemas/{name}` references.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReferenceResolver;

impl ReferenceResolver for DefaultReferenceResolver {
    fn locate<'a>(
        &self,
        document: &'a ApiDocument,
        reference: &Reference,
    ) -> Option<(ElementPath, &'a SchemaRef)> {
        match reference.segments() {
            [components, schemas, name] if components == "components" && schemas == "schemas" => {
                let schema = document.schema(name)?;
                Some((ElementPath::component(name), schema))
            }
            _ => None,
        }
    }
}

/// Resolves references within one document to canonical located elements.
#[derive(Debug, Clone)]
pub struct DocumentResolver<'a> {
    document: &'a ApiDocument,
    resolver: Arc<dyn ReferenceResolver>,
}

impl<'a> DocumentResolver<'a> {
    pub fn new(document: &'a ApiDocument, resolver: Arc<dyn ReferenceResolver>) -> Self {
        Self { document, resolver }
    }

    /// Resolves the reference at `from` to the canonical element defining
    /// its schema.
    ///
    /// ## Errors
    ///
    /// - `DanglingReference` when any reference in the chain has no target;
    ///   the error names `from`.
    /// - `UnsupportedSchemaShape` when the chain loops back on itself
    ///   without reaching a defining schema.
    pub fn resolve(
        &self,
        reference: &Reference,
        from: &ElementPath,
    ) -> Result<Arc<LocatedElement<'a>>, GeneratorError> {
        let mut seen = HashSet::new();
        let mut current = reference;

        loop {
            let (path, schema) = self.resolver.locate(self.document, current).ok_or_else(|| {
                GeneratorError::DanglingReference {
                    reference: current.pointer().to_string(),
                    path: from.clone(),
                }
            })?;

            if !seen.insert(path.clone()) {
                return Err(GeneratorError::UnsupportedSchemaShape {
                    path: from.clone(),
                    reason: format!("reference chain through {path} never reaches a schema"),
                });
            }

            match schema {
                SchemaRef::Reference(next) => {
                    trace!(%path, next = %next, "following reference chain");
                    current = next;
                }
                SchemaRef::Inline(_) => {
                    return Ok(LocatedElement::root(ElementRef::Schema(schema), path));
                }
            }
        }
    }

    /// The canonical element for the component schema `name`.
    pub fn component(&self, name: &str) -> Option<Arc<LocatedElement<'a>>> {
        let schema = self.document.schema(name)?;
        Some(LocatedElement::root(
            ElementRef::Schema(schema),
            ElementPath::component(name),
        ))
    }

    pub fn document(&self) -> &'a ApiDocument {
        self.document
    }
}
