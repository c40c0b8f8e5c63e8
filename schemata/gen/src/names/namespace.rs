//! Target namespaces.
//!
//! The namespace of a declaration depends only on the kind of element it was
//! generated from, never on how deeply that element is nested.

use std::fmt;

use crate::locate::SourceKind;

/// Chooses the namespace for declarations of a given source kind.
pub trait NamespaceProvider: fmt::Debug + Send + Sync {
    fn namespace(&self, root: &str, kind: SourceKind) -> String;
}

/// `{root}::requests`, `{root}::models`, `{root}::responses`, `{root}::api`.
///
/// ## Examples
///
/// ```
/// use schemata_gen::locate::SourceKind;
/// use schemata_gen::names::{DefaultNamespaceProvider, NamespaceProvider};
///
/// let provider = DefaultNamespaceProvider;
/// assert_eq!(provider.namespace("petstore", SourceKind::Schema), "petstore::models");
/// assert_eq!(provider.namespace("petstore", SourceKind::Operation), "petstore::requests");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamespaceProvider;

impl NamespaceProvider for DefaultNamespaceProvider {
    fn namespace(&self, root: &str, kind: SourceKind) -> String {
        let module = match kind {
            SourceKind::Operation => "requests",
            SourceKind::Schema => "models",
            SourceKind::Response => "responses",
            SourceKind::Tag => "api",
        };
        format!("{root}::{module}")
    }
}

/// The last segment of a `::`-separated namespace.
pub fn file_group(namespace: &str) -> &str {
    namespace.rsplit("::").next().unwrap_or(namespace)
}
