//! Generator configuration.
//!
//! Everything the core consults that is not part of the API description
//! lives in [`GeneratorSettings`]: the root namespace, one name formatter per
//! category, the enrichers, the namespace provider, the reference resolver
//! and the [`ProtocolTypes`] table. Settings are built with chained `with_*`
//! calls and checked by [`crate::validation::validate_settings`] before a
//! run starts.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::decl::Verb;
use crate::enrich::{Enricher, default_enrichers};
use crate::names::{DefaultNamespaceProvider, NameFormatter, NameFormatterSelector, NameKind, NamespaceProvider};
use crate::resolve::{DefaultReferenceResolver, ReferenceResolver};

/// Default suffix appended to operation names to form request type names.
pub const DEFAULT_REQUEST_SUFFIX: &str = "Request";

/// The protocol types generated requests are built from.
///
/// Verb keys listed here map to predefined verb constants; any other key is
/// sent as a custom verb spelled with the upper-cased key.
///
/// ## Examples
///
/// ```
/// use schemata_gen::config::ProtocolTypes;
/// use schemata_gen::decl::Verb;
///
/// let protocol = ProtocolTypes::default();
/// assert_eq!(protocol.verb("Get"), Verb::Constant("GET".into()));
/// assert_eq!(protocol.verb("Purge"), Verb::Custom("PURGE".into()));
/// // keys match exactly
/// assert_eq!(protocol.verb("get"), Verb::Custom("GET".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolTypes {
    /// Path of the message type, e.g. `::http::Request`.
    pub message_type: String,
    /// Path of the verb type, e.g. `::http::Method`.
    pub method_type: String,
    verbs: IndexMap<String, String>,
}

impl Default for ProtocolTypes {
    fn default() -> Self {
        let verbs = [
            ("Delete", "DELETE"),
            ("Get", "GET"),
            ("Head", "HEAD"),
            ("Options", "OPTIONS"),
            ("Patch", "PATCH"),
            ("Post", "POST"),
            ("Put", "PUT"),
            ("Trace", "TRACE"),
        ]
        .into_iter()
        .map(|(key, constant)| (key.to_string(), constant.to_string()))
        .collect();

        Self {
            message_type: "::http::Request".to_string(),
            method_type: "::http::Method".to_string(),
            verbs,
        }
    }
}

impl ProtocolTypes {
    /// Maps a verb key to a predefined constant or a custom verb.
    pub fn verb(&self, key: &str) -> Verb {
        match self.verbs.get(key) {
            Some(constant) => Verb::Constant(constant.clone()),
            None => Verb::Custom(key.to_uppercase()),
        }
    }

    /// The `(key, constant)` pairs with predefined constants.
    pub fn verb_constants(&self) -> impl Iterator<Item = (&str, &str)> {
        self.verbs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Configuration consumed by the compiler core.
///
/// ## Examples
///
/// ```
/// use schemata_gen::config::GeneratorSettings;
///
/// let settings = GeneratorSettings::new("petstore").with_request_suffix("Params");
/// assert_eq!(settings.root_namespace(), "petstore");
/// assert_eq!(settings.request_suffix(), "Params");
/// assert_eq!(settings.enrichers().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    root_namespace: String,
    request_suffix: String,
    formatters: NameFormatterSelector,
    enrichers: Vec<Arc<dyn Enricher>>,
    namespace_provider: Arc<dyn NamespaceProvider>,
    reference_resolver: Arc<dyn ReferenceResolver>,
    protocol: ProtocolTypes,
}

impl GeneratorSettings {
    /// Default settings under `root_namespace`.
    pub fn new(root_namespace: impl Into<String>) -> Self {
        Self {
            root_namespace: root_namespace.into(),
            request_suffix: DEFAULT_REQUEST_SUFFIX.to_string(),
            formatters: NameFormatterSelector::default(),
            enrichers: default_enrichers(),
            namespace_provider: Arc::new(DefaultNamespaceProvider),
            reference_resolver: Arc::new(DefaultReferenceResolver),
            protocol: ProtocolTypes::default(),
        }
    }

    pub fn with_request_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.request_suffix = suffix.into();
        self
    }

    /// Uses `formatter` for every name of `kind`.
    pub fn with_formatter(mut self, kind: NameKind, formatter: Arc<dyn NameFormatter>) -> Self {
        self.formatters = self.formatters.with(kind, formatter);
        self
    }

    /// Registers an additional enricher after the existing ones.
    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.enrichers.push(enricher);
        self
    }

    /// Removes every enricher, including the built-in ones.
    pub fn without_enrichers(mut self) -> Self {
        self.enrichers.clear();
        self
    }

    pub fn with_namespace_provider(mut self, provider: Arc<dyn NamespaceProvider>) -> Self {
        self.namespace_provider = provider;
        self
    }

    pub fn with_reference_resolver(mut self, resolver: Arc<dyn ReferenceResolver>) -> Self {
        self.reference_resolver = resolver;
        self
    }

    pub fn with_protocol(mut self, protocol: ProtocolTypes) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    pub fn request_suffix(&self) -> &str {
        &self.request_suffix
    }

    pub fn formatters(&self) -> &NameFormatterSelector {
        &self.formatters
    }

    /// Enrichers in registration order.
    pub fn enrichers(&self) -> &[Arc<dyn Enricher>] {
        &self.enrichers
    }

    pub fn namespace_provider(&self) -> &Arc<dyn NamespaceProvider> {
        &self.namespace_provider
    }

    pub fn reference_resolver(&self) -> &Arc<dyn ReferenceResolver> {
        &self.reference_resolver
    }

    pub fn protocol(&self) -> &ProtocolTypes {
        &self.protocol
    }
}
