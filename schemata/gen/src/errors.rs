//! Error types for the schemata generator.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::decl::NodeKind;
use crate::locate::ElementPath;

/// Errors that can occur during generation and emission.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A named reference has no resolvable target.
    ///
    /// Aborts generation of the element holding the reference only.
    #[error("Dangling reference '{reference}' at {path}")]
    DanglingReference {
        /// The pointer text that failed to resolve.
        reference: String,
        /// Path of the element holding the reference.
        path: ElementPath,
    },

    /// A schema has a shape the generators do not support.
    #[error("Unsupported schema shape at {path}: {reason}")]
    UnsupportedSchemaShape {
        /// Path of the offending schema or operation.
        path: ElementPath,
        /// What was unsupported.
        reason: String,
    },

    /// An enricher returned a node of a different structural kind than it
    /// received.
    #[error("Enricher '{enricher}' returned a {actual} node for a {expected} node at {path}")]
    EnricherContractViolation {
        /// Name of the offending enricher.
        enricher: String,
        /// Path of the element being enriched.
        path: ElementPath,
        /// Kind the enricher received.
        expected: NodeKind,
        /// Kind the enricher returned.
        actual: NodeKind,
    },

    /// A declaration this element must be emitted after failed, so the
    /// element would refer to a type that does not exist.
    #[error("Dependency {dependency} of {path} failed to generate")]
    DependencyFailed {
        /// Path of the element that was not emitted.
        path: ElementPath,
        /// The failed dependency.
        dependency: ElementPath,
    },

    /// Two different declarations were produced for one identity.
    #[error("Duplicate identity {path}: a different declaration was already emitted")]
    DuplicateIdentity {
        /// The identity that was emitted twice.
        path: ElementPath,
    },

    /// One or more elements failed to generate.
    #[error(
        "Generation failed for {} element(s):\n{}",
        .failures.len(),
        FailureList(.failures)
    )]
    GenerationFailed {
        /// Every failure collected during the run.
        failures: Vec<ElementFailure>,
    },

    /// Generation was cancelled before every element completed.
    #[error("Generation was cancelled")]
    Cancelled,

    /// Failed to parse an API description
    #[error("Failed to parse API description: {0}")]
    ParseError(String),

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to read an input file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Invalid request suffix configuration.
    ///
    /// The request suffix must be alphanumeric (letters and numbers only)
    /// to ensure valid identifier generation.
    #[error("Invalid request suffix '{suffix}': {reason}")]
    InvalidRequestSuffix {
        /// The invalid suffix value.
        suffix: String,
        /// Explanation of why the suffix is invalid.
        reason: String,
    },
}

/// A failure recorded against one element during a run.
#[derive(Debug, Clone)]
pub struct ElementFailure {
    /// Identity of the element that failed.
    pub path: ElementPath,
    /// Why it failed.
    pub error: Arc<GeneratorError>,
}

impl fmt::Display for ElementFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

struct FailureList<'a>(&'a [ElementFailure]);

impl fmt::Display for FailureList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_failed_lists_every_failure() {
        let err = GeneratorError::GenerationFailed {
            failures: vec![
                ElementFailure {
                    path: ElementPath::component("Owner"),
                    error: Arc::new(GeneratorError::DanglingReference {
                        reference: "#/components/schemas/Missing".into(),
                        path: ElementPath::component("Owner"),
                    }),
                },
                ElementFailure {
                    path: ElementPath::component("Shape"),
                    error: Arc::new(GeneratorError::UnsupportedSchemaShape {
                        path: ElementPath::component("Shape").child("oneOf").child("0"),
                        reason: "inline branch".into(),
                    }),
                },
            ],
        };

        let msg = err.to_string();
        assert!(msg.contains("2 element(s)"));
        assert!(msg.contains("#/components/schemas/Missing"));
        assert!(msg.contains("#/components/schemas/Shape/oneOf/0"));
    }

    #[test]
    fn contract_violation_names_enricher_and_kinds() {
        let err = GeneratorError::EnricherContractViolation {
            enricher: "Rogue".into(),
            path: ElementPath::component("Color"),
            expected: NodeKind::Enum,
            actual: NodeKind::Class,
        };
        let msg = err.to_string();
        assert!(msg.contains("Rogue"));
        assert!(msg.contains("Enum"));
        assert!(msg.contains("Class"));
        assert!(msg.contains("#/components/schemas/Color"));
    }
}
