//! Settings validation.
//!
//! Runs before any generation so configuration mistakes surface as one
//! clear error instead of as broken output.
//!
//! ## Validation Checks
//!
//! - **Request suffix format**: the suffix is non-empty and alphanumeric
//! - **Root namespace**: every `::` segment is a valid identifier
//! - **Protocol types**: message and verb types are valid type paths
//!
//! ## Examples
//!
//! ```
//! use schemata_gen::config::GeneratorSettings;
//! use schemata_gen::validation::validate_settings;
//!
//! assert!(validate_settings(&GeneratorSettings::new("petstore")).is_ok());
//! assert!(validate_settings(&GeneratorSettings::new("pet-store")).is_err());
//! ```

use crate::config::GeneratorSettings;
use crate::errors::GeneratorError;

/// Validates `settings` for use by the compiler.
///
/// ## Errors
///
/// - `InvalidRequestSuffix` when the suffix is empty or not alphanumeric
/// - `ConfigError` when the root namespace or a protocol type is malformed
pub fn validate_settings(settings: &GeneratorSettings) -> Result<(), GeneratorError> {
    let suffix = settings.request_suffix();

    if suffix.is_empty() {
        return Err(GeneratorError::InvalidRequestSuffix {
            suffix: suffix.to_string(),
            reason: "suffix cannot be empty".to_string(),
        });
    }

    if !suffix.chars().all(|c| c.is_alphanumeric()) {
        return Err(GeneratorError::InvalidRequestSuffix {
            suffix: suffix.to_string(),
            reason: "suffix must contain only alphanumeric characters (letters and numbers)"
                .to_string(),
        });
    }

    let root = settings.root_namespace();
    if root.is_empty() {
        return Err(GeneratorError::ConfigError("root namespace cannot be empty".to_string()));
    }
    for segment in root.split("::") {
        if syn::parse_str::<syn::Ident>(segment).is_err() {
            return Err(GeneratorError::ConfigError(format!(
                "root namespace '{root}' has an invalid segment '{segment}'"
            )));
        }
    }

    let protocol = settings.protocol();
    for (what, path) in [
        ("message type", &protocol.message_type),
        ("method type", &protocol.method_type),
    ] {
        if syn::parse_str::<syn::Path>(path).is_err() {
            return Err(GeneratorError::ConfigError(format!("{what} '{path}' is not a type path")));
        }
    }

    Ok(())
}
