//! Named references between schema locations.
//!
//! A [`Reference`] is a document-local pointer such as
//! `#/components/schemas/Pet`. References are kept as lazy handles in the
//! description graph; the compiler resolves them to their canonical defining
//! location during generation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix every document-local reference must start with.
const LOCAL_PREFIX: &str = "#/";

/// Errors produced while parsing a reference pointer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The pointer was an empty string.
    #[error("reference pointer is empty")]
    Empty,

    /// The pointer does not start with `#/`.
    #[error("reference '{0}' is not document-local (expected a '#/' prefix)")]
    NotLocal(String),

    /// The pointer contains an empty segment (e.g. `#/components//Pet`).
    #[error("reference '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// A document-local named reference.
///
/// The pointer follows JSON-pointer escaping: `~1` encodes `/` and `~0`
/// encodes `~` inside a segment.
///
/// ## Examples
///
/// ```
/// use schemata_define::Reference;
///
/// let reference = Reference::parse("#/components/schemas/Pet").unwrap();
/// assert_eq!(reference.segments(), ["components", "schemas", "Pet"]);
/// assert_eq!(reference.name(), "Pet");
///
/// let built = Reference::component("Pet");
/// assert_eq!(built, reference);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawReference", into = "RawReference")]
pub struct Reference {
    pointer: String,
    segments: Vec<String>,
}

impl Reference {
    /// Parses a `#/`-prefixed pointer.
    ///
    /// ## Errors
    ///
    /// Returns [`ReferenceError`] when the pointer is empty, not
    /// document-local, or contains an empty segment.
    pub fn parse(pointer: impl Into<String>) -> Result<Self, ReferenceError> {
        let pointer = pointer.into();
        if pointer.is_empty() {
            return Err(ReferenceError::Empty);
        }
        let Some(rest) = pointer.strip_prefix(LOCAL_PREFIX) else {
            return Err(ReferenceError::NotLocal(pointer));
        };

        let mut segments = Vec::new();
        for raw in rest.split('/') {
            if raw.is_empty() {
                return Err(ReferenceError::EmptySegment(pointer));
            }
            segments.push(raw.replace("~1", "/").replace("~0", "~"));
        }

        Ok(Self { pointer, segments })
    }

    /// Builds a reference to a named component schema.
    ///
    /// ```
    /// use schemata_define::Reference;
    ///
    /// let reference = Reference::component("a/b");
    /// assert_eq!(reference.pointer(), "#/components/schemas/a~1b");
    /// assert_eq!(reference.name(), "a/b");
    /// ```
    pub fn component(name: &str) -> Self {
        let escaped = name.replace('~', "~0").replace('/', "~1");
        Self {
            pointer: format!("{LOCAL_PREFIX}components/schemas/{escaped}"),
            segments: vec!["components".into(), "schemas".into(), name.to_string()],
        }
    }

    /// The pointer text exactly as written in the document.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    /// The unescaped path segments after `#/`.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment, which names the referenced element.
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pointer)
    }
}

/// Wire form of a reference: `{ "$ref": "#/..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawReference {
    #[serde(rename = "$ref")]
    pointer: String,
}

impl TryFrom<RawReference> for Reference {
    type Error = ReferenceError;

    fn try_from(raw: RawReference) -> Result<Self, Self::Error> {
        Reference::parse(raw.pointer)
    }
}

impl From<Reference> for RawReference {
    fn from(reference: Reference) -> Self {
        Self {
            pointer: reference.pointer,
        }
    }
}
