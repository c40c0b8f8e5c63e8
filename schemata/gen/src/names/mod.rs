//! Name and namespace resolution.
//!
//! - [`case`] - word splitting and case conversion
//! - [`formatter`] - per-category [`NameFormatter`] strategies
//! - [`type_name`] - context-sensitive type names ([`TypeNameResolver`])
//! - [`namespace`] - kind-based target namespaces ([`NamespaceProvider`])

pub mod case;
pub mod formatter;
pub mod namespace;
pub mod type_name;

pub use formatter::{
    NameFormatter, NameFormatterSelector, NameKind, PascalCaseFormatter, SnakeCaseFormatter,
    VerbatimFormatter,
};
pub use namespace::{DefaultNamespaceProvider, NamespaceProvider, file_group};
pub use type_name::TypeNameResolver;
