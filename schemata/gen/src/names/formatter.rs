//! Per-category name formatting.
//!
//! A [`NameFormatter`] turns a raw key into an identifier. The
//! [`NameFormatterSelector`] holds one formatter per [`NameKind`]; swapping a
//! category's formatter is how callers pick a naming convention. Formatting
//! has no hidden state: the same raw key under the same category always
//! yields the same identifier.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use strum::{Display, EnumIter, IntoEnumIterator};

use super::case::{to_pascal_case, to_snake_case};

/// Identifier categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum NameKind {
    Type,
    Property,
    EnumMember,
    Method,
    Parameter,
    Module,
}

/// Formats raw keys into identifiers.
pub trait NameFormatter: fmt::Debug + Send + Sync {
    fn format(&self, raw: &str) -> String;
}

/// `PascalCase`; digit-leading results get a `Value` prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct PascalCaseFormatter;

impl NameFormatter for PascalCaseFormatter {
    fn format(&self, raw: &str) -> String {
        let formatted = to_pascal_case(raw);
        if formatted.is_empty() || formatted.starts_with(|c: char| c.is_ascii_digit()) {
            format!("Value{formatted}")
        } else {
            formatted
        }
    }
}

/// `snake_case`; digit-leading results get a `value_` prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaseFormatter;

impl NameFormatter for SnakeCaseFormatter {
    fn format(&self, raw: &str) -> String {
        let formatted = to_snake_case(raw);
        if formatted.is_empty() {
            "value".to_string()
        } else if formatted.starts_with(|c: char| c.is_ascii_digit()) {
            format!("value_{formatted}")
        } else {
            formatted
        }
    }
}

/// Leaves the raw key untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbatimFormatter;

impl NameFormatter for VerbatimFormatter {
    fn format(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Chooses a formatter per [`NameKind`].
///
/// ## Examples
///
/// ```
/// use std::sync::Arc;
/// use schemata_gen::names::{NameFormatterSelector, NameKind, VerbatimFormatter};
///
/// let names = NameFormatterSelector::default();
/// assert_eq!(names.format(NameKind::Property, "name"), "Name");
/// assert_eq!(names.format(NameKind::Parameter, "petId"), "pet_id");
///
/// let verbatim = names.with(NameKind::Property, Arc::new(VerbatimFormatter));
/// assert_eq!(verbatim.format(NameKind::Property, "name"), "name");
/// ```
#[derive(Debug, Clone)]
pub struct NameFormatterSelector {
    formatters: HashMap<NameKind, Arc<dyn NameFormatter>>,
}

impl Default for NameFormatterSelector {
    fn default() -> Self {
        let formatters = NameKind::iter()
            .map(|kind| {
                let formatter: Arc<dyn NameFormatter> = match kind {
                    NameKind::Parameter | NameKind::Module => Arc::new(SnakeCaseFormatter),
                    _ => Arc::new(PascalCaseFormatter),
                };
                (kind, formatter)
            })
            .collect();
        Self { formatters }
    }
}

impl NameFormatterSelector {
    /// Returns a copy using `formatter` for `kind`.
    pub fn with(&self, kind: NameKind, formatter: Arc<dyn NameFormatter>) -> Self {
        let mut next = self.clone();
        next.formatters.insert(kind, formatter);
        next
    }

    /// Formats `raw` with the formatter selected for `kind`.
    pub fn format(&self, kind: NameKind, raw: &str) -> String {
        match self.formatters.get(&kind) {
            Some(formatter) => formatter.format(raw),
            None => raw.to_string(),
        }
    }
}
