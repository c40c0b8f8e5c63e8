//! Located elements: description nodes paired with their path from the root.
//!
//! The path of a [`LocatedElement`] is its generation identity. Elements
//! reached through a named reference are always re-rooted at the
//! reference's canonical defining location (see [`crate::resolve`]), so a
//! referenced schema has exactly one identity no matter how many places
//! point at it.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use schemata_define::{Operation, PathItem, Response, SchemaRef, Tag};
use strum::Display;

/// Ordered key sequence from the document root.
///
/// ## Examples
///
/// ```
/// use schemata_gen::locate::ElementPath;
///
/// let path = ElementPath::component("Pet").child("properties").child("name");
/// assert_eq!(path.to_string(), "#/components/schemas/Pet/properties/name");
/// assert_eq!(path.last(), Some("name"));
///
/// let op = ElementPath::operation("/pets/{id}", "Get");
/// assert_eq!(op.to_string(), "#/paths/~1pets~1{id}/Get");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementPath(Vec<String>);

impl ElementPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from raw segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// `#/components/schemas/{name}`.
    pub fn component(name: &str) -> Self {
        Self::from_segments(["components", "schemas", name])
    }

    /// `#/paths/{path}/{verb}`.
    pub fn operation(path: &str, verb: &str) -> Self {
        Self::from_segments(["paths", path, verb])
    }

    /// `#/tags/{name}`.
    pub fn tag(name: &str) -> Self {
        Self::from_segments(["tags", name])
    }

    /// Returns this path extended by one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// The raw segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Whether `self` starts with every segment of `prefix`.
    pub fn starts_with(&self, prefix: &ElementPath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        for segment in &self.0 {
            write!(f, "/{}", segment.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

/// The kind of source element a declaration was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SourceKind {
    Schema,
    Operation,
    Response,
    Tag,
}

/// An operation together with the path item and keys it was declared under.
#[derive(Debug, Clone, Copy)]
pub struct OperationRef<'a> {
    /// Path template, e.g. `/pets/{petId}`.
    pub path: &'a str,
    /// Verb key exactly as declared (`Get`, `Purge`, ...).
    pub verb: &'a str,
    /// The path item owning the operation.
    pub item: &'a PathItem,
    /// The operation itself.
    pub operation: &'a Operation,
}

impl<'a> OperationRef<'a> {
    /// The operation identifier, falling back to `{verb} {path}`.
    pub fn identifier(&self) -> String {
        self.operation
            .operation_id
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.verb, self.path))
    }
}

/// The description node a [`LocatedElement`] points at.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    /// A schema position (named reference or inline schema).
    Schema(&'a SchemaRef),
    /// An operation.
    Operation(OperationRef<'a>),
    /// The response map of an operation.
    Response(OperationRef<'a>, &'a IndexMap<String, Response>),
    /// A tag.
    Tag(&'a Tag),
}

impl<'a> ElementRef<'a> {
    /// The source kind this element contributes to enrichment and namespacing.
    pub fn kind(&self) -> SourceKind {
        match self {
            ElementRef::Schema(_) => SourceKind::Schema,
            ElementRef::Operation(_) => SourceKind::Operation,
            ElementRef::Response(..) => SourceKind::Response,
            ElementRef::Tag(_) => SourceKind::Tag,
        }
    }
}

/// A description node paired with its path from the document root.
///
/// The optional parent gives the resolved ancestor chain used for
/// context-sensitive naming and by enrichers.
#[derive(Debug, Clone)]
pub struct LocatedElement<'a> {
    element: ElementRef<'a>,
    path: ElementPath,
    parent: Option<Arc<LocatedElement<'a>>>,
}

impl<'a> LocatedElement<'a> {
    /// A canonical, parentless element.
    pub fn root(element: ElementRef<'a>, path: ElementPath) -> Arc<Self> {
        Arc::new(Self {
            element,
            path,
            parent: None,
        })
    }

    /// Derives a child element located `segments` below `parent`.
    pub fn child<I, S>(parent: &Arc<Self>, segments: I, element: ElementRef<'a>) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = segments
            .into_iter()
            .fold(parent.path.clone(), |path, segment| path.child(segment));
        Arc::new(Self {
            element,
            path,
            parent: Some(Arc::clone(parent)),
        })
    }

    pub fn element(&self) -> ElementRef<'a> {
        self.element
    }

    /// The identity path.
    pub fn path(&self) -> &ElementPath {
        &self.path
    }

    pub fn parent(&self) -> Option<&Arc<LocatedElement<'a>>> {
        self.parent.as_ref()
    }

    pub fn kind(&self) -> SourceKind {
        self.element.kind()
    }

    /// The schema position, when this element is a schema.
    pub fn schema(&self) -> Option<&'a SchemaRef> {
        match self.element {
            ElementRef::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    /// The nearest operation at or above this element.
    pub fn operation(&self) -> Option<OperationRef<'a>> {
        self.ancestors().find_map(|located| match located.element {
            ElementRef::Operation(op) | ElementRef::Response(op, _) => Some(op),
            _ => None,
        })
    }

    /// This element followed by its ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &LocatedElement<'a>> {
        std::iter::successors(Some(self), |located| located.parent.as_deref())
    }
}
