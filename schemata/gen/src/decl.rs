//! Generated declaration IR.
//!
//! Declarations are immutable values. Generators build them once and the
//! enrichment pipeline replaces them wholesale through the `with_*` updates,
//! so a declaration handed to the registry never changes afterwards.
//!
//! The IR is target-neutral: names are already formatted, types are
//! referenced by namespace and name, and the request-construction method is
//! a list of ordered steps rather than source text. [`crate::emit`] renders
//! it as Rust.

use schemata_define::{EnumValue, ParameterLocation, SchemaType};
use strum::Display;

/// A reference to a type from inside a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// A scalar with an optional format hint.
    Primitive {
        kind: SchemaType,
        format: Option<String>,
    },
    /// A generated declaration.
    Named { namespace: String, name: String },
    /// An ordered list of the inner type.
    List(Box<TypeRef>),
    /// Any value; used when a schema declares no type.
    Any,
}

impl TypeRef {
    /// A scalar without a format hint.
    pub fn primitive(kind: SchemaType) -> Self {
        TypeRef::Primitive { kind, format: None }
    }

    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef::Named {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// The declaration name when this is a named reference.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Marker annotations attached to declarations and methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The enumeration converts to and from its string literals.
    StringConversion,
    /// The element is obsolete.
    Obsolete { message: String },
    /// A documentation line.
    Doc(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    /// Formatted member name.
    pub name: String,
    /// Key as written in the schema.
    pub raw_name: String,
    pub type_ref: TypeRef,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    /// Formatted member name.
    pub name: String,
    /// The literal this member stands for.
    pub value: EnumValue,
}

/// One branch of a union, wrapping exactly one value of `type_ref`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionVariant {
    pub name: String,
    pub type_ref: TypeRef,
}

/// A request field carried in the path, query or headers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParameter {
    /// Formatted field name.
    pub name: String,
    /// Name on the wire.
    pub raw_name: String,
    pub location: ParameterLocation,
    pub type_ref: TypeRef,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseVariant {
    /// Formatted variant name.
    pub name: String,
    /// Status key as written (`200`, `default`, ...).
    pub status: String,
    /// Body type; `None` for bodiless responses.
    pub body: Option<TypeRef>,
}

/// One operation exposed by an API surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiOperation {
    /// Formatted method name.
    pub name: String,
    pub request: TypeRef,
    pub response: TypeRef,
    pub deprecated: bool,
}

/// The protocol verb a request is sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// One of the protocol's predefined verb constants, e.g. `GET`.
    Constant(String),
    /// An extension verb built from its literal, e.g. `PURGE`.
    Custom(String),
}

/// Where the message URI comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriSource {
    /// The request type's own URI builder.
    BuildUri,
}

/// One ordered step of a request-construction method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStep {
    /// Construct the protocol message from a verb and URI.
    CreateMessage { verb: Verb, uri: UriSource },
    /// Populate headers on the message.
    AddHeaders,
    /// Assign the message content.
    AssignContent,
    /// Return the message.
    Return,
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub steps: Vec<RequestStep>,
}

impl MethodDeclaration {
    /// Returns a copy with `annotation` appended.
    pub fn with_annotation(&self, annotation: Annotation) -> Self {
        let mut next = self.clone();
        next.annotations.push(annotation);
        next
    }

    pub fn has_annotation(&self, predicate: impl Fn(&Annotation) -> bool) -> bool {
        self.annotations.iter().any(predicate)
    }
}

/// The structural body of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationBody {
    /// A class with at most one base type.
    Class {
        base: Option<TypeRef>,
        properties: Vec<PropertyDeclaration>,
    },
    /// An enumeration over literals of one underlying kind.
    Enum {
        underlying: SchemaType,
        members: Vec<EnumMember>,
    },
    /// A closed union; `exclusive` is false for `anyOf` unions.
    Union {
        exclusive: bool,
        variants: Vec<UnionVariant>,
    },
    /// A named alias of another type.
    Alias { target: TypeRef },
    /// An operation's request type.
    Request {
        operation_id: String,
        /// Path template with `{param}` placeholders.
        path: String,
        parameters: Vec<RequestParameter>,
        body: Option<TypeRef>,
        build_request: MethodDeclaration,
    },
    /// An operation's responses, one variant per status.
    Response { variants: Vec<ResponseVariant> },
    /// The operations grouped under one tag.
    ApiSurface { operations: Vec<ApiOperation> },
}

/// A generated type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub name: String,
    pub namespace: String,
    pub docs: Vec<String>,
    pub annotations: Vec<Annotation>,
    pub body: DeclarationBody,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, body: DeclarationBody) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            docs: Vec::new(),
            annotations: Vec::new(),
            body,
        }
    }

    /// Returns a copy with `annotation` appended.
    pub fn with_annotation(&self, annotation: Annotation) -> Self {
        let mut next = self.clone();
        next.annotations.push(annotation);
        next
    }

    /// Returns a copy with a documentation line appended.
    pub fn with_doc(&self, line: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.docs.push(line.into());
        next
    }

    /// Returns a copy with the body replaced.
    pub fn with_body(&self, body: DeclarationBody) -> Self {
        let mut next = self.clone();
        next.body = body;
        next
    }

    pub fn has_annotation(&self, predicate: impl Fn(&Annotation) -> bool) -> bool {
        self.annotations.iter().any(predicate)
    }

    /// A reference to this declaration.
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::named(&self.namespace, &self.name)
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            DeclarationBody::Class { .. } => NodeKind::Class,
            DeclarationBody::Enum { .. } => NodeKind::Enum,
            DeclarationBody::Union { .. } => NodeKind::Union,
            DeclarationBody::Alias { .. } => NodeKind::Alias,
            DeclarationBody::Request { .. } => NodeKind::Request,
            DeclarationBody::Response { .. } => NodeKind::Response,
            DeclarationBody::ApiSurface { .. } => NodeKind::ApiSurface,
        }
    }

    /// The base type, for classes.
    pub fn base(&self) -> Option<&TypeRef> {
        match &self.body {
            DeclarationBody::Class { base, .. } => base.as_ref(),
            _ => None,
        }
    }

    /// The properties, for classes.
    pub fn properties(&self) -> &[PropertyDeclaration] {
        match &self.body {
            DeclarationBody::Class { properties, .. } => properties,
            _ => &[],
        }
    }

    /// The request-construction method, for requests.
    pub fn build_request(&self) -> Option<&MethodDeclaration> {
        match &self.body {
            DeclarationBody::Request { build_request, .. } => Some(build_request),
            _ => None,
        }
    }
}

/// Structural kind of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    Class,
    Enum,
    Union,
    Alias,
    Request,
    Response,
    ApiSurface,
    Method,
}

/// A node passed through the enrichment pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Type(TypeDeclaration),
    Method(MethodDeclaration),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Type(declaration) => declaration.kind(),
            Node::Method(_) => NodeKind::Method,
        }
    }
}
