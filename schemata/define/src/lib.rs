//! Schemata Definition Library
//!
//! This crate provides the in-memory API description graph consumed by the
//! `schemata-gen` compiler: paths and their operations, the named schema
//! table, and tags.
//!
//! ## Core Types
//!
//! - [`ApiDocument`] - Root of the description graph
//! - [`PathItem`] - Operations on one path, keyed by verb
//! - [`Operation`] - One operation: parameters, request body, responses
//! - [`Parameter`] / [`ParameterLocation`] - Path, query and header parameters
//! - [`Response`] - A response body for one status
//! - [`SchemaNode`] - A schema object (object, composition, enum, primitive, array)
//! - [`SchemaRef`] - A schema position: named reference or inline schema
//! - [`Reference`] - A document-local `#/...` pointer
//! - [`Tag`] - An API surface grouping
//!
//! ## Examples
//!
//! ```
//! use schemata_define::{ApiDocument, Operation, Response, SchemaNode, SchemaRef};
//!
//! let doc = ApiDocument::new("Petstore")
//!     .with_schema(
//!         "Pet",
//!         SchemaNode::object()
//!             .with_property("name", SchemaNode::string())
//!             .with_required("name"),
//!     )
//!     .with_schema("Color", SchemaNode::string_enum(["Red", "Green", "Blue"]))
//!     .with_operation(
//!         "/pets",
//!         "Post",
//!         Operation::new("addPet")
//!             .with_request_body(SchemaRef::reference("Pet"))
//!             .with_response("201", Response::with_body(SchemaRef::reference("Pet"))),
//!     );
//!
//! assert_eq!(doc.components.schemas.len(), 2);
//! assert_eq!(doc.operations().count(), 1);
//! ```
//!
//! ## Parsing
//!
//! Every type derives serde traits, so a document can be loaded from JSON or
//! YAML. Loading and validating raw descriptions is the caller's concern.

pub mod document;
pub mod operation;
pub mod prelude;
pub mod reference;
pub mod schema;

// Re-export main types at crate root
pub use document::{ApiDocument, Components, PathItem, Tag};
pub use operation::{Operation, Parameter, ParameterLocation, Response};
pub use reference::{Reference, ReferenceError};
pub use schema::{EnumValue, SchemaNode, SchemaRef, SchemaType};
