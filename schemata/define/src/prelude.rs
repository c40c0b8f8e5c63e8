//! Convenient re-exports for building API description graphs.
//!
//! ## Examples
//!
//! ```
//! use schemata_define::prelude::*;
//!
//! let doc = ApiDocument::new("Shapes")
//!     .with_schema("Circle", SchemaNode::object().with_property("radius", SchemaNode::number()))
//!     .with_schema("Square", SchemaNode::object().with_property("side", SchemaNode::number()))
//!     .with_schema(
//!         "Shape",
//!         SchemaNode::one_of([SchemaRef::reference("Circle"), SchemaRef::reference("Square")]),
//!     );
//!
//! let shape = doc.schema("Shape").and_then(SchemaRef::as_inline);
//! assert_eq!(shape.map(|s| s.one_of.len()), Some(2));
//! ```

pub use crate::document::{ApiDocument, Components, PathItem, Tag};
pub use crate::operation::{Operation, Parameter, ParameterLocation, Response};
pub use crate::reference::{Reference, ReferenceError};
pub use crate::schema::{EnumValue, SchemaNode, SchemaRef, SchemaType};
