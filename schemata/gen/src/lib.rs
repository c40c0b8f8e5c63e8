//! Schemata Compiler
//!
//! Compiles an API description graph into language-neutral type
//! declarations and renders them as Rust source.
//!
//! ## Pipeline
//!
//! ```text
//! ApiDocument ──► Compiler ──► GenerationOutput ──► emit ──► *.rs
//!                   │
//!                   ├─ schema/   classes, enums, unions, aliases
//!                   ├─ request/  requests, responses, API surfaces
//!                   └─ enrich/   annotation passes over every node
//! ```
//!
//! Every element is generated at most once per compilation. Named types are
//! referenced lazily, so cyclic references never recurse; inline children
//! are generated as their own declarations and emitted before their owner.
//!
//! ## Examples
//!
//! ```
//! use schemata_define::{ApiDocument, SchemaNode};
//! use schemata_gen::compile::Compiler;
//! use schemata_gen::config::GeneratorSettings;
//!
//! let doc = ApiDocument::new("Petstore").with_schema(
//!     "Pet",
//!     SchemaNode::object()
//!         .with_property("name", SchemaNode::string())
//!         .with_required("name"),
//! );
//!
//! let output = Compiler::new(&doc, GeneratorSettings::new("petstore"))
//!     .unwrap()
//!     .compile();
//!
//! assert!(output.is_success());
//! assert_eq!(output.declarations[0].declaration.name, "Pet");
//! assert_eq!(output.declarations[0].namespace, "petstore::models");
//! ```

pub mod compile;
pub mod config;
pub mod context;
pub mod decl;
pub mod emit;
pub mod enrich;
pub mod errors;
pub mod loader;
pub mod locate;
pub mod names;
pub mod registry;
pub mod request;
pub mod resolve;
pub mod schema;
pub mod validation;

#[doc(hidden)]
pub mod test_utils;

pub use compile::{CancellationFlag, Compiler, EmittedDeclaration, GenerationOutput};
pub use config::{GeneratorSettings, ProtocolTypes};
pub use errors::GeneratorError;
