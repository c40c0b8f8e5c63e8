//! Operation/request assembly.
//!
//! Each operation yields three kinds of declaration:
//!
//! - a request type in the requests module ([`assembler`]) whose
//!   request-construction method is built by [`build_request`];
//! - a response type in the responses module ([`responses`]);
//! - for every tag, an API surface listing the tagged operations
//!   ([`api_surface`]).
//!
//! Model types an operation depends on (request and response bodies) are
//! generated in the compiler's preprocess pass, before any operation
//! declaration is built.

pub mod api_surface;
pub mod assembler;
pub mod build_request;
pub mod responses;

pub use api_surface::generate_api_surface;
pub use assembler::{generate_request, path_placeholders};
pub use build_request::build_request_method;
pub use responses::{generate_responses, status_variant_name};
