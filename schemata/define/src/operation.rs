//! Operation descriptors.
//!
//! An [`Operation`] is one verb on one path: its parameters, optional request
//! body and responses keyed by status. The verb itself is the key under
//! which the operation is stored in its [`PathItem`](crate::PathItem).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::schema::SchemaRef;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
    /// Substituted into a `{name}` placeholder of the path.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as a request header.
    Header,
    /// Sent as a cookie.
    Cookie,
}

/// A single operation parameter.
///
/// ## Examples
///
/// ```
/// use schemata_define::{Parameter, ParameterLocation};
///
/// let id = Parameter::path("petId");
/// assert!(id.required);
/// assert_eq!(id.location, ParameterLocation::Path);
///
/// let limit = Parameter::query("limit");
/// assert!(!limit.required);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name as it appears on the wire.
    pub name: String,
    /// Where the parameter is carried.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Value schema; absent means string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    fn new(name: impl Into<String>, location: ParameterLocation, required: bool) -> Self {
        Self {
            name: name.into(),
            location,
            required,
            schema: None,
            description: None,
        }
    }

    /// A required path parameter.
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Path, true)
    }

    /// An optional query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query, false)
    }

    /// An optional header parameter.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Header, false)
    }

    /// Sets the value schema.
    pub fn with_schema(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A response for one status code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Body schema; absent for bodiless responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,
}

impl Response {
    /// A response carrying a body of the given schema.
    pub fn with_body(schema: impl Into<SchemaRef>) -> Self {
        Self {
            description: None,
            schema: Some(schema.into()),
        }
    }

    /// A response with no body.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// An operation descriptor.
///
/// ## Examples
///
/// ```
/// use schemata_define::{Operation, Parameter, Response, SchemaRef};
///
/// let op = Operation::new("getPet")
///     .with_parameter(Parameter::path("petId"))
///     .with_response("200", Response::with_body(SchemaRef::reference("Pet")))
///     .deprecated();
///
/// assert_eq!(op.operation_id.as_deref(), Some("getPet"));
/// assert!(op.deprecated);
/// assert_eq!(op.responses.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the operation is deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Tags grouping this operation into API surfaces.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Operation-level parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Request body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<SchemaRef>,
    /// Responses keyed by status code (or `default`).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    /// An operation with the given identifier.
    pub fn new(operation_id: impl Into<String>) -> Self {
        Self {
            operation_id: Some(operation_id.into()),
            ..Self::default()
        }
    }

    /// Adds a parameter.
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the request body schema.
    pub fn with_request_body(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.request_body = Some(schema.into());
        self
    }

    /// Adds a response for `status`.
    pub fn with_response(mut self, status: impl Into<String>, response: Response) -> Self {
        self.responses.insert(status.into(), response);
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the operation as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}
