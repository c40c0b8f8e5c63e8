//! Schema nodes of the API description graph.
//!
//! A [`SchemaNode`] mirrors the shape of an OpenAPI schema object: any of
//! its composition keywords (`allOf`, `oneOf`, `anyOf`), its declared type,
//! its properties and its enumerated literals may be present. Deciding which
//! generator handles a node is the compiler's job; this crate only carries
//! the data.
//!
//! Properties, composition members and array items are held as
//! [`SchemaRef`] values, so a named reference stays a lazy handle instead of
//! an embedded copy of the referenced schema.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::reference::Reference;

/// The declared `type` of a schema.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use schemata_define::SchemaType;
///
/// assert_eq!(SchemaType::from_str("string").unwrap(), SchemaType::String);
/// assert_eq!(SchemaType::Integer.to_string(), "integer");
/// assert!(SchemaType::Number.is_primitive());
/// assert!(!SchemaType::Object.is_primitive());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaType {
    /// UTF-8 string.
    String,
    /// Whole number.
    Integer,
    /// Floating point number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Object with named properties.
    Object,
    /// Ordered list of items.
    Array,
}

impl SchemaType {
    /// Returns `true` for the scalar types (string, integer, number, boolean).
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            SchemaType::String | SchemaType::Integer | SchemaType::Number | SchemaType::Boolean
        )
    }
}

/// A literal listed in a schema's `enum` keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    /// String literal.
    String(String),
    /// Integer literal.
    Integer(i64),
    /// Floating point literal.
    Float(f64),
    /// Boolean literal.
    Bool(bool),
    /// `null`.
    Null,
}

impl EnumValue {
    /// The schema type a literal of this kind belongs to, if any.
    pub fn schema_type(&self) -> Option<SchemaType> {
        match self {
            EnumValue::String(_) => Some(SchemaType::String),
            EnumValue::Integer(_) => Some(SchemaType::Integer),
            EnumValue::Float(_) => Some(SchemaType::Number),
            EnumValue::Bool(_) => Some(SchemaType::Boolean),
            EnumValue::Null => None,
        }
    }
}

impl std::fmt::Display for EnumValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumValue::String(s) => f.write_str(s),
            EnumValue::Integer(i) => write!(f, "{i}"),
            EnumValue::Float(x) => write!(f, "{x}"),
            EnumValue::Bool(b) => write!(f, "{b}"),
            EnumValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for EnumValue {
    fn from(value: &str) -> Self {
        EnumValue::String(value.to_string())
    }
}

impl From<i64> for EnumValue {
    fn from(value: i64) -> Self {
        EnumValue::Integer(value)
    }
}

/// A schema position: either a named reference or an inline schema.
///
/// ## Examples
///
/// ```
/// use schemata_define::{SchemaNode, SchemaRef};
///
/// let named = SchemaRef::reference("Pet");
/// assert_eq!(named.as_reference().map(|r| r.name()), Some("Pet"));
///
/// let inline = SchemaRef::inline(SchemaNode::string());
/// assert!(inline.as_inline().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaRef {
    /// `{ "$ref": "#/components/schemas/Name" }`.
    Reference(Reference),
    /// An inline, unnamed schema.
    Inline(Box<SchemaNode>),
}

impl SchemaRef {
    /// A reference to the component schema called `name`.
    pub fn reference(name: &str) -> Self {
        SchemaRef::Reference(Reference::component(name))
    }

    /// Wraps an inline schema.
    pub fn inline(node: SchemaNode) -> Self {
        SchemaRef::Inline(Box::new(node))
    }

    /// The reference, when this position is a named reference.
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            SchemaRef::Reference(reference) => Some(reference),
            SchemaRef::Inline(_) => None,
        }
    }

    /// The inline schema, when this position is not a reference.
    pub fn as_inline(&self) -> Option<&SchemaNode> {
        match self {
            SchemaRef::Reference(_) => None,
            SchemaRef::Inline(node) => Some(node),
        }
    }
}

/// Wire form of a schema position: a `$ref` wins over any sibling keys.
#[derive(Deserialize)]
struct RawSchemaRef {
    #[serde(rename = "$ref", default)]
    pointer: Option<String>,
    #[serde(flatten)]
    node: SchemaNode,
}

impl<'de> Deserialize<'de> for SchemaRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawSchemaRef::deserialize(deserializer)?;
        match raw.pointer {
            Some(pointer) => Reference::parse(pointer)
                .map(SchemaRef::Reference)
                .map_err(serde::de::Error::custom),
            None => Ok(SchemaRef::inline(raw.node)),
        }
    }
}

impl From<SchemaNode> for SchemaRef {
    fn from(node: SchemaNode) -> Self {
        SchemaRef::inline(node)
    }
}

/// A schema object.
///
/// Use the constructors ([`object`](SchemaNode::object),
/// [`string`](SchemaNode::string), [`string_enum`](SchemaNode::string_enum),
/// [`all_of`](SchemaNode::all_of), ...) and chain the `with_*` builders.
///
/// ## Examples
///
/// ```
/// use schemata_define::{SchemaNode, SchemaRef, SchemaType};
///
/// let pet = SchemaNode::object()
///     .with_property("name", SchemaNode::string())
///     .with_property("owner", SchemaRef::reference("Person"))
///     .with_required("name");
///
/// assert_eq!(pet.schema_type, Some(SchemaType::Object));
/// assert_eq!(pet.properties.len(), 2);
/// assert!(pet.is_required("name"));
/// assert!(!pet.is_required("owner"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Declared type, if any.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    /// Format hint (e.g. `int32`, `date-time`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Properties in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaRef>,

    /// Names of required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Item schema for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaRef>>,

    /// Enumerated literals in declaration order.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<EnumValue>,

    /// `allOf` members in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaRef>,

    /// `oneOf` branches in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaRef>,

    /// `anyOf` branches in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaRef>,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the schema is deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

impl SchemaNode {
    /// A schema with the given declared type and nothing else.
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// An empty `type: object` schema.
    pub fn object() -> Self {
        Self::of_type(SchemaType::Object)
    }

    /// A `type: string` schema.
    pub fn string() -> Self {
        Self::of_type(SchemaType::String)
    }

    /// A `type: integer` schema.
    pub fn integer() -> Self {
        Self::of_type(SchemaType::Integer)
    }

    /// A `type: number` schema.
    pub fn number() -> Self {
        Self::of_type(SchemaType::Number)
    }

    /// A `type: boolean` schema.
    pub fn boolean() -> Self {
        Self::of_type(SchemaType::Boolean)
    }

    /// A `type: array` schema over `items`.
    pub fn array(items: impl Into<SchemaRef>) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items.into())),
            ..Self::default()
        }
    }

    /// A string-backed enumeration.
    ///
    /// ```
    /// use schemata_define::{EnumValue, SchemaNode, SchemaType};
    ///
    /// let color = SchemaNode::string_enum(["Red", "Green", "Blue"]);
    /// assert_eq!(color.schema_type, Some(SchemaType::String));
    /// assert_eq!(color.enum_values[1], EnumValue::String("Green".into()));
    /// ```
    pub fn string_enum<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schema_type: Some(SchemaType::String),
            enum_values: literals
                .into_iter()
                .map(|s| EnumValue::String(s.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// An integer-backed enumeration.
    pub fn integer_enum(literals: impl IntoIterator<Item = i64>) -> Self {
        Self {
            schema_type: Some(SchemaType::Integer),
            enum_values: literals.into_iter().map(EnumValue::Integer).collect(),
            ..Self::default()
        }
    }

    /// An `allOf` composition.
    pub fn all_of(members: impl IntoIterator<Item = SchemaRef>) -> Self {
        Self {
            all_of: members.into_iter().collect(),
            ..Self::default()
        }
    }

    /// A `oneOf` composition.
    pub fn one_of(branches: impl IntoIterator<Item = SchemaRef>) -> Self {
        Self {
            one_of: branches.into_iter().collect(),
            ..Self::default()
        }
    }

    /// An `anyOf` composition.
    pub fn any_of(branches: impl IntoIterator<Item = SchemaRef>) -> Self {
        Self {
            any_of: branches.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Adds (or replaces) a property, keeping declaration order.
    pub fn with_property(mut self, name: impl Into<String>, schema: impl Into<SchemaRef>) -> Self {
        self.properties.insert(name.into(), schema.into());
        self
    }

    /// Marks a property as required.
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Sets the format hint.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the schema as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Whether `name` is listed as a required property.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_object_with_reference_property() {
        let json = r##"{
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": { "type": "string" },
                "owner": { "$ref": "#/components/schemas/Person" }
            }
        }"##;

        let node: SchemaNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.schema_type, Some(SchemaType::Object));
        let keys: Vec<_> = node.properties.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "owner"]);
        assert_eq!(
            node.properties["owner"].as_reference().map(|r| r.name()),
            Some("Person")
        );
        assert!(node.properties["name"].as_inline().is_some());
    }

    #[test]
    fn deserializes_compositions_in_order() {
        let json = r##"{
            "allOf": [
                { "properties": { "x": { "type": "string" } } },
                { "$ref": "#/components/schemas/Base" }
            ]
        }"##;

        let node: SchemaNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.all_of.len(), 2);
        assert!(node.all_of[0].as_inline().is_some());
        assert_eq!(node.all_of[1].as_reference().map(|r| r.name()), Some("Base"));
    }

    #[test]
    fn enum_literals_keep_their_kinds() {
        let node: SchemaNode =
            serde_json::from_str(r#"{ "type": "integer", "enum": [1, 2, 3] }"#).unwrap();
        assert_eq!(node.enum_values, vec![EnumValue::Integer(1), EnumValue::Integer(2), EnumValue::Integer(3)]);
        assert_eq!(node.enum_values[0].schema_type(), Some(SchemaType::Integer));
    }

    #[test]
    fn malformed_reference_is_rejected() {
        let result: Result<SchemaRef, _> = serde_json::from_str(r#"{ "$ref": "Pet" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn with_required_does_not_duplicate() {
        let node = SchemaNode::object().with_required("a").with_required("a");
        assert_eq!(node.required, vec!["a"]);
    }

    #[test]
    fn enum_value_display_uses_raw_literal() {
        assert_eq!(EnumValue::from("red").to_string(), "red");
        assert_eq!(EnumValue::from(42).to_string(), "42");
        assert_eq!(EnumValue::Null.to_string(), "null");
    }
}
