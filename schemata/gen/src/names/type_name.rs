//! Context-sensitive type names.
//!
//! A component schema is named after its key. Anything else is named after
//! where it sits: an inline property schema after its owner and property
//! key, an array item after its array plus `Item`, an operation's request
//! body after the operation plus `Body`. Names are built from the raw keys
//! of the whole ancestor chain and formatted once, so they never depend on
//! generation order. Colliding names are not deduplicated.

use crate::locate::{ElementRef, LocatedElement, OperationRef};

use super::formatter::{NameFormatterSelector, NameKind};

/// Derives type and method names from located elements.
#[derive(Debug, Clone)]
pub struct TypeNameResolver {
    formatters: NameFormatterSelector,
    request_suffix: String,
}

impl TypeNameResolver {
    pub fn new(formatters: NameFormatterSelector, request_suffix: impl Into<String>) -> Self {
        Self {
            formatters,
            request_suffix: request_suffix.into(),
        }
    }

    pub fn formatters(&self) -> &NameFormatterSelector {
        &self.formatters
    }

    /// Formats `raw` under `kind`.
    pub fn format(&self, kind: NameKind, raw: &str) -> String {
        self.formatters.format(kind, raw)
    }

    /// The declaration name for `element`.
    ///
    /// Request types get the configured request suffix; response types end
    /// in `Response`; API surfaces end in `Api`.
    pub fn type_name(&self, element: &LocatedElement<'_>) -> String {
        let name = self.format(NameKind::Type, &self.raw_name(element));
        match element.element() {
            ElementRef::Operation(_) => format!("{name}{}", self.request_suffix),
            _ => name,
        }
    }

    /// The method name an API surface uses for `operation`.
    pub fn operation_method_name(&self, operation: &OperationRef<'_>) -> String {
        self.format(NameKind::Method, &operation.identifier())
    }

    fn raw_name(&self, element: &LocatedElement<'_>) -> String {
        match element.element() {
            ElementRef::Operation(op) => op.identifier(),
            ElementRef::Response(op, _) => format!("{} Response", op.identifier()),
            ElementRef::Tag(tag) => format!("{} Api", tag.name),
            ElementRef::Schema(_) => {
                let segments = element.path().segments();
                let last = segments.last().map(String::as_str).unwrap_or_default();
                let Some(parent) = element.parent() else {
                    return last.to_string();
                };

                let under_properties = segments.len() >= 2 && segments[segments.len() - 2] == "properties";
                let context = match last {
                    _ if under_properties => last,
                    "items" => "Item",
                    "requestBody" => "Body",
                    other => other,
                };
                format!("{} {}", self.raw_name(parent), context)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::ElementPath;
    use schemata_define::{Operation, PathItem, SchemaNode, SchemaRef, Tag};

    fn resolver() -> TypeNameResolver {
        TypeNameResolver::new(NameFormatterSelector::default(), "Request")
    }

    #[test]
    fn component_is_named_after_its_key() {
        let pet = SchemaRef::inline(SchemaNode::object());
        let root = LocatedElement::root(ElementRef::Schema(&pet), ElementPath::component("pet"));
        assert_eq!(resolver().type_name(&root), "Pet");
    }

    #[test]
    fn inline_property_and_item_names_follow_context() {
        let pet = SchemaRef::inline(SchemaNode::object());
        let tags = SchemaRef::inline(SchemaNode::array(SchemaNode::object()));
        let item = SchemaRef::inline(SchemaNode::object());
        let items_prop = SchemaRef::inline(SchemaNode::object());

        let root = LocatedElement::root(ElementRef::Schema(&pet), ElementPath::component("Pet"));
        let tags_el = LocatedElement::child(&root, ["properties", "tags"], ElementRef::Schema(&tags));
        let item_el = LocatedElement::child(&tags_el, ["items"], ElementRef::Schema(&item));
        let literal_items =
            LocatedElement::child(&root, ["properties", "items"], ElementRef::Schema(&items_prop));

        let names = resolver();
        assert_eq!(names.type_name(&tags_el), "PetTags");
        assert_eq!(names.type_name(&item_el), "PetTagsItem");
        assert_eq!(names.type_name(&literal_items), "PetItems");
    }

    #[test]
    fn operation_names_use_operation_id() {
        let item = PathItem::default();
        let op = Operation::new("addPet");
        let body = SchemaRef::inline(SchemaNode::object());
        let op_ref = OperationRef {
            path: "/pets",
            verb: "Post",
            item: &item,
            operation: &op,
        };

        let op_el = LocatedElement::root(
            ElementRef::Operation(op_ref),
            ElementPath::operation("/pets", "Post"),
        );
        let body_el = LocatedElement::child(&op_el, ["requestBody"], ElementRef::Schema(&body));

        let names = resolver();
        assert_eq!(names.type_name(&op_el), "AddPetRequest");
        assert_eq!(names.type_name(&body_el), "AddPetBody");
        assert_eq!(names.operation_method_name(&op_ref), "AddPet");
    }

    #[test]
    fn response_body_names_keep_status_digits() {
        let item = PathItem::default();
        let op = Operation::new("getPet");
        let body = SchemaRef::inline(SchemaNode::object());
        let op_ref = OperationRef {
            path: "/pets/{id}",
            verb: "Get",
            item: &item,
            operation: &op,
        };

        let responses = LocatedElement::root(
            ElementRef::Response(op_ref, &op.responses),
            ElementPath::operation("/pets/{id}", "Get").child("responses"),
        );
        let body_el = LocatedElement::child(&responses, ["200"], ElementRef::Schema(&body));

        let names = resolver();
        assert_eq!(names.type_name(&responses), "GetPetResponse");
        assert_eq!(names.type_name(&body_el), "GetPetResponse200");
    }

    #[test]
    fn tag_names_end_in_api() {
        let tag = Tag::new("pets");
        let el = LocatedElement::root(ElementRef::Tag(&tag), ElementPath::tag("pets"));
        assert_eq!(resolver().type_name(&el), "PetsApi");
    }
}
