use schemata_define::SchemaType;

use crate::decl::{Annotation, DeclarationBody, Node, NodeKind};
use crate::locate::SourceKind;

use super::{EnrichmentContext, Enricher};

/// Marks string-backed enumerations with [`Annotation::StringConversion`].
///
/// Enumerations over any other underlying kind are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringEnumEnricher;

impl Enricher for StringEnumEnricher {
    fn name(&self) -> &str {
        "StringEnumEnricher"
    }

    fn applies_to(&self, node: NodeKind, source: SourceKind) -> bool {
        node == NodeKind::Enum && source == SourceKind::Schema
    }

    fn enrich(&self, node: Node, _context: &EnrichmentContext<'_, '_>) -> Node {
        match node {
            Node::Type(decl)
                if matches!(
                    decl.body,
                    DeclarationBody::Enum {
                        underlying: SchemaType::String,
                        ..
                    }
                ) && !decl.has_annotation(|a| *a == Annotation::StringConversion) =>
            {
                Node::Type(decl.with_annotation(Annotation::StringConversion))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::TypeDeclaration;
    use crate::locate::{ElementPath, ElementRef, LocatedElement};
    use schemata_define::{SchemaNode, SchemaRef};

    fn run(underlying: SchemaType) -> TypeDeclaration {
        let schema = SchemaRef::inline(SchemaNode::of_type(underlying));
        let element = LocatedElement::root(ElementRef::Schema(&schema), ElementPath::component("E"));
        let decl = TypeDeclaration::new(
            "E",
            "t::models",
            DeclarationBody::Enum {
                underlying,
                members: vec![],
            },
        );
        match StringEnumEnricher.enrich(Node::Type(decl), &EnrichmentContext::new(&element)) {
            Node::Type(decl) => decl,
            Node::Method(_) => unreachable!(),
        }
    }

    #[test]
    fn string_enums_are_marked() {
        assert!(run(SchemaType::String).has_annotation(|a| *a == Annotation::StringConversion));
    }

    #[test]
    fn other_enums_are_not_marked() {
        for underlying in [SchemaType::Integer, SchemaType::Number, SchemaType::Boolean] {
            assert!(run(underlying).annotations.is_empty(), "{underlying} enum was marked");
        }
    }
}
