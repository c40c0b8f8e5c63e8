//! Reference cycles through by-value fields.
//!
//! A struct that reaches itself through a chain of plain fields has infinite
//! size, so every class property whose edge lies on such a chain is boxed.
//! Union variants, flattened bases and alias targets are also held by value
//! and count as edges. A `Vec` owns its own allocation and never closes a
//! cycle.

use std::collections::{HashMap, HashSet};

use crate::decl::{DeclarationBody, PropertyDeclaration, TypeDeclaration, TypeRef};

type Key<'d> = (&'d str, &'d str);

fn key(type_ref: &TypeRef) -> Option<Key<'_>> {
    match type_ref {
        TypeRef::Named { namespace, name } => Some((namespace.as_str(), name.as_str())),
        _ => None,
    }
}

/// Class properties that must be boxed.
///
/// ## Examples
///
/// ```
/// use schemata_gen::decl::{DeclarationBody, PropertyDeclaration, TypeDeclaration, TypeRef};
/// use schemata_gen::emit::recursion::RecursiveFields;
///
/// let class = |name: &str, field: &str, target: &str| {
///     TypeDeclaration::new(
///         name,
///         "app::models",
///         DeclarationBody::Class {
///             base: None,
///             properties: vec![PropertyDeclaration {
///                 name: field.to_uppercase(),
///                 raw_name: field.to_string(),
///                 type_ref: TypeRef::named("app::models", target),
///                 required: false,
///             }],
///         },
///     )
/// };
/// let a = class("A", "b", "B");
/// let b = class("B", "a", "A");
///
/// let recursive = RecursiveFields::find([&a, &b]);
/// assert!(recursive.contains(&a, &a.properties()[0]));
/// assert!(recursive.contains(&b, &b.properties()[0]));
/// ```
#[derive(Debug, Default)]
pub struct RecursiveFields {
    /// `(namespace, class, raw property name)`
    fields: HashSet<(String, String, String)>,
}

impl RecursiveFields {
    /// Finds every class property that closes a by-value cycle.
    pub fn find<'d>(declarations: impl IntoIterator<Item = &'d TypeDeclaration>) -> Self {
        let declarations: Vec<&TypeDeclaration> = declarations.into_iter().collect();

        let mut edges: HashMap<Key<'_>, Vec<Key<'_>>> = HashMap::new();
        for declaration in &declarations {
            let targets: Vec<&TypeRef> = match &declaration.body {
                DeclarationBody::Class { base, properties } => base
                    .iter()
                    .chain(properties.iter().map(|p| &p.type_ref))
                    .collect(),
                DeclarationBody::Union { variants, .. } => variants.iter().map(|v| &v.type_ref).collect(),
                DeclarationBody::Alias { target } => vec![target],
                _ => Vec::new(),
            };
            edges
                .entry((declaration.namespace.as_str(), declaration.name.as_str()))
                .or_default()
                .extend(targets.into_iter().filter_map(key));
        }

        let mut fields = HashSet::new();
        let mut reach: HashMap<Key<'_>, HashSet<Key<'_>>> = HashMap::new();
        for declaration in &declarations {
            let DeclarationBody::Class { properties, .. } = &declaration.body else {
                continue;
            };
            let own = (declaration.namespace.as_str(), declaration.name.as_str());
            for property in properties {
                let Some(target) = key(&property.type_ref) else {
                    continue;
                };
                let closes_cycle = target == own
                    || reach
                        .entry(target)
                        .or_insert_with(|| reachable(&edges, target))
                        .contains(&own);
                if closes_cycle {
                    fields.insert((
                        declaration.namespace.clone(),
                        declaration.name.clone(),
                        property.raw_name.clone(),
                    ));
                }
            }
        }

        Self { fields }
    }

    pub fn contains(&self, declaration: &TypeDeclaration, property: &PropertyDeclaration) -> bool {
        self.fields.contains(&(
            declaration.namespace.clone(),
            declaration.name.clone(),
            property.raw_name.clone(),
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn reachable<'d>(edges: &HashMap<Key<'d>, Vec<Key<'d>>>, start: Key<'d>) -> HashSet<Key<'d>> {
    let mut seen = HashSet::new();
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        for next in edges.get(&node).into_iter().flatten() {
            if seen.insert(*next) {
                stack.push(*next);
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::UnionVariant;
    use schemata_define::SchemaType;

    fn property(raw: &str, type_ref: TypeRef) -> PropertyDeclaration {
        PropertyDeclaration {
            name: raw.to_uppercase(),
            raw_name: raw.into(),
            type_ref,
            required: false,
        }
    }

    fn class(name: &str, properties: Vec<PropertyDeclaration>) -> TypeDeclaration {
        TypeDeclaration::new(name, "tree::models", DeclarationBody::Class { base: None, properties })
    }

    fn named(name: &str) -> TypeRef {
        TypeRef::named("tree::models", name)
    }

    #[test]
    fn mutual_recursion_boxes_both_sides() {
        let a = class("A", vec![property("b", named("B")), property("label", TypeRef::primitive(SchemaType::String))]);
        let b = class("B", vec![property("a", named("A"))]);

        let recursive = RecursiveFields::find([&a, &b]);

        assert!(recursive.contains(&a, &a.properties()[0]));
        assert!(!recursive.contains(&a, &a.properties()[1]));
        assert!(recursive.contains(&b, &b.properties()[0]));
    }

    #[test]
    fn direct_self_reference_is_boxed() {
        let node = class("Node", vec![property("parent", named("Node"))]);
        let recursive = RecursiveFields::find([&node]);
        assert!(recursive.contains(&node, &node.properties()[0]));
    }

    #[test]
    fn list_fields_break_cycles() {
        let node = class("Node", vec![property("children", TypeRef::List(Box::new(named("Forest"))))]);
        let forest = class("Forest", vec![property("root", named("Node"))]);

        let recursive = RecursiveFields::find([&node, &forest]);

        assert!(recursive.is_empty());
    }

    #[test]
    fn cycle_through_union_boxes_the_class_field() {
        let node = class("Node", vec![property("next", named("Tree"))]);
        let leaf = class("Leaf", vec![]);
        let tree = TypeDeclaration::new(
            "Tree",
            "tree::models",
            DeclarationBody::Union {
                exclusive: true,
                variants: vec![
                    UnionVariant {
                        name: "Node".into(),
                        type_ref: named("Node"),
                    },
                    UnionVariant {
                        name: "Leaf".into(),
                        type_ref: named("Leaf"),
                    },
                ],
            },
        );

        let recursive = RecursiveFields::find([&node, &leaf, &tree]);

        assert!(recursive.contains(&node, &node.properties()[0]));
    }

    #[test]
    fn acyclic_references_stay_unboxed() {
        let pet = class("Pet", vec![property("owner", named("Owner"))]);
        let owner = class("Owner", vec![property("name", TypeRef::primitive(SchemaType::String))]);

        assert!(RecursiveFields::find([&pet, &owner]).is_empty());
    }
}
