//! Identifiers and type paths for rendered Rust.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use schemata_define::SchemaType;

use crate::decl::{Annotation, TypeRef};
use crate::names::case::to_snake_case;
use crate::names::file_group;

/// A valid Rust identifier for `raw`.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, digit-leading names get a
/// `_` prefix, keywords become raw identifiers and the four path keywords
/// that cannot be raw get a `_` suffix.
///
/// ## Examples
///
/// ```
/// use schemata_gen::emit::idents::ident;
///
/// assert_eq!(ident("pet_id").to_string(), "pet_id");
/// assert_eq!(ident("type").to_string(), "r#type");
/// assert_eq!(ident("self").to_string(), "self_");
/// assert_eq!(ident("x-trace").to_string(), "x_trace");
/// assert_eq!(ident("2fa").to_string(), "_2fa");
/// ```
pub fn ident(raw: &str) -> Ident {
    let mut cleaned: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if cleaned.chars().all(|c| c == '_') {
        cleaned.insert(0, 'v');
    } else if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        cleaned.insert(0, '_');
    }

    match cleaned.as_str() {
        "self" | "Self" | "super" | "crate" => format_ident!("{}_", cleaned),
        _ if syn::parse_str::<syn::Ident>(&cleaned).is_ok() => Ident::new(&cleaned, Span::call_site()),
        _ => Ident::new_raw(&cleaned, Span::call_site()),
    }
}

/// Struct field and method names are snake_case.
pub fn member_ident(name: &str) -> Ident {
    ident(&to_snake_case(name))
}

/// The module a namespace is rendered into.
pub fn module_ident(namespace: &str) -> Ident {
    ident(&to_snake_case(file_group(namespace)))
}

/// Rust type for a [`TypeRef`].
pub fn type_tokens(type_ref: &TypeRef) -> TokenStream {
    match type_ref {
        TypeRef::Primitive { kind, format } => primitive_tokens(*kind, format.as_deref()),
        TypeRef::Named { namespace, name } => {
            let module = module_ident(namespace);
            let name = ident(name);
            quote! { crate::#module::#name }
        }
        TypeRef::List(inner) => {
            let inner = type_tokens(inner);
            quote! { Vec<#inner> }
        }
        TypeRef::Any => quote! { ::serde_json::Value },
    }
}

fn primitive_tokens(kind: SchemaType, format: Option<&str>) -> TokenStream {
    match (kind, format) {
        (SchemaType::String, _) => quote! { String },
        (SchemaType::Integer, Some("int32")) => quote! { i32 },
        (SchemaType::Integer, _) => quote! { i64 },
        (SchemaType::Number, Some("float")) => quote! { f32 },
        (SchemaType::Number, _) => quote! { f64 },
        (SchemaType::Boolean, _) => quote! { bool },
        (SchemaType::Object, _) => quote! { ::serde_json::Map<String, ::serde_json::Value> },
        (SchemaType::Array, _) => quote! { Vec<::serde_json::Value> },
    }
}

/// `#[doc]` and `#[deprecated]` attributes for a declaration or method.
pub fn attributes(docs: &[String], annotations: &[Annotation]) -> TokenStream {
    let doc_lines = docs
        .iter()
        .map(String::as_str)
        .chain(annotations.iter().filter_map(|a| match a {
            Annotation::Doc(text) => Some(text.as_str()),
            _ => None,
        }))
        .map(|line| {
            let line = format!(" {line}");
            quote! { #[doc = #line] }
        });

    let deprecated = annotations.iter().find_map(|a| match a {
        Annotation::Obsolete { message } => Some(quote! { #[deprecated(note = #message)] }),
        _ => None,
    });

    quote! {
        #(#doc_lines)*
        #deprecated
    }
}
