//! Model declarations: classes, enumerations, unions and aliases.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use schemata_define::{EnumValue, SchemaType};

use super::idents::{attributes, ident, member_ident, type_tokens};
use super::recursion::RecursiveFields;
use crate::decl::{Annotation, EnumMember, PropertyDeclaration, TypeDeclaration, TypeRef, UnionVariant};
use crate::names::case::to_snake_case;

/// Renders a class as a serde struct.
///
/// A base type is flattened into a `base` field and exposed through `Deref`.
/// Optional properties become `Option<T>`. Properties listed in `recursive`
/// are boxed.
///
/// ## Examples
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
/// pub struct Pet {
///     #[serde(rename = "name")]
///     pub name: String,
///     #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
///     pub id: Option<i64>,
/// }
/// ```
pub fn render_class(
    declaration: &TypeDeclaration,
    base: Option<&TypeRef>,
    properties: &[PropertyDeclaration],
    recursive: &RecursiveFields,
) -> TokenStream {
    let name = ident(&declaration.name);
    let attrs = attributes(&declaration.docs, &declaration.annotations);

    let base_ty = base.map(type_tokens);
    let base_field = base_ty.as_ref().map(|ty| {
        quote! {
            #[serde(flatten)]
            pub base: #ty,
        }
    });

    let fields = properties.iter().map(|property| {
        let field = member_ident(&property.name);
        let raw = &property.raw_name;
        let mut ty = type_tokens(&property.type_ref);
        if recursive.contains(declaration, property) {
            ty = quote! { Box<#ty> };
        }

        if property.required {
            quote! {
                #[serde(rename = #raw)]
                pub #field: #ty,
            }
        } else {
            quote! {
                #[serde(rename = #raw, default, skip_serializing_if = "Option::is_none")]
                pub #field: Option<#ty>,
            }
        }
    });

    let deref = base_ty.map(|ty| {
        quote! {
            impl ::std::ops::Deref for #name {
                type Target = #ty;

                fn deref(&self) -> &Self::Target {
                    &self.base
                }
            }
        }
    });

    quote! {
        #attrs
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct #name {
            #base_field
            #(#fields)*
        }

        #deref
    }
}

/// Renders an enumeration.
///
/// String enumerations carrying [`Annotation::StringConversion`] also derive
/// `strum::Display` and `strum::EnumString` over their literals. Integer
/// enumerations are `#[repr(i64)]` and serialize as their discriminant.
pub fn render_enum(declaration: &TypeDeclaration, underlying: SchemaType, members: &[EnumMember]) -> TokenStream {
    match underlying {
        SchemaType::Integer => render_integer_enum(declaration, members),
        _ => render_literal_enum(declaration, members),
    }
}

fn render_literal_enum(declaration: &TypeDeclaration, members: &[EnumMember]) -> TokenStream {
    let name = ident(&declaration.name);
    let attrs = attributes(&declaration.docs, &declaration.annotations);
    let string_conversion = declaration.has_annotation(|a| *a == Annotation::StringConversion);

    let derives = if string_conversion {
        quote! {
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash,
                ::serde::Serialize, ::serde::Deserialize,
                ::strum::Display, ::strum::EnumString
            )]
        }
    } else {
        quote! {
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        }
    };

    let variants = members.iter().map(|member| {
        let variant = ident(&member.name);
        let literal = match &member.value {
            EnumValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        let strum = string_conversion.then(|| quote! { #[strum(serialize = #literal)] });
        quote! {
            #[serde(rename = #literal)]
            #strum
            #variant,
        }
    });

    quote! {
        #attrs
        #derives
        pub enum #name {
            #(#variants)*
        }
    }
}

fn render_integer_enum(declaration: &TypeDeclaration, members: &[EnumMember]) -> TokenStream {
    let name = ident(&declaration.name);
    let name_str = &declaration.name;
    let attrs = attributes(&declaration.docs, &declaration.annotations);

    // Null has no discriminant; optionality belongs to the referencing field.
    let members: Vec<(proc_macro2::Ident, TokenStream)> = members
        .iter()
        .filter_map(|member| match member.value {
            EnumValue::Integer(value) => Some((ident(&member.name), integer_literal(value))),
            _ => None,
        })
        .collect();

    let variants = members.iter().map(|(variant, value)| quote! { #variant = #value, });
    let arms = members.iter().map(|(variant, value)| quote! { #value => Ok(Self::#variant), });

    quote! {
        #attrs
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(into = "i64", try_from = "i64")]
        #[repr(i64)]
        pub enum #name {
            #(#variants)*
        }

        impl From<#name> for i64 {
            fn from(value: #name) -> Self {
                value as i64
            }
        }

        impl TryFrom<i64> for #name {
            type Error = String;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                match value {
                    #(#arms)*
                    other => Err(format!("{} is not a valid {}", other, #name_str)),
                }
            }
        }
    }
}

fn integer_literal(value: i64) -> TokenStream {
    let magnitude = Literal::u64_unsuffixed(value.unsigned_abs());
    if value < 0 {
        quote! { -#magnitude }
    } else {
        quote! { #magnitude }
    }
}

/// Renders a union as a newtype over a private untagged enum.
///
/// Values enter through `From<Branch>` and leave through
/// `TryFrom<Union> for Branch` or the `as_*` accessors, so the wrapper can
/// only ever hold one of its declared branches.
pub fn render_union(declaration: &TypeDeclaration, variants: &[UnionVariant]) -> TokenStream {
    let name = ident(&declaration.name);
    let inner = format_ident!("{}Variant", name);
    let attrs = attributes(&declaration.docs, &declaration.annotations);

    let branches: Vec<(proc_macro2::Ident, TokenStream, &UnionVariant)> = variants
        .iter()
        .map(|variant| (ident(&variant.name), type_tokens(&variant.type_ref), variant))
        .collect();

    let inner_variants = branches.iter().map(|(variant, ty, _)| quote! { #variant(#ty), });

    let conversions = branches.iter().map(|(variant, ty, _)| {
        quote! {
            impl From<#ty> for #name {
                fn from(value: #ty) -> Self {
                    Self(#inner::#variant(value))
                }
            }

            impl TryFrom<#name> for #ty {
                type Error = #name;

                fn try_from(value: #name) -> Result<Self, Self::Error> {
                    match value.0 {
                        #inner::#variant(branch) => Ok(branch),
                        #[allow(unreachable_patterns)]
                        other => Err(#name(other)),
                    }
                }
            }
        }
    });

    let accessors = branches.iter().map(|(variant, ty, declared)| {
        let accessor = ident(&format!("as_{}", to_snake_case(&declared.name)));
        let doc = format!(" The wrapped value when it is a `{}`.", declared.name);
        quote! {
            #[doc = #doc]
            pub fn #accessor(&self) -> Option<&#ty> {
                match &self.0 {
                    #inner::#variant(branch) => Some(branch),
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }
        }
    });

    quote! {
        #attrs
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct #name(#inner);

        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(untagged)]
        enum #inner {
            #(#inner_variants)*
        }

        #(#conversions)*

        impl #name {
            #(#accessors)*
        }
    }
}

pub fn render_alias(declaration: &TypeDeclaration, target: &TypeRef) -> TokenStream {
    let name = ident(&declaration.name);
    let attrs = attributes(&declaration.docs, &declaration.annotations);
    let target = type_tokens(target);

    quote! {
        #attrs
        pub type #name = #target;
    }
}
