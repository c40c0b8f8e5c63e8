//! Request structs and response enums.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use schemata_define::ParameterLocation;

use super::idents::{attributes, ident, member_ident, type_tokens};
use crate::config::ProtocolTypes;
use crate::decl::{MethodDeclaration, RequestParameter, RequestStep, ResponseVariant, TypeDeclaration, TypeRef, Verb};
use crate::errors::GeneratorError;
use crate::request::path_placeholders;

/// Everything needed to render one request declaration.
pub struct RequestParts<'d> {
    pub declaration: &'d TypeDeclaration,
    pub path: &'d str,
    pub parameters: &'d [RequestParameter],
    pub body: Option<&'d TypeRef>,
    pub build_request: &'d MethodDeclaration,
}

/// Renders a request struct and its message-building methods.
///
/// The generated impl carries `build_uri`, `add_headers`, `build_content`
/// and the request-construction method, whose body follows the method's
/// steps in order:
///
/// ```ignore
/// pub fn build_request(&self) -> Result<::http::Request<Vec<u8>>, crate::shared::RequestError> {
///     let mut request_message = ::http::Request::builder()
///         .method(::http::Method::GET)
///         .uri(self.build_uri()?)
///         .body(Vec::new())?;
///     self.add_headers(&mut request_message)?;
///     *request_message.body_mut() = self.build_content()?;
///     Ok(request_message)
/// }
/// ```
///
/// ## Errors
///
/// Returns `CodeGenError` when a protocol type is not a path or the method's
/// steps never create or never return the message.
pub fn render_request(parts: &RequestParts<'_>, protocol: &ProtocolTypes) -> Result<TokenStream, GeneratorError> {
    let declaration = parts.declaration;
    let name = ident(&declaration.name);
    let attrs = attributes(&declaration.docs, &declaration.annotations);

    let param_fields = parts.parameters.iter().map(|parameter| {
        let field = member_ident(&parameter.name);
        let ty = field_type(&parameter.type_ref, parameter.required);
        let doc = format!(" `{}` {} parameter.", parameter.raw_name, location_name(parameter.location));
        quote! {
            #[doc = #doc]
            pub #field: #ty,
        }
    });
    let body_field = parts.body.map(|body| {
        let ty = type_tokens(body);
        quote! { pub body: #ty, }
    });

    let build_uri = render_build_uri(parts);
    let add_headers = render_add_headers(parts);
    let build_content = render_build_content(parts.body.is_some());
    let build_request = render_build_request(parts.build_request, protocol)?;

    Ok(quote! {
        #attrs
        #[derive(Debug, Clone, PartialEq)]
        pub struct #name {
            #(#param_fields)*
            #body_field
        }

        impl #name {
            #build_uri

            #add_headers

            #build_content

            #build_request
        }
    })
}

fn field_type(type_ref: &TypeRef, required: bool) -> TokenStream {
    let ty = type_tokens(type_ref);
    if required { ty } else { quote! { Option<#ty> } }
}

fn location_name(location: ParameterLocation) -> &'static str {
    match location {
        ParameterLocation::Path => "path",
        ParameterLocation::Query => "query",
        ParameterLocation::Header => "header",
        ParameterLocation::Cookie => "cookie",
    }
}

/// Splits a path template into literal text and placeholder names, in order.
fn template_pieces(path: &str) -> Vec<TemplatePiece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = path;

    for placeholder in path_placeholders(path) {
        let marker = format!("{{{placeholder}}}");
        if let Some(at) = rest.find(&marker) {
            if at > 0 {
                pieces.push(TemplatePiece::Literal(&rest[..at]));
            }
            pieces.push(TemplatePiece::Placeholder(placeholder));
            rest = &rest[at + marker.len()..];
        }
    }
    if !rest.is_empty() {
        pieces.push(TemplatePiece::Literal(rest));
    }

    pieces
}

enum TemplatePiece<'p> {
    Literal(&'p str),
    Placeholder(&'p str),
}

fn render_build_uri(parts: &RequestParts<'_>) -> TokenStream {
    let segments = template_pieces(parts.path).into_iter().map(|piece| match piece {
        TemplatePiece::Literal(text) => quote! { uri.push_str(#text); },
        TemplatePiece::Placeholder(placeholder) => {
            let parameter = parts
                .parameters
                .iter()
                .find(|p| p.location == ParameterLocation::Path && p.raw_name == placeholder);
            match parameter {
                Some(parameter) => {
                    let field = member_ident(&parameter.name);
                    if parameter.required {
                        quote! { uri.push_str(&crate::shared::encode(&crate::shared::to_param(&self.#field)?)); }
                    } else {
                        quote! {
                            if let Some(value) = &self.#field {
                                uri.push_str(&crate::shared::encode(&crate::shared::to_param(value)?));
                            }
                        }
                    }
                }
                None => {
                    let text = format!("{{{placeholder}}}");
                    quote! { uri.push_str(#text); }
                }
            }
        }
    });

    let query = parts
        .parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Query)
        .map(|parameter| {
            let field = member_ident(&parameter.name);
            let key = &parameter.raw_name;
            if parameter.required {
                quote! {
                    query.push(format!("{}={}", crate::shared::encode(#key), crate::shared::encode(&crate::shared::to_param(&self.#field)?)));
                }
            } else {
                quote! {
                    if let Some(value) = &self.#field {
                        query.push(format!("{}={}", crate::shared::encode(#key), crate::shared::encode(&crate::shared::to_param(value)?)));
                    }
                }
            }
        })
        .collect::<Vec<_>>();

    let query_block = (!query.is_empty()).then(|| {
        quote! {
            let mut query: Vec<String> = Vec::new();
            #(#query)*
            if !query.is_empty() {
                uri.push('?');
                uri.push_str(&query.join("&"));
            }
        }
    });

    quote! {
        /// The request URI: the path with placeholders substituted, then the query.
        pub fn build_uri(&self) -> Result<String, crate::shared::RequestError> {
            let mut uri = String::new();
            #(#segments)*
            #query_block
            Ok(uri)
        }
    }
}

fn render_add_headers(parts: &RequestParts<'_>) -> TokenStream {
    let headers = parts
        .parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Header)
        .map(|parameter| {
            let field = member_ident(&parameter.name);
            let key = Literal::byte_string(parameter.raw_name.as_bytes());
            let insert = |value: TokenStream| {
                quote! {
                    request_message.headers_mut().insert(
                        ::http::header::HeaderName::from_bytes(#key)?,
                        ::http::header::HeaderValue::from_str(&crate::shared::to_param(#value)?)?,
                    );
                }
            };
            if parameter.required {
                insert(quote! { &self.#field })
            } else {
                let inner = insert(quote! { value });
                quote! {
                    if let Some(value) = &self.#field {
                        #inner
                    }
                }
            }
        });

    let content_type = parts.body.is_some().then(|| {
        quote! {
            request_message.headers_mut().insert(
                ::http::header::CONTENT_TYPE,
                ::http::header::HeaderValue::from_static("application/json"),
            );
        }
    });

    quote! {
        /// Adds the header parameters to `request_message`.
        #[allow(unused_variables)]
        pub fn add_headers(&self, request_message: &mut ::http::Request<Vec<u8>>) -> Result<(), crate::shared::RequestError> {
            #(#headers)*
            #content_type
            Ok(())
        }
    }
}

fn render_build_content(has_body: bool) -> TokenStream {
    let content = if has_body {
        quote! { Ok(::serde_json::to_vec(&self.body)?) }
    } else {
        quote! { Ok(Vec::new()) }
    };

    quote! {
        /// The serialized message content.
        pub fn build_content(&self) -> Result<Vec<u8>, crate::shared::RequestError> {
            #content
        }
    }
}

fn render_build_request(method: &MethodDeclaration, protocol: &ProtocolTypes) -> Result<TokenStream, GeneratorError> {
    let message_type = protocol_path(&protocol.message_type)?;
    let method_type = protocol_path(&protocol.method_type)?;

    let creates = method.steps.iter().any(|s| matches!(s, RequestStep::CreateMessage { .. }));
    let returns = method.steps.last() == Some(&RequestStep::Return);
    if !creates || !returns {
        return Err(GeneratorError::CodeGenError(format!(
            "method {} must create the message and end by returning it",
            method.name
        )));
    }

    let steps = method.steps.iter().map(|step| match step {
        RequestStep::CreateMessage { verb, .. } => {
            let verb = match verb {
                Verb::Constant(constant) => {
                    let constant = ident(constant);
                    quote! { #method_type::#constant }
                }
                Verb::Custom(literal) => {
                    let bytes = Literal::byte_string(literal.as_bytes());
                    quote! { #method_type::from_bytes(#bytes)? }
                }
            };
            quote! {
                let mut request_message = #message_type::builder()
                    .method(#verb)
                    .uri(self.build_uri()?)
                    .body(Vec::new())?;
            }
        }
        RequestStep::AddHeaders => quote! { self.add_headers(&mut request_message)?; },
        RequestStep::AssignContent => quote! { *request_message.body_mut() = self.build_content()?; },
        RequestStep::Return => quote! { Ok(request_message) },
    });

    let name = member_ident(&method.name);
    let attrs = attributes(&[], &method.annotations);

    Ok(quote! {
        #attrs
        pub fn #name(&self) -> Result<#message_type<Vec<u8>>, crate::shared::RequestError> {
            #(#steps)*
        }
    })
}

fn protocol_path(path: &str) -> Result<syn::Path, GeneratorError> {
    syn::parse_str(path).map_err(|e| GeneratorError::CodeGenError(format!("'{path}' is not a type path: {e}")))
}

/// Renders a response enum with one variant per status and a `status()`
/// accessor returning the status key.
pub fn render_response(declaration: &TypeDeclaration, variants: &[ResponseVariant]) -> TokenStream {
    let name = ident(&declaration.name);
    let attrs = attributes(&declaration.docs, &declaration.annotations);

    let enum_variants = variants.iter().map(|variant| {
        let variant_name = ident(&variant.name);
        let doc = format!(" `{}` response.", variant.status);
        match &variant.body {
            Some(body) => {
                let ty = type_tokens(body);
                quote! {
                    #[doc = #doc]
                    #variant_name(#ty),
                }
            }
            None => quote! {
                #[doc = #doc]
                #variant_name,
            },
        }
    });

    let status = (!variants.is_empty()).then(|| {
        let arms = variants.iter().map(|variant| {
            let variant_name = ident(&variant.name);
            let status = &variant.status;
            if variant.body.is_some() {
                quote! { Self::#variant_name(..) => #status, }
            } else {
                quote! { Self::#variant_name => #status, }
            }
        });
        quote! {
            impl #name {
                /// The status key this response was declared under.
                pub fn status(&self) -> &'static str {
                    match self {
                        #(#arms)*
                    }
                }
            }
        }
    });

    quote! {
        #attrs
        #[derive(Debug, Clone, PartialEq)]
        pub enum #name {
            #(#enum_variants)*
        }

        #status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::Compiler;
    use crate::config::GeneratorSettings;
    use crate::decl::DeclarationBody;
    use crate::test_utils::{declaration, petstore_document};

    fn render(name: &str) -> String {
        let doc = petstore_document();
        let settings = GeneratorSettings::new("petstore");
        let output = Compiler::new(&doc, settings.clone()).unwrap().compile();
        let declaration = declaration(&output, name);
        let DeclarationBody::Request {
            path,
            parameters,
            body,
            build_request,
            ..
        } = &declaration.body
        else {
            panic!("Expected request, got: {:?}", declaration.body);
        };
        let parts = RequestParts {
            declaration,
            path,
            parameters,
            body: body.as_ref(),
            build_request,
        };
        let tokens = render_request(&parts, settings.protocol()).unwrap();
        let file: syn::File = syn::parse2(tokens).expect("rendered request should parse");
        prettyplease::unparse(&file)
    }

    #[test]
    fn path_parameters_are_substituted() {
        let code = render("GetPetRequest");

        assert!(code.contains("pub struct GetPetRequest"));
        assert!(code.contains("pub pet_id: i64"));
        assert!(code.contains("uri.push_str(\"/pets/\")"));
        assert!(code.contains("self.pet_id"));
        assert!(code.contains(".method(::http::Method::GET)"));
    }

    #[test]
    fn body_is_serialized_as_json() {
        let code = render("AddPetRequest");

        assert!(code.contains("pub body: crate::models::Pet"));
        assert!(code.contains("::serde_json::to_vec(&self.body)"));
        assert!(code.contains("CONTENT_TYPE"));
    }

    #[test]
    fn custom_verb_is_built_from_bytes() {
        let code = render("PurgePetsRequest");

        assert!(code.contains("::http::Method::from_bytes(b\"PURGE\")?"));
        assert!(code.contains("#[deprecated"));
    }

    #[test]
    fn steps_must_end_with_return() {
        let method = MethodDeclaration {
            name: "BuildRequest".into(),
            annotations: vec![],
            steps: vec![RequestStep::AddHeaders],
        };

        match render_build_request(&method, &ProtocolTypes::default()) {
            Err(GeneratorError::CodeGenError(msg)) => assert!(msg.contains("BuildRequest")),
            other => panic!("Expected CodeGenError, got: {:?}", other.map(|t| t.to_string())),
        }
    }

    #[test]
    fn template_keeps_literal_text_between_placeholders() {
        let pieces = template_pieces("/owners/{ownerId}/pets/{petId}");
        let rendered: Vec<String> = pieces
            .into_iter()
            .map(|p| match p {
                TemplatePiece::Literal(t) => t.to_string(),
                TemplatePiece::Placeholder(n) => format!("<{n}>"),
            })
            .collect();
        assert_eq!(rendered, vec!["/owners/", "<ownerId>", "/pets/", "<petId>"]);
    }

    #[test]
    fn response_enum_has_status_accessor() {
        let doc = petstore_document();
        let output = Compiler::new(&doc, GeneratorSettings::new("petstore")).unwrap().compile();
        let response = declaration(&output, "GetPetResponse");
        let DeclarationBody::Response { variants } = &response.body else {
            panic!("Expected response, got: {:?}", response.body);
        };

        let file: syn::File = syn::parse2(render_response(response, variants)).unwrap();
        let code = prettyplease::unparse(&file);

        assert!(code.contains("Status200(crate::models::Pet)"));
        assert!(code.contains("Status404,"));
        assert!(code.contains("Self::Status404 => \"404\""));
    }

    #[test]
    fn empty_response_enum_has_no_status_accessor() {
        let empty = TypeDeclaration::new(
            "PingResponse",
            "petstore::responses",
            DeclarationBody::Response { variants: vec![] },
        );
        let code = render_response(&empty, &[]).to_string();
        assert!(!code.contains("status"));
    }
}
