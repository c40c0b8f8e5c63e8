//! API surface traits.

use proc_macro2::TokenStream;
use quote::quote;

use super::idents::{attributes, ident, member_ident, type_tokens};
use crate::decl::{ApiOperation, TypeDeclaration};

/// Renders an API surface as a trait with one method per operation.
///
/// ```ignore
/// pub trait PetsApi {
///     fn get_pet(
///         &self,
///         request: crate::requests::GetPetRequest,
///     ) -> Result<crate::responses::GetPetResponse, crate::shared::RequestError>;
/// }
/// ```
pub fn render_api_surface(declaration: &TypeDeclaration, operations: &[ApiOperation]) -> TokenStream {
    let name = ident(&declaration.name);
    let attrs = attributes(&declaration.docs, &declaration.annotations);

    let methods = operations.iter().map(|operation| {
        let method = member_ident(&operation.name);
        let request = type_tokens(&operation.request);
        let response = type_tokens(&operation.response);
        let deprecated = operation.deprecated.then(|| quote! { #[deprecated] });
        quote! {
            #deprecated
            fn #method(&self, request: #request) -> Result<#response, crate::shared::RequestError>;
        }
    });

    quote! {
        #attrs
        pub trait #name {
            #(#methods)*
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{DeclarationBody, TypeRef};

    #[test]
    fn operations_become_trait_methods() {
        let operations = vec![
            ApiOperation {
                name: "GetPet".into(),
                request: TypeRef::named("petstore::requests", "GetPetRequest"),
                response: TypeRef::named("petstore::responses", "GetPetResponse"),
                deprecated: false,
            },
            ApiOperation {
                name: "PurgePets".into(),
                request: TypeRef::named("petstore::requests", "PurgePetsRequest"),
                response: TypeRef::named("petstore::responses", "PurgePetsResponse"),
                deprecated: true,
            },
        ];
        let api = TypeDeclaration::new(
            "PetsApi",
            "petstore::api",
            DeclarationBody::ApiSurface {
                operations: operations.clone(),
            },
        );

        let file: syn::File = syn::parse2(render_api_surface(&api, &operations)).unwrap();
        let code = prettyplease::unparse(&file);

        assert!(code.contains("pub trait PetsApi"));
        assert!(code.contains("fn get_pet("));
        assert!(code.contains("request: crate::requests::GetPetRequest"));
        assert!(code.contains("#[deprecated]"));
    }
}
