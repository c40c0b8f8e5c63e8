//! The shared module every generated crate carries.

use proc_macro2::TokenStream;
use quote::quote;

/// Generates the shared error type and parameter helpers.
///
/// `RequestError` wraps every failure a request-construction method can
/// hit; each variant converts from its source with `?`.
pub fn assemble_shared_module() -> TokenStream {
    quote! {
        //! Types shared by generated requests.

        /// Failure while building a protocol message.
        #[derive(Debug, ::thiserror::Error)]
        pub enum RequestError {
            #[error("failed to build request: {0}")]
            Http(#[from] ::http::Error),

            #[error("invalid header name: {0}")]
            HeaderName(#[from] ::http::header::InvalidHeaderName),

            #[error("invalid header value: {0}")]
            HeaderValue(#[from] ::http::header::InvalidHeaderValue),

            #[error("invalid method: {0}")]
            Method(#[from] ::http::method::InvalidMethod),

            #[error("failed to serialize request content: {0}")]
            Serialization(#[from] ::serde_json::Error),
        }

        /// Plain-text form of a parameter value.
        ///
        /// Strings are used as-is, lists are joined with `,` and everything
        /// else uses its JSON text.
        pub fn to_param<T: ::serde::Serialize + ?Sized>(value: &T) -> Result<String, RequestError> {
            Ok(match ::serde_json::to_value(value)? {
                ::serde_json::Value::Array(items) => items.iter().map(plain).collect::<Vec<_>>().join(","),
                other => plain(&other),
            })
        }

        fn plain(value: &::serde_json::Value) -> String {
            match value {
                ::serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            }
        }

        /// Percent-encodes everything outside the unreserved set.
        pub fn encode(raw: &str) -> String {
            let mut encoded = String::with_capacity(raw.len());
            for byte in raw.bytes() {
                match byte {
                    b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => encoded.push(byte as char),
                    other => encoded.push_str(&format!("%{:02X}", other)),
                }
            }
            encoded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_module_is_valid_rust() {
        let file: syn::File = syn::parse2(assemble_shared_module()).expect("shared module should parse");
        let code = prettyplease::unparse(&file);

        assert!(code.contains("pub enum RequestError"));
        assert!(code.contains("#[derive(Debug, ::thiserror::Error)]"));
        assert!(code.contains("pub fn to_param"));
        assert!(code.contains("pub fn encode"));
    }

    #[test]
    fn every_error_variant_converts_from_its_source() {
        let file: syn::File = syn::parse2(assemble_shared_module()).unwrap();
        let code = prettyplease::unparse(&file);
        for variant in ["Http", "HeaderName", "HeaderValue", "Method", "Serialization"] {
            assert!(code.contains(variant), "missing {variant}");
        }
        assert_eq!(code.matches("#[from]").count(), 5);
    }
}
