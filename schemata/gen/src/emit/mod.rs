//! Rust emission for compiled declarations.
//!
//! Turns the declaration stream from [`crate::compile::Compiler`] into the
//! source files of a Rust library crate, validates every file with `syn`,
//! formats it with `prettyplease` and writes it atomically.
//!
//! ## Output Structure
//!
//! ```text
//! src/
//! ├── lib.rs         # Module declarations
//! ├── shared.rs      # RequestError and parameter helpers
//! ├── models.rs      # Classes, enumerations, unions and aliases
//! ├── requests.rs    # Request structs with build_request()
//! ├── responses.rs   # Response enums
//! └── api.rs         # One trait per tag
//! ```
//!
//! One file is written per file group, so a custom
//! [`NamespaceProvider`](crate::names::NamespaceProvider) controls the layout.
//! The generated crate depends on `serde` (derive), `serde_json`, `strum`
//! (derive), `thiserror` and `http`.

pub mod api;
pub mod idents;
pub mod recursion;
pub mod request;
pub mod shared;
pub mod types;

use std::fs;
use std::path::Path;

use proc_macro2::TokenStream;
use quote::quote;
use tracing::{debug, info};

use crate::compile::EmittedDeclaration;
use crate::config::ProtocolTypes;
use crate::decl::DeclarationBody;
use crate::errors::GeneratorError;

pub use recursion::RecursiveFields;
pub use shared::assemble_shared_module;

/// One formatted source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// File name relative to the output directory, e.g. `models.rs`.
    pub name: String,
    pub content: String,
}

/// Renders one declaration as Rust items.
///
/// ## Errors
///
/// Returns `CodeGenError` when a request's construction method cannot be
/// rendered.
pub fn render_declaration(
    emitted: &EmittedDeclaration,
    protocol: &ProtocolTypes,
    recursive: &RecursiveFields,
) -> Result<TokenStream, GeneratorError> {
    let declaration = &emitted.declaration;
    let tokens = match &declaration.body {
        DeclarationBody::Class { base, properties } => {
            types::render_class(declaration, base.as_ref(), properties, recursive)
        }
        DeclarationBody::Enum { underlying, members } => types::render_enum(declaration, *underlying, members),
        DeclarationBody::Union { variants, .. } => types::render_union(declaration, variants),
        DeclarationBody::Alias { target } => types::render_alias(declaration, target),
        DeclarationBody::Request {
            path,
            parameters,
            body,
            build_request,
            ..
        } => request::render_request(
            &request::RequestParts {
                declaration,
                path,
                parameters,
                body: body.as_ref(),
                build_request,
            },
            protocol,
        )?,
        DeclarationBody::Response { variants } => request::render_response(declaration, variants),
        DeclarationBody::ApiSurface { operations } => api::render_api_surface(declaration, operations),
    };
    Ok(tokens)
}

/// Module file names, in first-appearance order.
fn file_groups(declarations: &[EmittedDeclaration]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for emitted in declarations {
        let module = module_name(&emitted.namespace);
        if !groups.contains(&module) {
            groups.push(module);
        }
    }
    groups
}

fn module_name(namespace: &str) -> String {
    idents::module_ident(namespace)
        .to_string()
        .trim_start_matches("r#")
        .to_string()
}

/// Assembles `lib.rs`: the crate docs and one `pub mod` per module.
pub fn assemble_lib_rs(title: &str, modules: &[String]) -> TokenStream {
    let heading = format!(" {title}");
    let module_decls = modules.iter().map(|module| {
        let module = idents::ident(module);
        quote! { pub mod #module; }
    });

    quote! {
        #![doc = #heading]
        //!
        //! Generated types. Requires `serde` (derive), `serde_json`, `strum`
        //! (derive), `thiserror` and `http`.

        pub mod shared;

        #(#module_decls)*
    }
}

fn assemble_module(module: &str, items: &[TokenStream]) -> TokenStream {
    let heading = format!(" Generated `{module}` declarations.");
    quote! {
        #![doc = #heading]
        #![allow(deprecated)]

        #(#items)*
    }
}

/// Renders every file of the generated crate.
///
/// ## Errors
///
/// Returns `CodeGenError` if a declaration cannot be rendered, a file group
/// collides with `lib` or `shared`, or the output is not valid Rust.
pub fn render_crate(
    declarations: &[EmittedDeclaration],
    title: &str,
    protocol: &ProtocolTypes,
) -> Result<Vec<RenderedFile>, GeneratorError> {
    let modules = file_groups(declarations);
    if let Some(reserved) = modules.iter().find(|m| *m == "lib" || *m == "shared") {
        return Err(GeneratorError::CodeGenError(format!(
            "file group '{reserved}' collides with a fixed module"
        )));
    }

    let recursive = RecursiveFields::find(declarations.iter().map(|emitted| &emitted.declaration));
    let mut files = vec![
        format_file("lib.rs", &assemble_lib_rs(title, &modules))?,
        format_file("shared.rs", &assemble_shared_module())?,
    ];

    for module in &modules {
        let items = declarations
            .iter()
            .filter(|emitted| module_name(&emitted.namespace) == *module)
            .map(|emitted| render_declaration(emitted, protocol, &recursive))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(module = %module, declarations = items.len(), "rendered module");
        files.push(format_file(&format!("{module}.rs"), &assemble_module(module, &items))?);
    }

    Ok(files)
}

fn format_file(name: &str, tokens: &TokenStream) -> Result<RenderedFile, GeneratorError> {
    let file = validate_code(tokens).map_err(|e| match e {
        GeneratorError::CodeGenError(msg) => GeneratorError::CodeGenError(format!("{name}: {msg}")),
        other => other,
    })?;
    Ok(RenderedFile {
        name: name.to_string(),
        content: format_code(&file),
    })
}

/// Validates generated code using syn.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease, prepending the
/// auto-generated notice.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by schemata-gen. Do not edit manually.\n\n{}",
        formatted
    )
}

/// Writes content to a file atomically using temp file + rename.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Renders the crate and writes it under `output_dir`.
///
/// With `dry_run` the files are printed instead of written.
///
/// ## Errors
///
/// Returns an error if:
/// - Code generation produces invalid Rust
/// - File writing fails
pub fn generate_and_write(
    declarations: &[EmittedDeclaration],
    title: &str,
    protocol: &ProtocolTypes,
    output_dir: &Path,
    dry_run: bool,
) -> Result<Vec<RenderedFile>, GeneratorError> {
    let files = render_crate(declarations, title, protocol)?;

    if dry_run {
        for file in &files {
            println!("=== {} ===\n{}\n", file.name, file.content);
        }
    } else {
        for file in &files {
            write_atomic(&output_dir.join(&file.name), &file.content)?;
        }
        info!(files = files.len(), dir = %output_dir.display(), "wrote generated crate");
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::Compiler;
    use crate::config::GeneratorSettings;
    use crate::test_utils::{petstore_document, shapes_document};
    use schemata_define::{ApiDocument, SchemaNode, SchemaRef};
    use tempfile::TempDir;

    fn petstore_files() -> Vec<RenderedFile> {
        let doc = petstore_document();
        let settings = GeneratorSettings::new("petstore");
        let declarations = Compiler::new(&doc, settings.clone())
            .unwrap()
            .compile()
            .into_result()
            .unwrap();
        render_crate(&declarations, &doc.title, settings.protocol()).unwrap()
    }

    fn file<'f>(files: &'f [RenderedFile], name: &str) -> &'f str {
        files
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.content.as_str())
            .unwrap_or_else(|| panic!("missing {name}"))
    }

    #[test]
    fn petstore_renders_one_file_per_group() {
        let files = petstore_files();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names[..2], ["lib.rs", "shared.rs"]);
        for expected in ["models.rs", "requests.rs", "responses.rs", "api.rs"] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn lib_declares_every_module() {
        let files = petstore_files();
        let lib = file(&files, "lib.rs");

        assert!(lib.starts_with("// This code was automatically generated by schemata-gen."));
        assert!(lib.contains("pub mod shared;"));
        assert!(lib.contains("pub mod models;"));
        assert!(lib.contains("pub mod api;"));
    }

    #[test]
    fn models_contain_pet_and_its_inline_children() {
        let files = petstore_files();
        let models = file(&files, "models.rs");

        assert!(models.contains("pub struct Pet {"));
        assert!(models.contains("pub struct PetTagsItem {"));
        assert!(models.contains("pub tags: Option<Vec<crate::models::PetTagsItem>>"));
        assert!(models.contains("#![allow(deprecated)]"));
    }

    #[test]
    fn union_renders_from_shapes_document() {
        let doc = shapes_document();
        let settings = GeneratorSettings::new("shapes");
        let declarations = Compiler::new(&doc, settings.clone())
            .unwrap()
            .compile()
            .into_result()
            .unwrap();
        let files = render_crate(&declarations, &doc.title, settings.protocol()).unwrap();

        let models = file(&files, "models.rs");
        assert!(models.contains("pub struct Shape(ShapeVariant);"));
        assert!(models.contains("impl From<crate::models::Circle> for Shape"));
    }

    #[test]
    fn mutually_recursive_classes_are_boxed() {
        let doc = ApiDocument::new("Cycle")
            .with_schema("A", SchemaNode::object().with_property("b", SchemaRef::reference("B")))
            .with_schema(
                "B",
                SchemaNode::object()
                    .with_property("a", SchemaRef::reference("A"))
                    .with_property("siblings", SchemaNode::array(SchemaRef::reference("B"))),
            );
        let settings = GeneratorSettings::new("cycle");
        let declarations = Compiler::new(&doc, settings.clone())
            .unwrap()
            .compile()
            .into_result()
            .unwrap();
        let files = render_crate(&declarations, &doc.title, settings.protocol()).unwrap();

        let models = file(&files, "models.rs");
        assert!(models.contains("pub b: Option<Box<crate::models::B>>"));
        assert!(models.contains("pub a: Option<Box<crate::models::A>>"));
        assert!(models.contains("pub siblings: Option<Vec<crate::models::B>>"));
    }

    #[test]
    fn write_atomic_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.rs");

        write_atomic(&path, "// test").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "// test");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn generate_and_write_writes_every_file() {
        let temp_dir = TempDir::new().unwrap();
        let doc = petstore_document();
        let settings = GeneratorSettings::new("petstore");
        let declarations = Compiler::new(&doc, settings.clone())
            .unwrap()
            .compile()
            .into_result()
            .unwrap();

        let files = generate_and_write(&declarations, &doc.title, settings.protocol(), temp_dir.path(), false).unwrap();

        for file in &files {
            let written = fs::read_to_string(temp_dir.path().join(&file.name)).unwrap();
            assert_eq!(written, file.content);
        }
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let doc = petstore_document();
        let settings = GeneratorSettings::new("petstore");
        let declarations = Compiler::new(&doc, settings.clone())
            .unwrap()
            .compile()
            .into_result()
            .unwrap();

        generate_and_write(&declarations, &doc.title, settings.protocol(), temp_dir.path(), true).unwrap();

        assert!(!temp_dir.path().join("lib.rs").exists());
    }

    #[test]
    fn validate_code_rejects_invalid_tokens() {
        let tokens = quote! { fn broken() -> };
        match validate_code(&tokens) {
            Err(GeneratorError::CodeGenError(msg)) => assert!(msg.contains("invalid")),
            other => panic!("Expected CodeGenError, got: {:?}", other.map(|_| ())),
        }
    }
}
