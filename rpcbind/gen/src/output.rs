//! Output assembly and file writing for generated bindings.
//!
//! This module handles the final phase of code generation: assembling the
//! generated pieces of each namespace into a module file, validating and
//! formatting it, and writing it to disk atomically.
//!
//! ## Output Structure
//!
//! ```text
//! bindings/src/
//! ├── lib.rs         # Module declarations and re-exports
//! ├── objects.rs     # Hand-authored canonical types (never generated)
//! ├── account.rs     # One module per namespace, in schema order
//! └── users.rs
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use rpcbind_define::{CurationTables, MethodList, SchemaError, SchemaStore};

use crate::binding::NamespaceBinding;
use crate::builder::TypeBuilder;
use crate::codegen::{
    ModuleDocBuilder, TypeRenderer, generate_method_fn, generate_params_struct,
    generate_receiver, generate_response_types,
};
use crate::errors::GeneratorError;
use crate::response::{ResponsePlan, plan_response};
use crate::validation::validate_curation;

/// One formatted output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the output directory.
    pub file_name: String,
    pub content: String,
}

/// Assembles the module code of one namespace.
///
/// The module contains, per method in schema order, its parameter struct,
/// its response declarations and any structs hoisted out of them, followed
/// by the receiver whose impl block holds every method.
///
/// ## Errors
///
/// Returns a `SchemaError` only if a referenced document cannot be loaded.
#[tracing::instrument(skip_all, fields(namespace = %namespace.name))]
pub fn assemble_namespace_module(
    namespace: &NamespaceBinding,
    builder: &TypeBuilder<'_>,
) -> Result<TokenStream, SchemaError> {
    let curation = builder.resolver().curation();
    let mut types = TypeRenderer::new(curation.canonical_module.as_str());
    types.reserve(&namespace.type_name);

    let plans = namespace
        .methods
        .iter()
        .map(|method| plan_response(method, builder))
        .collect::<Result<Vec<_>, _>>()?;

    // Top-level names first so hoisted structs never take them.
    for (method, plan) in namespace.methods.iter().zip(&plans) {
        if method.has_parameters() {
            types.reserve(&method.params_type_name());
        }
        match plan {
            ResponsePlan::BooleanWrapper => {}
            ResponsePlan::Single(decl) => types.reserve(&decl.type_name),
            ResponsePlan::Dual {
                type_name,
                normal,
                extended,
                ..
            } => {
                types.reserve(type_name);
                types.reserve(&normal.type_name);
                types.reserve(&extended.type_name);
            }
        }
    }

    let mut items = Vec::new();
    let mut functions = Vec::with_capacity(namespace.methods.len());

    for (method, plan) in namespace.methods.iter().zip(&plans) {
        tracing::debug!(method = %method.rpc_name, plan = plan_kind(plan), "emitting method");

        items.push(generate_params_struct(method, &mut types));
        items.push(generate_response_types(method, plan, &mut types));
        items.extend(types.take_hoisted());
        functions.push(generate_method_fn(method, plan));
    }

    let module_docs = ModuleDocBuilder::new(namespace).build();
    let receiver = generate_receiver(namespace, &functions);

    Ok(quote! {
        #module_docs

        #(#items)*

        #receiver
    })
}

fn plan_kind(plan: &ResponsePlan) -> &'static str {
    match plan {
        ResponsePlan::BooleanWrapper => "boolean",
        ResponsePlan::Single(_) => "single",
        ResponsePlan::Dual { .. } => "dual",
    }
}

/// Assembles the lib.rs content of the bindings crate.
///
/// Declares the hand-authored canonical module, one module per namespace,
/// and re-exports every receiver plus the runtime's `Transport` and
/// `BindingError`.
pub fn assemble_lib_rs(namespaces: &[NamespaceBinding], canonical_module: &str) -> TokenStream {
    let canonical = format_ident!("{}", canonical_module);
    let module_decls = namespaces.iter().map(|ns| {
        let module = format_ident!("{}", ns.module_name);
        quote! { pub mod #module; }
    });
    let reexports = namespaces.iter().map(|ns| {
        let module = format_ident!("{}", ns.module_name);
        let receiver = format_ident!("{}", ns.type_name);
        quote! { pub use #module::#receiver; }
    });

    quote! {
        //! Generated RPC bindings.
        //!
        //! Each namespace is a module with a receiver type borrowing an
        //! `rpcbind::Transport`:
        //!
        //! ```ignore
        //! let users = bindings::Users::new(&transport);
        //! let found = users.get(&bindings::users::UsersGetParams::default()).await?;
        //! ```

        pub mod #canonical;

        #(#module_decls)*

        #(#reexports)*

        pub use rpcbind::{BindingError, Transport};
    }
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

/// Formats generated code using prettyplease, prepending an auto-generated
/// notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by rpcbind-gen. Do not edit manually.\n\n{}",
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

fn render(tokens: &TokenStream) -> Result<String, GeneratorError> {
    let file = validate_code(tokens)?;
    Ok(format_code(&file))
}

/// Generates every output file for a schema: `lib.rs` first, then one
/// module per namespace in schema order.
///
/// ## Errors
///
/// Returns an error if:
/// - The curation tables fail validation
/// - A schema document cannot be loaded or has no method list
/// - A namespace module name clashes with another module
/// - Code generation produces invalid Rust
pub fn generate_bindings(
    store: &SchemaStore,
    curation: &CurationTables,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    validate_curation(curation)?;

    let methods = MethodList::from_document(store.document(&curation.methods_document)?)?;
    let builder = TypeBuilder::new(store, curation);
    let namespaces = NamespaceBinding::collect(&methods, &builder)?;
    check_module_names(&namespaces, &curation.canonical_module)?;

    let mut files = Vec::with_capacity(namespaces.len() + 1);
    files.push(GeneratedFile {
        file_name: "lib.rs".to_string(),
        content: render(&assemble_lib_rs(&namespaces, &curation.canonical_module))?,
    });

    for namespace in &namespaces {
        let tokens = assemble_namespace_module(namespace, &builder)?;
        files.push(GeneratedFile {
            file_name: format!("{}.rs", namespace.module_name),
            content: render(&tokens)?,
        });
        tracing::info!(
            namespace = %namespace.name,
            methods = namespace.methods.len(),
            "generated namespace module"
        );
    }

    Ok(files)
}

fn check_module_names(
    namespaces: &[NamespaceBinding],
    canonical_module: &str,
) -> Result<(), GeneratorError> {
    let mut taken: HashSet<&str> = HashSet::from([canonical_module, "lib"]);
    for namespace in namespaces {
        if !taken.insert(namespace.module_name.as_str()) {
            return Err(GeneratorError::ConfigError(format!(
                "Namespace '{}' maps to module '{}', which is already taken",
                namespace.name, namespace.module_name
            )));
        }
    }
    Ok(())
}

/// Generates the bindings and writes them to `output_dir`.
///
/// In dry-run mode every file is printed instead of written.
///
/// ## Returns
///
/// The generated files, in output order.
///
/// ## Errors
///
/// Returns an error if generation fails or a file cannot be written.
pub fn generate_and_write(
    store: &SchemaStore,
    curation: &CurationTables,
    output_dir: &Path,
    dry_run: bool,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let files = generate_bindings(store, curation)?;

    if dry_run {
        for file in &files {
            println!("=== {} ===\n{}\n", file.file_name, file.content);
        }
    } else {
        for file in &files {
            let path = output_dir.join(&file.file_name);
            write_atomic(&path, &file.content)?;
            tracing::debug!(path = %path.display(), "wrote file");
        }
    }

    Ok(files)
}
