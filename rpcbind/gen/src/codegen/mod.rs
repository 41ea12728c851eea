//! Code generation for namespace modules.
//!
//! Each submodule turns one piece of a [`NamespaceBinding`](crate::binding::NamespaceBinding)
//! into Rust tokens:
//!
//! - [`types`] - descriptor to Rust type rendering, hoisting inline structs
//! - [`params_struct`] - the per-method `<Ns><Method>Params` struct
//! - [`response_types`] - response aliases, structs and dual-shape enums
//! - [`method_fn`] - the `async fn` dispatching to the transport and decoding
//! - [`receiver`] - the namespace receiver struct and its impl block
//! - [`module_docs`] - the module-level documentation
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod method_fn;
pub mod module_docs;
pub mod params_struct;
pub mod receiver;
pub mod response_types;
pub mod types;

pub use method_fn::generate_method_fn;
pub use module_docs::ModuleDocBuilder;
pub use params_struct::generate_params_struct;
pub use receiver::generate_receiver;
pub use response_types::generate_response_types;
pub use types::TypeRenderer;
