//! rpcbind code generator library.
//!
//! This crate turns a JSON-Schema-like RPC API description (loaded with
//! `rpcbind-define`) into typed Rust client bindings backed by the `rpcbind`
//! runtime. The generated code includes, per namespace:
//!
//! - A receiver struct borrowing an `rpcbind::Transport`
//! - A `<Ns><Method>Params` struct for every method with parameters
//! - Response structs, aliases and dual-shape enums
//! - An `async fn` per method that dispatches the call and decodes the result
//!
//! ## Pipeline
//!
//! 1. [`resolver`] - `$ref` resolution against the curation tables
//! 2. [`builder`] - recursive schema node to [`descriptor`] resolution
//! 3. [`params`] / [`response`] - per-method parameter encodings and decode plans
//! 4. [`binding`] - namespace and method descriptors
//! 5. [`codegen`] - token generation for each piece
//! 6. [`output`] - assembly, validation, formatting and atomic writes
//!
//! [`validation`] checks the curation tables before any of this runs,
//! [`naming`] holds the identifier transliteration rules and
//! [`cargo_gen`] writes a manifest for the bindings package.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use rpcbind_define::{CurationTables, SchemaStore};
//! use rpcbind_gen::output::generate_and_write;
//!
//! let store = SchemaStore::open("schema");
//! let curation = CurationTables::builtin().unwrap();
//!
//! // dry_run=true prints the files instead of writing them
//! let files = generate_and_write(&store, &curation, Path::new("bindings/src"), true).unwrap();
//! println!("{} files", files.len());
//! ```
//!
//! ## Generated Code Structure
//!
//! For a namespace `users` with a method `users.get`:
//!
//! ```text
//! pub struct UsersGetParams { pub user_ids: Option<rpcbind::CsvStringList>, ... }
//! pub type UsersGetResponse = Vec<crate::objects::User>;
//!
//! pub struct Users<'a, T: rpcbind::Transport> { transport: &'a T }
//!
//! impl<'a, T: rpcbind::Transport> Users<'a, T> {
//!     pub async fn get(&self, params: &UsersGetParams)
//!         -> Result<UsersGetResponse, rpcbind::BindingError>;
//! }
//! ```

pub mod binding;
pub mod builder;
pub mod cargo_gen;
pub mod codegen;
pub mod descriptor;
pub mod errors;
pub mod naming;
pub mod output;
pub mod params;
pub mod resolver;
pub mod response;
pub mod validation;

#[cfg(test)]
mod test_utils;
