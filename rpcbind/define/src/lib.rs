//! RPC schema model for rpcbind code generation.
//!
//! This crate owns everything the generator reads: schema documents, the
//! method list, and the curation tables that steer reference resolution.
//! It performs no type resolution itself; that is the job of `rpcbind-gen`.
//!
//! ## Core Types
//!
//! - [`SchemaStore`] - loads and caches [`SchemaDocument`]s by logical file name
//! - [`SchemaNode`] - a located sub-tree of a document, addressed by pointer path
//! - [`Reference`] - a cross-document pointer (`responses.json#/definitions/x`)
//! - [`MethodList`] / [`MethodSpec`] / [`ParameterSpec`] - the declared methods
//! - [`NamespaceSpec`] - methods grouped by name prefix, in schema order
//! - [`CurationTables`] - canonical-name overrides, generate-list, exclusions
//!
//! ## Examples
//!
//! ```
//! use rpcbind_define::{MethodList, SchemaStore};
//! use serde_json::json;
//!
//! let store = SchemaStore::in_memory([(
//!     "methods.json",
//!     json!({ "methods": [
//!         { "name": "account.setOffline", "responses": {
//!             "response": { "$ref": "responses.json#/definitions/ok_response" }
//!         }}
//!     ]}),
//! )]);
//!
//! let methods = MethodList::from_document(store.document("methods.json").unwrap()).unwrap();
//! let namespaces = methods.namespaces();
//! assert_eq!(namespaces[0].name, "account");
//! assert_eq!(namespaces[0].methods[0].method_part(), "setOffline");
//! ```

pub mod curation;
pub mod document;
pub mod errors;
pub mod method;
pub mod node;
pub mod reference;

pub use curation::CurationTables;
pub use document::{SchemaDocument, SchemaStore};
pub use errors::SchemaError;
pub use method::{MethodList, MethodSpec, NamespaceSpec, ParameterSpec};
pub use node::{DeclaredType, SchemaNode};
pub use reference::Reference;
