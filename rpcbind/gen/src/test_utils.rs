//! Shared test utilities for rpcbind-gen tests.
//!
//! The fixture schema lives in `tests/fixtures/` so the integration tests
//! and these unit-test helpers read the same documents.

use std::path::PathBuf;

use proc_macro2::TokenStream;
use rpcbind_define::{CurationTables, MethodList, MethodSpec, SchemaStore};

/// Directory holding the fixture schema documents.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// A store over the fixture documents.
pub fn fixture_store() -> SchemaStore {
    SchemaStore::open(fixtures_dir())
}

/// The fixture curation table.
pub fn test_curation() -> CurationTables {
    CurationTables::load(&fixtures_dir().join("curation.toml"))
        .expect("fixture curation.toml should parse")
}

/// Looks up one method of the fixture method list by RPC name.
pub fn fixture_method(store: &SchemaStore, name: &str) -> MethodSpec {
    let document = store
        .document("methods.json")
        .expect("fixture methods.json should load");
    let methods = MethodList::from_document(document).expect("fixture should have methods");
    methods
        .methods()
        .iter()
        .find(|m| m.name == name)
        .cloned()
        .unwrap_or_else(|| panic!("fixture method '{}' not found", name))
}

/// Parses and pretty-prints tokens, panicking with the token text on failure.
pub fn format_tokens(tokens: &TokenStream) -> String {
    let file = syn::parse2::<syn::File>(tokens.clone())
        .unwrap_or_else(|e| panic!("generated code should parse: {}\n{}", e, tokens));
    prettyplease::unparse(&file)
}
