//! Reference resolution against the curation tables.
//!
//! A `$ref` resolves in one of three ways, checked in order:
//!
//! 1. The terminal segment is overridden: the canonical name is returned and
//!    the target is never read.
//! 2. The target lives in the responses document, or the terminal segment is
//!    in the generate-list: the target node is located for independent
//!    resolution.
//! 3. Otherwise the reference is opaque and becomes a placeholder.

use std::cell::RefCell;
use std::collections::HashMap;

use rpcbind_define::{CurationTables, Reference, SchemaError, SchemaNode, SchemaStore};

/// Outcome of resolving a reference.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Collapsed onto a canonical type.
    Canonical(String),
    /// Located node to resolve structurally.
    Node(SchemaNode),
    /// Neither overridden nor eligible for traversal, or the target does not exist.
    Opaque,
}

/// Resolves references, memoizing by normalized reference.
pub struct ReferenceResolver<'a> {
    store: &'a SchemaStore,
    curation: &'a CurationTables,
    memo: RefCell<HashMap<String, Resolution>>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(store: &'a SchemaStore, curation: &'a CurationTables) -> Self {
        Self {
            store,
            curation,
            memo: RefCell::new(HashMap::new()),
        }
    }

    pub fn curation(&self) -> &'a CurationTables {
        self.curation
    }

    /// Parses a raw `$ref` against the default document.
    pub fn parse(&self, raw: &str) -> Option<Reference> {
        match Reference::parse(raw, &self.curation.default_document) {
            Ok(reference) => Some(reference),
            Err(e) => {
                tracing::warn!(reference = raw, error = %e, "malformed reference");
                None
            }
        }
    }

    /// Resolves a raw `$ref` value.
    ///
    /// ## Errors
    ///
    /// Returns a `SchemaError` only when a traversed document cannot be
    /// loaded. Missing targets are [`Resolution::Opaque`].
    pub fn resolve(&self, raw: &str) -> Result<Resolution, SchemaError> {
        let Some(reference) = self.parse(raw) else {
            return Ok(Resolution::Opaque);
        };

        let key = reference.to_string();
        if let Some(hit) = self.memo.borrow().get(&key) {
            return Ok(hit.clone());
        }

        let resolution = self.resolve_uncached(&reference)?;
        self.memo.borrow_mut().insert(key, resolution.clone());
        Ok(resolution)
    }

    fn resolve_uncached(&self, reference: &Reference) -> Result<Resolution, SchemaError> {
        let terminal = reference.terminal();

        if let Some(canonical) = self.curation.canonical_name(terminal) {
            return Ok(Resolution::Canonical(canonical.to_string()));
        }

        let traversable = reference.document == self.curation.responses_document
            || self.curation.is_generated(terminal);
        if !traversable {
            return Ok(Resolution::Opaque);
        }

        match self.locate(reference)? {
            Some(node) => Ok(Resolution::Node(node)),
            None => {
                tracing::warn!(%reference, "reference target does not exist");
                Ok(Resolution::Opaque)
            }
        }
    }

    /// Locates the target node without consulting the curation tables.
    ///
    /// ## Errors
    ///
    /// Returns a `SchemaError` if the target document cannot be loaded.
    pub fn locate(&self, reference: &Reference) -> Result<Option<SchemaNode>, SchemaError> {
        let document = self.store.document(&reference.document)?;
        let node = SchemaNode::new(document, reference.path.clone());
        Ok(node.exists().then_some(node))
    }
}
