//! Error types for loading schema documents and curation tables.

use thiserror::Error;

/// Errors raised while loading or interpreting schema input.
///
/// Note that unresolvable *type* shapes are not errors: the generator turns
/// them into placeholder types. These variants cover input that cannot be
/// read at all.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A schema or curation file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A schema document is not valid JSON.
    #[error("Schema document '{document}' is not valid JSON: {source}")]
    Json {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    /// The curation table could not be parsed.
    #[error("Invalid curation table: {0}")]
    Curation(String),

    /// A cross-document reference is malformed.
    #[error("Invalid reference '{0}'")]
    InvalidReference(String),

    /// The method list document has no `methods` array.
    #[error("Document '{0}' has no 'methods' array")]
    MissingMethods(String),
}
