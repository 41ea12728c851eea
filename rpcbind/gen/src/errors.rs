//! Error types for the rpcbind generator.

use rpcbind_define::SchemaError;
use thiserror::Error;

/// Errors that can occur during code generation.
///
/// Unresolvable schema shapes are not errors; they become placeholder types.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Schema or curation input could not be loaded
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A curation override maps onto a name that is not a usable type name.
    #[error("Invalid canonical name '{canonical}' for '{source_id}': {reason}")]
    InvalidCanonicalName {
        /// The schema definition id being overridden.
        source_id: String,
        /// The rejected canonical name.
        canonical: String,
        /// Explanation of why the name is invalid.
        reason: String,
    },
}
