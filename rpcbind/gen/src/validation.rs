//! Validation of curation tables before generation.
//!
//! Canonical names and the canonical module end up verbatim in generated
//! code, so they are checked up front rather than surfacing as a confusing
//! `syn` parse failure halfway through a namespace.
//!
//! ## Validation Checks
//!
//! - **Canonical names**: every override target is a valid Rust type name
//! - **Canonical module**: a valid snake_case module name
//! - **Document names**: none of the logical document names is empty
//! - **Dead generate entries**: definitions both overridden and listed for
//!   generation are reported with a warning (the override wins)
//!
//! ## Examples
//!
//! ```
//! use rpcbind_define::CurationTables;
//! use rpcbind_gen::validation::validate_curation;
//!
//! let mut tables = CurationTables::default();
//! tables.overrides.insert("users_user_full".into(), "User".into());
//! assert!(validate_curation(&tables).is_ok());
//!
//! tables.overrides.insert("base_link".into(), "base link".into());
//! assert!(validate_curation(&tables).is_err());
//! ```

use rpcbind_define::CurationTables;

use crate::errors::GeneratorError;
use crate::naming::{is_module_identifier, is_type_identifier};

/// Validates curation tables before code generation.
///
/// ## Errors
///
/// - `GeneratorError::InvalidCanonicalName` if an override target is not a
///   valid type name
/// - `GeneratorError::ConfigError` if the canonical module or a document
///   name is unusable
pub fn validate_curation(tables: &CurationTables) -> Result<(), GeneratorError> {
    for (label, name) in [
        ("methods_document", &tables.methods_document),
        ("default_document", &tables.default_document),
        ("responses_document", &tables.responses_document),
    ] {
        if name.trim().is_empty() {
            return Err(GeneratorError::ConfigError(format!(
                "Curation field '{}' must name a schema document",
                label
            )));
        }
    }

    if !is_module_identifier(&tables.canonical_module) {
        return Err(GeneratorError::ConfigError(format!(
            "Canonical module '{}' is not a valid snake_case module name",
            tables.canonical_module
        )));
    }

    for (source, canonical) in &tables.overrides {
        if let Some(reason) = canonical_name_problem(canonical) {
            return Err(GeneratorError::InvalidCanonicalName {
                source_id: source.clone(),
                canonical: canonical.clone(),
                reason: reason.to_string(),
            });
        }
    }

    for entry in tables.shadowed_generate_entries() {
        tracing::warn!(
            definition = entry,
            "generate entry is also overridden; the override wins"
        );
    }

    Ok(())
}

fn canonical_name_problem(name: &str) -> Option<&'static str> {
    if is_type_identifier(name) {
        return None;
    }
    let reason = match name.chars().next() {
        None => "name is empty",
        Some(c) if !c.is_ascii_uppercase() => "must start with an uppercase ASCII letter",
        Some(_) if !name.chars().all(|c| c.is_ascii_alphanumeric()) => {
            "must contain only ASCII letters and digits"
        }
        Some(_) => "is a reserved word",
    };
    Some(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables_with_override(canonical: &str) -> CurationTables {
        let mut tables = CurationTables::default();
        tables
            .overrides
            .insert("users_user_full".to_string(), canonical.to_string());
        tables
    }

    #[test]
    fn default_tables_are_valid() {
        assert!(validate_curation(&CurationTables::default()).is_ok());
    }

    #[test]
    fn builtin_tables_are_valid() {
        let tables = CurationTables::builtin().unwrap();
        assert!(validate_curation(&tables).is_ok());
    }

    #[test]
    fn lowercase_canonical_name_rejected() {
        let err = validate_curation(&tables_with_override("user")).unwrap_err();
        match err {
            GeneratorError::InvalidCanonicalName {
                source_id,
                canonical,
                reason,
            } => {
                assert_eq!(source_id, "users_user_full");
                assert_eq!(canonical, "user");
                assert!(reason.contains("uppercase"));
            }
            other => panic!("Expected InvalidCanonicalName, got {:?}", other),
        }
    }

    #[test]
    fn punctuation_in_canonical_name_rejected() {
        let err = validate_curation(&tables_with_override("User-Full")).unwrap_err();
        assert!(err.to_string().contains("ASCII letters and digits"));
    }

    #[test]
    fn reserved_canonical_name_rejected() {
        let err = validate_curation(&tables_with_override("Self")).unwrap_err();
        assert!(err.to_string().contains("reserved word"));
    }

    #[test]
    fn empty_canonical_name_rejected() {
        assert!(validate_curation(&tables_with_override("")).is_err());
    }

    #[test]
    fn invalid_canonical_module_rejected() {
        let mut tables = CurationTables::default();
        tables.canonical_module = "Objects".to_string();
        let err = validate_curation(&tables).unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigError(_)));
    }

    #[test]
    fn empty_document_name_rejected() {
        let mut tables = CurationTables::default();
        tables.responses_document = String::new();
        let err = validate_curation(&tables).unwrap_err();
        assert!(err.to_string().contains("responses_document"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn shadowed_generate_entry_only_warns() {
        let mut tables = tables_with_override("User");
        tables.generate.insert("users_user_full".to_string());

        assert!(validate_curation(&tables).is_ok());
        assert!(logs_contain("generate entry is also overridden"));
    }
}
