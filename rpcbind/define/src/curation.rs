//! Curation tables steering reference resolution.
//!
//! Curation is data, not code: a TOML document naming the logical schema
//! documents, the canonical-name overrides, the generate-list, success-flag
//! responses and excluded namespaces. A default table ships with the crate.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use crate::errors::SchemaError;

const BUILTIN: &str = include_str!("curation.toml");

/// Externally editable resolution curation.
///
/// ## Examples
///
/// ```
/// use rpcbind_define::CurationTables;
///
/// let tables = CurationTables::from_toml_str(r#"
///     generate = ["status_status"]
///     [overrides]
///     users_user_full = "User"
///     users_user_min = "User"
/// "#).unwrap();
///
/// assert_eq!(tables.canonical_name("users_user_min"), Some("User"));
/// assert!(tables.is_generated("status_status"));
/// assert_eq!(tables.default_document, "objects.json");
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CurationTables {
    /// Logical name of the method list document.
    pub methods_document: String,
    /// Document used when a reference has an empty document part.
    pub default_document: String,
    /// References into this document are always traversed.
    pub responses_document: String,
    /// Module of the bindings crate holding hand-authored canonical types.
    pub canonical_module: String,
    /// Definition ids whose responses decode as a plain success flag.
    pub success_flags: BTreeSet<String>,
    /// Namespaces skipped entirely.
    pub excluded_namespaces: BTreeSet<String>,
    /// Definition ids resolved structurally despite living outside the
    /// responses document.
    pub generate: BTreeSet<String>,
    /// Definition id to canonical type name. Many-to-one.
    pub overrides: BTreeMap<String, String>,
}

impl Default for CurationTables {
    fn default() -> Self {
        Self {
            methods_document: "methods.json".to_string(),
            default_document: "objects.json".to_string(),
            responses_document: "responses.json".to_string(),
            canonical_module: "objects".to_string(),
            success_flags: BTreeSet::from(["ok_response".to_string()]),
            excluded_namespaces: BTreeSet::new(),
            generate: BTreeSet::new(),
            overrides: BTreeMap::new(),
        }
    }
}

impl CurationTables {
    /// The table shipped with the crate.
    ///
    /// ## Errors
    ///
    /// Returns `SchemaError::Curation` only if the embedded table is malformed.
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::from_toml_str(BUILTIN)
    }

    /// Parses a TOML curation table; omitted keys take their defaults.
    ///
    /// ## Errors
    ///
    /// Returns `SchemaError::Curation` on TOML syntax errors, wrong value
    /// types or unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        toml::from_str(content).map_err(|e| SchemaError::Curation(e.to_string()))
    }

    /// Loads a TOML curation table from disk.
    ///
    /// ## Errors
    ///
    /// Returns `SchemaError::Io` if the file cannot be read, or
    /// `SchemaError::Curation` if it does not parse.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tables = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            overrides = tables.overrides.len(),
            generate = tables.generate.len(),
            "loaded curation tables"
        );
        Ok(tables)
    }

    pub fn canonical_name(&self, definition: &str) -> Option<&str> {
        self.overrides.get(definition).map(String::as_str)
    }

    pub fn is_generated(&self, definition: &str) -> bool {
        self.generate.contains(definition)
    }

    pub fn is_success_flag(&self, definition: &str) -> bool {
        self.success_flags.contains(definition)
    }

    pub fn is_excluded(&self, namespace: &str) -> bool {
        self.excluded_namespaces.contains(namespace)
    }

    /// Definition ids that are both overridden and in the generate-list.
    /// The override always wins, so the generate entry never takes effect.
    pub fn shadowed_generate_entries(&self) -> Vec<&str> {
        self.generate
            .iter()
            .filter(|id| self.overrides.contains_key(id.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_table_parses() {
        let tables = CurationTables::builtin().unwrap();
        assert_eq!(tables.canonical_name("users_user_full"), Some("User"));
        assert_eq!(tables.canonical_name("base_bool_int"), Some("BoolInt"));
        assert!(tables.is_generated("messages_conversation_member"));
        assert!(tables.is_excluded("ads"));
        assert!(tables.is_success_flag("ok_response"));
    }

    #[test]
    fn builtin_overrides_are_many_to_one() {
        let tables = CurationTables::builtin().unwrap();
        let users = ["users_user", "users_user_min", "users_user_full"];
        for id in users {
            assert_eq!(tables.canonical_name(id), Some("User"));
        }
    }

    #[test]
    fn builtin_shadowed_entries_are_reported() {
        let tables = CurationTables::builtin().unwrap();
        assert_eq!(tables.shadowed_generate_entries(), vec!["stats_wallpost_stat"]);
    }

    #[test]
    fn empty_table_uses_defaults() {
        let tables = CurationTables::from_toml_str("").unwrap();
        assert_eq!(tables, CurationTables::default());
        assert_eq!(tables.responses_document, "responses.json");
        assert_eq!(tables.canonical_module, "objects");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = CurationTables::from_toml_str("overides = {}").unwrap_err();
        assert!(matches!(err, SchemaError::Curation(_)));
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        assert!(CurationTables::from_toml_str("generate = \"x\"").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "excluded_namespaces = [\"ads\", \"leads\"]").unwrap();

        let tables = CurationTables::load(file.path()).unwrap();
        assert!(tables.is_excluded("leads"));
        assert!(!tables.is_excluded("users"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = CurationTables::load(Path::new("/nonexistent/curation.toml")).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }
}
