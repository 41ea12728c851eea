//! Cross-document references (`$ref` values).

use std::fmt;

use crate::errors::SchemaError;

/// A pointer into a schema document: logical document name plus a
/// slash-delimited path.
///
/// ## Examples
///
/// ```
/// use rpcbind_define::Reference;
///
/// let r = Reference::parse("responses.json#/definitions/ok_response", "objects.json").unwrap();
/// assert_eq!(r.document, "responses.json");
/// assert_eq!(r.path, "/definitions/ok_response");
/// assert_eq!(r.terminal(), "ok_response");
///
/// // An empty document part means the default document
/// let r = Reference::parse("#/definitions/users_user_full", "objects.json").unwrap();
/// assert_eq!(r.document, "objects.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Logical document name (e.g. `objects.json`).
    pub document: String,
    /// Slash-delimited path inside the document, with a leading `/`, or empty
    /// for the whole document.
    pub path: String,
}

impl Reference {
    /// Parses a raw `$ref` value.
    ///
    /// ## Errors
    ///
    /// Returns `SchemaError::InvalidReference` for an empty reference or one
    /// with neither a document nor a path.
    pub fn parse(raw: &str, default_document: &str) -> Result<Self, SchemaError> {
        let raw = raw.trim();
        let (document, path) = match raw.split_once('#') {
            Some((document, path)) => (document, path),
            None => (raw, ""),
        };

        if document.is_empty() && path.is_empty() {
            return Err(SchemaError::InvalidReference(raw.to_string()));
        }

        let document = if document.is_empty() {
            default_document
        } else {
            document
        };

        let path = if path.is_empty() || path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Ok(Self {
            document: document.to_string(),
            path,
        })
    }

    /// The last non-empty path segment: the definition id.
    pub fn terminal(&self) -> &str {
        self.path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("")
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.document, self.path)
    }
}
