//! Schema documents and the store that loads them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::errors::SchemaError;

/// A parsed schema document, immutable once loaded.
#[derive(Debug)]
pub struct SchemaDocument {
    name: String,
    root: Value,
}

impl SchemaDocument {
    /// Wraps an already parsed JSON tree.
    pub fn new(name: impl Into<String>, root: Value) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Logical file name (e.g. `objects.json`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The whole document tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Walks a slash-delimited path; numeric segments index arrays.
    ///
    /// ## Examples
    ///
    /// ```
    /// use rpcbind_define::SchemaDocument;
    /// use serde_json::json;
    ///
    /// let doc = SchemaDocument::new("objects.json", json!({
    ///     "definitions": { "base_bool_int": { "type": "integer", "enum": [0, 1] } }
    /// }));
    ///
    /// let node = doc.locate("/definitions/base_bool_int").unwrap();
    /// assert_eq!(node["type"], "integer");
    /// assert_eq!(doc.locate("/definitions/base_bool_int/enum/1").unwrap(), 1);
    /// assert!(doc.locate("/definitions/missing").is_none());
    /// ```
    pub fn locate(&self, path: &str) -> Option<&Value> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.root, |node, segment| match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }
}

#[derive(Debug)]
enum Source {
    Directory(PathBuf),
    Memory,
}

/// Loads schema documents by logical name and caches them for the lifetime
/// of a generation run.
///
/// Each document is read and parsed at most once; later lookups return the
/// same shared [`SchemaDocument`].
#[derive(Debug)]
pub struct SchemaStore {
    source: Source,
    documents: RwLock<HashMap<String, Arc<SchemaDocument>>>,
}

impl SchemaStore {
    /// A store that loads `<dir>/<name>` on first access.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(dir.into()),
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// A store pre-populated with documents; no file system access.
    pub fn in_memory<N, I>(documents: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
    {
        let documents = documents
            .into_iter()
            .map(|(name, root)| {
                let name = name.into();
                let doc = Arc::new(SchemaDocument::new(name.clone(), root));
                (name, doc)
            })
            .collect();

        Self {
            source: Source::Memory,
            documents: RwLock::new(documents),
        }
    }

    /// Directory documents are loaded from, if any.
    pub fn dir(&self) -> Option<&Path> {
        match &self.source {
            Source::Directory(dir) => Some(dir),
            Source::Memory => None,
        }
    }

    /// Returns the named document, loading it on first use.
    ///
    /// ## Errors
    ///
    /// Returns `SchemaError::Io` if the file cannot be read (or the store is
    /// in-memory and has no such document), or `SchemaError::Json` if the
    /// content does not parse.
    pub fn document(&self, name: &str) -> Result<Arc<SchemaDocument>, SchemaError> {
        {
            let cache = self
                .documents
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(doc) = cache.get(name) {
                return Ok(Arc::clone(doc));
            }
        }

        let doc = Arc::new(self.load(name)?);
        let mut cache = self
            .documents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let doc = cache.entry(name.to_string()).or_insert(doc);
        Ok(Arc::clone(doc))
    }

    fn load(&self, name: &str) -> Result<SchemaDocument, SchemaError> {
        let dir = match &self.source {
            Source::Directory(dir) => dir,
            Source::Memory => {
                return Err(SchemaError::Io {
                    path: name.to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "document not present in memory store",
                    ),
                });
            }
        };

        let path = dir.join(name);
        tracing::debug!(path = %path.display(), "loading schema document");

        let content = std::fs::read_to_string(&path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let root = serde_json::from_str(&content).map_err(|source| SchemaError::Json {
            document: name.to_string(),
            source,
        })?;

        Ok(SchemaDocument::new(name, root))
    }
}
