//! Located schema sub-trees.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::document::SchemaDocument;

static NULL: Value = Value::Null;

/// The `type` keyword of a schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// `"type": "integer"`
    Single(String),
    /// `"type": ["integer", "string"]`
    Union(Vec<String>),
}

impl DeclaredType {
    /// Returns `true` for a single declared type equal to `name`.
    pub fn is(&self, name: &str) -> bool {
        matches!(self, Self::Single(t) if t == name)
    }
}

/// A sub-tree of a [`SchemaDocument`], addressed by a slash-delimited path.
///
/// Nodes are cheap handles: they share the document through an `Arc` and
/// look up their value on demand. A node whose path does not exist behaves
/// like an empty schema (`value()` is `null`, every accessor returns `None`).
#[derive(Debug, Clone)]
pub struct SchemaNode {
    document: Arc<SchemaDocument>,
    path: String,
}

impl SchemaNode {
    /// Creates a node; `path` may point nowhere.
    pub fn new(document: Arc<SchemaDocument>, path: impl Into<String>) -> Self {
        Self {
            document,
            path: path.into(),
        }
    }

    /// The whole document.
    pub fn root(document: Arc<SchemaDocument>) -> Self {
        Self::new(document, "")
    }

    pub fn document(&self) -> &Arc<SchemaDocument> {
        &self.document
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `<document>#<path>`, the stable identity of this node.
    pub fn location(&self) -> String {
        format!("{}#{}", self.document.name(), self.path)
    }

    pub fn value(&self) -> &Value {
        self.document.locate(&self.path).unwrap_or(&NULL)
    }

    pub fn exists(&self) -> bool {
        self.document.locate(&self.path).is_some()
    }

    /// A child node one path segment below this one.
    pub fn child(&self, segment: &str) -> SchemaNode {
        Self::new(Arc::clone(&self.document), format!("{}/{}", self.path, segment))
    }

    fn object(&self) -> Option<&Map<String, Value>> {
        self.value().as_object()
    }

    fn keyword(&self, key: &str) -> Option<&Value> {
        self.object().and_then(|o| o.get(key))
    }

    /// The `type` keyword, if it is a string or an array of strings.
    pub fn declared_type(&self) -> Option<DeclaredType> {
        match self.keyword("type")? {
            Value::String(t) => Some(DeclaredType::Single(t.clone())),
            Value::Array(items) => Some(DeclaredType::Union(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// The raw `$ref` value.
    pub fn reference(&self) -> Option<&str> {
        self.keyword("$ref").and_then(Value::as_str)
    }

    /// The `description`, unless absent or blank.
    pub fn description(&self) -> Option<&str> {
        self.keyword("description")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// The element schema of an array.
    pub fn items(&self) -> Option<SchemaNode> {
        self.keyword("items").map(|_| self.child("items"))
    }

    /// Declared properties in declaration order.
    pub fn properties(&self) -> Option<Vec<(String, SchemaNode)>> {
        let props = self.keyword("properties")?.as_object()?;
        let base = self.child("properties");
        Some(
            props
                .keys()
                .map(|name| (name.clone(), base.child(name)))
                .collect(),
        )
    }

    /// Members of an `allOf` composition.
    pub fn all_of(&self) -> Option<Vec<SchemaNode>> {
        let members = self.keyword("allOf")?.as_array()?;
        let base = self.child("allOf");
        Some(
            (0..members.len())
                .map(|i| base.child(&i.to_string()))
                .collect(),
        )
    }

    /// The schema of a `patternProperties` entry. `pattern` must not contain `/`.
    pub fn pattern_property(&self, pattern: &str) -> Option<SchemaNode> {
        self.keyword("patternProperties")?
            .as_object()?
            .get(pattern)
            .map(|_| self.child("patternProperties").child(pattern))
    }

    /// Whether `property` is required, from either the object-level
    /// `required: [..]` list or a per-property `required: true`.
    pub fn is_required(&self, property: &str) -> bool {
        let listed = self
            .keyword("required")
            .and_then(Value::as_array)
            .is_some_and(|names| names.iter().any(|n| n.as_str() == Some(property)));

        listed
            || self
                .keyword("properties")
                .and_then(|p| p.get(property))
                .and_then(|p| p.get("required"))
                .and_then(Value::as_bool)
                .unwrap_or(false)
    }

    /// The node's own boolean `required` flag (parameter style).
    pub fn required_flag(&self) -> bool {
        self.keyword("required")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn has_keyword(&self, key: &str) -> bool {
        self.keyword(key).is_some()
    }

    pub fn str_keyword(&self, key: &str) -> Option<&str> {
        self.keyword(key).and_then(Value::as_str)
    }
}
