//! The declared method list.

use std::sync::Arc;

use serde_json::Value;

use crate::document::SchemaDocument;
use crate::errors::SchemaError;
use crate::node::SchemaNode;

/// One declared parameter of a method.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    /// Raw schema name, also the wire key.
    pub name: String,
    pub required: bool,
    pub description: Option<String>,
    /// The parameter's own schema (its `type`, `items`, ...).
    pub node: SchemaNode,
}

/// One entry of the method list.
#[derive(Debug, Clone)]
pub struct MethodSpec {
    /// Namespace-qualified RPC name, e.g. `users.get`.
    pub name: String,
    pub description: Option<String>,
    pub parameters: Vec<ParameterSpec>,
    /// The `responses.response` node (usually a `$ref`).
    pub response: SchemaNode,
    /// The `responses.extendedResponse` node, when declared.
    pub extended: Option<SchemaNode>,
}

impl MethodSpec {
    /// The part before the first `.`.
    pub fn namespace(&self) -> &str {
        self.name.split_once('.').map_or(self.name.as_str(), |(ns, _)| ns)
    }

    /// The part after the first `.`, or the whole name if there is none.
    pub fn method_part(&self) -> &str {
        self.name.split_once('.').map_or(self.name.as_str(), |(_, m)| m)
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Methods sharing a name prefix, in schema order.
#[derive(Debug, Clone)]
pub struct NamespaceSpec {
    pub name: String,
    pub methods: Vec<MethodSpec>,
}

/// The parsed `methods` array of the method list document.
#[derive(Debug, Clone)]
pub struct MethodList {
    methods: Vec<MethodSpec>,
}

impl MethodList {
    /// Reads `/methods` from the document.
    ///
    /// Entries without a string `name` are skipped with a warning.
    ///
    /// ## Errors
    ///
    /// Returns `SchemaError::MissingMethods` if the document has no
    /// `methods` array.
    pub fn from_document(document: Arc<SchemaDocument>) -> Result<Self, SchemaError> {
        let entries = document
            .locate("/methods")
            .and_then(Value::as_array)
            .ok_or_else(|| SchemaError::MissingMethods(document.name().to_string()))?;

        let mut methods = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let base = SchemaNode::new(Arc::clone(&document), format!("/methods/{}", index));

            let Some(name) = entry.get("name").and_then(Value::as_str) else {
                tracing::warn!(index, "skipping method entry without a name");
                continue;
            };

            let parameters = entry
                .get("parameters")
                .and_then(Value::as_array)
                .map(|params| {
                    params
                        .iter()
                        .enumerate()
                        .filter_map(|(i, param)| {
                            let param_name = param.get("name").and_then(Value::as_str)?;
                            let node = base.child("parameters").child(&i.to_string());
                            Some(ParameterSpec {
                                name: param_name.to_string(),
                                required: node.required_flag(),
                                description: node.description().map(str::to_string),
                                node,
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();

            let responses = base.child("responses");
            let extended = responses.child("extendedResponse");

            methods.push(MethodSpec {
                name: name.to_string(),
                description: base.description().map(str::to_string),
                parameters,
                response: responses.child("response"),
                extended: extended.exists().then_some(extended),
            });
        }

        Ok(Self { methods })
    }

    pub fn methods(&self) -> &[MethodSpec] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Groups methods by namespace. Namespaces appear in the order of their
    /// first method; methods keep their schema order.
    pub fn namespaces(&self) -> Vec<NamespaceSpec> {
        let mut namespaces: Vec<NamespaceSpec> = Vec::new();
        for method in &self.methods {
            let ns = method.namespace();
            match namespaces.iter_mut().find(|n| n.name == ns) {
                Some(existing) => existing.methods.push(method.clone()),
                None => namespaces.push(NamespaceSpec {
                    name: ns.to_string(),
                    methods: vec![method.clone()],
                }),
            }
        }
        namespaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list(value: Value) -> MethodList {
        MethodList::from_document(Arc::new(SchemaDocument::new("methods.json", value))).unwrap()
    }

    #[test]
    fn missing_methods_array_is_error() {
        let doc = Arc::new(SchemaDocument::new("methods.json", json!({"foo": []})));
        let err = MethodList::from_document(doc).unwrap_err();
        assert!(matches!(err, SchemaError::MissingMethods(name) if name == "methods.json"));
    }

    #[test]
    fn parses_parameters_and_responses() {
        let methods = list(json!({"methods": [{
            "name": "friends.get",
            "description": "Returns a list of user IDs",
            "parameters": [
                {"name": "user_id", "type": "integer", "required": true, "description": "User ID."},
                {"name": "fields", "type": "array", "items": {"type": "string"}}
            ],
            "responses": {
                "response": {"$ref": "responses.json#/definitions/friends_get_response"},
                "extendedResponse": {"$ref": "responses.json#/definitions/friends_get_fields_response"}
            }
        }]}));

        let m = &methods.methods()[0];
        assert_eq!(m.namespace(), "friends");
        assert_eq!(m.method_part(), "get");
        assert_eq!(m.description.as_deref(), Some("Returns a list of user IDs"));
        assert_eq!(m.parameters.len(), 2);
        assert!(m.parameters[0].required);
        assert_eq!(m.parameters[0].description.as_deref(), Some("User ID."));
        assert!(!m.parameters[1].required);
        assert!(m.parameters[1].node.items().is_some());
        assert_eq!(
            m.response.reference(),
            Some("responses.json#/definitions/friends_get_response")
        );
        assert!(m.extended.is_some());
    }

    #[test]
    fn no_extended_response() {
        let methods = list(json!({"methods": [
            {"name": "status.get", "responses": {"response": {"$ref": "x"}}}
        ]}));
        assert!(methods.methods()[0].extended.is_none());
        assert!(!methods.methods()[0].has_parameters());
    }

    #[test]
    fn unnamed_entries_are_skipped() {
        let methods = list(json!({"methods": [{"description": "?"}, {"name": "a.b"}]}));
        assert_eq!(methods.len(), 1);
    }

    #[test]
    fn namespaces_follow_first_appearance() {
        let methods = list(json!({"methods": [
            {"name": "users.get"},
            {"name": "account.ban"},
            {"name": "users.search"},
            {"name": "account.unban"}
        ]}));

        let namespaces = methods.namespaces();
        let names: Vec<_> = namespaces.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["users", "account"]);

        let users: Vec<_> = namespaces[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(users, vec!["users.get", "users.search"]);
    }
}
