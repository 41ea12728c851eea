//! The recursive type descriptor builder.
//!
//! Turns any [`SchemaNode`] into a [`Resolved`] descriptor:
//!
//! 1. `allOf` compositions concatenate member fields into one inline struct;
//!    members that resolve to a canonical type are embedded whole.
//! 2. `array` levels are peeled off and counted.
//! 3. The terminal node is classified: primitive, `{integer, string}` union,
//!    inline object, numeric-key map, declared-dynamic object, or `$ref`
//!    (delegated to the [`ReferenceResolver`] and resolved recursively).
//! 4. The terminal kind is wrapped back in the counted array levels.
//!
//! Shapes that match none of the above become placeholders; resolution never
//! fails because of schema content.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use rpcbind_define::{CurationTables, DeclaredType, SchemaError, SchemaNode, SchemaStore};

use crate::descriptor::{FieldDescriptor, Primitive, Resolved, TypeDescriptor, TypeKind};
use crate::resolver::{ReferenceResolver, Resolution};

/// `patternProperties` key marking an object keyed by numeric ids.
pub const NUMERIC_KEY_PATTERN: &str = "^[0-9]+$";

/// Key of the payload inside a response envelope.
const ENVELOPE_PAYLOAD: &str = "response";

/// A memoized reference together with every reference location its build
/// passed through, cut targets included.
#[derive(Clone)]
struct Memo {
    resolved: Resolved,
    visited: HashSet<String>,
}

/// Builds type descriptors, memoizing resolved references by location.
///
/// A memo entry is only stored and only reused while none of the locations it
/// visited are being resolved, so every location resolves to the same
/// descriptor whatever was resolved before it.
pub struct TypeBuilder<'a> {
    resolver: ReferenceResolver<'a>,
    cache: RefCell<HashMap<String, Memo>>,
    in_progress: RefCell<HashSet<String>>,
    visiting: RefCell<Vec<HashSet<String>>>,
}

impl<'a> TypeBuilder<'a> {
    pub fn new(store: &'a SchemaStore, curation: &'a CurationTables) -> Self {
        Self {
            resolver: ReferenceResolver::new(store, curation),
            cache: RefCell::new(HashMap::new()),
            in_progress: RefCell::new(HashSet::new()),
            visiting: RefCell::new(Vec::new()),
        }
    }

    pub fn resolver(&self) -> &ReferenceResolver<'a> {
        &self.resolver
    }

    /// Resolves a schema node.
    ///
    /// ## Errors
    ///
    /// Returns a `SchemaError` only if a referenced document cannot be loaded.
    pub fn build(&self, node: &SchemaNode) -> Result<Resolved, SchemaError> {
        if let Some(members) = node.all_of() {
            return self.build_all_of(node, &members);
        }

        let mut current = node.clone();
        let mut depth = 0;
        let mut description = current.description().map(str::to_string);

        while current
            .declared_type()
            .is_some_and(|declared| declared.is("array"))
        {
            depth += 1;
            match current.items() {
                Some(items) => current = items,
                None => {
                    return Ok(self.placeholder(&current, "array without items", depth, description));
                }
            }
            if let Some(inner) = current.description() {
                description = Some(inner.to_string());
            }
        }

        let terminal = self.classify(&current)?;
        let description = terminal.description.or(description);
        Ok(Resolved::new(terminal.ty.wrap(depth), description))
    }

    /// Resolves the payload of a response envelope.
    ///
    /// The method's response node is followed through `$ref`s (structurally;
    /// overrides do not apply to envelopes) to an object whose
    /// `properties.response` is the payload schema.
    ///
    /// ## Errors
    ///
    /// Returns a `SchemaError` only if a referenced document cannot be loaded.
    pub fn build_payload(&self, envelope: &SchemaNode) -> Result<Resolved, SchemaError> {
        let mut current = envelope.clone();
        let mut seen = HashSet::new();

        while let Some(raw) = current.reference().map(str::to_string) {
            if !seen.insert(current.location()) {
                return Ok(self.placeholder(envelope, &format!("cycle: {}", raw), 0, None));
            }
            let target = match self.resolver.parse(&raw) {
                Some(reference) => self.resolver.locate(&reference)?,
                None => None,
            };
            match target {
                Some(node) => current = node,
                None => return Ok(self.placeholder(envelope, &raw, 0, None)),
            }
        }

        let is_object = current.declared_type().is_some_and(|t| t.is("object"))
            || current.has_keyword("properties");
        let payload = current.child("properties").child(ENVELOPE_PAYLOAD);

        if !is_object || !payload.exists() {
            return Ok(self.placeholder(
                &current,
                &format!("response envelope {}", current.location()),
                0,
                None,
            ));
        }

        self.build(&payload)
    }

    fn build_all_of(
        &self,
        node: &SchemaNode,
        members: &[SchemaNode],
    ) -> Result<Resolved, SchemaError> {
        let mut fields = Vec::new();

        for member in members {
            let resolved = self.build(member)?;
            match resolved.ty {
                TypeDescriptor {
                    depth: 0,
                    kind: TypeKind::InlineStruct(member_fields),
                } => fields.extend(member_fields),
                TypeDescriptor {
                    depth: 0,
                    kind: TypeKind::NamedRef(canonical),
                } => fields.push(FieldDescriptor::embedded(&canonical)),
                other => {
                    tracing::warn!(
                        location = %member.location(),
                        member = %other,
                        "allOf member contributes no fields"
                    );
                }
            }
        }

        Ok(Resolved::new(
            TypeDescriptor::new(TypeKind::InlineStruct(fields)),
            node.description().map(str::to_string),
        ))
    }

    fn classify(&self, node: &SchemaNode) -> Result<Resolved, SchemaError> {
        let own = node.description().map(str::to_string);

        match node.declared_type() {
            Some(DeclaredType::Union(types)) => {
                let set: HashSet<&str> = types.iter().map(String::as_str).collect();
                if set == HashSet::from(["integer", "string"]) {
                    Ok(Resolved::new(
                        TypeDescriptor::primitive(Primitive::IntOrString),
                        own,
                    ))
                } else {
                    let note = format!("union of {}", types.join("|"));
                    Ok(self.placeholder(node, &note, 0, own))
                }
            }
            Some(DeclaredType::Single(name)) => {
                if let Some(primitive) = Primitive::from_schema(&name) {
                    Ok(Resolved::new(TypeDescriptor::primitive(primitive), own))
                } else if name == "object" {
                    self.classify_object(node, own)
                } else {
                    Ok(self.placeholder(node, &format!("type {}", name), 0, own))
                }
            }
            None => {
                if let Some(raw) = node.reference() {
                    let resolved = self.build_reference(node, raw)?;
                    Ok(Resolved::new(resolved.ty, resolved.description.or(own)))
                } else if node.has_keyword("properties") {
                    self.classify_object(node, own)
                } else if let Some(members) = node.all_of() {
                    self.build_all_of(node, &members)
                } else {
                    Ok(self.placeholder(node, "no type", 0, own))
                }
            }
        }
    }

    fn classify_object(
        &self,
        node: &SchemaNode,
        description: Option<String>,
    ) -> Result<Resolved, SchemaError> {
        if let Some(properties) = node.properties() {
            let mut fields = Vec::with_capacity(properties.len());
            for (name, property) in properties {
                let resolved = self.build(&property)?;
                let required = node.is_required(&name);
                fields.push(
                    FieldDescriptor::new(name, resolved.ty)
                        .required(required)
                        .with_description(resolved.description),
                );
            }
            return Ok(Resolved::new(
                TypeDescriptor::new(TypeKind::InlineStruct(fields)),
                description,
            ));
        }

        if let Some(value) = node.pattern_property(NUMERIC_KEY_PATTERN) {
            let resolved = self.build(&value)?;
            return Ok(Resolved::new(
                TypeDescriptor::new(TypeKind::KeyedMap(Box::new(resolved.ty))),
                description,
            ));
        }

        Ok(Resolved::new(TypeDescriptor::new(TypeKind::Dynamic), description))
    }

    fn build_reference(&self, node: &SchemaNode, raw: &str) -> Result<Resolved, SchemaError> {
        match self.resolver.resolve(raw)? {
            Resolution::Canonical(name) => Ok(Resolved::new(TypeDescriptor::named(name), None)),
            Resolution::Opaque => Ok(self.placeholder(node, raw, 0, None)),
            Resolution::Node(target) => {
                let key = target.location();

                let hit = self.cache.borrow().get(&key).cloned();
                if let Some(memo) = hit.filter(|memo| self.is_context_free(&memo.visited)) {
                    self.record(memo.visited);
                    return Ok(memo.resolved);
                }
                if self.in_progress.borrow().contains(&key) {
                    self.record(HashSet::from([key]));
                    return Ok(self.placeholder(node, &format!("cycle: {}", raw), 0, None));
                }

                self.in_progress.borrow_mut().insert(key.clone());
                self.visiting.borrow_mut().push(HashSet::from([key.clone()]));
                let result = self.build(&target);
                let visited = self.visiting.borrow_mut().pop().unwrap_or_default();
                self.in_progress.borrow_mut().remove(&key);
                self.record(visited.clone());

                let resolved = result?;
                if self.is_context_free(&visited) {
                    let memo = Memo {
                        resolved: resolved.clone(),
                        visited,
                    };
                    self.cache.borrow_mut().insert(key, memo);
                }
                Ok(resolved)
            }
        }
    }

    /// True when none of `visited` is currently being resolved.
    fn is_context_free(&self, visited: &HashSet<String>) -> bool {
        self.in_progress.borrow().is_disjoint(visited)
    }

    /// Adds locations to the innermost reference being resolved.
    fn record(&self, locations: HashSet<String>) {
        if let Some(frame) = self.visiting.borrow_mut().last_mut() {
            frame.extend(locations);
        }
    }

    fn placeholder(
        &self,
        node: &SchemaNode,
        note: &str,
        depth: usize,
        description: Option<String>,
    ) -> Resolved {
        tracing::warn!(location = %node.location(), note, "unresolved schema shape");
        Resolved::new(TypeDescriptor::unresolved(note).wrap(depth), description)
    }
}
