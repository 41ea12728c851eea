//! Rendering of type descriptors as Rust types.
//!
//! Rust has no anonymous struct types, so every inline struct met while
//! rendering is hoisted into a named struct (`<Parent><Field>`) collected by
//! the [`TypeRenderer`] and emitted alongside the declaration that needed it.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::descriptor::{FieldDescriptor, Primitive, Resolved, TypeDescriptor, TypeKind};
use crate::naming::type_ident;

/// Renders descriptors for one generated module.
///
/// Type names are unique within the module: a hoisted struct whose name is
/// already taken gets a numeric suffix.
pub struct TypeRenderer {
    canonical_module: String,
    hoisted: Vec<TokenStream>,
    used_names: HashSet<String>,
}

impl TypeRenderer {
    pub fn new(canonical_module: impl Into<String>) -> Self {
        Self {
            canonical_module: canonical_module.into(),
            hoisted: Vec::new(),
            used_names: HashSet::new(),
        }
    }

    /// Marks a top-level type name as taken.
    pub fn reserve(&mut self, name: &str) {
        self.used_names.insert(name.to_string());
    }

    /// Drains the structs hoisted so far.
    pub fn take_hoisted(&mut self) -> Vec<TokenStream> {
        std::mem::take(&mut self.hoisted)
    }

    /// Renders `ty` as a Rust type. Inline structs are hoisted under a name
    /// derived from `owner`.
    pub fn rust_type(&mut self, ty: &TypeDescriptor, owner: &str) -> TokenStream {
        let mut rendered = match &ty.kind {
            TypeKind::Primitive(primitive) => primitive_type(*primitive),
            TypeKind::InlineStruct(fields) => {
                let name = self.unique_name(owner);
                let decl = self.struct_tokens(&name, fields, None);
                self.hoisted.push(decl);
                let ident = format_ident!("{}", name);
                quote! { #ident }
            }
            TypeKind::NamedRef(canonical) => {
                let module = format_ident!("{}", self.canonical_module);
                let ident = format_ident!("{}", canonical);
                quote! { crate::#module::#ident }
            }
            TypeKind::KeyedMap(value) => {
                let value = self.rust_type(value, &format!("{}Value", owner));
                quote! { std::collections::BTreeMap<String, #value> }
            }
            TypeKind::Dynamic => quote! { serde_json::Value },
            TypeKind::Unresolved(_) => quote! { rpcbind::Unresolved },
        };

        for _ in 0..ty.depth {
            rendered = quote! { Vec<#rendered> };
        }
        rendered
    }

    /// Declares a named type for a resolved payload: a struct for a
    /// non-array inline struct, a type alias for everything else.
    pub fn declare(&mut self, name: &str, resolved: &Resolved) -> TokenStream {
        self.reserve(name);
        let doc = type_doc(resolved);

        if let TypeDescriptor {
            depth: 0,
            kind: TypeKind::InlineStruct(fields),
        } = &resolved.ty
        {
            return self.struct_tokens(name, fields, doc.as_deref());
        }

        let ident = format_ident!("{}", name);
        let target = self.rust_type(&resolved.ty, &format!("{}Item", name));
        let doc = doc.map(|d| quote! { #[doc = #d] });
        quote! {
            #doc
            pub type #ident = #target;
        }
    }

    fn struct_tokens(
        &mut self,
        name: &str,
        fields: &[FieldDescriptor],
        doc: Option<&str>,
    ) -> TokenStream {
        let ident = format_ident!("{}", name);
        let mut wire_keys = HashSet::new();
        let mut idents = HashSet::new();
        let mut rendered = Vec::with_capacity(fields.len());

        for field in fields {
            if !wire_keys.insert((field.embedded, field.schema_name.as_str())) {
                tracing::warn!(
                    structure = name,
                    field = %field.schema_name,
                    "skipping duplicate field"
                );
                continue;
            }

            // Distinct wire keys may still snake-case to one identifier
            let mut field_ident = field.ident.clone();
            let mut suffix = 2;
            while !idents.insert(field_ident.clone()) {
                field_ident = format!("{}_{}", field.ident, suffix);
                suffix += 1;
            }
            rendered.push(self.field_tokens(name, field, &field_ident));
        }

        let doc = doc.map(|d| quote! { #[doc = #d] });
        quote! {
            #doc
            #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
            pub struct #ident {
                #(#rendered)*
            }
        }
    }

    fn field_tokens(&mut self, parent: &str, field: &FieldDescriptor, ident: &str) -> TokenStream {
        let ident = format_ident!("{}", ident);
        let ty = self.rust_type(&field.ty, &format!("{}{}", parent, field.exported_name));

        if field.embedded {
            return quote! {
                #[serde(flatten)]
                pub #ident: #ty,
            };
        }

        let doc = field_doc(field).map(|d| quote! { #[doc = #d] });
        let raw = &field.schema_name;
        quote! {
            #doc
            #[serde(rename = #raw, default, skip_serializing_if = "Option::is_none")]
            pub #ident: Option<#ty>,
        }
    }

    fn unique_name(&mut self, base: &str) -> String {
        let base = type_ident(base);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while !self.used_names.insert(candidate.clone()) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
        candidate
    }
}

/// The Rust spelling of a primitive.
pub fn primitive_type(primitive: Primitive) -> TokenStream {
    match primitive {
        Primitive::Boolean => quote! { bool },
        Primitive::Integer => quote! { i64 },
        Primitive::String => quote! { String },
        Primitive::Number => quote! { f64 },
        Primitive::IntOrString => quote! { rpcbind::IntOrString },
    }
}

/// Doc line of a field; placeholders mention the unresolved shape.
pub fn field_doc(field: &FieldDescriptor) -> Option<String> {
    doc_with_note(field.description.as_deref(), &field.ty)
}

fn type_doc(resolved: &Resolved) -> Option<String> {
    doc_with_note(resolved.description.as_deref(), &resolved.ty)
}

fn doc_with_note(description: Option<&str>, ty: &TypeDescriptor) -> Option<String> {
    let note = match &ty.kind {
        TypeKind::Unresolved(note) => Some(format!("Unresolved schema shape: `{}`.", note)),
        _ => None,
    };
    match (description, note) {
        (Some(d), Some(n)) => Some(format!(" {}\n\n {}", d, n)),
        (Some(d), None) => Some(format!(" {}", d)),
        (None, Some(n)) => Some(format!(" {}", n)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::format_tokens;

    fn render_declaration(name: &str, resolved: &Resolved) -> String {
        let mut renderer = TypeRenderer::new("objects");
        let decl = renderer.declare(name, resolved);
        let hoisted = renderer.take_hoisted();
        format_tokens(&quote! { #decl #(#hoisted)* })
    }

    fn integer() -> TypeDescriptor {
        TypeDescriptor::primitive(Primitive::Integer)
    }

    fn compact(tokens: &TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    #[test]
    fn primitive_arrays_keep_depth() {
        let mut renderer = TypeRenderer::new("objects");
        let ty = renderer.rust_type(&integer().wrap(2), "Unused");
        assert_eq!(compact(&ty), "Vec<Vec<i64>>");
        assert!(renderer.take_hoisted().is_empty());
    }

    #[test]
    fn named_ref_points_into_canonical_module() {
        let mut renderer = TypeRenderer::new("objects");
        let ty = renderer.rust_type(&TypeDescriptor::named("User").wrap(1), "Unused");
        assert_eq!(compact(&ty), "Vec<crate::objects::User>");
    }

    #[test]
    fn keyed_map_renders_btree_map() {
        let mut renderer = TypeRenderer::new("objects");
        let map = TypeDescriptor::new(TypeKind::KeyedMap(Box::new(TypeDescriptor::named("BoolInt"))));
        let ty = renderer.rust_type(&map, "Unused");
        assert_eq!(
            compact(&ty),
            "std::collections::BTreeMap<String,crate::objects::BoolInt>"
        );
    }

    #[test]
    fn inline_struct_declares_struct_with_optional_fields() {
        let resolved = Resolved::new(
            TypeDescriptor::new(TypeKind::InlineStruct(vec![
                FieldDescriptor::new("count", integer()).with_description(Some("Total".into())),
                FieldDescriptor::new("2fa_required", TypeDescriptor::primitive(Primitive::Boolean)),
            ])),
            Some("Current status".into()),
        );
        let code = render_declaration("StatusGetResponse", &resolved);

        assert!(code.contains("/// Current status"));
        assert!(code.contains("pub struct StatusGetResponse"));
        assert!(code.contains("#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]"));
        assert!(code.contains("/// Total"));
        assert!(code.contains("rename = \"2fa_required\""));
        assert!(code.contains("pub x2fa_required: Option<bool>"));
        assert!(code.contains("skip_serializing_if = \"Option::is_none\""));
    }

    #[test]
    fn nested_inline_structs_are_hoisted() {
        let inner = TypeDescriptor::new(TypeKind::InlineStruct(vec![FieldDescriptor::new(
            "peer_id",
            integer(),
        )]))
        .wrap(1);
        let resolved = Resolved::new(
            TypeDescriptor::new(TypeKind::InlineStruct(vec![FieldDescriptor::new(
                "conversations",
                inner,
            )])),
            None,
        );
        let code = render_declaration("PushSettings", &resolved);

        assert!(code.contains("pub conversations: Option<Vec<PushSettingsConversations>>"));
        assert!(code.contains("pub struct PushSettingsConversations"));
        assert!(code.contains("pub peer_id: Option<i64>"));
    }

    #[test]
    fn embedded_members_flatten() {
        let resolved = Resolved::new(
            TypeDescriptor::new(TypeKind::InlineStruct(vec![
                FieldDescriptor::embedded("BaseObject"),
                FieldDescriptor::new("member_id", integer()),
            ])),
            None,
        );
        let code = render_declaration("Member", &resolved);

        assert!(code.contains("#[serde(flatten)]"));
        assert!(code.contains("pub base_object: crate::objects::BaseObject"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn duplicate_fields_are_emitted_once() {
        let resolved = Resolved::new(
            TypeDescriptor::new(TypeKind::InlineStruct(vec![
                FieldDescriptor::new("id", integer()),
                FieldDescriptor::new("id", TypeDescriptor::primitive(Primitive::String)),
            ])),
            None,
        );
        let code = render_declaration("Dup", &resolved);

        assert_eq!(code.matches("pub id:").count(), 1);
        assert!(code.contains("pub id: Option<i64>"));
        assert!(logs_contain("skipping duplicate field"));
    }

    #[test]
    fn colliding_idents_get_suffix_and_keep_wire_keys() {
        let resolved = Resolved::new(
            TypeDescriptor::new(TypeKind::InlineStruct(vec![
                FieldDescriptor::new("userId", integer()),
                FieldDescriptor::new("user_id", integer()),
                FieldDescriptor::new("user-id", integer()),
            ])),
            None,
        );
        let code = render_declaration("Owner", &resolved);

        assert!(code.contains("pub user_id: Option<i64>"));
        assert!(code.contains("pub user_id_2: Option<i64>"));
        assert!(code.contains("pub user_id_3: Option<i64>"));
        assert!(code.contains("rename = \"userId\""));
        assert!(code.contains("rename = \"user_id\""));
        assert!(code.contains("rename = \"user-id\""));
    }

    #[test]
    fn non_struct_payloads_become_aliases() {
        let code = render_declaration(
            "UtilsGetServerTimeResponse",
            &Resolved::new(integer(), Some("Time in Unixtime".into())),
        );
        assert!(code.contains("/// Time in Unixtime"));
        assert!(code.contains("pub type UtilsGetServerTimeResponse = i64;"));
    }

    #[test]
    fn placeholders_are_documented() {
        let code = render_declaration(
            "Opaque",
            &Resolved::new(TypeDescriptor::unresolved("objects.json#/definitions/x"), None),
        );
        assert!(code.contains("Unresolved schema shape: `objects.json#/definitions/x`."));
        assert!(code.contains("pub type Opaque = rpcbind::Unresolved;"));
    }

    #[test]
    fn hoisted_names_do_not_collide() {
        let mut renderer = TypeRenderer::new("objects");
        renderer.reserve("ItemsValue");
        let field = TypeDescriptor::new(TypeKind::InlineStruct(vec![]));
        let first = renderer.rust_type(&field, "ItemsValue");
        let second = renderer.rust_type(&field, "ItemsValue");

        assert_eq!(first.to_string(), "ItemsValue2");
        assert_eq!(second.to_string(), "ItemsValue3");
        assert_eq!(renderer.take_hoisted().len(), 2);
    }
}
