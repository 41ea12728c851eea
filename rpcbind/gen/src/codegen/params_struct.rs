//! Parameter struct generation.
//!
//! A method with parameters gets a `<Ns><Method>Params` struct. Fields keep
//! schema declaration order and serialize under their raw schema names, so
//! `rpcbind::encode_params` can flatten them straight into the request.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::binding::MethodDescriptor;
use crate::codegen::types::{TypeRenderer, field_doc};
use crate::descriptor::{Primitive, TypeKind};
use crate::params::{ParamField, ParamScalar};

/// Generates the parameter struct of a method, or nothing when the method
/// takes no parameters.
///
/// ## Examples
///
/// For `messages.getConversationMembers(peer_id: integer, required; extended: boolean)`:
///
/// ```ignore
/// /// Parameters of `messages.getConversationMembers`.
/// #[derive(Debug, Clone, Default, serde::Serialize)]
/// pub struct MessagesGetConversationMembersParams {
///     /// Peer ID.
///     #[serde(rename = "peer_id")]
///     pub peer_id: i64,
///     #[serde(rename = "extended", skip_serializing_if = "Option::is_none")]
///     pub extended: Option<bool>,
/// }
/// ```
pub fn generate_params_struct(method: &MethodDescriptor, types: &mut TypeRenderer) -> TokenStream {
    if !method.has_parameters() {
        return TokenStream::new();
    }

    let name = method.params_type_name();
    types.reserve(&name);
    let ident = format_ident!("{}", name);
    let doc = format!(" Parameters of `{}`.", method.rpc_name);

    let fields: Vec<TokenStream> = method
        .parameters
        .iter()
        .map(|param| param_field(&name, param, types))
        .collect();

    let derives = if method.parameters.iter().all(is_defaultable) {
        quote! { #[derive(Debug, Clone, Default, serde::Serialize)] }
    } else {
        quote! { #[derive(Debug, Clone, serde::Serialize)] }
    };

    quote! {
        #[doc = #doc]
        #derives
        pub struct #ident {
            #(#fields)*
        }
    }
}

fn param_field(parent: &str, param: &ParamField, types: &mut TypeRenderer) -> TokenStream {
    let field = &param.field;
    let ident = format_ident!("{}", field.ident);
    let key = &param.encoding.key;
    let doc = field_doc(field).map(|d| quote! { #[doc = #d] });

    let ty = match param.scalar {
        ParamScalar::CsvInt => quote! { rpcbind::CsvIntList },
        ParamScalar::CsvString => quote! { rpcbind::CsvStringList },
        ParamScalar::Native => {
            types.rust_type(&field.ty, &format!("{}{}", parent, field.exported_name))
        }
    };

    if param.encoding.optional {
        quote! {
            #doc
            #[serde(rename = #key, skip_serializing_if = "Option::is_none")]
            pub #ident: Option<#ty>,
        }
    } else {
        quote! {
            #doc
            #[serde(rename = #key)]
            pub #ident: #ty,
        }
    }
}

/// Whether the field's Rust type is known to implement `Default`.
///
/// Canonical types and the integer-or-string union are not assumed to.
fn is_defaultable(param: &ParamField) -> bool {
    if param.encoding.optional || param.scalar != ParamScalar::Native {
        return true;
    }
    let ty = &param.field.ty;
    if ty.is_array() {
        return true;
    }
    !matches!(
        ty.kind,
        TypeKind::NamedRef(_) | TypeKind::Primitive(Primitive::IntOrString)
    )
}

/// The expression reading the `extended` discriminator from `params`.
pub fn discriminator_expr(discriminator: &ParamField) -> TokenStream {
    let ident = format_ident!("{}", discriminator.field.ident);
    if discriminator.encoding.optional {
        quote! { params.#ident.unwrap_or(false) }
    } else {
        quote! { params.#ident }
    }
}
