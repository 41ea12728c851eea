//! Response type declarations.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::binding::MethodDescriptor;
use crate::codegen::types::TypeRenderer;
use crate::response::{DecodeStrategy, ResponsePlan, ShapeDecl};

/// Generates the response declarations of a method.
///
/// Boolean-wrapper methods declare nothing. A single shape declares one
/// struct or alias; a dual shape declares both payload types and the enum
/// over them.
pub fn generate_response_types(
    method: &MethodDescriptor,
    plan: &ResponsePlan,
    types: &mut TypeRenderer,
) -> TokenStream {
    match plan {
        ResponsePlan::BooleanWrapper => TokenStream::new(),
        ResponsePlan::Single(decl) => types.declare(&decl.type_name, &decl.payload),
        ResponsePlan::Dual {
            type_name,
            normal,
            extended,
            discriminator,
        } => {
            let normal_decl = types.declare(&normal.type_name, &normal.payload);
            let extended_decl = types.declare(&extended.type_name, &extended.payload);
            types.reserve(type_name);

            let ident = format_ident!("{}", type_name);
            let normal_ty = shape_type(normal);
            let extended_ty = shape_type(extended);
            let doc = format!(
                " Result of `{}`, shaped by its `{}` parameter.",
                method.rpc_name, discriminator.encoding.key
            );

            quote! {
                #normal_decl

                #extended_decl

                #[doc = #doc]
                #[derive(Debug, Clone)]
                pub enum #ident {
                    Normal(#normal_ty),
                    Extended(#extended_ty),
                }

                impl #ident {
                    /// Which shape this response was decoded into.
                    pub fn shape(&self) -> rpcbind::ResponseShape {
                        match self {
                            Self::Normal(_) => rpcbind::ResponseShape::Normal,
                            Self::Extended(_) => rpcbind::ResponseShape::Extended,
                        }
                    }
                }
            }
        }
    }
}

/// The Rust type a decoded shape is returned as. Struct payloads are boxed.
pub fn shape_type(decl: &ShapeDecl) -> TokenStream {
    let ident = format_ident!("{}", decl.type_name);
    match decl.strategy {
        DecodeStrategy::Struct => quote! { Box<#ident> },
        _ => quote! { #ident },
    }
}
