//! Method function generation.
//!
//! Every method is an `async fn` on its namespace receiver that hands the
//! encoded parameters to the transport and decodes the raw bytes according
//! to the method's [`ResponsePlan`]. Transport and decode failures are
//! returned as `Err`; no partial value is ever produced.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::binding::MethodDescriptor;
use crate::codegen::params_struct::discriminator_expr;
use crate::codegen::response_types::shape_type;
use crate::response::{DecodeStrategy, ResponsePlan, ShapeDecl};

/// Generates the method function.
///
/// ## Examples
///
/// ```ignore
/// /// Returns detailed information on users.
/// pub async fn get(
///     &self,
///     params: &UsersGetParams,
/// ) -> Result<UsersGetResponse, rpcbind::BindingError> {
///     let raw = self
///         .transport
///         .request("users.get", rpcbind::encode_params(params)?)
///         .await?;
///     rpcbind::decode::json::<UsersGetResponse>(&raw)
/// }
/// ```
pub fn generate_method_fn(method: &MethodDescriptor, plan: &ResponsePlan) -> TokenStream {
    let fn_name = format_ident!("{}", method.fn_name);
    let rpc_name = &method.rpc_name;
    let doc = format!(" {}", method.description);

    let (params_arg, encoded) = if method.has_parameters() {
        let params_ty = format_ident!("{}", method.params_type_name());
        (
            quote! { params: &#params_ty },
            quote! { rpcbind::encode_params(params)? },
        )
    } else {
        (TokenStream::new(), quote! { rpcbind::RequestParams::new() })
    };

    let (return_ty, decode) = decode_tokens(plan);

    quote! {
        #[doc = #doc]
        pub async fn #fn_name(&self, #params_arg) -> Result<#return_ty, rpcbind::BindingError> {
            let raw = self.transport.request(#rpc_name, #encoded).await?;
            #decode
        }
    }
}

/// The return type and decode expression for a plan.
fn decode_tokens(plan: &ResponsePlan) -> (TokenStream, TokenStream) {
    match plan {
        ResponsePlan::BooleanWrapper => (quote! { bool }, quote! { rpcbind::decode::bool_flag(&raw) }),
        ResponsePlan::Single(decl) => (shape_type(decl), decode_expr(decl)),
        ResponsePlan::Dual {
            type_name,
            normal,
            extended,
            discriminator,
        } => {
            let ident = format_ident!("{}", type_name);
            let flag = discriminator_expr(discriminator);
            let normal = decode_expr(normal);
            let extended = decode_expr(extended);
            (
                quote! { #ident },
                quote! {
                    if #flag {
                        #extended.map(#ident::Extended)
                    } else {
                        #normal.map(#ident::Normal)
                    }
                },
            )
        }
    }
}

fn decode_expr(decl: &ShapeDecl) -> TokenStream {
    let ty = format_ident!("{}", decl.type_name);
    match decl.strategy {
        DecodeStrategy::Scalar => quote! { rpcbind::decode::scalar::<#ty>(&raw) },
        DecodeStrategy::Array => quote! { rpcbind::decode::json::<#ty>(&raw) },
        DecodeStrategy::Dynamic => quote! { rpcbind::decode::dynamic(&raw) },
        DecodeStrategy::Struct => quote! { rpcbind::decode::boxed::<#ty>(&raw) },
    }
}
