//! Namespace receiver generation.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::binding::NamespaceBinding;

/// Generates the receiver struct of a namespace and the impl block holding
/// its methods.
///
/// ## Examples
///
/// ```ignore
/// /// Methods of the `users` namespace.
/// pub struct Users<'a, T: rpcbind::Transport> {
///     transport: &'a T,
/// }
///
/// impl<'a, T: rpcbind::Transport> Users<'a, T> {
///     pub fn new(transport: &'a T) -> Self {
///         Self { transport }
///     }
///
///     pub async fn get(&self, params: &UsersGetParams) -> ... { ... }
/// }
/// ```
pub fn generate_receiver(namespace: &NamespaceBinding, methods: &[TokenStream]) -> TokenStream {
    let ident = format_ident!("{}", namespace.type_name);
    let doc = format!(" Methods of the `{}` namespace.", namespace.name);

    quote! {
        #[doc = #doc]
        pub struct #ident<'a, T: rpcbind::Transport> {
            transport: &'a T,
        }

        impl<'a, T: rpcbind::Transport> #ident<'a, T> {
            /// Creates a receiver issuing calls through `transport`.
            pub fn new(transport: &'a T) -> Self {
                Self { transport }
            }

            #(#methods)*
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::format_tokens;

    #[test]
    fn receiver_holds_transport() {
        let namespace = NamespaceBinding {
            name: "users".into(),
            type_name: "Users".into(),
            module_name: "users".into(),
            methods: vec![],
        };
        let code = format_tokens(&generate_receiver(&namespace, &[]));

        assert!(code.contains("/// Methods of the `users` namespace."));
        assert!(code.contains("pub struct Users<'a, T: rpcbind::Transport>"));
        assert!(code.contains("transport: &'a T,"));
        assert!(code.contains("impl<'a, T: rpcbind::Transport> Users<'a, T>"));
        assert!(code.contains("pub fn new(transport: &'a T) -> Self"));
    }
}
