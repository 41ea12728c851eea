//! Module documentation for generated namespace modules.

use proc_macro2::TokenStream;
use quote::quote;

use crate::binding::NamespaceBinding;

/// Builds the `//!` documentation of one namespace module: an intro
/// paragraph, the method list and a usage example.
pub struct ModuleDocBuilder<'a> {
    namespace: &'a NamespaceBinding,
}

impl<'a> ModuleDocBuilder<'a> {
    pub fn new(namespace: &'a NamespaceBinding) -> Self {
        Self { namespace }
    }

    /// Builds the inner doc attributes.
    pub fn build(&self) -> TokenStream {
        let intro = self.intro_paragraph();
        let methods_section = self.methods_section();
        let example_section = self.example_section();

        quote! {
            #![doc = #intro]
            //!
            #![doc = #methods_section]
            //!
            #![doc = #example_section]
        }
    }

    fn intro_paragraph(&self) -> String {
        format!(
            " Bindings for the `{}` namespace.\n\n Every method is exposed on [`{}`], which borrows an `rpcbind::Transport`.",
            self.namespace.name, self.namespace.type_name
        )
    }

    fn methods_section(&self) -> String {
        if self.namespace.methods.is_empty() {
            return " ## Methods\n\n No methods defined.".to_string();
        }

        let mut lines = vec![" ## Methods".to_string(), String::new()];
        for method in &self.namespace.methods {
            let summary = method.description.lines().next().unwrap_or_default().trim();
            lines.push(format!(
                " - [`{}`]({}::{}) - `{}`: {}",
                method.fn_name, self.namespace.type_name, method.fn_name, method.rpc_name, summary
            ));
        }
        lines.join("\n")
    }

    fn example_section(&self) -> String {
        let Some(method) = self.namespace.methods.first() else {
            return " ## Example\n\n No methods available for example.".to_string();
        };

        let call = if method.has_parameters() {
            format!(
                "{}(&{}::default())",
                method.fn_name,
                method.params_type_name()
            )
        } else {
            format!("{}()", method.fn_name)
        };

        format!(
            r#" ## Example

 ```ignore
 let {} = {}::new(&transport);
 let response = {}.{}.await?;
 ```"#,
            self.namespace.module_name, self.namespace.type_name, self.namespace.module_name, call
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::MethodDescriptor;
    use crate::builder::TypeBuilder;
    use crate::test_utils::{fixture_method, fixture_store, test_curation};

    fn namespace(methods: &[&str]) -> NamespaceBinding {
        let store = fixture_store();
        let curation = test_curation();
        let builder = TypeBuilder::new(&store, &curation);
        NamespaceBinding {
            name: "utils".into(),
            type_name: "Utils".into(),
            module_name: "utils".into(),
            methods: methods
                .iter()
                .map(|name| MethodDescriptor::build(&fixture_method(&store, name), &builder).unwrap())
                .collect(),
        }
    }

    #[test]
    fn lists_methods_with_rpc_names() {
        let binding = namespace(&["utils.getServerTime", "utils.getLinkStats"]);
        let code = ModuleDocBuilder::new(&binding).build().to_string();

        assert!(code.contains("Bindings for the `utils` namespace."));
        assert!(code.contains("[`get_server_time`](Utils::get_server_time) - `utils.getServerTime`"));
        assert!(code.contains("`utils.getLinkStats`: does utils.getLinkStats"));
    }

    #[test]
    fn example_uses_first_method() {
        let binding = namespace(&["utils.getServerTime"]);
        let code = ModuleDocBuilder::new(&binding).build().to_string();
        assert!(code.contains("let utils = Utils::new(&transport);"));
        assert!(code.contains("utils.get_server_time().await?"));
    }

    #[test]
    fn example_builds_default_params() {
        let binding = namespace(&["utils.getLinkStats"]);
        let code = ModuleDocBuilder::new(&binding).build().to_string();
        assert!(code.contains("get_link_stats(&UtilsGetLinkStatsParams::default())"));
    }

    #[test]
    fn empty_namespace() {
        let binding = namespace(&[]);
        let code = ModuleDocBuilder::new(&binding).build().to_string();
        assert!(code.contains("No methods defined."));
        assert!(code.contains("No methods available for example."));
    }
}
