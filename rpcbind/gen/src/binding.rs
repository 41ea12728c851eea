//! Per-method and per-namespace binding descriptors.

use rpcbind_define::{MethodList, MethodSpec, SchemaError, SchemaNode};

use crate::builder::TypeBuilder;
use crate::naming::{method_fn_name, method_type_name, module_name, namespace_type_name};
use crate::params::{ParamField, build_param_fields};

/// Everything needed to emit one method.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    pub namespace: String,
    /// Namespace-qualified RPC name sent to the transport.
    pub rpc_name: String,
    /// `<Ns><Method>` prefix shared by the method's generated types.
    pub type_prefix: String,
    pub fn_name: String,
    pub parameters: Vec<ParamField>,
    pub response: SchemaNode,
    pub extended: Option<SchemaNode>,
    pub description: String,
}

impl MethodDescriptor {
    /// Builds the descriptor, resolving parameter types.
    ///
    /// ## Errors
    ///
    /// Returns a `SchemaError` only if a referenced document cannot be loaded.
    pub fn build(spec: &MethodSpec, builder: &TypeBuilder<'_>) -> Result<Self, SchemaError> {
        let namespace = spec.namespace().to_string();
        let method_part = spec.method_part();

        Ok(Self {
            type_prefix: format!(
                "{}{}",
                namespace_type_name(&namespace),
                method_type_name(method_part)
            ),
            fn_name: method_fn_name(method_part),
            parameters: build_param_fields(spec, builder)?,
            response: spec.response.clone(),
            extended: spec.extended.clone(),
            description: spec
                .description
                .clone()
                .unwrap_or_else(|| format!("does {}", spec.name)),
            rpc_name: spec.name.clone(),
            namespace,
        })
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    pub fn params_type_name(&self) -> String {
        format!("{}Params", self.type_prefix)
    }

    pub fn response_type_name(&self) -> String {
        format!("{}Response", self.type_prefix)
    }
}

/// One namespace and its methods, in schema order.
#[derive(Debug, Clone)]
pub struct NamespaceBinding {
    pub name: String,
    /// Receiver type name.
    pub type_name: String,
    /// Module and file name.
    pub module_name: String,
    pub methods: Vec<MethodDescriptor>,
}

impl NamespaceBinding {
    /// Groups the method list into namespace bindings, skipping excluded
    /// namespaces.
    ///
    /// ## Errors
    ///
    /// Returns a `SchemaError` only if a referenced document cannot be loaded.
    pub fn collect(
        methods: &MethodList,
        builder: &TypeBuilder<'_>,
    ) -> Result<Vec<NamespaceBinding>, SchemaError> {
        let curation = builder.resolver().curation();
        let mut bindings = Vec::new();

        for namespace in methods.namespaces() {
            if curation.is_excluded(&namespace.name) {
                tracing::info!(namespace = %namespace.name, "skipping excluded namespace");
                continue;
            }

            let methods = namespace
                .methods
                .iter()
                .map(|spec| MethodDescriptor::build(spec, builder))
                .collect::<Result<Vec<_>, _>>()?;

            bindings.push(NamespaceBinding {
                type_name: namespace_type_name(&namespace.name),
                module_name: module_name(&namespace.name),
                name: namespace.name,
                methods,
            });
        }

        Ok(bindings)
    }
}
