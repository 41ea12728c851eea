//! Parameter encoding descriptors.
//!
//! Each declared parameter becomes a [`ParamField`]: its field descriptor,
//! its wire key and optionality, and how its value is flattened. The
//! transport sends parameters as flat key/value pairs, so primitive arrays
//! travel as one comma-delimited scalar.

use rpcbind_define::{MethodSpec, SchemaError};

use crate::builder::TypeBuilder;
use crate::descriptor::{FieldDescriptor, Primitive, TypeDescriptor, TypeKind};

/// How a parameter value is rendered on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamScalar {
    /// The field's own type, serialized directly.
    Native,
    /// Integer array joined with commas.
    CsvInt,
    /// String (or other) array joined with commas.
    CsvString,
}

/// The query-encoding tag of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamEncoding {
    /// Raw schema name used as the wire key.
    pub key: String,
    /// Omitted from the request when unset.
    pub optional: bool,
}

/// One parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamField {
    pub field: FieldDescriptor,
    pub encoding: ParamEncoding,
    pub scalar: ParamScalar,
}

impl ParamField {
    /// `true` for a non-array boolean parameter.
    pub fn is_boolean(&self) -> bool {
        self.scalar == ParamScalar::Native
            && self.field.ty.as_primitive() == Some(Primitive::Boolean)
    }
}

/// Builds the ordered parameter list of a method.
///
/// ## Errors
///
/// Returns a `SchemaError` only if a referenced document cannot be loaded.
pub fn build_param_fields(
    method: &MethodSpec,
    builder: &TypeBuilder<'_>,
) -> Result<Vec<ParamField>, SchemaError> {
    method
        .parameters
        .iter()
        .map(|param| {
            let resolved = builder.build(&param.node)?;
            let scalar = list_scalar(&method.name, &param.name, &resolved.ty);
            let description = param.description.clone().or(resolved.description);

            Ok(ParamField {
                field: FieldDescriptor::new(param.name.as_str(), resolved.ty)
                    .required(param.required)
                    .with_description(description),
                encoding: ParamEncoding {
                    key: param.name.clone(),
                    optional: !param.required,
                },
                scalar,
            })
        })
        .collect()
}

fn list_scalar(method: &str, param: &str, ty: &TypeDescriptor) -> ParamScalar {
    if !ty.is_array() {
        return ParamScalar::Native;
    }

    match (&ty.kind, ty.depth) {
        (TypeKind::Primitive(Primitive::Integer), 1) => ParamScalar::CsvInt,
        (TypeKind::Primitive(Primitive::String), 1) => ParamScalar::CsvString,
        _ => {
            tracing::warn!(
                method,
                param,
                ty = %ty,
                "array parameter has no delimited-list encoding, sending as strings"
            );
            ParamScalar::CsvString
        }
    }
}
