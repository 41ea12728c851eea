//! Response shape resolution.
//!
//! Every method decodes its result in exactly one way:
//!
//! - **Boolean wrapper**: the response references a success-flag definition.
//!   The result is a plain `bool`, whatever the flag's schema says.
//! - **Single shape**: one payload type with a [`DecodeStrategy`].
//! - **Dual shape**: both a normal and an extended response are declared and
//!   the method has a boolean `extended` parameter. The result is an enum over
//!   the two payload types, chosen at runtime by that parameter.

use rpcbind_define::{Reference, SchemaError};

use crate::binding::MethodDescriptor;
use crate::builder::TypeBuilder;
use crate::descriptor::{Resolved, TypeKind};
use crate::params::ParamField;

/// Name of the parameter selecting the extended response.
pub const DISCRIMINATOR_PARAM: &str = "extended";

/// How a single payload is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Scalar text coerced to a primitive; quoted and bare forms accepted.
    Scalar,
    /// Direct structural decode into a sequence or keyed map.
    Array,
    /// Open container; the shape is not statically known.
    Dynamic,
    /// Struct decoded into a newly allocated instance.
    Struct,
}

impl DecodeStrategy {
    /// Picks the strategy for a resolved payload.
    pub fn for_payload(resolved: &Resolved) -> Self {
        if resolved.ty.is_array() {
            return Self::Array;
        }
        match resolved.ty.kind {
            TypeKind::Primitive(_) => Self::Scalar,
            TypeKind::KeyedMap(_) => Self::Array,
            TypeKind::Dynamic | TypeKind::Unresolved(_) => Self::Dynamic,
            TypeKind::InlineStruct(_) | TypeKind::NamedRef(_) => Self::Struct,
        }
    }
}

/// One response type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDecl {
    /// Generated type name.
    pub type_name: String,
    pub payload: Resolved,
    pub strategy: DecodeStrategy,
}

impl ShapeDecl {
    fn new(type_name: String, payload: Resolved) -> Self {
        let strategy = DecodeStrategy::for_payload(&payload);
        Self {
            type_name,
            payload,
            strategy,
        }
    }
}

/// The decode plan of one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePlan {
    BooleanWrapper,
    Single(ShapeDecl),
    Dual {
        /// Name of the enum over both shapes.
        type_name: String,
        normal: ShapeDecl,
        extended: ShapeDecl,
        /// The boolean parameter selecting the shape.
        discriminator: ParamField,
    },
}

impl ResponsePlan {
    pub fn is_dual(&self) -> bool {
        matches!(self, Self::Dual { .. })
    }
}

/// Resolves the response plan of a method.
///
/// ## Errors
///
/// Returns a `SchemaError` only if a referenced document cannot be loaded.
pub fn plan_response(
    method: &MethodDescriptor,
    builder: &TypeBuilder<'_>,
) -> Result<ResponsePlan, SchemaError> {
    let resolver = builder.resolver();
    let curation = resolver.curation();

    let success_flag = method
        .response
        .reference()
        .and_then(|raw| Reference::parse(raw, &curation.default_document).ok())
        .is_some_and(|reference| curation.is_success_flag(reference.terminal()));
    if success_flag {
        return Ok(ResponsePlan::BooleanWrapper);
    }

    let type_name = method.response_type_name();
    let normal = builder.build_payload(&method.response)?;

    let discriminator = method
        .parameters
        .iter()
        .find(|p| p.encoding.key == DISCRIMINATOR_PARAM && p.is_boolean());

    match (&method.extended, discriminator) {
        (Some(extended_node), Some(discriminator)) => {
            let extended = builder.build_payload(extended_node)?;
            Ok(ResponsePlan::Dual {
                normal: ShapeDecl::new(format!("{}Normal", type_name), normal),
                extended: ShapeDecl::new(format!("{}Extended", type_name), extended),
                type_name,
                discriminator: discriminator.clone(),
            })
        }
        (Some(_), None) => {
            tracing::debug!(
                method = %method.rpc_name,
                "extended response declared without a boolean '{}' parameter",
                DISCRIMINATOR_PARAM
            );
            Ok(ResponsePlan::Single(ShapeDecl::new(type_name, normal)))
        }
        (None, _) => Ok(ResponsePlan::Single(ShapeDecl::new(type_name, normal))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Primitive, TypeDescriptor};
    use crate::test_utils::{fixture_method, fixture_store, test_curation};

    fn plan(name: &str) -> ResponsePlan {
        let store = fixture_store();
        let curation = test_curation();
        let builder = TypeBuilder::new(&store, &curation);
        let method = MethodDescriptor::build(&fixture_method(&store, name), &builder).unwrap();
        plan_response(&method, &builder).unwrap()
    }

    fn single(name: &str) -> ShapeDecl {
        match plan(name) {
            ResponsePlan::Single(decl) => decl,
            other => panic!("expected single shape for {}, got {:?}", name, other),
        }
    }

    #[test]
    fn success_flag_is_boolean_wrapper() {
        assert_eq!(plan("account.setOffline"), ResponsePlan::BooleanWrapper);
        assert_eq!(plan("account.ban"), ResponsePlan::BooleanWrapper);
    }

    #[test]
    fn aliased_envelope_is_not_a_success_flag() {
        // base_ok_response only points at ok_response; the flag match is by name
        let decl = single("account.unban");
        assert_eq!(decl.strategy, DecodeStrategy::Scalar);
        assert_eq!(decl.payload.ty, TypeDescriptor::primitive(Primitive::Integer));
    }

    #[test]
    fn array_of_named_refs_decodes_as_array() {
        let decl = single("users.get");
        assert_eq!(decl.type_name, "UsersGetResponse");
        assert_eq!(decl.payload.ty.depth, 1);
        assert_eq!(decl.payload.ty.kind, TypeKind::NamedRef("User".into()));
        assert_eq!(decl.strategy, DecodeStrategy::Array);
    }

    #[test]
    fn scalar_payload() {
        let decl = single("utils.getServerTime");
        assert_eq!(decl.strategy, DecodeStrategy::Scalar);
        assert_eq!(decl.payload.description.as_deref(), Some("Time in Unixtime"));
    }

    #[test]
    fn struct_payload() {
        assert_eq!(single("status.get").strategy, DecodeStrategy::Struct);
    }

    #[test]
    fn keyed_map_decodes_structurally() {
        let decl = single("messages.delete");
        assert_eq!(decl.payload.ty.to_string(), "map<ref BoolInt>");
        assert_eq!(decl.strategy, DecodeStrategy::Array);
    }

    #[test]
    fn opaque_payload_is_dynamic() {
        let decl = single("utils.getLinkStats");
        assert!(decl.payload.ty.is_unresolved());
        assert_eq!(decl.strategy, DecodeStrategy::Dynamic);
    }

    #[test]
    fn both_responses_and_flag_make_dual_shape() {
        match plan("friends.get") {
            ResponsePlan::Dual {
                type_name,
                normal,
                extended,
                discriminator,
            } => {
                assert_eq!(type_name, "FriendsGetResponse");
                assert_eq!(normal.type_name, "FriendsGetResponseNormal");
                assert_eq!(extended.type_name, "FriendsGetResponseExtended");
                assert_eq!(normal.strategy, DecodeStrategy::Struct);
                assert_eq!(discriminator.encoding.key, "extended");
            }
            other => panic!("expected dual shape, got {:?}", other),
        }
    }

    #[test]
    fn extended_param_without_extended_response_is_single() {
        let decl = single("messages.getConversationMembers");
        assert_eq!(decl.strategy, DecodeStrategy::Struct);
    }

    #[test]
    fn extended_response_without_flag_is_single() {
        let store = fixture_store();
        let curation = test_curation();
        let builder = TypeBuilder::new(&store, &curation);
        let mut method =
            MethodDescriptor::build(&fixture_method(&store, "friends.get"), &builder).unwrap();
        method.parameters.retain(|p| p.encoding.key != "extended");

        let plan = plan_response(&method, &builder).unwrap();
        assert!(!plan.is_dual());
    }
}
