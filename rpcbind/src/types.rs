//! Wire types shared by all generated bindings.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder for schema shapes the generator could not resolve.
///
/// Fields and responses typed as `Unresolved` still decode (into an open
/// container) so generated bindings stay usable while the schema gap is
/// fixed by hand.
pub type Unresolved = serde_json::Value;

/// Boolean that accepts the integer encodings RPC servers favour.
///
/// Deserializes from `true`/`false`, any integer (non-zero is truthy), and the
/// strings `"1"`, `"0"`, `"true"`, `"false"`. Serializes as a plain boolean.
///
/// ## Examples
///
/// ```
/// use rpcbind::BoolInt;
///
/// let flags: Vec<BoolInt> = serde_json::from_str(r#"[1, 0, "1", true]"#).unwrap();
/// let flags: Vec<bool> = flags.into_iter().map(bool::from).collect();
/// assert_eq!(flags, vec![true, false, true, true]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoolInt(pub bool);

impl From<BoolInt> for bool {
    fn from(value: BoolInt) -> Self {
        value.0
    }
}

impl From<bool> for BoolInt {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl Serialize for BoolInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for BoolInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BoolIntVisitor;

        impl Visitor<'_> for BoolIntVisitor {
            type Value = BoolInt;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean, an integer, or a \"0\"/\"1\" string")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<BoolInt, E> {
                Ok(BoolInt(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<BoolInt, E> {
                Ok(BoolInt(v != 0))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<BoolInt, E> {
                Ok(BoolInt(v != 0))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<BoolInt, E> {
                parse_flag(v)
                    .map(BoolInt)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(BoolIntVisitor)
    }
}

/// Parses the textual truthy/falsy encodings.
pub(crate) fn parse_flag(text: &str) -> Option<bool> {
    match text.trim() {
        "true" => Some(true),
        "false" => Some(false),
        other => other.parse::<i64>().ok().map(|n| n != 0),
    }
}

/// Value declared as "integer or string" by the schema.
///
/// ## Examples
///
/// ```
/// use rpcbind::IntOrString;
///
/// let ids: Vec<IntOrString> = serde_json::from_str(r#"[42, "durov"]"#).unwrap();
/// assert_eq!(ids[0], IntOrString::Int(42));
/// assert_eq!(ids[1], IntOrString::Str("durov".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Str(String),
}

impl fmt::Display for IntOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Which variant a dual-shape response decoded into.
///
/// Every generated dual-shape response enum exposes `shape()` returning this
/// value, so callers can branch without matching on the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseShape {
    /// Decoded without the `extended` flag.
    Normal,
    /// Decoded with the `extended` flag set.
    Extended,
}

impl ResponseShape {
    /// Returns `true` for the extended variant.
    pub fn is_extended(self) -> bool {
        matches!(self, Self::Extended)
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Extended => "extended",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_int_rejects_garbage() {
        assert!(serde_json::from_str::<BoolInt>(r#""yes""#).is_err());
        assert!(serde_json::from_str::<BoolInt>("[1]").is_err());
    }

    #[test]
    fn bool_int_round_trips_as_bool() {
        let json = serde_json::to_string(&BoolInt(true)).unwrap();
        assert_eq!(json, "true");
    }

    #[test]
    fn bool_int_negative_is_truthy() {
        let flag: BoolInt = serde_json::from_str("-1").unwrap();
        assert!(flag.0);
    }

    #[test]
    fn int_or_string_display() {
        assert_eq!(IntOrString::Int(7).to_string(), "7");
        assert_eq!(IntOrString::Str("id7".into()).to_string(), "id7");
    }

    #[test]
    fn response_shape_display() {
        assert_eq!(ResponseShape::Normal.to_string(), "normal");
        assert!(ResponseShape::Extended.is_extended());
    }
}
