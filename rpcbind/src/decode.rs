//! Response decoding helpers used by generated method bodies.
//!
//! One helper per decode strategy:
//!
//! | Strategy        | Helper        | Result            |
//! |-----------------|---------------|-------------------|
//! | success flag    | [`bool_flag`] | `bool`            |
//! | scalar          | [`scalar`]    | `T: Scalar`       |
//! | array           | [`json`]      | `Vec<..>`         |
//! | declared-dynamic| [`dynamic`]   | `serde_json::Value` |
//! | named/struct    | [`boxed`]     | `Box<T>`          |
//!
//! Every helper either returns a fully decoded value or an error.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BindingError;
use crate::types::{IntOrString, parse_flag};

/// A scalar response type with a textual wire encoding.
///
/// Servers may send numbers and booleans either bare (`42`) or quoted
/// (`"42"`), so scalars are parsed from text instead of through serde.
pub trait Scalar: Sized {
    /// Human readable name used in error messages.
    const EXPECTED: &'static str;

    /// Parses the unquoted payload text.
    fn parse_scalar(text: &str) -> Option<Self>;
}

impl Scalar for bool {
    const EXPECTED: &'static str = "boolean";

    fn parse_scalar(text: &str) -> Option<Self> {
        parse_flag(text)
    }
}

impl Scalar for i64 {
    const EXPECTED: &'static str = "integer";

    fn parse_scalar(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl Scalar for f64 {
    const EXPECTED: &'static str = "number";

    fn parse_scalar(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl Scalar for String {
    const EXPECTED: &'static str = "string";

    fn parse_scalar(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl Scalar for IntOrString {
    const EXPECTED: &'static str = "integer or string";

    fn parse_scalar(text: &str) -> Option<Self> {
        Some(match text.parse::<i64>() {
            Ok(n) => IntOrString::Int(n),
            Err(_) => IntOrString::Str(text.to_string()),
        })
    }
}

/// Decodes a scalar payload, accepting both bare and quoted encodings.
///
/// ## Examples
///
/// ```
/// use rpcbind::decode::scalar;
///
/// assert_eq!(scalar::<i64>(b"42").unwrap(), 42);
/// assert_eq!(scalar::<i64>(b"\"42\"").unwrap(), 42);
/// assert_eq!(scalar::<String>(b"\"hello\"").unwrap(), "hello");
/// assert!(scalar::<f64>(b"\"abc\"").is_err());
/// ```
///
/// ## Errors
///
/// Returns `BindingError::Scalar` if the text does not parse as `T`, or
/// `BindingError::Decode` if a quoted payload is not a valid JSON string.
pub fn scalar<T: Scalar>(raw: &[u8]) -> Result<T, BindingError> {
    let text = scalar_text(raw)?;
    T::parse_scalar(&text).ok_or_else(|| {
        tracing::debug!(payload = %text, expected = T::EXPECTED, "scalar coercion failed");
        BindingError::Scalar {
            value: text.to_string(),
            expected: T::EXPECTED,
        }
    })
}

/// Decodes a success-flag payload (`1`, `0`, `"1"`, `true`, ...) into a `bool`.
///
/// ## Examples
///
/// ```
/// use rpcbind::decode::bool_flag;
///
/// assert!(bool_flag(b"1").unwrap());
/// assert!(!bool_flag(b"0").unwrap());
/// assert!(bool_flag(b"true").unwrap());
/// ```
///
/// ## Errors
///
/// Returns `BindingError::Scalar` if the payload is not a recognised flag.
pub fn bool_flag(raw: &[u8]) -> Result<bool, BindingError> {
    scalar::<bool>(raw)
}

/// Decodes a payload with a statically known structure (arrays, maps, structs).
///
/// ## Errors
///
/// Returns `BindingError::Decode` if the payload does not match `T`.
pub fn json<T: DeserializeOwned>(raw: &[u8]) -> Result<T, BindingError> {
    serde_json::from_slice(raw).map_err(|e| {
        tracing::debug!(error = %e, len = raw.len(), "structural decode failed");
        BindingError::Decode(e)
    })
}

/// Decodes a payload whose shape is not statically known.
///
/// ## Errors
///
/// Returns `BindingError::Decode` if the payload is not valid JSON.
pub fn dynamic(raw: &[u8]) -> Result<Value, BindingError> {
    json(raw)
}

/// Decodes a struct payload into a newly allocated instance.
///
/// ## Errors
///
/// Returns `BindingError::Decode` if the payload does not match `T`.
pub fn boxed<T: DeserializeOwned>(raw: &[u8]) -> Result<Box<T>, BindingError> {
    json(raw).map(Box::new)
}

fn scalar_text(raw: &[u8]) -> Result<Cow<'_, str>, BindingError> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| BindingError::Scalar {
            value: String::from_utf8_lossy(raw).into_owned(),
            expected: "UTF-8 text",
        })?
        .trim();

    if text.starts_with('"') {
        let unquoted: String = serde_json::from_str(text)?;
        Ok(Cow::Owned(unquoted))
    } else {
        Ok(Cow::Borrowed(text))
    }
}
