//! Flattening of parameter structs into key/value pairs.
//!
//! Transports send parameters as flat pairs (query string or form body), so
//! nested values are not representable natively. Generated parameter structs
//! only contain scalars, delimited lists, and optional scalars.

use serde::Serialize;
use serde_json::Value;

use crate::error::BindingError;

/// Flattened request parameters in declaration order.
pub type RequestParams = Vec<(String, String)>;

/// Flattens a serializable parameter struct into ordered key/value pairs.
///
/// - `None` / `null` values are omitted
/// - booleans are encoded as `1` / `0`
/// - numbers use their JSON text form
/// - strings are passed verbatim
/// - anything nested is encoded as compact JSON text
///
/// ## Examples
///
/// ```
/// use serde::Serialize;
/// use rpcbind::{CsvIntList, encode_params};
///
/// #[derive(Serialize)]
/// struct Params {
///     user_ids: CsvIntList,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     name_case: Option<String>,
///     extended: bool,
/// }
///
/// let pairs = encode_params(&Params {
///     user_ids: CsvIntList::from(vec![1, 2]),
///     name_case: None,
///     extended: true,
/// })
/// .unwrap();
///
/// assert_eq!(
///     pairs,
///     vec![
///         ("user_ids".to_string(), "1,2".to_string()),
///         ("extended".to_string(), "1".to_string()),
///     ]
/// );
/// ```
///
/// ## Errors
///
/// Returns `BindingError::Encode` if the value fails to serialize or does not
/// serialize to an object.
pub fn encode_params<P: Serialize + ?Sized>(params: &P) -> Result<RequestParams, BindingError> {
    let value = serde_json::to_value(params).map_err(|e| BindingError::Encode(e.to_string()))?;

    match value {
        Value::Null => Ok(RequestParams::new()),
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(key, value)| flatten_value(value).map(|text| (key, text)))
            .collect()),
        other => Err(BindingError::Encode(format!(
            "parameters must serialize to an object, got {}",
            value_kind(&other)
        ))),
    }
}

fn flatten_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(if flag { "1" } else { "0" }.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CsvStringList;

    #[derive(Serialize)]
    struct SearchParams {
        q: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        offset: Option<i64>,
        fields: CsvStringList,
        #[serde(rename = "2fa_required")]
        x2fa_required: bool,
        ratio: f64,
    }

    #[test]
    fn encodes_in_declaration_order() {
        let params = SearchParams {
            q: "rust".to_string(),
            offset: Some(20),
            fields: CsvStringList::from(vec!["photo_50".to_string(), "city".to_string()]),
            x2fa_required: false,
            ratio: 0.5,
        };

        let pairs = encode_params(&params).unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["q", "offset", "fields", "2fa_required", "ratio"]);
        assert_eq!(pairs[1].1, "20");
        assert_eq!(pairs[2].1, "photo_50,city");
        assert_eq!(pairs[3].1, "0");
        assert_eq!(pairs[4].1, "0.5");
    }

    #[test]
    fn omits_absent_optionals() {
        let params = SearchParams {
            q: "x".to_string(),
            offset: None,
            fields: CsvStringList::default(),
            x2fa_required: true,
            ratio: 1.0,
        };

        let pairs = encode_params(&params).unwrap();
        assert!(pairs.iter().all(|(k, _)| k != "offset"));
        assert!(pairs.contains(&("2fa_required".to_string(), "1".to_string())));
    }

    #[test]
    fn unit_encodes_to_nothing() {
        assert!(encode_params(&()).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_object() {
        let err = encode_params(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, BindingError::Encode(_)));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn nested_values_become_json_text() {
        let value = serde_json::json!({ "filter": { "a": 1 }, "ids": [1, 2] });
        let pairs = encode_params(&value).unwrap();
        assert_eq!(pairs[0], ("filter".to_string(), r#"{"a":1}"#.to_string()));
        assert_eq!(pairs[1], ("ids".to_string(), "[1,2]".to_string()));
    }
}
