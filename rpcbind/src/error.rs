//! Errors returned by generated binding methods.

use thiserror::Error;

/// Error type for every generated RPC method.
///
/// Transport failures and decode failures are reported the same way: the
/// method returns `Err` and no partially decoded value.
///
/// ## Examples
///
/// ```
/// use rpcbind::BindingError;
///
/// let err = BindingError::transport("users.get", "connection reset");
/// assert!(err.to_string().contains("users.get"));
/// assert!(err.is_transport());
/// ```
#[derive(Debug, Error)]
pub enum BindingError {
    /// The transport collaborator failed to execute the call.
    #[error("Request '{method}' failed: {message}")]
    Transport {
        /// RPC method name (e.g. `users.get`).
        method: String,
        /// Transport-provided failure description.
        message: String,
    },

    /// The raw payload did not match the expected response shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A scalar payload could not be coerced to its declared type.
    #[error("Cannot interpret '{value}' as {expected}")]
    Scalar {
        /// The payload text that failed to parse.
        value: String,
        /// Name of the expected scalar kind.
        expected: &'static str,
    },

    /// Parameters could not be flattened into key/value pairs.
    #[error("Failed to encode parameters: {0}")]
    Encode(String),
}

impl BindingError {
    /// Creates a transport error for `method`.
    pub fn transport(method: impl Into<String>, message: impl ToString) -> Self {
        Self::Transport {
            method: method.into(),
            message: message.to_string(),
        }
    }

    /// Returns `true` if the failure happened before any payload was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display() {
        let err = BindingError::transport("account.setOffline", "timeout");
        assert_eq!(
            err.to_string(),
            "Request 'account.setOffline' failed: timeout"
        );
    }

    #[test]
    fn decode_error_from_serde() {
        let json_err = serde_json::from_str::<Vec<i64>>("{").unwrap_err();
        let err: BindingError = json_err.into();
        assert!(matches!(err, BindingError::Decode(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn scalar_error_display() {
        let err = BindingError::Scalar {
            value: "abc".to_string(),
            expected: "integer",
        };
        assert_eq!(err.to_string(), "Cannot interpret 'abc' as integer");
    }
}
