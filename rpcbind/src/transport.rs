//! The transport collaborator consumed by generated bindings.

use std::future::Future;

use crate::error::BindingError;
use crate::params::RequestParams;

/// Executes a named RPC call and returns the raw response payload.
///
/// Implementations own everything about the wire: endpoint URL,
/// authentication, API versioning, retries, rate limiting, and unwrapping of
/// any response envelope. Generated methods only ever see the payload bytes
/// for the result value.
///
/// ## Examples
///
/// ```
/// use rpcbind::{BindingError, RequestParams, Transport};
///
/// struct Canned(&'static [u8]);
///
/// impl Transport for Canned {
///     fn request(
///         &self,
///         _method: &str,
///         _params: RequestParams,
///     ) -> impl std::future::Future<Output = Result<Vec<u8>, BindingError>> + Send {
///         let payload = self.0.to_vec();
///         async move { Ok(payload) }
///     }
/// }
/// ```
pub trait Transport {
    /// Sends `method` with the flattened `params`.
    fn request(
        &self,
        method: &str,
        params: RequestParams,
    ) -> impl Future<Output = Result<Vec<u8>, BindingError>> + Send;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn request(
        &self,
        method: &str,
        params: RequestParams,
    ) -> impl Future<Output = Result<Vec<u8>, BindingError>> + Send {
        (**self).request(method, params)
    }
}
