//! Runtime support for generated RPC bindings.
//!
//! Code produced by `rpcbind-gen` depends on this crate for everything that is
//! not specific to one schema:
//!
//! - [`Transport`] - the collaborator that executes a named RPC call
//! - [`encode_params`] - flattens a parameter struct into key/value pairs
//! - [`CsvIntList`] / [`CsvStringList`] - delimited-list parameter scalars
//! - [`decode`] - decode helpers for every response strategy
//! - [`BoolInt`], [`IntOrString`], [`Unresolved`] - quirky wire encodings
//! - [`ResponseShape`] - the discriminator shared by dual-shape responses
//! - [`BindingError`] - the single error type returned by generated methods
//!
//! ## Example
//!
//! ```rust,ignore
//! use rpcbind::{BindingError, RequestParams, Transport};
//!
//! struct HttpTransport { /* ... */ }
//!
//! impl Transport for HttpTransport {
//!     fn request(
//!         &self,
//!         method: &str,
//!         params: RequestParams,
//!     ) -> impl std::future::Future<Output = Result<Vec<u8>, BindingError>> + Send {
//!         async move { todo!("POST {method} with {params:?}") }
//!     }
//! }
//!
//! let account = bindings::account::Account::new(&HttpTransport { /* ... */ });
//! let online = account.set_offline().await?;
//! ```

pub mod csv;
pub mod decode;
pub mod error;
pub mod params;
pub mod transport;
pub mod types;

pub use csv::{CsvIntList, CsvStringList};
pub use error::BindingError;
pub use params::{RequestParams, encode_params};
pub use transport::Transport;
pub use types::{BoolInt, IntOrString, ResponseShape, Unresolved};
