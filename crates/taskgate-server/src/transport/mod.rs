//! HTTP transport.
//!
//! Task endpoints and the mapping from `TaskGateError` to HTTP responses.

pub mod error;
pub mod http;

pub use error::HttpError;
