//! HTTP response value stored in an execution context.
//!
//! The response under processing is kept as `http::Response<()>`: the head
//! (status, version, headers) without a body, since body streaming belongs
//! to the transport layer.

use http::Response;

/// Type alias for the head of an HTTP response.
///
/// This is the value type of the `http.response` context attribute.
pub type ResponseHead = Response<()>;
