//! Per-exchange execution context.
//!
//! An exchange (one request/response round trip) is processed by a chain of
//! stages that hand protocol state to each other through a context:
//!
//! - [`HttpContext`]: the raw attribute store, string id to type-erased value
//! - [`BasicHttpContext`]: default store, fixed slots for the [`WellKnownKey`]s plus an
//!   overflow map for any other id
//! - [`ExecutionContext`]: typed accessors for the well-known keys (connection, request,
//!   response, target host, request-sent and expect-continue flags)
//! - [`HttpCoreContext`]: the [`ExecutionContext`] implementation over any store
//! - [`adapt`]: obtains an [`ExecutionContext`] view over an arbitrary store without
//!   double-wrapping one that already is
//!
//! # Example
//!
//! ```
//! use micro_http_core::context::{adapt, BasicHttpContext, ExecutionContext, HttpContext};
//! use micro_http_core::protocol::HttpHost;
//!
//! let mut store = BasicHttpContext::new();
//! let mut context = adapt(&mut store);
//! assert!(!context.is_expect_continue().unwrap());
//!
//! context.set_expect_continue();
//! context.set_target_host(HttpHost::new("example.org").unwrap());
//!
//! assert!(store.contains_attribute("http.expect_continue"));
//! ```
//!
//! Contexts are not synchronized. A context belongs to one exchange and is
//! touched by one flow at a time; it can be moved across tasks, not shared.

mod attribute;
mod execution;

pub use attribute::AsHttpContext;
pub use attribute::Attribute;
pub use attribute::BasicHttpContext;
pub use attribute::HttpContext;
pub use attribute::WellKnownKey;
pub use attribute::{HTTP_CONNECTION, HTTP_EXPECT_CONT, HTTP_REQ_SENT, HTTP_REQUEST, HTTP_RESPONSE, HTTP_TARGET_HOST};

pub use execution::CoreContextRef;
pub use execution::ExecutionContext;
pub use execution::HttpCoreContext;
pub use execution::typed_attribute;

use tracing::debug;

use crate::protocol::ContextError;

/// Returns an [`ExecutionContext`] view over `context`.
///
/// If the store already is an execution context the returned handle refers to
/// that same instance; otherwise the store is wrapped in a [`HttpCoreContext`]
/// that borrows it and holds no state of its own.
pub fn adapt(context: &mut dyn HttpContext) -> CoreContextRef<'_> {
    match context.as_execution_context_mut() {
        Ok(existing) => CoreContextRef::Existing(existing),
        Err(store) => {
            debug!("wrapping attribute store in an execution context");
            CoreContextRef::Adapted(HttpCoreContext::with_store(store))
        }
    }
}

/// Like [`adapt`], for call sites holding an optional store.
///
/// Fails with [`ContextError::InvalidArgument`] when the store is absent.
pub fn try_adapt(context: Option<&mut dyn HttpContext>) -> Result<CoreContextRef<'_>, ContextError> {
    context.map(adapt).ok_or_else(|| ContextError::invalid_argument("HTTP context"))
}
