//! Execution context and request builders for the micro HTTP toolkit
//!
//! This crate provides the shared data contracts used by the stages that process
//! an HTTP exchange: a per-exchange execution context carrying protocol state, and
//! builders that assemble immutable request values. Connection management, codecs
//! and interceptors consume these types; they are not part of this crate.
//!
//! # Features
//!
//! - Attribute store with typed accessors for the well-known exchange state
//! - Adaptation of foreign attribute stores without double wrapping
//! - Fluent request builders with ordered headers and query/form parameters
//! - Charset-aware parameter encoding
//! - Fail-fast error handling
//!
//! # Example
//!
//! ```
//! use micro_http_core::builder::{BasicRequestBuilder, MessageBuilder, RequestBuilder};
//! use micro_http_core::context::{ExecutionContext, HttpCoreContext};
//! use micro_http_core::protocol::HttpHost;
//!
//! let mut builder = BasicRequestBuilder::get("http://example.org/search").unwrap();
//! builder.add_parameter_pair("q", "cats");
//! builder.add_header(http::header::ACCEPT, "text/html").unwrap();
//! let request = builder.build().unwrap();
//!
//! let mut context = HttpCoreContext::new();
//! context.set_target_host(HttpHost::from_uri(request.uri()).unwrap());
//! context.set_request(request);
//! context.set_request_sent(true);
//!
//! assert_eq!(context.request().unwrap().unwrap().query(), Some("q=cats"));
//! assert_eq!(context.target_host().unwrap().unwrap().hostname(), "example.org");
//! assert!(context.is_request_sent().unwrap());
//! assert!(!context.is_expect_continue().unwrap());
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`context`]: attribute stores, the typed execution context and store adaptation
//! - [`builder`]: message and request builders
//! - [`protocol`]: request, response and host value types, error types
//! - [`connection`]: the connection handle interface stored in a context
//!
//! ## Error Handling
//!
//! The crate uses custom error types that implement `std::error::Error`:
//!
//! - [`protocol::ContextError`]: absent stores and attribute type mismatches
//! - [`protocol::BuildError`]: URI syntax, header and host errors
//!
//! Errors are returned at the offending call; nothing is deferred or retried.
//!
//! # Concurrency
//!
//! Contexts and builders are not synchronized. Each belongs to one exchange or one
//! request under construction, accessed by a single flow at a time.

pub mod builder;
pub mod connection;
pub mod context;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
