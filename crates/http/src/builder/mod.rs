//! Request builders.
//!
//! Builders accumulate a method, target URI, protocol version, headers, charset
//! and parameters, then produce an immutable request value.
//!
//! # Architecture
//!
//! - **Message base** ([`message`]): [`MessageFields`] holds the version and the ordered
//!   header list; the [`MessageBuilder`] trait exposes them fluently
//! - **Request layer** ([`request`]): [`RequestFields`] adds method, URI, charset and
//!   parameters; the [`RequestBuilder`] trait exposes them and declares `build`
//! - **Concrete builders**:
//!   - [`BasicRequestBuilder`]: builds a [`RequestHeader`](crate::protocol::RequestHeader),
//!     parameters go to the query string
//!   - [`ClassicRequestBuilder`]: builds a `Request<Full<Bytes>>`, parameters of a
//!     body-less `POST`/`PUT` become a form body
//!
//! All setters come from the traits and return the concrete builder, so calls chain:
//!
//! ```
//! use micro_http_core::builder::{BasicRequestBuilder, MessageBuilder, RequestBuilder};
//!
//! let mut builder = BasicRequestBuilder::get("http://example.org/search").unwrap();
//! builder.add_parameter_pair("q", "cats").add_parameter_pair("q", "dogs");
//! builder.set_header("accept", "text/html").unwrap();
//!
//! let request = builder.build().unwrap();
//! assert_eq!(request.query(), Some("q=cats&q=dogs"));
//! ```
//!
//! Builders are plain mutable values without synchronization; build one request per
//! builder per flow.

mod message;
mod request;

mod basic;
mod classic;

pub use message::DEFAULT_VERSION;
pub use message::Header;
pub use message::MessageBuilder;
pub use message::MessageFields;

pub use request::DEFAULT_CHARSET;
pub use request::DEFAULT_PATH;
pub use request::IntoUri;
pub use request::NameValuePair;
pub use request::RequestBuilder;
pub use request::RequestFields;
pub use request::encode_parameters;

pub use basic::BasicRequestBuilder;
pub use classic::ClassicRequestBuilder;

/// Generates the per-method shorthand constructors of a builder with a `with_uri` constructor.
macro_rules! method_constructors {
    ($($(#[$doc:meta])* $name:ident => $method:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name<U: $crate::builder::IntoUri>(uri: U) -> Result<Self, $crate::protocol::BuildError> {
                Self::with_uri(http::Method::$method, uri)
            }
        )*
    };
}

pub(crate) use method_constructors;
