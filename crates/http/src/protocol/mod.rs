//! Protocol value types shared by the execution context and the request builders.
//!
//! - **Request value** ([`request`]): [`RequestHeader`], the immutable request produced
//!   by the builders and stored in a context
//! - **Response value** ([`response`]): [`ResponseHead`]
//! - **Host descriptor** ([`host`]): [`HttpHost`], the target host of an exchange
//! - **Error Handling** ([`error`]):
//!   - [`ContextError`]: invalid arguments and attribute type mismatches
//!   - [`BuildError`]: URI syntax, header and host failures while building requests

mod request;
pub use request::RequestHeader;

mod response;
pub use response::ResponseHead;

mod host;
pub use host::DEFAULT_SCHEME;
pub use host::HttpHost;

mod error;
pub use error::BuildError;
pub use error::ContextError;
