use std::convert::Infallible;

use thiserror::Error;

/// Errors raised by [`ExecutionContext`](crate::context::ExecutionContext) lookups
/// and by context adaptation.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("invalid argument: {name} must not be absent")]
    InvalidArgument { name: &'static str },

    #[error("attribute `{id}` is not of the expected type {expected}")]
    TypeMismatch { id: String, expected: &'static str },
}

impl ContextError {
    pub fn invalid_argument(name: &'static str) -> Self {
        Self::InvalidArgument { name }
    }

    pub fn type_mismatch<S: ToString>(id: S, expected: &'static str) -> Self {
        Self::TypeMismatch { id: id.to_string(), expected }
    }
}

/// Errors raised while assembling a request with one of the [`builder`](crate::builder) types.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("invalid uri `{uri}`: {source}")]
    UriSyntax {
        uri: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("invalid host: {reason}")]
    InvalidHost { reason: String },

    #[error("http error: {source}")]
    Http {
        #[from]
        source: http::Error,
    },
}

impl BuildError {
    pub fn uri_syntax<S: ToString>(uri: S, source: http::uri::InvalidUri) -> Self {
        Self::UriSyntax { uri: uri.to_string(), source }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn invalid_host<S: ToString>(str: S) -> Self {
        Self::InvalidHost { reason: str.to_string() }
    }
}

impl From<Infallible> for BuildError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

impl From<http::header::InvalidHeaderName> for BuildError {
    fn from(e: http::header::InvalidHeaderName) -> Self {
        Self::invalid_header(e)
    }
}

impl From<http::header::InvalidHeaderValue> for BuildError {
    fn from(e: http::header::InvalidHeaderValue) -> Self {
        Self::invalid_header(e)
    }
}
