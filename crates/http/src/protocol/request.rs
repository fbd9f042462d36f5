//! HTTP request value handling.
//!
//! [`RequestHeader`] is the immutable request value produced by
//! [`BasicRequestBuilder`](crate::builder::BasicRequestBuilder) and stored in an
//! execution context under the `http.request` attribute. It wraps the standard
//! `http::Request<()>`: method, URI, version and headers, with no body attached.

use http::{HeaderMap, Method, Request, Uri, Version};

/// The request line and headers of an exchange.
///
/// Builders produce it and contexts hold it; once built it is never mutated.
/// A builder can be seeded from one with
/// [`BasicRequestBuilder::copy`](crate::builder::BasicRequestBuilder::copy).
#[derive(Debug, Clone)]
pub struct RequestHeader {
    inner: Request<()>,
}

impl AsRef<Request<()>> for RequestHeader {
    fn as_ref(&self) -> &Request<()> {
        &self.inner
    }
}

impl RequestHeader {
    pub fn into_inner(self) -> Request<()> {
        self.inner
    }

    /// Pairs the header with a body for handing it to a transport.
    pub fn body<T>(self, body: T) -> Request<T> {
        self.inner.map(|()| body)
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// The query component of the request target, including encoded parameters.
    pub fn query(&self) -> Option<&str> {
        self.inner.uri().query()
    }

    pub fn version(&self) -> Version {
        self.inner.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }
}

impl From<Request<()>> for RequestHeader {
    #[inline]
    fn from(inner: Request<()>) -> Self {
        Self { inner }
    }
}
