use std::any::{Any, type_name};
use std::sync::Arc;

use tracing::warn;

use crate::connection::HttpConnection;
use crate::context::{Attribute, BasicHttpContext, HttpContext, WellKnownKey};
use crate::protocol::{ContextError, HttpHost, RequestHeader, ResponseHead};

/// Looks up `id` and casts it to `T`.
///
/// An absent attribute is `Ok(None)`; a present value of another type is a
/// [`ContextError::TypeMismatch`], never coerced.
pub fn typed_attribute<'c, T, C>(context: &'c C, id: &str) -> Result<Option<&'c T>, ContextError>
where
    T: Any,
    C: HttpContext + ?Sized,
{
    let Some(value) = context.attribute(id) else {
        return Ok(None);
    };
    let value: &(dyn Any + Send + Sync) = &**value;
    match value.downcast_ref::<T>() {
        Some(typed) => Ok(Some(typed)),
        None => {
            let expected = type_name::<T>();
            warn!(id, expected, "context attribute type mismatch");
            Err(ContextError::type_mismatch(id, expected))
        }
    }
}

fn flag<C: HttpContext + ?Sized>(context: &C, key: WellKnownKey) -> Result<bool, ContextError> {
    Ok(typed_attribute::<bool, _>(context, key.id())?.copied().unwrap_or(false))
}

/// Typed view over an [`HttpContext`] for the state of one exchange.
///
/// Every accessor reads or writes one [`WellKnownKey`] through the raw
/// attribute operations, so state set here is visible to code that only knows
/// the string ids and vice versa.
pub trait ExecutionContext: HttpContext {
    /// Generic typed lookup, see [`typed_attribute`].
    fn attribute_as<T: Any>(&self, id: &str) -> Result<Option<&T>, ContextError>
    where
        Self: Sized,
    {
        typed_attribute(self, id)
    }

    fn connection(&self) -> Result<Option<&Arc<dyn HttpConnection>>, ContextError> {
        typed_attribute(self, WellKnownKey::Connection.id())
    }

    /// Returns the connection downcast to the concrete type `T`.
    fn connection_as<T: HttpConnection>(&self) -> Result<Option<&T>, ContextError>
    where
        Self: Sized,
    {
        let Some(connection) = self.connection()? else {
            return Ok(None);
        };
        let connection: &dyn Any = &**connection;
        match connection.downcast_ref::<T>() {
            Some(typed) => Ok(Some(typed)),
            None => {
                let (id, expected) = (WellKnownKey::Connection.id(), type_name::<T>());
                warn!(id, expected, "context attribute type mismatch");
                Err(ContextError::type_mismatch(id, expected))
            }
        }
    }

    fn set_connection(&mut self, connection: Arc<dyn HttpConnection>) {
        self.set_attribute(WellKnownKey::Connection.id(), Box::new(connection));
    }

    fn request(&self) -> Result<Option<&RequestHeader>, ContextError> {
        typed_attribute(self, WellKnownKey::Request.id())
    }

    fn set_request(&mut self, request: RequestHeader) {
        self.set_attribute(WellKnownKey::Request.id(), Box::new(request));
    }

    fn response(&self) -> Result<Option<&ResponseHead>, ContextError> {
        typed_attribute(self, WellKnownKey::Response.id())
    }

    fn set_response(&mut self, response: ResponseHead) {
        self.set_attribute(WellKnownKey::Response.id(), Box::new(response));
    }

    fn target_host(&self) -> Result<Option<&HttpHost>, ContextError> {
        typed_attribute(self, WellKnownKey::TargetHost.id())
    }

    fn set_target_host(&mut self, host: HttpHost) {
        self.set_attribute(WellKnownKey::TargetHost.id(), Box::new(host));
    }

    /// Whether the request has been transmitted; `false` until set.
    fn is_request_sent(&self) -> Result<bool, ContextError> {
        flag(self, WellKnownKey::RequestSent)
    }

    fn set_request_sent(&mut self, sent: bool) {
        self.set_attribute(WellKnownKey::RequestSent.id(), Box::new(sent));
    }

    /// Whether `Expect: 100-continue` handshaking is active; `false` until set.
    fn is_expect_continue(&self) -> Result<bool, ContextError> {
        flag(self, WellKnownKey::ExpectContinue)
    }

    fn set_expect_continue(&mut self) {
        self.set_attribute(WellKnownKey::ExpectContinue.id(), Box::new(true));
    }
}

/// [`ExecutionContext`] implementation delegating to an attribute store.
///
/// `HttpCoreContext::new()` owns a fresh [`BasicHttpContext`]; [`adapt`](crate::context::adapt)
/// builds a non-owning `HttpCoreContext<&mut dyn HttpContext>` over someone else's store.
#[derive(Debug, Default)]
pub struct HttpCoreContext<C = BasicHttpContext> {
    context: C,
}

impl HttpCoreContext {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: HttpContext> HttpCoreContext<C> {
    pub fn with_store(context: C) -> Self {
        Self { context }
    }

    pub fn store(&self) -> &C {
        &self.context
    }

    pub fn into_inner(self) -> C {
        self.context
    }
}

impl<C: HttpContext> HttpContext for HttpCoreContext<C> {
    fn attribute(&self, id: &str) -> Option<&Attribute> {
        self.context.attribute(id)
    }

    fn set_attribute(&mut self, id: &str, value: Attribute) {
        self.context.set_attribute(id, value);
    }

    fn remove_attribute(&mut self, id: &str) -> Option<Attribute> {
        self.context.remove_attribute(id)
    }

    fn as_execution_context_mut(&mut self) -> Result<&mut dyn ExecutionContext, &mut dyn HttpContext> {
        Ok(self)
    }
}

impl<C: HttpContext> ExecutionContext for HttpCoreContext<C> {}

/// Result of [`adapt`](crate::context::adapt): either the execution context the
/// store already was, or a fresh wrapper borrowing the store.
#[derive(Debug)]
pub enum CoreContextRef<'a> {
    Existing(&'a mut dyn ExecutionContext),
    Adapted(HttpCoreContext<&'a mut dyn HttpContext>),
}

impl CoreContextRef<'_> {
    /// Returns true if a new wrapper had to be created.
    pub fn is_adapted(&self) -> bool {
        matches!(self, CoreContextRef::Adapted(_))
    }

    /// The execution context this handle refers to.
    pub fn as_dyn(&mut self) -> &mut dyn ExecutionContext {
        match self {
            CoreContextRef::Existing(context) => &mut **context,
            CoreContextRef::Adapted(context) => context,
        }
    }
}

impl HttpContext for CoreContextRef<'_> {
    fn attribute(&self, id: &str) -> Option<&Attribute> {
        match self {
            CoreContextRef::Existing(context) => context.attribute(id),
            CoreContextRef::Adapted(context) => context.attribute(id),
        }
    }

    fn set_attribute(&mut self, id: &str, value: Attribute) {
        self.as_dyn().set_attribute(id, value);
    }

    fn remove_attribute(&mut self, id: &str) -> Option<Attribute> {
        self.as_dyn().remove_attribute(id)
    }

    fn as_execution_context_mut(&mut self) -> Result<&mut dyn ExecutionContext, &mut dyn HttpContext> {
        Ok(self.as_dyn())
    }
}

impl ExecutionContext for CoreContextRef<'_> {}
