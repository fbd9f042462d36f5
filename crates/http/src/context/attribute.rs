//! Raw attribute storage.
//!
//! [`HttpContext`] is the low-level get/set/remove interface understood by any
//! code that only deals in string-keyed attributes. [`BasicHttpContext`] is the
//! default implementation: the well-known keys live in fixed slots, everything
//! else in an overflow map.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use tracing::trace;

use crate::context::ExecutionContext;

/// A type-erased attribute value.
pub type Attribute = Box<dyn Any + Send + Sync>;

pub const HTTP_CONNECTION: &str = "http.connection";
pub const HTTP_REQUEST: &str = "http.request";
pub const HTTP_RESPONSE: &str = "http.response";
pub const HTTP_TARGET_HOST: &str = "http.target_host";
pub const HTTP_REQ_SENT: &str = "http.request_sent";
pub const HTTP_EXPECT_CONT: &str = "http.expect_continue";

/// The attribute ids with an agreed value type, see [`ExecutionContext`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WellKnownKey {
    /// `Arc<dyn HttpConnection>` carrying the exchange
    Connection,
    /// [`RequestHeader`](crate::protocol::RequestHeader) being processed
    Request,
    /// [`ResponseHead`](crate::protocol::ResponseHead) being processed
    Response,
    /// [`HttpHost`](crate::protocol::HttpHost) the request is aimed at
    TargetHost,
    /// `bool`, whether the request has been transmitted
    RequestSent,
    /// `bool`, whether `Expect: 100-continue` semantics are active
    ExpectContinue,
}

impl WellKnownKey {
    pub const COUNT: usize = 6;

    pub const ALL: [WellKnownKey; Self::COUNT] = [
        WellKnownKey::Connection,
        WellKnownKey::Request,
        WellKnownKey::Response,
        WellKnownKey::TargetHost,
        WellKnownKey::RequestSent,
        WellKnownKey::ExpectContinue,
    ];

    /// Returns the string id this key is stored under.
    pub const fn id(self) -> &'static str {
        match self {
            WellKnownKey::Connection => HTTP_CONNECTION,
            WellKnownKey::Request => HTTP_REQUEST,
            WellKnownKey::Response => HTTP_RESPONSE,
            WellKnownKey::TargetHost => HTTP_TARGET_HOST,
            WellKnownKey::RequestSent => HTTP_REQ_SENT,
            WellKnownKey::ExpectContinue => HTTP_EXPECT_CONT,
        }
    }

    /// Maps a string id back to its well-known key, if it is one.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.id() == id)
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Hands out `self` as a trait object; implemented for every sized [`HttpContext`].
pub trait AsHttpContext {
    fn as_http_context_mut(&mut self) -> &mut dyn HttpContext;
}

impl<T: HttpContext> AsHttpContext for T {
    fn as_http_context_mut(&mut self) -> &mut dyn HttpContext {
        self
    }
}

/// A generic attribute store keyed by string ids.
///
/// Values are type-erased; readers that know the expected type should go
/// through [`ExecutionContext`] or [`typed_attribute`](crate::context::typed_attribute).
///
/// Implementations are not synchronized: one exchange, one flow, one store.
pub trait HttpContext: AsHttpContext + Debug {
    /// Returns the value stored under `id`, if any.
    fn attribute(&self, id: &str) -> Option<&Attribute>;

    /// Stores `value` under `id`, replacing any previous value.
    fn set_attribute(&mut self, id: &str, value: Attribute);

    /// Removes and returns the value stored under `id`.
    ///
    /// Stores with a fallback (see [`BasicHttpContext::with_parent`]) only remove
    /// their own value, so a later lookup may still find the fallback's.
    fn remove_attribute(&mut self, id: &str) -> Option<Attribute>;

    fn contains_attribute(&self, id: &str) -> bool {
        self.attribute(id).is_some()
    }

    /// Capability check used by [`adapt`](crate::context::adapt).
    ///
    /// Stores that already provide the typed [`ExecutionContext`] view return
    /// themselves as `Ok`; plain stores hand themselves back as `Err`.
    fn as_execution_context_mut(&mut self) -> Result<&mut dyn ExecutionContext, &mut dyn HttpContext> {
        Err(self.as_http_context_mut())
    }
}

impl<T: HttpContext + ?Sized> HttpContext for &mut T {
    fn attribute(&self, id: &str) -> Option<&Attribute> {
        (**self).attribute(id)
    }

    fn set_attribute(&mut self, id: &str, value: Attribute) {
        (**self).set_attribute(id, value);
    }

    fn remove_attribute(&mut self, id: &str) -> Option<Attribute> {
        (**self).remove_attribute(id)
    }

    fn as_execution_context_mut(&mut self) -> Result<&mut dyn ExecutionContext, &mut dyn HttpContext> {
        (**self).as_execution_context_mut()
    }
}

/// Default attribute store.
///
/// The well-known keys are kept in a fixed slot array indexed by [`WellKnownKey`];
/// any other id goes to an overflow map. An optional parent context is consulted
/// for ids missing locally. The parent is never written to.
#[derive(Debug, Default)]
pub struct BasicHttpContext {
    parent: Option<Arc<BasicHttpContext>>,
    well_known: [Option<Attribute>; WellKnownKey::COUNT],
    overflow: HashMap<String, Attribute>,
}

impl BasicHttpContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that falls back to `parent` on lookup misses.
    ///
    /// The parent is read-only through the child: removing an id locally makes the
    /// parent's value for that id visible again.
    pub fn with_parent(parent: Arc<BasicHttpContext>) -> Self {
        Self { parent: Some(parent), ..Self::default() }
    }

    pub fn parent(&self) -> Option<&Arc<BasicHttpContext>> {
        self.parent.as_ref()
    }

    /// Drops every local attribute; the parent is left alone.
    pub fn clear(&mut self) {
        self.well_known.iter_mut().for_each(|slot| *slot = None);
        self.overflow.clear();
    }

    /// Number of attributes stored locally.
    pub fn len(&self) -> usize {
        self.well_known.iter().filter(|slot| slot.is_some()).count() + self.overflow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn local(&self, id: &str) -> Option<&Attribute> {
        match WellKnownKey::from_id(id) {
            Some(key) => self.well_known[key.index()].as_ref(),
            None => self.overflow.get(id),
        }
    }
}

impl HttpContext for BasicHttpContext {
    fn attribute(&self, id: &str) -> Option<&Attribute> {
        self.local(id).or_else(|| self.parent.as_deref().and_then(|parent| parent.attribute(id)))
    }

    fn set_attribute(&mut self, id: &str, value: Attribute) {
        let previous = match WellKnownKey::from_id(id) {
            Some(key) => self.well_known[key.index()].replace(value),
            None => self.overflow.insert(id.to_string(), value),
        };
        if previous.is_some() {
            trace!(id, "replaced context attribute");
        }
    }

    /// Removes the local value only; the parent, if any, is untouched.
    fn remove_attribute(&mut self, id: &str) -> Option<Attribute> {
        match WellKnownKey::from_id(id) {
            Some(key) => self.well_known[key.index()].take(),
            None => self.overflow.remove(id),
        }
    }
}
