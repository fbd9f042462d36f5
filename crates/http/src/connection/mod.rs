//! Connection handle interface.
//!
//! The connection carrying an exchange is owned by the transport layer. Pipeline
//! stages only see it through the [`HttpConnection`] trait, stored in the execution
//! context as `Arc<dyn HttpConnection>` under the `http.connection` attribute.

use std::any::Any;
use std::fmt::Debug;
use std::net::SocketAddr;

/// A connection carrying one or more HTTP exchanges.
///
/// Implementors are expected to be cheap handles onto transport state; the
/// connection lifecycle (open, read, write, shutdown) lives outside this crate.
pub trait HttpConnection: Any + Debug + Send + Sync {
    /// Returns true while the connection can carry further exchanges.
    fn is_open(&self) -> bool;

    /// Returns the local address of the underlying socket, if known.
    fn local_addr(&self) -> Option<SocketAddr> {
        None
    }

    /// Returns the address of the peer, if known.
    fn remote_addr(&self) -> Option<SocketAddr> {
        None
    }
}
