//! Opaque connection handles
//!
//! The registry stores connections without ever inspecting them. A
//! `Connection` wraps whatever handle the push framework hands out for an
//! established stream, typically a cheap sender-side clone such as an
//! `mpsc::Sender`. Because the wrapped value is a handle and not the
//! transport itself, holding it in the registry does not keep the underlying
//! stream alive.

use std::any::Any;
use std::sync::Arc;

/// Opaque handle to a live push connection
///
/// Cheap to clone (a single `Arc` bump). Two handles are considered the same
/// connection only if they originate from the same `Connection::new` call;
/// comparison is by identity, never by value.
#[derive(Clone)]
pub struct Connection {
    inner: Arc<dyn Any + Send + Sync>,
}

impl Connection {
    /// Wrap a framework-supplied handle
    pub fn new<T: Any + Send + Sync>(handle: T) -> Self {
        Self {
            inner: Arc::new(handle),
        }
    }

    /// Identity comparison: true only for clones of the same handle
    pub fn same(&self, other: &Connection) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Recover the concrete handle type on the framework side
    ///
    /// The registry itself never calls this; it exists for the dispatch
    /// primitive that needs the real sender back.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Connection({:p})", Arc::as_ptr(&self.inner))
    }
}
