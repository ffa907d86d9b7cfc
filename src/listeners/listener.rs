//! # Listener handles.
//!
//! A [`Listener`] is a cheap-to-clone handle around a callable. Clones share
//! identity: removing by handle removes the entry registered with *any* clone of
//! it, and two separately created listeners are never equal even when their
//! closures are identical.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use typed_emitter::Listener;
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&hits);
//! let listener = Listener::new(move |n: &usize| {
//!     counter.fetch_add(*n, Ordering::SeqCst);
//! });
//!
//! listener.call(&2);
//! assert_eq!(hits.load(Ordering::SeqCst), 2);
//! assert_eq!(listener, listener.clone());
//! ```

use std::fmt;
use std::sync::Arc;

/// Callable shared by all clones of a [`Listener`].
type ListenerFn<A> = dyn Fn(&A) + Send + Sync;

/// Identity of a listener: the address of its shared callable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ListenerId(usize);

/// Handler registered against an event whose parameter list is `A`.
pub struct Listener<A> {
    f: Arc<ListenerFn<A>>,
}

impl<A> Listener<A> {
    /// Wraps a callable into a new listener with its own identity.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Invokes the callable directly, outside of any emission.
    #[inline]
    pub fn call(&self, args: &A) {
        (self.f)(args)
    }

    /// True if both handles refer to the same callable.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }

    pub(crate) fn id(&self) -> ListenerId {
        ListenerId(Arc::as_ptr(&self.f) as *const () as usize)
    }
}

impl<A, F> From<F> for Listener<A>
where
    F: Fn(&A) + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<A> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<A> Eq for Listener<A> {}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &format_args!("{:#x}", self.id().0))
            .finish()
    }
}

/// A registered entry as returned by `raw_listeners`: the handler plus its one-shot flag.
///
/// Calling [`RawListener::call`] invokes the handler only; it does not consume a
/// one-shot registration.
pub struct RawListener<A> {
    listener: Listener<A>,
    once: bool,
}

impl<A> Clone for RawListener<A> {
    fn clone(&self) -> Self {
        Self {
            listener: self.listener.clone(),
            once: self.once,
        }
    }
}

impl<A> PartialEq for RawListener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.once == other.once && self.listener == other.listener
    }
}

impl<A> Eq for RawListener<A> {}

impl<A> fmt::Debug for RawListener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawListener")
            .field("listener", &self.listener)
            .field("once", &self.once)
            .finish()
    }
}

impl<A> RawListener<A> {
    pub(crate) fn new(listener: Listener<A>, once: bool) -> Self {
        Self { listener, once }
    }

    /// The registered handler.
    pub fn listener(&self) -> &Listener<A> {
        &self.listener
    }

    /// True if the entry was registered through `once`/`prepend_once_listener`.
    pub fn is_once(&self) -> bool {
        self.once
    }

    /// Invokes the handler directly.
    pub fn call(&self, args: &A) {
        self.listener.call(args)
    }

    /// Consumes the entry, returning the handler.
    pub fn into_listener(self) -> Listener<A> {
        self.listener
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    #[test]
    fn test_clones_share_identity() {
        let a = Listener::new(|_: &i32| {});
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_identical_closures_are_distinct() {
        let a = Listener::new(|_: &i32| {});
        let b = Listener::new(|_: &i32| {});
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_from_closure_and_call() {
        let total = Arc::new(AtomicI32::new(0));
        let t = Arc::clone(&total);
        let listener: Listener<i32> = (move |n: &i32| {
            t.fetch_add(*n, Ordering::SeqCst);
        })
        .into();

        listener.call(&3);
        listener.call(&4);
        assert_eq!(total.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_raw_listener_exposes_flag() {
        let listener = Listener::new(|_: &bool| {});
        let raw = RawListener::new(listener.clone(), true);
        assert!(raw.is_once());
        assert_eq!(raw.listener(), &listener);
        assert_eq!(raw.into_listener(), listener);
    }
}
