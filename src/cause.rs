//! Shared error handle
//!
//! [`Cause`] is how this crate holds "an error value": a reference-counted
//! `dyn Error` that keeps its identity when cloned. A `Cause` created once and
//! passed around by clone behaves as a sentinel that [`crate::is`] can match.

use std::error::Error as StdError;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::types::Message;

/// Boxed, thread-safe error trait object
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Cheaply clonable handle to an error in a cause chain
///
/// Any `Error + Send + Sync + 'static` converts into a `Cause` with `From`.
/// A `Cause` converts into itself without another layer of wrapping, which
/// is why `Cause` does not implement `Error` itself.
#[derive(Clone)]
pub struct Cause(Arc<dyn StdError + Send + Sync + 'static>);

impl Cause {
    /// Move `err` into a new handle with its own identity
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(err))
    }

    /// Create a leaf error from a message
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message::new(message))
    }

    /// Take ownership of a boxed error
    ///
    /// The error moves into shared storage, so its address (and therefore its
    /// identity) changes.
    pub fn from_boxed(err: BoxError) -> Self {
        Self(Arc::from(err))
    }

    /// Convert an `anyhow::Error`
    ///
    /// A contextual error carried by anyhow comes back out as itself, metadata
    /// storage included. Anything else becomes an opaque node whose `source()`
    /// chain is preserved.
    #[cfg(feature = "anyhow")]
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        match err.downcast::<crate::ErrCtx>() {
            Ok(ctx) => Self::new(ctx),
            Err(err) => Self::from_boxed(err.into()),
        }
    }

    /// Borrow the error as a plain `dyn Error` chain node
    pub fn as_error(&self) -> &(dyn StdError + 'static) {
        &*self.0
    }

    /// Whether both handles point at the same error
    pub fn ptr_eq(&self, other: &Cause) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Borrow the error as `T` if that is its concrete type
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: StdError + 'static,
    {
        self.0.downcast_ref::<T>()
    }
}

impl<E> From<E> for Cause
where
    E: StdError + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self::new(err)
    }
}

impl Deref for Cause {
    type Target = dyn StdError + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
