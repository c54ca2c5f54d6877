//! Contextual error
//!
//! [`ErrCtx`] wraps an underlying cause together with a shared metadata bag.
//! Construction either starts a fresh bag or picks up the bag of a contextual
//! error already present in the cause chain, so fields attached deep in a call
//! stack stay readable after the error has been re-wrapped on the way up.

use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;

use crate::cause::Cause;
use crate::chain;
use crate::metadata::Metadata;
use crate::types::{Joined, Message, Wrapped};

/// An error carrying a cause plus key/value metadata
///
/// `Display` renders the cause's message and `source()` returns the cause.
/// Cloning an `ErrCtx` shares its metadata storage.
///
/// # Example
///
/// ```rust
/// use errctx::{is, Cause, ErrCtx};
///
/// let timeout = Cause::msg("connection timeout");
///
/// let err = ErrCtx::format("connect to db: {}", timeout.clone())
///     .with("host", "localhost:5432")
///     .with("timeout_ms", 5000);
///
/// let err = ErrCtx::format("fetch user: {}", err);
///
/// assert_eq!(err.to_string(), "fetch user: connect to db: connection timeout");
/// assert_eq!(err.value("host"), "localhost:5432");
/// assert!(is(&err, timeout.as_error()));
/// ```
#[derive(Clone)]
pub struct ErrCtx {
    cause: Cause,
    metadata: Metadata,
}

impl ErrCtx {
    /// Create a contextual error around a new leaf error with `message`
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_error(Message::new(message))
    }

    /// Wrap `err` with a new, empty metadata bag
    ///
    /// The chain of `err` is not inspected; an existing contextual error in it
    /// keeps its own bag and simply becomes part of the cause.
    pub fn from_error(err: impl Into<Cause>) -> Self {
        Self {
            cause: err.into(),
            metadata: Metadata::new(),
        }
    }

    /// Reuse the contextual error found in `err`'s chain, or wrap `err`
    ///
    /// When the chain already holds an `ErrCtx`, that instance is returned
    /// with its metadata storage shared. Otherwise this is [`ErrCtx::from_error`].
    pub fn to_context(err: impl Into<Cause>) -> Self {
        let cause = err.into();
        if let Some(found) = chain::find_context(cause.as_error()).cloned() {
            trace_chain!(fields = found.metadata.len(), "found contextual error in chain");
            return found;
        }
        Self::from_error(cause)
    }

    /// Build a new contextual error by rendering `template` around `err`
    ///
    /// The first `{}` in `template` is replaced with the cause's message, and
    /// the resulting error's `source()` continues to that cause. `{{` and `}}`
    /// render as literal braces.
    ///
    /// If `err`'s chain contains an `ErrCtx`, its metadata bag is reused by
    /// reference and the template is rendered around that contextual error's
    /// own cause. Anything between `err` and the found error is dropped from
    /// the new chain. Without one, a fresh bag is created and `err` itself is
    /// the cause.
    pub fn format(template: &str, err: impl Into<Cause>) -> Self {
        let cause = err.into();
        let reused = chain::find_context(cause.as_error())
            .map(|found| (found.cause.clone(), found.metadata.clone()));

        match reused {
            Some((inner, metadata)) => {
                trace_chain!(fields = metadata.len(), "reusing metadata of contextual error in chain");
                Self {
                    cause: Cause::new(Wrapped::new(template, inner)),
                    metadata,
                }
            }
            None => Self {
                cause: Cause::new(Wrapped::new(template, cause)),
                metadata: Metadata::new(),
            },
        }
    }

    /// Join `other` in front of the current cause
    ///
    /// The new cause is a [`Joined`] of `other` followed by the previous
    /// cause. Metadata is untouched.
    pub fn join(mut self, other: impl Into<Cause>) -> Self {
        self.cause = Cause::new(Joined::new([other.into(), self.cause]));
        self
    }

    /// Store `value` under `field`, overwriting any previous value
    ///
    /// Every `ErrCtx` sharing this metadata storage sees the write.
    pub fn with(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(field, value);
        self
    }

    /// The value stored under `field`, or `Value::Null` when there is none
    pub fn value(&self, field: &str) -> Value {
        self.metadata.get(field).unwrap_or(Value::Null)
    }

    /// The live metadata bag
    ///
    /// This is the shared storage itself, not a copy; writes through it are
    /// visible to every `ErrCtx` holding the same bag.
    pub fn values(&self) -> Metadata {
        self.metadata.clone()
    }

    /// The wrapped cause
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Drop the metadata and keep the cause
    pub fn into_cause(self) -> Cause {
        self.cause
    }

    /// Shorthand for [`chain::is`] with `self` as the error
    pub fn is(&self, target: &(dyn StdError + 'static)) -> bool {
        chain::is(self, target)
    }
}

impl fmt::Display for ErrCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl fmt::Debug for ErrCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrCtx")
            .field("cause", &self.cause)
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl StdError for ErrCtx {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_error())
    }
}
