//! Contextual errors
//!
//! This library wraps errors together with a shared key/value metadata bag and
//! provides chain-aware identity and type tests that see through those
//! wrappers, joined aggregates and ordinary `source()` chains alike.

// Chain-walk trace events; compiled out without the `tracing` feature.
macro_rules! trace_chain {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    }};
}

pub mod cause;
pub mod chain;
pub mod context;
pub mod ext;
pub mod metadata;
pub mod types;

// Re-export commonly used types for convenience
pub use cause::{BoxError, Cause};
pub use chain::{as_target, as_target_option, find_as, find_context, is, is_option};
pub use context::ErrCtx;
pub use ext::ResultExt;
pub use metadata::Metadata;
pub use serde_json::Value;
pub use types::{Joined, Message, Wrapped};
