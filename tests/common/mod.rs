//! Common test utilities and helpers
//!
//! Error types and setup shared across the integration tests.

#![allow(dead_code)]

use std::error::Error;
use std::fmt;

use errctx::Cause;

/// Concrete error type matched by message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomError {
    pub msg: String,
}

impl CustomError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl Error for CustomError {}

/// Second concrete error type, so type tests have something to miss
#[derive(Debug, Clone, Default, PartialEq, thiserror::Error)]
#[error("error with code {code}")]
pub struct AnotherCustomError {
    pub code: u16,
}

/// A sentinel error to match by identity
pub fn sentinel(msg: &str) -> Cause {
    Cause::msg(msg)
}

/// Route trace events to the test writer, honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("errctx=trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Run a type test for `T` against `err` with a default-valued target
pub fn as_default<T>(err: &(dyn Error + 'static)) -> bool
where
    T: Error + Clone + Default + 'static,
{
    let mut target = T::default();
    errctx::as_target(err, &mut target)
}
