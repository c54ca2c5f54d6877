//! Result extension utilities
//!
//! Attach formatted context and metadata fields directly on `Result`s,
//! without spelling out the `map_err` each time.

use serde_json::Value;

use crate::cause::Cause;
use crate::context::ErrCtx;

/// Extension trait for turning error results into contextual errors
pub trait ResultExt<T> {
    /// Wrap the error with [`ErrCtx::format`]
    fn context_fmt(self, template: &str) -> Result<T, ErrCtx>;

    /// Convert the error with [`ErrCtx::to_context`] and attach a field
    fn with_field(self, field: impl Into<String>, value: impl Into<Value>) -> Result<T, ErrCtx>;

    /// Like [`ResultExt::with_field`], computing the value only on error
    fn with_field_lazy<F, V>(self, field: impl Into<String>, f: F) -> Result<T, ErrCtx>
    where
        F: FnOnce() -> V,
        V: Into<Value>;

    /// Convert the error with [`ErrCtx::to_context`]
    fn into_context(self) -> Result<T, ErrCtx>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<Cause>,
{
    fn context_fmt(self, template: &str) -> Result<T, ErrCtx> {
        self.map_err(|e| ErrCtx::format(template, e))
    }

    fn with_field(self, field: impl Into<String>, value: impl Into<Value>) -> Result<T, ErrCtx> {
        self.map_err(|e| ErrCtx::to_context(e).with(field, value))
    }

    fn with_field_lazy<F, V>(self, field: impl Into<String>, f: F) -> Result<T, ErrCtx>
    where
        F: FnOnce() -> V,
        V: Into<Value>,
    {
        self.map_err(|e| ErrCtx::to_context(e).with(field, f()))
    }

    fn into_context(self) -> Result<T, ErrCtx> {
        self.map_err(|e| ErrCtx::to_context(e))
    }
}

/// Build a contextual error from a template and a cause, optionally with fields
///
/// Usage:
/// ```rust
/// use errctx::{errctx, Cause};
///
/// let err = errctx!("reading config: {}", Cause::msg("file not found"));
/// assert_eq!(err.to_string(), "reading config: file not found");
///
/// let err = errctx!("loading user: {}", err; "user_id" => "user-789", "attempt" => 2);
/// assert_eq!(err.value("attempt"), 2);
/// ```
#[macro_export]
macro_rules! errctx {
    ($template:expr, $err:expr $(,)?) => {
        $crate::ErrCtx::format($template, $err)
    };
    ($template:expr, $err:expr; $($field:expr => $value:expr),+ $(,)?) => {
        $crate::ErrCtx::format($template, $err)$(.with($field, $value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::is;
    use serde_json::json;

    fn read_config() -> Result<String, std::io::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml"))
    }

    #[test]
    fn test_context_fmt() {
        let err = read_config().context_fmt("reading configuration: {}").unwrap_err();

        assert_eq!(err.to_string(), "reading configuration: config.toml");
        assert!(crate::find_as::<std::io::Error>(&err).is_some());
    }

    #[test]
    fn test_with_field_reuses_existing_context() {
        let base = ErrCtx::new("base error").with("first", 1);
        let result: Result<(), ErrCtx> = Err(base.clone());

        let err = result.with_field("second", 2).unwrap_err();

        assert!(err.values().shares_storage_with(&base.values()));
        assert_eq!(base.value("second"), json!(2));
    }

    #[test]
    fn test_with_field_lazy_not_called_on_ok() {
        let result: Result<u8, Cause> = Ok(7);
        let value = result
            .with_field_lazy("expensive", || -> Value { panic!("evaluated on Ok") })
            .unwrap();

        assert_eq!(value, 7);
    }

    #[test]
    fn test_into_context_wraps_plain_error() {
        let base = Cause::msg("base");
        let result: Result<(), Cause> = Err(base.clone());

        let err = result.into_context().unwrap_err();

        assert!(err.cause().ptr_eq(&base));
        assert!(is(&err, base.as_error()));
    }

    #[test]
    fn test_macro_attaches_fields() {
        let base = Cause::msg("connection timeout");
        let err = crate::errctx!("connect: {}", base.clone(); "host" => "localhost", "port" => 5432);

        assert_eq!(err.to_string(), "connect: connection timeout");
        assert_eq!(err.value("host"), json!("localhost"));
        assert_eq!(err.value("port"), json!(5432));
        assert!(is(&err, base.as_error()));
    }
}
