//! Chain node types
//!
//! The building blocks that sit between contextual errors in a cause chain:
//! plain message leaves, formatted wrappers and joined aggregates.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::cause::Cause;

/// Opaque leaf error carrying only a message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Message {
    message: String,
}

impl Message {
    /// Create a leaf error with `message`
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message text
    pub fn as_str(&self) -> &str {
        &self.message
    }
}

/// A formatted message wrapping a cause
///
/// The message is rendered once, at construction, by substituting the cause's
/// message into the template. `source()` continues to the cause, so standard
/// chain walkers see straight through the wrapper.
#[derive(Debug, Clone)]
pub struct Wrapped {
    message: String,
    cause: Cause,
}

impl Wrapped {
    /// Render `template` around `cause`
    ///
    /// Only the first `{}` is substituted; `{{` and `}}` render as literal
    /// braces, as in `format!`. A template with no placeholder is used as
    /// written, and the cause is still chained.
    pub fn new(template: &str, cause: Cause) -> Self {
        Self {
            message: render(template, &cause),
            cause,
        }
    }

    /// The rendered message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped cause
    pub fn cause(&self) -> &Cause {
        &self.cause
    }
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Wrapped {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_error())
    }
}

fn render(template: &str, cause: &Cause) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut substituted = false;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek().copied()) {
            ('{', Some('{')) | ('}', Some('}')) => {
                chars.next();
                rendered.push(c);
            }
            ('{', Some('}')) if !substituted => {
                chars.next();
                rendered.push_str(&cause.to_string());
                substituted = true;
            }
            _ => rendered.push(c),
        }
    }
    rendered
}

/// Several causes combined into one error
///
/// Displays each cause on its own line, in order. `source()` can only expose
/// one of them, so it yields the first; use [`Joined::causes`] to see them all.
/// The matching functions in [`crate::chain`] descend into every cause.
#[derive(Debug, Clone)]
pub struct Joined {
    causes: Vec<Cause>,
}

impl Joined {
    /// Combine `causes`, keeping their order
    pub fn new(causes: impl IntoIterator<Item = Cause>) -> Self {
        Self {
            causes: causes.into_iter().collect(),
        }
    }

    /// Every joined cause, in order
    pub fn causes(&self) -> &[Cause] {
        &self.causes
    }

    /// Number of joined causes
    pub fn len(&self) -> usize {
        self.causes.len()
    }

    /// Whether no causes were joined
    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }
}

impl fmt::Display for Joined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, cause) in self.causes.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{cause}")?;
        }
        Ok(())
    }
}

impl StdError for Joined {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.causes.first().map(Cause::as_error)
    }
}
