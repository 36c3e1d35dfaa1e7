//! Error taxonomy for the compilation engine.
//!
//! Two classes only: `UsageError` is fatal for one macro call site and leaves
//! the rest of the run untouched; `ConfigError` is fatal for the whole run.
//! The engine has no I/O, so there is no transient/retryable class.

use thiserror::Error;

/// A logic error in the input of a single macro call site.
///
/// The invoking collaborator aborts that call site and may continue others.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// The flattened message is empty and no explicit id was supplied.
    #[error("message is empty and no explicit id was given")]
    EmptyMessage,

    /// The macro invocation does not have a shape the lowering understands.
    #[error("malformed macro invocation: {0}")]
    MalformedMacro(String),

    /// An expression appeared in a position where it cannot be compiled.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),
}

/// An invalid run-wide configuration supplied by the host. Aborts the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown mode \"{0}\", expected \"development\" or \"production\"")]
    UnknownMode(String),

    #[error("invalid glob pattern in '{field}': \"{pattern}\"")]
    InvalidPattern { field: &'static str, pattern: String },
}
