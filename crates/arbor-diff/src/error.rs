//! Error types for the diff crate.

use crate::report::DiffReport;

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A diff was requested over a number of trees other than two.
    #[error("expected exactly two trees to diff, got {got}")]
    Arity { got: usize },

    /// Strict comparison found differences.
    #[error("trees differ:\n{0}")]
    NotEqual(DiffReport),

    /// The diff configuration could not be parsed.
    #[error("invalid diff config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
