//! Error types for statement building and rendering.

use thiserror::Error;

/// Errors raised while rendering a statement.
///
/// None of these are recoverable for the statement being rendered: the caller
/// has to fix the build and render again.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A raw identifier did not match the name grammar and the active
    /// [`NamePolicy`](crate::options::NamePolicy) rejects such names.
    #[error("unrecognizable name: `{0}`")]
    UnrecognizableName(String),

    /// A raw expression cannot be bound positionally.
    #[error("malformed expression `{sql}`: {reason}")]
    MalformedExpression {
        /// The expression text as written by the caller.
        sql: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A list that must hold at least one entry was empty.
    #[error("{0} must not be empty")]
    EmptyRequiredSet(&'static str),

    /// A VALUES row does not match the column list, or the rows before it.
    #[error("VALUES row has {found} values, expected {expected}")]
    ValueCountMismatch {
        /// Column count, or the width of the first row without a column list.
        expected: usize,
        /// Values in the offending row.
        found: usize,
    },

    /// A NaN or infinite float has no SQL literal form.
    #[error("float `{0}` has no SQL literal")]
    NonFiniteFloat(f64),

    /// A configured chrono format string could not be applied.
    #[error("invalid date format `{0}`")]
    InvalidDateFormat(String),

    /// Render options could not be deserialized.
    #[error("invalid render options: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for building and rendering.
pub type Result<T> = std::result::Result<T, BuildError>;
