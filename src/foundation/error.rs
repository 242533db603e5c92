use crate::directive::error::DirectiveError;

/// Convenience result type used across scrollcue.
pub type ScrollcueResult<T> = Result<T, ScrollcueError>;

/// Fatal errors. Recoverable directive problems are reported as
/// [`crate::Diagnostic`]s instead and never surface here unless strict mode is on.
#[derive(thiserror::Error, Debug)]
pub enum ScrollcueError {
    /// Invalid scene input (bad geometry, duplicate ids, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Elements reference each other in a loop; compilation cannot be ordered.
    #[error("cyclic reference: {}", cycle.join(" -> "))]
    CyclicReference {
        /// Element ids along the cycle, first id repeated at the end.
        cycle: Vec<String>,
    },

    /// A directive diagnostic promoted to a hard error by strict compilation.
    #[error("directive error in element '{id}': {source}")]
    Directive {
        /// Owning element id.
        id: String,
        /// Underlying diagnostic.
        source: DirectiveError,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollcueError {
    /// Build a [`ScrollcueError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollcueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
