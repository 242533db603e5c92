use crate::animation::bezier::CurveError;

/// A recoverable problem with one directive.
///
/// The offending directive is dropped and compilation carries on with the
/// remaining directives and elements.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DirectiveError {
    /// Wrong argument count or shape.
    #[error("malformed '{keyword}' directive: {message}")]
    MalformedDirective {
        /// Directive keyword.
        keyword: String,
        /// What was wrong.
        message: String,
    },

    /// Keyword outside the directive vocabulary.
    #[error("unknown directive '{keyword}'")]
    UnknownDirective {
        /// The unrecognized keyword.
        keyword: String,
    },

    /// Directive not allowed in the element's mode (`ease` while absolute, `x`/`y` while not).
    #[error("'{keyword}' cannot be used {}", mode_phrase(.absolute))]
    InvalidModeUsage {
        /// Directive keyword.
        keyword: String,
        /// Whether the owning element is absolute.
        absolute: bool,
    },

    /// Referenced element is missing or has the wrong shape for the requested form.
    #[error("cannot resolve reference to '{target}': {message}")]
    UnresolvableReference {
        /// Referenced element id.
        target: String,
        /// Why the reference failed.
        message: String,
    },

    /// Bezier controls rejected.
    #[error("invalid curve: {0}")]
    InvalidCurve(#[from] CurveError),
}

impl DirectiveError {
    pub(crate) fn malformed(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDirective {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unresolvable(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnresolvableReference {
            target: target.into(),
            message: message.into(),
        }
    }
}

fn mode_phrase(absolute: &bool) -> &'static str {
    if *absolute {
        "in !absolute mode"
    } else {
        "without !absolute"
    }
}

/// A [`DirectiveError`] tagged with the element it was found in.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Diagnostic {
    /// Owning element id.
    pub id: String,
    /// Rendered error message.
    pub message: String,
    #[serde(skip)]
    pub(crate) error: DirectiveError,
}

impl Diagnostic {
    pub(crate) fn new(id: impl Into<String>, error: DirectiveError) -> Self {
        Self {
            id: id.into(),
            message: error.to_string(),
            error,
        }
    }

    /// The underlying error.
    pub fn error(&self) -> &DirectiveError {
        &self.error
    }
}

#[cfg(test)]
#[path = "../../tests/unit/directive/error.rs"]
mod tests;
