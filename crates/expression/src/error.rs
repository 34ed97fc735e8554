//! Error types for expression references
//!
//! Every error carries the byte [`Span`] of the offending part of the input,
//! so callers can underline it (see [`ErrorFormatter`](crate::ErrorFormatter)).

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Byte range within an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// First byte (inclusive)
    pub start: usize,
    /// Last byte (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Length in bytes
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// As a byte range
    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors raised while checking or reading a reference chain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    /// Malformed reference
    #[error("parse error at {span}: {message}")]
    Parse {
        /// What went wrong
        message: String,
        /// Location
        span: Span,
    },

    /// `#name` is not bound in the context
    #[error("unknown variable '#{name}'")]
    UnknownVariable {
        /// Variable name without `#`
        name: String,
        /// Location
        span: Span,
    },

    /// The type has no member of that name
    #[error("type '{type_name}' has no member '{member}'")]
    UnknownMember {
        /// Owning type
        type_name: String,
        /// Member name
        member: String,
        /// Location
        span: Span,
    },

    /// The member carries the hidden marker
    #[error("member '{member}' of type '{type_name}' is not accessible from expressions")]
    HiddenMember {
        /// Owning type
        type_name: String,
        /// Member name
        member: String,
        /// Location
        span: Span,
    },

    /// Call syntax on a member that is not a method
    #[error("'{member}' of type '{type_name}' is a field and cannot be called")]
    NotCallable {
        /// Owning type
        type_name: String,
        /// Member name
        member: String,
        /// Location
        span: Span,
    },

    /// A method with parameters used without call parentheses
    #[error("method '{member}' of type '{type_name}' takes {expected} argument(s) and must be called")]
    MissingCall {
        /// Owning type
        type_name: String,
        /// Member name
        member: String,
        /// Declared parameter count
        expected: usize,
        /// Location
        span: Span,
    },

    /// Wrong number of arguments in a call
    #[error("method '{member}' of type '{type_name}' takes {expected} argument(s), {found} given")]
    ArgumentCount {
        /// Owning type
        type_name: String,
        /// Member name
        member: String,
        /// Declared parameter count
        expected: usize,
        /// Arguments in the call
        found: usize,
        /// Location
        span: Span,
    },

    /// Data reads never invoke methods
    #[error("cannot invoke method '{member}' while reading data")]
    MethodInvocation {
        /// Member name
        member: String,
        /// Location
        span: Span,
    },

    /// The reference is well-formed but the data has no value there
    #[error("no value at '{path}'")]
    MissingValue {
        /// Reference prefix that failed
        path: String,
        /// Location
        span: Span,
    },
}

impl ExpressionError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        Self::Parse {
            message: message.into(),
            span,
        }
    }

    /// Location of the error within the input
    pub fn span(&self) -> Span {
        match self {
            Self::Parse { span, .. }
            | Self::UnknownVariable { span, .. }
            | Self::UnknownMember { span, .. }
            | Self::HiddenMember { span, .. }
            | Self::NotCallable { span, .. }
            | Self::MissingCall { span, .. }
            | Self::ArgumentCount { span, .. }
            | Self::MethodInvocation { span, .. }
            | Self::MissingValue { span, .. } => *span,
        }
    }

    /// Whether the error is due to the hidden marker
    pub fn is_hidden_member(&self) -> bool {
        matches!(self, Self::HiddenMember { .. })
    }
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_helpers() {
        let span = Span::new(2, 5).to(Span::new(4, 9));
        assert_eq!(span, Span::new(2, 9));
        assert_eq!(span.len(), 7);
        assert_eq!(span.range(), 2..9);
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    fn test_hidden_member_message() {
        let err = ExpressionError::HiddenMember {
            type_name: "Point".into(),
            member: "x".into(),
            span: Span::new(3, 4),
        };
        assert!(err.is_hidden_member());
        assert_eq!(err.span(), Span::new(3, 4));
        assert_eq!(
            err.to_string(),
            "member 'x' of type 'Point' is not accessible from expressions"
        );
    }
}
