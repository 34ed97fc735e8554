//! Error formatting with source code context and visual highlighting
//!
//! Shows the line where the error occurred with `^^^` under the offending
//! span:
//!
//! ```text
//! Error at line 1, column 11:
//!   member 'x' of type 'Point' is not accessible from expressions
//!
//!  1 | #p.y + #p.x
//!                ^
//! ```

use std::fmt;
use std::fmt::Write as _;

use crate::error::{ExpressionError, Span};

/// Line and column of a byte offset, both 1-based; columns count characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Position {
    /// Position of byte `offset` within `source`
    pub fn of(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Self {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Format an error message with source context
pub struct ErrorFormatter<'a> {
    source: &'a str,
    span: Span,
    error_message: String,
    /// Number of lines to show before the error line
    context_before: usize,
}

impl<'a> ErrorFormatter<'a> {
    /// Create a new error formatter
    pub fn new(source: &'a str, span: Span, error_message: impl Into<String>) -> Self {
        Self {
            source,
            span,
            error_message: error_message.into(),
            context_before: 1,
        }
    }

    /// Formatter for an [`ExpressionError`] raised on `source`
    pub fn for_error(source: &'a str, error: &ExpressionError) -> Self {
        Self::new(source, error.span(), error.to_string())
    }

    /// Set the number of context lines to show before the error line
    pub fn with_context(mut self, before: usize) -> Self {
        self.context_before = before;
        self
    }

    /// Format the error message with source context
    pub fn format(&self) -> String {
        let position = Position::of(self.source, self.span.start);
        let lines: Vec<&str> = self.source.split('\n').collect();
        let error_line_idx = position.line - 1;
        let line_num_width = (error_line_idx + 1).to_string().len();

        let mut output = String::with_capacity(200 + self.source.len());
        let _ = writeln!(output, "Error at {position}:");
        let _ = writeln!(output, "  {}\n", self.error_message);

        let start_line = error_line_idx.saturating_sub(self.context_before);
        for (i, line) in lines
            .iter()
            .enumerate()
            .take(error_line_idx + 1)
            .skip(start_line)
        {
            let _ = writeln!(output, " {:width$} | {}", i + 1, line, width = line_num_width);
        }

        // Underline up to the end of the error line.
        let line = lines.get(error_line_idx).copied().unwrap_or_default();
        let remaining = line.chars().count().saturating_sub(position.column - 1);
        let end = Position::of(self.source, self.span.end);
        let length = if end.line == position.line {
            end.column.saturating_sub(position.column)
        } else {
            remaining
        }
        .max(1);

        let padding = " ".repeat(line_num_width + 4 + position.column - 1);
        let _ = writeln!(output, "{padding}{}", "^".repeat(length));
        output
    }
}
