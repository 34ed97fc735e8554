//! # nebula-expression
//!
//! Reference completion, validation and data reads for Nebula expressions.
//!
//! Expressions reach into typed data through reference chains:
//!
//! - Variable access: `#point`
//! - Property access: `#shape.origin.y`
//! - Accessor calls: `#point.distance(#other)`
//! - String literals (`'..'`, `".."`) are never scanned for references
//!
//! Member types come from a [`TypeRegistry`](nebula_introspect::TypeRegistry).
//! Members carrying the hidden marker are never suggested, fail validation and
//! cannot be read, even when the underlying data contains them.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use nebula_expression::{CaretPosition, ExpressionContext, ExpressionSuggester};
//! use nebula_introspect::{MemberDescriptor, MemberKind, TypeDescriptor, TypeRegistry};
//!
//! let registry = TypeRegistry::from_definitions([TypeDescriptor::new("Point")
//!     .with_member(MemberDescriptor::new("x", MemberKind::Field, "i32").hidden())
//!     .with_member(MemberDescriptor::new("y", MemberKind::Field, "i32"))])
//! .unwrap();
//! let context = ExpressionContext::builder().variable("p", "Point").build();
//!
//! let suggester = ExpressionSuggester::new(Arc::new(registry), context);
//! let names: Vec<String> = suggester
//!     .suggestions_for("#p.", CaretPosition::new(0, 3))
//!     .into_iter()
//!     .map(|s| s.name)
//!     .collect();
//! assert_eq!(names, ["y"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod completion;
mod config;
mod context;
mod error;
mod error_formatter;
mod eval;
pub mod lexer;
pub mod reference;
mod resolve;
mod validate;
mod value;

pub use completion::{CaretPosition, ExpressionSuggester, Suggestion, SuggestionKind};
pub use config::CompletionConfig;
pub use context::{ExpressionContext, ExpressionContextBuilder, Variable};
pub use error::{ExpressionError, ExpressionResult, Span};
pub use error_formatter::{ErrorFormatter, Position};
pub use eval::Evaluator;
pub use reference::{Reference, Segment, references};
pub use validate::{ExpressionValidator, ValidationErrors};
