//! Registry error types.

use crate::member::MemberKind;

/// Errors from building or loading a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Debug, thiserror::Error)]
pub enum IntrospectError {
    /// Two declarations of the same member disagree on its type.
    #[error(
        "conflicting {kind} '{member}' on type '{type_name}': declared as '{existing}' and '{incoming}'"
    )]
    ConflictingMember {
        /// Owning type.
        type_name: String,
        /// Member name.
        member: String,
        /// Declaration kind of both sides.
        kind: MemberKind,
        /// Type already registered.
        existing: String,
        /// Type being merged in.
        incoming: String,
    },

    /// Type definitions could not be read or written as JSON.
    #[error("invalid type definitions: {0}")]
    Json(#[from] serde_json::Error),
}
