//! # Nebula Introspect
//!
//! Member descriptors for types reachable from Nebula expressions, and the
//! **hidden marker** that keeps a field or accessor out of expression
//! completion and resolution.
//!
//! ## Marking members
//!
//! ```
//! use nebula_introspect::{Introspect, introspect_methods, is_hidden};
//!
//! #[derive(Introspect)]
//! pub struct Point {
//!     x: i32,
//!     pub y: i32,
//! }
//!
//! #[introspect_methods]
//! impl Point {
//!     #[introspect(hidden)]
//!     pub fn x(&self) -> i32 {
//!         self.x
//!     }
//! }
//!
//! assert!(is_hidden::<Point>("x"));
//! assert!(!is_hidden::<Point>("y"));
//! ```
//!
//! The marker is accepted on fields and on `&self` methods only. Putting it on
//! a type, an impl block or a non-accessor method is a compile error.
//!
//! ## Discovery
//!
//! Every derived type registers itself at link time. [`TypeRegistry::global`]
//! collects them, together with the methods of `#[introspect_methods]` impl
//! blocks, so the marker can be read at run time without a hand-written list.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate self as nebula_introspect;

mod descriptor;
mod error;
mod member;
mod registration;
mod registry;

pub use descriptor::{Introspect, TypeDescriptor, is_hidden};
pub use error::IntrospectError;
pub use member::{MemberDescriptor, MemberKind, ParameterDescriptor};
pub use nebula_introspect_macros::{Introspect, introspect_methods};
pub use registration::{MethodRegistration, TypeRegistration, method_tables, types};
pub use registry::TypeRegistry;

/// Items used by generated code. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
