//! # Nebula Introspect Macros
//!
//! Proc-macros that describe the members of data-model types to the
//! expression surface, and that carry the `hidden` marker.
//!
//! | Macro | Description |
//! |-------|-------------|
//! | [`Introspect`](derive@Introspect) | Implements `Introspect` from struct fields |
//! | [`introspect_methods`](macro@introspect_methods) | Registers accessor methods of an impl block |
//!
//! ## Examples
//!
//! ```ignore
//! use nebula_introspect::{Introspect, introspect_methods};
//!
//! #[derive(Introspect)]
//! pub struct Point {
//!     x: i32,
//!     /// Vertical coordinate.
//!     y: i32,
//! }
//!
//! #[introspect_methods]
//! impl Point {
//!     #[introspect(hidden)]
//!     pub fn x(&self) -> i32 {
//!         self.x
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod introspect;
mod methods;
mod support;

/// Derive macro for the `Introspect` trait.
///
/// # Attributes
///
/// ## Container attributes (`#[introspect(...)]` on the struct)
///
/// - `name = "..."` - Type name seen by expressions (default: the struct name)
/// - `description = "..."` - Description (default: doc comment)
///
/// The `hidden` marker is rejected here: it applies to fields and methods only.
///
/// ## Field attributes
///
/// - `#[introspect(hidden)]` - Excludes the field from completion and resolution
/// - `#[introspect(skip)]` - Does not register the field at all
/// - `#[introspect(rename = "...")]` - Member name seen by expressions
/// - `#[introspect(type_name = "...")]` - Overrides the rendered field type
/// - `#[introspect(description = "...")]` - Description (default: doc comment)
///
/// Non-generic types are also registered at link time and show up in
/// `TypeRegistry::discover()`.
#[proc_macro_derive(Introspect, attributes(introspect))]
pub fn derive_introspect(input: TokenStream) -> TokenStream {
    introspect::derive(input)
}

/// Registers the `&self` methods of an inherent impl block as members of the
/// type, next to the fields recorded by `#[derive(Introspect)]`.
///
/// Public methods taking `&self` are registered; private ones only when they
/// carry an `#[introspect(...)]` attribute.
///
/// # Method attributes
///
/// - `#[introspect(hidden)]` - Excludes the method from completion and resolution
/// - `#[introspect(skip)]` - Does not register the method
/// - `#[introspect(rename = "...")]` - Member name seen by expressions
/// - `#[introspect(description = "...")]` - Description (default: doc comment)
///
/// An accessor marked hidden also hides a field of the same name.
#[proc_macro_attribute]
pub fn introspect_methods(args: TokenStream, item: TokenStream) -> TokenStream {
    methods::attribute(args, item)
}
