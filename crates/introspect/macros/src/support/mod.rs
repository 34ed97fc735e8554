//! Helpers shared by the derive and the impl attribute: `#[introspect(...)]`
//! parsing, diagnostics and type rendering.

pub mod attrs;
pub mod diag;
pub mod utils;
