//! Compile-time tests for the introspection macros.
//!
//! These use trybuild to check that derived and annotated items compile in a
//! downstream crate, and that a misplaced `hidden` marker is rejected.

#[test]
fn test_introspect_derive() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/derive_pass.rs");
}

#[test]
fn test_introspect_methods() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/methods_pass.rs");
}

#[test]
fn test_misplaced_hidden_marker() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/*_fail.rs");
}
