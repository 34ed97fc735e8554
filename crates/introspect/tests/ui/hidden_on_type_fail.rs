//! The hidden marker is rejected on a type declaration.

use nebula_introspect::Introspect;

#[derive(Introspect)]
#[introspect(hidden)]
pub struct Point {
    pub x: i32,
}

fn main() {
    let _ = Point { x: 0 }.x;
}
