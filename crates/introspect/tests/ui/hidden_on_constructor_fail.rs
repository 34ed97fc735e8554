//! The hidden marker is rejected on a method without a `&self` receiver.

use nebula_introspect::{Introspect, introspect_methods};

#[introspect_methods]
impl Point {
    #[introspect(hidden)]
    pub fn origin() -> Self {
        Self { x: 0 }
    }
}

#[derive(Introspect)]
pub struct Point {
    pub x: i32,
}

fn main() {
    let _ = Point { x: 0 }.x;
}
