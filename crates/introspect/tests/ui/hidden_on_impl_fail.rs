//! The hidden marker is rejected on an impl block.

use nebula_introspect::{Introspect, introspect_methods};

#[introspect_methods(hidden)]
impl Point {
    pub fn x(&self) -> i32 {
        self.x
    }
}

#[derive(Introspect)]
pub struct Point {
    pub x: i32,
}

fn main() {
    let _ = Point { x: 0 }.x;
}
