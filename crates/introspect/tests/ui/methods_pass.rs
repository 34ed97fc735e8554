//! Tests for the introspect_methods attribute - successful cases.

use nebula_introspect::{Introspect, MemberKind, TypeDescriptor, introspect_methods, is_hidden};

#[derive(Introspect)]
pub struct Point {
    x: i32,
    y: i32,
}

#[introspect_methods]
impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[introspect(hidden)]
    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    pub fn translate(&mut self, dx: i32) {
        self.x += dx;
    }
}

fn main() {
    assert!(is_hidden::<Point>("x"));
    assert!(!is_hidden::<Point>("y"));

    let point = TypeDescriptor::of::<Point>();
    let distance = point.member("distance", MemberKind::Method).unwrap();
    assert_eq!(distance.parameters.len(), 1);
    assert_eq!(distance.parameters[0].type_name, "&Point");
    assert!(point.member("new", MemberKind::Method).is_none());
    assert!(point.member("translate", MemberKind::Method).is_none());

    let mut p = Point::new(1, 2);
    p.translate(1);
    assert_eq!(p.x(), 2);
    assert_eq!(p.y(), 2);
    assert_eq!(p.distance(&p), 0.0);
}
