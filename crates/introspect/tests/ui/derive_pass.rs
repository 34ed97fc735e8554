//! Tests for the Introspect derive macro - successful cases.

use nebula_introspect::{Introspect, MemberKind, TypeDescriptor, is_hidden};

/// A point on the plane.
#[derive(Introspect)]
pub struct Point {
    #[introspect(hidden)]
    x: i32,
    y: i32,
}

#[derive(Introspect)]
#[introspect(name = "geo.Location", description = "Where it is")]
pub struct Location {
    /// Latitude in degrees.
    #[introspect(rename = "lat")]
    latitude: f64,
    #[introspect(type_name = "Degrees", hidden, hidden)]
    lon: f64,
    #[introspect(skip)]
    cache: Vec<u8>,
    r#type: Option<String>,
}

#[derive(Introspect)]
pub struct Wrapper<T> {
    inner: T,
}

#[derive(Introspect)]
pub struct Marker;

fn main() {
    assert!(is_hidden::<Point>("x"));
    assert!(!is_hidden::<Point>("y"));
    assert_eq!(Point::DESCRIPTION, Some("A point on the plane."));

    let location = TypeDescriptor::of::<Location>();
    assert_eq!(location.name(), "geo.Location");
    assert!(location.member("lat", MemberKind::Field).is_some());
    assert!(location.is_hidden("lon"));
    assert!(!location.contains("cache"));
    assert_eq!(
        location.member("type", MemberKind::Field).map(|m| m.type_name()),
        Some("Option<String>")
    );

    assert_eq!(<Wrapper<u8> as Introspect>::FIELDS.len(), 1);
    assert!(Marker::FIELDS.is_empty());

    let _ = Point { x: 1, y: 2 }.x;
    let _ = (Location { latitude: 0.0, lon: 0.0, cache: Vec::new(), r#type: None }).cache;
    let _ = Wrapper { inner: 0u8 }.inner;
    let _ = Point { x: 0, y: 0 }.y;
}
