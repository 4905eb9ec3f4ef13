use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};

#[test]
fn test_new_body_is_free() {
    let body = Body::new(1.0e3, 2.0, [1.0, 2.0], [3.0, 4.0]);

    assert_eq!(body.id, BodyId(0));
    assert_eq!(body.position, Point2::new(1.0, 2.0));
    assert_eq!(body.velocity, Vector2::new(3.0, 4.0));
    assert!(!body.fixed);
    assert!(!body.ignore_for_calculation);
    assert!(body.name.is_empty());
}

#[test]
fn test_builder_flags() {
    let body = Body::new(1.0, 1.0, [0.0, 0.0], [0.0, 0.0])
        .named("Sun")
        .pinned()
        .ignored();

    assert_eq!(body.name, "Sun");
    assert!(body.fixed);
    assert!(body.ignore_for_calculation);
}

#[test]
fn test_momentum() {
    let body = Body::new(2.0, 0.01, [1.0, 0.0], [3.0, 4.0]);
    assert_eq!(body.momentum(), Vector2::new(6.0, 8.0));
    assert_eq!(body.speed(), 5.0);
}

#[test]
fn test_kinetic_energy() {
    let body = Body::new(2.0, 0.01, [0.0, 0.0], [3.0, 4.0]);
    assert_eq!(body.kinetic_energy(), 25.0);
}

#[test]
fn test_distance_to() {
    let a = Body::new(1.0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    let b = Body::new(1.0, 1.0, [3.0, 4.0], [0.0, 0.0]);
    assert_eq!(a.distance_to(&b), 5.0);
}

#[test]
fn test_specific_angular_momentum() {
    let body = Body::new(1.0, 1.0, [2.0, 0.0], [0.0, 3.0]);
    assert_eq!(body.specific_angular_momentum(), 6.0);
}
