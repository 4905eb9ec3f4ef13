use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::Body;
use crate::forces::gravity::PairwiseGravity;
use crate::forces::{ForceModel, G};
use crate::state::SystemState;

fn pair(distance: f64) -> SystemState {
    let mut system = SystemState::new();
    system.add_body(5.0e10, 1.0, Point2::origin(), Vector2::zeros());
    system.add_body(2.0e10, 1.0, Point2::new(distance, 0.0), Vector2::zeros());
    system
}

#[test]
fn test_acceleration_magnitude() {
    let system = pair(10.0);
    let gravity = PairwiseGravity::new();

    let a0 = gravity.acceleration(0, &system);
    let a1 = gravity.acceleration(1, &system);

    assert_relative_eq!(a0.x, G * 2.0e10 / 100.0, max_relative = 1e-12);
    assert_relative_eq!(a1.x, -G * 5.0e10 / 100.0, max_relative = 1e-12);
    assert_relative_eq!(a0.y, 0.0);
}

#[test]
fn test_forces_are_equal_and_opposite() {
    let system = pair(7.5);
    let gravity = PairwiseGravity::new();

    let f0 = gravity.acceleration(0, &system) * system.bodies[0].mass;
    let f1 = gravity.acceleration(1, &system) * system.bodies[1].mass;

    assert!(f0.x > 1.0e9);
    assert_relative_eq!(f0, -f1, max_relative = 1e-12);
}

#[test]
fn test_ignored_body_exerts_nothing() {
    let mut system = pair(10.0);
    system.bodies[0].ignore_for_calculation = true;
    let gravity = PairwiseGravity::new();

    assert_eq!(gravity.acceleration(1, &system), Vector2::zeros());
    // but still feels the other body
    assert!(gravity.acceleration(0, &system).x > 0.0);
}

#[test]
fn test_coincident_bodies_contribute_zero() {
    let mut system = SystemState::new();
    system.insert(Body::new(1.0e10, 1.0, [2.0, 2.0], [0.0, 0.0]));
    system.insert(Body::new(1.0e10, 1.0, [2.0, 2.0], [0.0, 0.0]));

    let a = PairwiseGravity::new().acceleration(0, &system);
    assert_eq!(a, Vector2::zeros());
}

#[test]
fn test_superposition_of_three_bodies() {
    let mut system = SystemState::new();
    system.add_body(1.0e10, 1.0, Point2::origin(), Vector2::zeros());
    system.add_body(1.0e10, 1.0, Point2::new(-2.0, 0.0), Vector2::zeros());
    system.add_body(1.0e10, 1.0, Point2::new(2.0, 0.0), Vector2::zeros());

    let a = PairwiseGravity::new().acceleration(0, &system);
    assert_relative_eq!(a.magnitude(), 0.0, epsilon = 1e-15);
}

#[test]
fn test_potential_energy() {
    let system = pair(10.0);
    let gravity = PairwiseGravity::with_constant(1.0);

    assert_relative_eq!(gravity.potential_energy(&system), -1.0e20, max_relative = 1e-12);
}
