use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};
use crate::state::SystemState;

#[test]
fn test_new_system() {
    let system = SystemState::new();

    assert_eq!(system.time, 0.0);
    assert_eq!(system.body_count(), 0);
    assert!(system.center_of_mass().is_none());
}

#[test]
fn test_add_body_assigns_sequential_ids() {
    let mut system = SystemState::new();

    let id1 = system.add_body(1.0, 0.01, Point2::new(1.0, 0.0), Vector2::new(0.0, 1.0));
    let id2 = system.insert(Body::new(2.0, 0.02, [2.0, 0.0], [0.0, 0.5]).named("b"));

    assert_eq!(system.body_count(), 2);
    assert_eq!(id1, BodyId(0));
    assert_eq!(id2, BodyId(1));
    assert_eq!(system.get_body(id2).unwrap().name, "b");
}

#[test]
fn test_ids_not_reused_after_removal() {
    let mut system = SystemState::new();

    let id = system.add_body(1.0, 0.01, Point2::origin(), Vector2::zeros());
    assert!(system.remove_body(id).is_some());
    assert!(system.remove_body(id).is_none());

    let next = system.add_body(1.0, 0.01, Point2::origin(), Vector2::zeros());
    assert_ne!(id, next);
    assert!(system.get_body(id).is_none());
}

#[test]
fn test_get_body_mut() {
    let mut system = SystemState::new();
    let id = system.add_body(1.0, 0.01, Point2::new(1.0, 0.0), Vector2::zeros());

    system.get_body_mut(id).unwrap().fixed = true;

    assert!(system.get_body(id).unwrap().fixed);
}

#[test]
fn test_center_of_mass() {
    let mut system = SystemState::new();
    system.add_body(3.0, 1.0, Point2::new(0.0, 0.0), Vector2::zeros());
    system.add_body(1.0, 1.0, Point2::new(4.0, 0.0), Vector2::zeros());

    let com = system.center_of_mass().unwrap();
    assert_relative_eq!(com.x, 1.0);
    assert_relative_eq!(com.y, 0.0);
    assert_relative_eq!(system.total_mass(), 4.0);
}

#[test]
fn test_total_momentum() {
    let mut system = SystemState::new();
    system.add_body(1.0, 0.01, Point2::new(1.0, 0.0), Vector2::new(0.0, 1.0));
    system.add_body(1.0, 0.01, Point2::new(-1.0, 0.0), Vector2::new(0.0, -1.0));

    assert_relative_eq!(system.total_momentum().magnitude(), 0.0);
    assert_relative_eq!(system.total_angular_momentum(), 2.0);
    assert_relative_eq!(system.kinetic_energy(), 1.0);
}
