use nalgebra::{Point2, Vector2};

use crate::forces::PairwiseGravity;
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::prediction::predict_paths;
use crate::state::SystemState;

fn binary() -> SystemState {
    let mut system = SystemState::new();
    system.add_body(1.0, 0.1, Point2::new(-1.0, 0.0), Vector2::new(0.0, -0.35));
    system.add_body(1.0, 0.1, Point2::new(1.0, 0.0), Vector2::new(0.0, 0.35));
    system
}

#[test]
fn test_prediction_leaves_state_untouched() {
    let system = binary();
    let before = system.clone();
    let force = PairwiseGravity::with_constant(1.0);

    let paths = predict_paths(&system, &SemiImplicitEuler, &force, 0.01, 500);

    assert_eq!(system, before);
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|p| p.points.len() == 500));
}

#[test]
fn test_prediction_matches_live_integration() {
    let mut system = binary();
    let force = PairwiseGravity::with_constant(1.0);

    let paths = predict_paths(&system, &SemiImplicitEuler, &force, 0.01, 50);
    SemiImplicitEuler.integrate(&mut system, 0.01, 50, &force);

    assert_eq!(paths[0].id, system.bodies[0].id);
    assert_eq!(*paths[0].points.last().unwrap(), system.bodies[0].position);
    assert_eq!(*paths[1].points.last().unwrap(), system.bodies[1].position);
}

#[test]
fn test_zero_steps() {
    let system = binary();
    let paths = predict_paths(&system, &SemiImplicitEuler, &PairwiseGravity::new(), 1.0, 0);
    assert!(paths.iter().all(|p| p.points.is_empty()));
}
