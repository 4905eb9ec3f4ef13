//! Look-ahead of future body paths.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::BodyId;
use crate::forces::ForceModel;
use crate::integrator::Integrator;
use crate::state::SystemState;

/// Timestep of a prediction run, in simulated seconds
pub const DEFAULT_PREDICTION_DT: f64 = 10_000.0;

/// Number of steps in a prediction run
pub const DEFAULT_PREDICTION_STEPS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedPath {
    pub id: BodyId,
    /// Position after each step, not including the current one
    pub points: Vec<Point2<f64>>,
}

/// Integrates a copy of `state` for `steps × dt` and returns each body's
/// positions along the way. `state` itself is left untouched.
///
/// # Examples
///
/// ```
/// use nbody::forces::PairwiseGravity;
/// use nbody::integrator::SemiImplicitEuler;
/// use nbody::prediction::predict_paths;
/// use nbody::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new();
/// system.add_body(1.0, 1.0, Point2::origin(), Vector2::new(1.0, 0.0));
///
/// let paths = predict_paths(&system, &SemiImplicitEuler, &PairwiseGravity::new(), 1.0, 3);
/// assert_eq!(paths[0].points.len(), 3);
/// assert_eq!(paths[0].points[2], Point2::new(3.0, 0.0));
/// assert_eq!(system.bodies[0].position, Point2::origin());
/// ```
pub fn predict_paths(
    state: &SystemState,
    integrator: &dyn Integrator,
    force: &dyn ForceModel,
    dt: f64,
    steps: usize,
) -> Vec<PredictedPath> {
    let mut scratch = state.clone();
    let mut paths: Vec<PredictedPath> = scratch
        .bodies
        .iter()
        .map(|b| PredictedPath {
            id: b.id,
            points: Vec::with_capacity(steps),
        })
        .collect();

    for _ in 0..steps {
        integrator.step(&mut scratch, dt, force);
        paths
            .iter_mut()
            .zip(scratch.bodies.iter())
            .for_each(|(path, body)| path.points.push(body.position));
    }

    debug!(bodies = paths.len(), steps, dt, "predicted paths");
    paths
}
