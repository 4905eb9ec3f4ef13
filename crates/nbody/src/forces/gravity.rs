//! Direct pairwise Newtonian gravity

use crate::forces::{ForceModel, G};
use crate::state::SystemState;
use nalgebra::Vector2;

/// Direct O(N²) gravitational force computation
///
/// Every body is pulled by `G·m₁·m₂/d²` towards every other body, divided by
/// its own mass. Bodies flagged `ignore_for_calculation` pull on nobody, and
/// coincident bodies contribute nothing to each other instead of producing
/// an infinite acceleration.
///
/// # Examples
///
/// ```
/// use nbody::forces::{ForceModel, PairwiseGravity, G};
/// use nbody::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new();
/// system.add_body(1.0e10, 1.0, Point2::new(-1.0, 0.0), Vector2::zeros());
/// system.add_body(1.0e10, 1.0, Point2::new(1.0, 0.0), Vector2::zeros());
///
/// let gravity = PairwiseGravity::new();
/// let a = gravity.acceleration(0, &system);
/// assert!((a.x - G * 1.0e10 / 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairwiseGravity {
    /// Gravitational constant
    pub g: f64,
}

impl PairwiseGravity {
    pub fn new() -> Self {
        Self { g: G }
    }

    /// Gravity with a custom constant, for scaled-down scenes
    pub fn with_constant(g: f64) -> Self {
        Self { g }
    }
}

impl Default for PairwiseGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for PairwiseGravity {
    fn acceleration(&self, idx: usize, state: &SystemState) -> Vector2<f64> {
        let body = &state.bodies[idx];

        state
            .bodies
            .iter()
            .enumerate()
            .filter(|(i, other)| *i != idx && !other.ignore_for_calculation)
            .map(|(_, other)| {
                let dr = other.position - body.position;
                let r2 = dr.magnitude_squared();
                if r2 == 0.0 || !r2.is_finite() {
                    return Vector2::zeros();
                }
                let r = r2.sqrt();
                dr * (self.g * other.mass / (r2 * r))
            })
            .fold(Vector2::zeros(), |acc, a| acc + a)
    }

    /// Pairs involving an ignored body are left out.
    fn potential_energy(&self, state: &SystemState) -> f64 {
        state
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.ignore_for_calculation)
            .flat_map(|(i, a)| {
                state.bodies[i + 1..]
                    .iter()
                    .filter(|b| !b.ignore_for_calculation)
                    .map(move |b| {
                        let r = (a.position - b.position).magnitude();
                        if r == 0.0 {
                            0.0
                        } else {
                            -self.g * a.mass * b.mass / r
                        }
                    })
            })
            .sum()
    }
}
