//! Force models for N-body simulations
//!
//! This module provides the `ForceModel` trait and the pairwise Newtonian
//! gravity used by the orbit visualizer.

use crate::state::SystemState;
use nalgebra::Vector2;

pub mod gravity;

#[cfg(test)]
mod gravity_test;

pub use gravity::PairwiseGravity;

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻²
pub const G: f64 = 6.67408e-11;

/// A source of acceleration on bodies in an N-body system
///
/// # Examples
///
/// ```
/// use nbody::forces::{ForceModel, PairwiseGravity};
/// use nbody::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new();
/// system.add_body(5.972e24, 6.371e6, Point2::origin(), Vector2::zeros());
/// system.add_body(1.0e3, 1.0, Point2::new(7.0e6, 0.0), Vector2::zeros());
///
/// let gravity = PairwiseGravity::new();
/// let accel = gravity.acceleration(1, &system);
///
/// // Pulled back towards the planet
/// assert!(accel.x < 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Compute acceleration on body at index `idx` given full system state
    ///
    /// # Arguments
    ///
    /// * `idx` - Index of the body in `state.bodies`
    /// * `state` - Current system state
    ///
    /// # Returns
    ///
    /// Acceleration vector in m/s²
    fn acceleration(&self, idx: usize, state: &SystemState) -> Vector2<f64>;

    /// Compute potential energy contribution (optional)
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _state: &SystemState) -> f64 {
        0.0
    }
}
