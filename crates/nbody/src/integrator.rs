//! Time integration for N-body systems

use crate::forces::ForceModel;
use crate::state::SystemState;
use nalgebra::Vector2;

/// A time integrator for N-body systems
pub trait Integrator: Send + Sync {
    /// Advance the system by one timestep
    ///
    /// # Arguments
    ///
    /// * `state` - Current system state (modified in place)
    /// * `dt` - Timestep in seconds
    /// * `force` - Force model to compute accelerations
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel);

    /// Advance the system by multiple timesteps
    ///
    /// # Returns
    ///
    /// Final time after integration
    fn integrate(
        &self,
        state: &mut SystemState,
        dt: f64,
        n_steps: usize,
        force: &dyn ForceModel,
    ) -> f64 {
        for _ in 0..n_steps {
            self.step(state, dt, force);
        }
        state.time
    }
}

/// Semi-implicit (symplectic) Euler integrator
///
/// 1. a = F(x(t)) / m, for every body from the same pre-step state
/// 2. v(t + dt) = v(t) + a·dt
/// 3. x(t + dt) = x(t) + v(t + dt)·dt
///
/// Fixed bodies keep both their position and their velocity.
///
/// # Examples
///
/// ```
/// use nbody::integrator::{Integrator, SemiImplicitEuler};
/// use nbody::forces::PairwiseGravity;
/// use nbody::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new();
/// system.add_body(5.972e24, 6.371e6, Point2::origin(), Vector2::zeros());
/// system.add_body(7.35e22, 1.737e6, Point2::new(3.84e8, 0.0), Vector2::new(0.0, 1022.0));
///
/// SemiImplicitEuler.step(&mut system, 60.0, &PairwiseGravity::new());
/// assert_eq!(system.time, 60.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) {
        // Compute all accelerations functionally
        let accelerations: Vec<Vector2<f64>> = (0..state.bodies.len())
            .map(|i| force.acceleration(i, state))
            .collect();

        state
            .bodies
            .iter_mut()
            .zip(accelerations.iter())
            .filter(|(body, _)| !body.fixed)
            .for_each(|(body, accel)| {
                body.velocity += accel * dt;
                body.position += body.velocity * dt;
            });

        state.time += dt;
    }
}
