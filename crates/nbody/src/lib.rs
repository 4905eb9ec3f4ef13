pub mod body;
pub mod clock;
pub mod forces;
pub mod integrator;
pub mod prediction;
pub mod state;
pub mod trail;

#[cfg(test)]
mod body_test;
#[cfg(test)]
mod clock_test;
#[cfg(test)]
mod prediction_test;
#[cfg(test)]
mod state_test;
#[cfg(test)]
mod trail_test;
