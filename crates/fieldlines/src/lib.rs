//! Field-line tracing.
//!
//! A field line starts at a seed point and repeatedly steps a fixed distance
//! along the direction of the net field, summed over every [`Source`] with a
//! pluggable [`FieldLaw`]. It stops when it enters an [`Absorber`], when the
//! field vanishes, or after a step budget.

pub mod integrator;
pub mod law;
pub mod magnitude;
pub mod polarised;
pub mod seeding;
pub mod source;

#[cfg(test)]
mod magnitude_test;

pub use integrator::{FieldLine, FieldLineIntegrator, FieldSample, Termination};
pub use law::{ELECTRIC_CONSTANT, ELEMENTARY_CHARGE, FieldLaw, G, InverseSquare, PoleLaw};
pub use magnitude::MagnitudeRange;
pub use polarised::{SINK_EXCLUSION_RATIO, trace_polarised};
pub use seeding::{RectCorners, barycentric_seeds, rect_edge_seeds, ring_seeds};
pub use source::{Absorber, Source};
