//! Pairwise field laws.

use std::f64::consts::PI;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::source::Source;

/// Gravitational constant in SI units
pub const G: f64 = 6.67408e-11;

/// Coulomb constant in SI units
pub const ELECTRIC_CONSTANT: f64 = 8.988e9;

/// Charge of an electron
pub const ELEMENTARY_CHARGE: f64 = -1.60217662e-19;

/// Default magnetic permeability of the pole law
pub const DEFAULT_PERMEABILITY: f64 = 6.3e-3;

/// Field produced at a point by a single source.
///
/// The net field is the plain sum over all sources; a point coinciding with
/// a source gets no contribution from it.
pub trait FieldLaw {
    fn contribution(&self, point: &Point2<f64>, source: &Source) -> Vector2<f64>;

    fn field_at(&self, point: &Point2<f64>, sources: &[Source]) -> Vector2<f64> {
        sources
            .iter()
            .map(|source| self.contribution(point, source))
            .fold(Vector2::zeros(), |acc, v| acc + v)
    }
}

/// Separation vector and distance from `point` to `source`, if they are apart.
fn separation(point: &Point2<f64>, source: &Source) -> Option<(Vector2<f64>, f64)> {
    let delta = source.position - point;
    let distance = delta.magnitude();
    if distance == 0.0 || !distance.is_finite() {
        return None;
    }
    Some((delta / distance, distance))
}

/// `constant · probe · strength / d²` along the unit vector towards the
/// source.
///
/// With a positive probe and positive strengths (gravity) the field pulls
/// towards the source. An electron probe in an electric field points away
/// from positive charges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InverseSquare {
    pub constant: f64,
    pub probe_strength: f64,
}

impl InverseSquare {
    /// Acceleration of a unit test mass
    pub fn gravity() -> Self {
        Self {
            constant: G,
            probe_strength: 1.0,
        }
    }

    /// Force on an electron
    pub fn electric() -> Self {
        Self {
            constant: ELECTRIC_CONSTANT,
            probe_strength: ELEMENTARY_CHARGE,
        }
    }
}

impl FieldLaw for InverseSquare {
    fn contribution(&self, point: &Point2<f64>, source: &Source) -> Vector2<f64> {
        match separation(point, source) {
            Some((unit, distance)) => {
                unit * (self.constant * self.probe_strength * source.strength
                    / (distance * distance))
            }
            None => Vector2::zeros(),
        }
    }
}

/// Magnetic pole interaction `-μ · probe · strength / (4π d)` along the unit
/// vector towards the pole, so a north pole pushes a north probe away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoleLaw {
    pub permeability: f64,
    pub probe_strength: f64,
}

impl Default for PoleLaw {
    fn default() -> Self {
        Self {
            permeability: DEFAULT_PERMEABILITY,
            probe_strength: 1.0,
        }
    }
}

impl FieldLaw for PoleLaw {
    fn contribution(&self, point: &Point2<f64>, source: &Source) -> Vector2<f64> {
        match separation(point, source) {
            Some((unit, distance)) => {
                unit * (-self.permeability * self.probe_strength * source.strength
                    / (4.0 * PI * distance))
            }
            None => Vector2::zeros(),
        }
    }
}
