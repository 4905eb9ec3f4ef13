use geometry::{PointExt, Quad, point_in_quad};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Point source of a field. The sign of `strength` is its polarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub position: Point2<f64>,
    pub strength: f64,
    /// Extent of the physical body; zero for bare poles
    pub radius: f64,
}

impl Source {
    pub fn new(position: Point2<f64>, strength: f64, radius: f64) -> Self {
        Self {
            position,
            strength,
            radius,
        }
    }

    pub fn is_sink(&self) -> bool {
        self.strength < 0.0
    }
}

/// Region that ends a field line on entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Absorber {
    Circle { center: Point2<f64>, radius: f64 },
    Quad(Quad),
}

impl Absorber {
    pub fn circle(source: &Source) -> Self {
        Absorber::Circle {
            center: source.position,
            radius: source.radius,
        }
    }

    pub fn contains(&self, point: &Point2<f64>) -> bool {
        match self {
            Absorber::Circle { center, radius } => point.distance_to(center) < *radius,
            Absorber::Quad(quad) => point_in_quad(point, quad),
        }
    }

    /// Where a line leaving `from` meets the absorber boundary.
    ///
    /// Circles project `from` onto the circle along the line to the centre.
    /// Quads have no snap point; the line simply stops at `from`.
    pub fn snap(&self, from: &Point2<f64>) -> Option<Point2<f64>> {
        match self {
            Absorber::Circle { center, radius } => {
                let distance = from.distance_to(center);
                if distance == 0.0 {
                    return None;
                }
                Some(from.move_towards(center, distance - radius))
            }
            Absorber::Quad(_) => None,
        }
    }
}
