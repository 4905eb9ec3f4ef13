//! Seed point generators.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use geometry::{PointExt, Quad};
use nalgebra::Point2;

/// Angle of the first ring seed
pub const RING_START_ANGLE: f64 = FRAC_PI_2;

/// `count` points evenly spaced on a circle, starting at `start_angle`.
///
/// # Examples
///
/// ```
/// use fieldlines::ring_seeds;
/// use nalgebra::Point2;
///
/// let seeds = ring_seeds(&Point2::origin(), 2.0, 4, 0.0);
/// assert_eq!(seeds.len(), 4);
/// assert!((seeds[1].y - 2.0).abs() < 1e-12);
/// ```
pub fn ring_seeds(
    center: &Point2<f64>,
    radius: f64,
    count: usize,
    start_angle: f64,
) -> Vec<Point2<f64>> {
    if count == 0 {
        return Vec::new();
    }
    let step = TAU / count as f64;
    (0..count)
        .map(|i| center.move_at_angle(start_angle + step * i as f64, radius))
        .collect()
}

/// Two semicircles of `per_side` seeds each around the barycentre of
/// `positions`, upper half first.
pub fn barycentric_seeds(
    positions: &[Point2<f64>],
    distance: f64,
    per_side: usize,
) -> Vec<Point2<f64>> {
    if positions.is_empty() || per_side == 0 {
        return Vec::new();
    }
    let sum = positions
        .iter()
        .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
    let center = Point2::from(sum / positions.len() as f64);
    let step = PI / per_side as f64;

    let upper = (0..per_side).map(|i| step * i as f64);
    let lower = (0..per_side).map(|i| PI + step * i as f64);
    upper
        .chain(lower)
        .map(|angle| center.move_at_angle(angle, distance))
        .collect()
}

/// Corners of a (possibly rotated) rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectCorners {
    pub top_left: Point2<f64>,
    pub top_right: Point2<f64>,
    pub bottom_left: Point2<f64>,
    pub bottom_right: Point2<f64>,
}

impl RectCorners {
    /// Corners in perimeter order, for containment tests
    pub fn quad(&self) -> Quad {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn height(&self) -> f64 {
        self.top_right.distance_to(&self.bottom_right)
    }
}

/// Seeds along the edges of a bar magnet.
///
/// Returns `(forward, reverse)`. Forward seeds cover the left half of the top
/// edge, the whole left edge and the left half of the bottom edge, about
/// `count / 3` per edge. The single reverse seed sits in the middle of the
/// right edge and is meant to be traced against the field.
pub fn rect_edge_seeds(
    corners: &RectCorners,
    count: usize,
) -> (Vec<Point2<f64>>, Vec<Point2<f64>>) {
    let per_side = ((count as f64 / 3.0 - 1.0).round() as usize).max(1);
    let steps = per_side as f64;

    let edge = |from: &Point2<f64>, to: &Point2<f64>, fraction: f64| {
        let step = from.distance_to(to) / steps * fraction;
        (0..=per_side)
            .map(|i| from.move_towards(to, step * i as f64))
            .collect::<Vec<_>>()
    };

    let mut forward = edge(&corners.top_left, &corners.top_right, 0.5);
    forward.extend(edge(&corners.top_left, &corners.bottom_left, 1.0));
    forward.extend(edge(&corners.bottom_left, &corners.bottom_right, 0.5));

    let reverse = vec![
        corners
            .top_right
            .move_towards(&corners.bottom_right, corners.height() / 2.0),
    ];

    (forward, reverse)
}
