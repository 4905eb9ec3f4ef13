//! Point and vector helpers.

use std::f64::consts::TAU;

use nalgebra::{Point2, Vector2};

/// Extra operations on points used throughout the visualizers.
///
/// All angles are in radians. Angles returned by [`PointExt::angle_to`] are
/// in `(-π, π]` and are never wrapped; use [`normalize_angle`] when an angle
/// has to be compared against bands.
///
/// # Examples
///
/// ```
/// use geometry::PointExt;
/// use nalgebra::Point2;
///
/// let a = Point2::new(0.0, 0.0);
/// let b = a.move_at_angle(std::f64::consts::FRAC_PI_2, 2.0);
///
/// assert!((b.y - 2.0).abs() < 1e-12);
/// assert!((a.distance_to(&b) - 2.0).abs() < 1e-12);
/// ```
pub trait PointExt {
    /// Euclidean distance to `other`
    fn distance_to(&self, other: &Point2<f64>) -> f64;

    /// `atan2` of the delta towards `other`
    fn angle_to(&self, other: &Point2<f64>) -> f64;

    /// New point `distance` away along `angle`
    fn move_at_angle(&self, angle: f64, distance: f64) -> Point2<f64>;

    /// New point `distance` away in the direction of `target`
    fn move_towards(&self, target: &Point2<f64>, distance: f64) -> Point2<f64>;

    /// Rotates this point around `pivot` by `angle`
    fn rotate_around(&self, pivot: &Point2<f64>, angle: f64) -> Point2<f64>;

    /// Point halfway between this point and `other`
    fn midpoint(&self, other: &Point2<f64>) -> Point2<f64>;
}

impl PointExt for Point2<f64> {
    fn distance_to(&self, other: &Point2<f64>) -> f64 {
        (other - self).magnitude()
    }

    fn angle_to(&self, other: &Point2<f64>) -> f64 {
        (other - self).heading()
    }

    fn move_at_angle(&self, angle: f64, distance: f64) -> Point2<f64> {
        self + Vector2::from_polar(angle, distance)
    }

    fn move_towards(&self, target: &Point2<f64>, distance: f64) -> Point2<f64> {
        self.move_at_angle(self.angle_to(target), distance)
    }

    fn rotate_around(&self, pivot: &Point2<f64>, angle: f64) -> Point2<f64> {
        let (s, c) = angle.sin_cos();
        let d = self - pivot;
        Point2::new(d.x * c - d.y * s + pivot.x, d.x * s + d.y * c + pivot.y)
    }

    fn midpoint(&self, other: &Point2<f64>) -> Point2<f64> {
        nalgebra::center(self, other)
    }
}

/// Extra operations on vectors.
pub trait VectorExt: Sized {
    /// Builds a vector from a polar angle and a length
    fn from_polar(angle: f64, length: f64) -> Self;

    /// Direction of the vector, `atan2(y, x)`
    fn heading(&self) -> f64;

    /// Direction of the vector in degrees
    fn heading_degrees(&self) -> f64 {
        self.heading().to_degrees()
    }

    /// Unit vector, or `None` for zero-length and non-finite vectors
    fn try_unit(&self) -> Option<Self>;
}

impl VectorExt for Vector2<f64> {
    fn from_polar(angle: f64, length: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Vector2::new(length * c, length * s)
    }

    fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }

    fn try_unit(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        (magnitude > 0.0 && magnitude.is_finite()).then(|| self / magnitude)
    }
}

/// Wraps an angle into `[0, 2π)`.
///
/// ```
/// use geometry::normalize_angle;
///
/// let wrapped = normalize_angle(-std::f64::consts::FRAC_PI_2);
/// assert!((wrapped - 3.0 * std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}
