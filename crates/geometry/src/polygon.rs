//! Point containment tests for triangles and quadrilaterals.
//!
//! Hit testing in the viewport projects every interactive entity to a device
//! space quadrilateral and asks whether the pointer lies inside it.

use nalgebra::Point2;

pub type Triangle = [Point2<f64>; 3];

/// Quadrilateral with corners in winding order, so that `[0, 1, 2]` and
/// `[0, 2, 3]` cover it.
pub type Quad = [Point2<f64>; 4];

/// Barycentric point-in-triangle test.
///
/// Degenerate (zero area) triangles contain nothing.
///
/// # Examples
///
/// ```
/// use geometry::point_in_triangle;
/// use nalgebra::Point2;
///
/// let triangle = [Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(0.0, 4.0)];
/// assert!(point_in_triangle(&Point2::new(1.0, 1.0), &triangle));
/// assert!(!point_in_triangle(&Point2::new(3.0, 3.0), &triangle));
/// ```
pub fn point_in_triangle(point: &Point2<f64>, triangle: &Triangle) -> bool {
    let [t0, t1, t2] = triangle;
    let v0 = t2 - t0;
    let v1 = t1 - t0;
    let v2 = point - t0;

    let dot00 = v0.dot(&v0);
    let dot01 = v0.dot(&v1);
    let dot02 = v0.dot(&v2);
    let dot11 = v1.dot(&v1);
    let dot12 = v1.dot(&v2);

    let denominator = dot00 * dot11 - dot01 * dot01;
    if denominator == 0.0 || !denominator.is_finite() {
        return false;
    }

    let inv = 1.0 / denominator;
    let u = (dot11 * dot02 - dot01 * dot12) * inv;
    let v = (dot00 * dot12 - dot01 * dot02) * inv;

    u >= 0.0 && v >= 0.0 && u + v < 1.0
}

/// Point-in-quadrilateral test through the triangles `[0, 1, 2]` and `[0, 2, 3]`.
pub fn point_in_quad(point: &Point2<f64>, quad: &Quad) -> bool {
    point_in_triangle(point, &[quad[0], quad[1], quad[2]])
        || point_in_triangle(point, &[quad[0], quad[2], quad[3]])
}

/// Point-in-convex-polygon test by fanning triangles from the first vertex.
///
/// Fewer than three points contain nothing.
pub fn point_in_polygon(point: &Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    let Some((first, rest)) = polygon.split_first() else {
        return false;
    };
    rest.windows(2)
        .any(|pair| point_in_triangle(point, &[*first, pair[0], pair[1]]))
}

/// Axis-aligned rectangle as a quad, corners ordered around the perimeter.
pub fn rect_quad(min: Point2<f64>, max: Point2<f64>) -> Quad {
    [
        min,
        Point2::new(max.x, min.y),
        max,
        Point2::new(min.x, max.y),
    ]
}

/// Axis-aligned bounds `(min, max)` of a quad or any other point set
pub fn quad_bounds(points: &[Point2<f64>]) -> (Point2<f64>, Point2<f64>) {
    points.iter().fold(
        (
            Point2::new(f64::INFINITY, f64::INFINITY),
            Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        ),
        |(min, max), p| {
            (
                Point2::new(min.x.min(p.x), min.y.min(p.y)),
                Point2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        },
    )
}
