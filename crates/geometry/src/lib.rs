//! Planar geometry kernel.
//!
//! Everything here works on `nalgebra::Point2<f64>` and `Vector2<f64>`.
//! The same types are used for world space and device space; callers are
//! responsible for knowing which space a value lives in.

pub mod point;
pub mod polygon;


pub use point::{PointExt, VectorExt, normalize_angle};
pub use polygon::{
    Quad, Triangle, point_in_polygon, point_in_quad, point_in_triangle, quad_bounds, rect_quad,
};
