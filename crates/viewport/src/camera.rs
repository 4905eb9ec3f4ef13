//! World ↔ device coordinate mapping.
//!
//! The camera shows `world_width × world_height` world units scaled by
//! `zoom` (larger zoom shows more of the world), centred on `center`.
//! Device space has its origin in the top-left corner with +Y pointing
//! down; world space has +Y pointing up.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

/// Smallest zoom factor the camera accepts
pub const MIN_ZOOM: f64 = 0.01;

/// Zoom change per wheel notch
pub const ZOOM_STEP: f64 = 0.01;

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Size of the drawable surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceSize {
    pub width: f64,
    pub height: f64,
}

impl DeviceSize {
    pub fn new(width: f64, height: f64) -> Result<Self, ViewportError> {
        if !positive(width) || !positive(height) {
            return Err(ViewportError::InvalidDeviceSize { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Camera state.
///
/// # Examples
///
/// ```
/// use viewport::{Camera, DeviceSize};
/// use nalgebra::Point2;
///
/// let camera = Camera::new(Point2::origin(), 20.0, 10.0).unwrap();
/// let device = DeviceSize::new(200.0, 100.0).unwrap();
///
/// // The world origin sits in the middle of the surface
/// let centre = camera.world_to_device(&Point2::origin(), &device);
/// assert!((centre.x - 100.0).abs() < 1e-9);
/// assert!((centre.y - 50.0).abs() < 1e-9);
///
/// // World +Y is device -Y
/// let up = camera.world_to_device(&Point2::new(0.0, 5.0), &device);
/// assert!(up.y.abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    /// World position shown in the middle of the surface
    pub center: Point2<f64>,
    world_width: f64,
    world_height: f64,
    zoom: f64,
}

impl Camera {
    /// Creates a camera at zoom 1.0
    pub fn new(
        center: Point2<f64>,
        world_width: f64,
        world_height: f64,
    ) -> Result<Self, ViewportError> {
        Self::with_zoom(center, world_width, world_height, 1.0)
    }

    pub fn with_zoom(
        center: Point2<f64>,
        world_width: f64,
        world_height: f64,
        zoom: f64,
    ) -> Result<Self, ViewportError> {
        if !positive(world_width) || !positive(world_height) || !positive(zoom) || zoom < MIN_ZOOM
        {
            return Err(ViewportError::InvalidCamera {
                width: world_width,
                height: world_height,
                zoom,
            });
        }
        Ok(Self {
            center,
            world_width,
            world_height,
            zoom,
        })
    }

    pub fn world_width(&self) -> f64 {
        self.world_width
    }

    pub fn world_height(&self) -> f64 {
        self.world_height
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Half of the visible world extents, zoom applied
    pub fn half_extents(&self) -> Vector2<f64> {
        Vector2::new(
            self.world_width / 2.0 * self.zoom,
            self.world_height / 2.0 * self.zoom,
        )
    }

    /// Visible world rectangle as `(min, max)`
    pub fn visible_bounds(&self) -> (Point2<f64>, Point2<f64>) {
        let half = self.half_extents();
        (self.center - half, self.center + half)
    }

    /// Maps a world position onto the surface
    pub fn world_to_device(&self, world: &Point2<f64>, device: &DeviceSize) -> Point2<f64> {
        let (min, max) = self.visible_bounds();
        let x = (world.x - min.x) * device.width / (max.x - min.x);
        let y = (world.y - min.y) * -device.height / (max.y - min.y) + device.height;
        Point2::new(x, y)
    }

    /// Maps a surface position back into the world
    pub fn device_to_world(&self, pixel: &Point2<f64>, device: &DeviceSize) -> Point2<f64> {
        let (min, max) = self.visible_bounds();
        let x = pixel.x * (max.x - min.x) / device.width + min.x;
        let y = (pixel.y - device.height) * (max.y - min.y) / -device.height + min.y;
        Point2::new(x, y)
    }

    /// World length covered by `pixels` horizontally
    pub fn world_length_of(&self, pixels: f64, device: &DeviceSize) -> f64 {
        pixels / device.width * self.world_width * self.zoom
    }

    /// Pans relative to the centre captured when the drag started.
    ///
    /// Dragging right moves the view left, dragging down moves it up, so the
    /// world appears to follow the pointer.
    pub fn pan_from(
        &mut self,
        anchor: Point2<f64>,
        start: &Point2<f64>,
        current: &Point2<f64>,
        device: &DeviceSize,
    ) {
        let delta = start - current;
        self.center = Point2::new(
            anchor.x + delta.x / device.width * self.world_width * self.zoom,
            anchor.y - delta.y / device.height * self.world_height * self.zoom,
        );
    }

    /// Changes the zoom, never going below [`MIN_ZOOM`]
    pub fn zoom_by(&mut self, delta: f64) {
        let zoom = self.zoom + delta;
        if zoom.is_finite() {
            self.zoom = zoom.max(MIN_ZOOM);
        }
    }

    /// Applies one wheel notch: scrolling down zooms out
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y > 0.0 {
            self.zoom_by(ZOOM_STEP);
        } else if delta_y < 0.0 {
            self.zoom_by(-ZOOM_STEP);
        }
    }
}
