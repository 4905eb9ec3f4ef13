use approx::assert_relative_eq;
use nalgebra::Point2;

use crate::camera::{Camera, DeviceSize, MIN_ZOOM, ZOOM_STEP};
use crate::error::ViewportError;

fn setup() -> (Camera, DeviceSize) {
    let camera = Camera::new(Point2::origin(), 20.0, 10.0).unwrap();
    let device = DeviceSize::new(200.0, 100.0).unwrap();
    (camera, device)
}

#[test]
fn test_world_to_device_corners() {
    let (camera, device) = setup();

    let top_left = camera.world_to_device(&Point2::new(-10.0, 5.0), &device);
    assert_relative_eq!(top_left.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(top_left.y, 0.0, epsilon = 1e-9);

    let bottom_right = camera.world_to_device(&Point2::new(10.0, -5.0), &device);
    assert_relative_eq!(bottom_right.x, 200.0, epsilon = 1e-9);
    assert_relative_eq!(bottom_right.y, 100.0, epsilon = 1e-9);
}

#[test]
fn test_round_trip_with_offset_camera() {
    let camera = Camera::with_zoom(Point2::new(3.5, -7.25), 40.0, 25.0, 1.7).unwrap();
    let device = DeviceSize::new(640.0, 480.0).unwrap();

    for world in [
        Point2::new(0.0, 0.0),
        Point2::new(-12.0, 4.0),
        Point2::new(100.0, -250.0),
    ] {
        let back = camera.device_to_world(&camera.world_to_device(&world, &device), &device);
        assert_relative_eq!(back.x, world.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, world.y, epsilon = 1e-9);
    }
}

#[test]
fn test_zoom_widens_view() {
    let (mut camera, device) = setup();
    camera.zoom_by(1.0);
    assert_relative_eq!(camera.zoom(), 2.0);

    // At zoom 2 the visible width doubles, so x = 10 sits at three quarters
    let p = camera.world_to_device(&Point2::new(10.0, 0.0), &device);
    assert_relative_eq!(p.x, 150.0, epsilon = 1e-9);
}

#[test]
fn test_zoom_never_below_minimum() {
    let (mut camera, _) = setup();
    camera.zoom_by(-50.0);
    assert_relative_eq!(camera.zoom(), MIN_ZOOM);

    camera.zoom_by(f64::NAN);
    assert_relative_eq!(camera.zoom(), MIN_ZOOM);
}

#[test]
fn test_wheel_down_zooms_out() {
    let (mut camera, _) = setup();
    camera.wheel(120.0);
    assert_relative_eq!(camera.zoom(), 1.0 + ZOOM_STEP);

    camera.wheel(-120.0);
    camera.wheel(-120.0);
    assert_relative_eq!(camera.zoom(), 1.0 - ZOOM_STEP, epsilon = 1e-12);

    camera.wheel(0.0);
    assert_relative_eq!(camera.zoom(), 1.0 - ZOOM_STEP, epsilon = 1e-12);
}

#[test]
fn test_pan_follows_pointer() {
    let (mut camera, device) = setup();
    let start = Point2::new(100.0, 50.0);

    // Dragging 10px right moves the view 1 world unit left
    camera.pan_from(Point2::origin(), &start, &Point2::new(110.0, 50.0), &device);
    assert_relative_eq!(camera.center.x, -1.0, epsilon = 1e-12);
    assert_relative_eq!(camera.center.y, 0.0, epsilon = 1e-12);

    // Relative to the anchor, not cumulative
    camera.pan_from(Point2::origin(), &start, &Point2::new(100.0, 60.0), &device);
    assert_relative_eq!(camera.center.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(camera.center.y, 1.0, epsilon = 1e-12);
}

#[test]
fn test_world_length_of_pixels() {
    let (camera, device) = setup();
    assert_relative_eq!(camera.world_length_of(10.0, &device), 1.0);
}

#[test]
fn test_invalid_camera_rejected() {
    assert!(matches!(
        Camera::new(Point2::origin(), 0.0, 10.0),
        Err(ViewportError::InvalidCamera { .. })
    ));
    assert!(Camera::with_zoom(Point2::origin(), 10.0, 10.0, f64::NAN).is_err());
    assert!(Camera::with_zoom(Point2::origin(), 10.0, 10.0, MIN_ZOOM / 2.0).is_err());
}

#[test]
fn test_invalid_device_rejected() {
    assert!(matches!(
        DeviceSize::new(-1.0, 100.0),
        Err(ViewportError::InvalidDeviceSize { .. })
    ));
    assert!(DeviceSize::new(100.0, f64::INFINITY).is_err());
}
