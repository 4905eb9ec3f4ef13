use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::camera::{Camera, DeviceSize};
use crate::scene::{Capabilities, Entity, Interactions, Shape, TextAlign, estimate_text_width};
use crate::style::Style;

fn setup() -> (Camera, DeviceSize) {
    let camera = Camera::new(Point2::origin(), 20.0, 10.0).unwrap();
    let device = DeviceSize::new(200.0, 100.0).unwrap();
    (camera, device)
}

#[test]
fn test_circle_quad_bounds() {
    let (camera, device) = setup();
    let shape = Shape::Circle {
        center: Point2::new(1.0, 1.0),
        radius: 2.0,
    };
    let quad = shape.device_quad(&camera, &device, 1.0);

    let min_x = quad.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_y = quad.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    assert_relative_eq!(min_x, 90.0, epsilon = 1e-9);
    assert_relative_eq!(max_y, 60.0, epsilon = 1e-9);
}

#[test]
fn test_rect_hit() {
    let (camera, device) = setup();
    let entity = Entity::<()>::new(
        Shape::Rect {
            origin: Point2::new(0.0, 0.0),
            size: Vector2::new(4.0, 2.0),
        },
        Style::default(),
    );

    assert!(entity.contains(&Point2::new(110.0, 45.0), &camera, &device));
    assert!(!entity.contains(&Point2::new(110.0, 55.0), &camera, &device));
    assert!(!entity.contains(&Point2::new(95.0, 45.0), &camera, &device));
}

#[test]
fn test_line_hit_box_has_minimum_width() {
    let (camera, device) = setup();
    let entity = Entity::<()>::new(
        Shape::Line {
            start: Point2::new(-5.0, 0.0),
            end: Point2::new(5.0, 0.0),
        },
        Style::default(),
    );

    assert!(entity.contains(&Point2::new(100.0, 52.0), &camera, &device));
    assert!(!entity.contains(&Point2::new(100.0, 55.0), &camera, &device));
    assert!(!entity.contains(&Point2::new(160.0, 50.0), &camera, &device));
}

#[test]
fn test_diagonal_line_hit() {
    let (camera, device) = setup();
    let entity = Entity::<()>::new(
        Shape::Line {
            start: Point2::new(-2.0, -2.0),
            end: Point2::new(2.0, 2.0),
        },
        Style::default().with_line_width(10.0),
    );

    assert!(entity.contains(&Point2::new(110.0, 40.0), &camera, &device));
    assert!(!entity.contains(&Point2::new(110.0, 60.0), &camera, &device));
}

#[test]
fn test_arrow_hit_box_around_tip() {
    let (camera, device) = setup();
    let entity = Entity::<()>::new(
        Shape::Arrow {
            start: Point2::origin(),
            end: Point2::new(5.0, 0.0),
        },
        Style::default(),
    );

    assert!(entity.contains(&Point2::new(150.0, 55.0), &camera, &device));
    assert!(!entity.contains(&Point2::new(100.0, 50.0), &camera, &device));
}

#[test]
fn test_text_quad_alignment() {
    let (camera, device) = setup();
    let text = Shape::Text {
        position: Point2::origin(),
        text: "abcd".to_string(),
        font_px: 10.0,
        align: TextAlign::Center,
    };
    let quad = text.device_quad(&camera, &device, 1.0);
    let width = estimate_text_width("abcd", 10.0);

    assert_relative_eq!(width, 24.0, epsilon = 1e-12);
    assert_relative_eq!(quad[0].x, 88.0, epsilon = 1e-9);
    assert_relative_eq!(quad[0].y, 40.0, epsilon = 1e-9);
}

#[test]
fn test_degenerate_polygon_contains_nothing() {
    let (camera, device) = setup();
    let entity = Entity::<()>::new(
        Shape::Polygon {
            points: vec![Point2::origin()],
        },
        Style::default(),
    );
    assert!(!entity.contains(&Point2::new(100.0, 50.0), &camera, &device));
}

#[test]
fn test_triangle_polygon_hit() {
    let (camera, device) = setup();
    let entity = Entity::<()>::new(
        Shape::Polygon {
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(4.0, 0.0),
                Point2::new(0.0, 4.0),
            ],
        },
        Style::default(),
    );
    assert!(entity.contains(&Point2::new(105.0, 45.0), &camera, &device));
    assert!(!entity.contains(&Point2::new(135.0, 15.0), &camera, &device));
}

#[test]
fn test_pentagon_hit_uses_every_vertex() {
    let (camera, device) = setup();
    let entity = Entity::<()>::new(
        Shape::Polygon {
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(4.0, 0.0),
                Point2::new(5.0, 3.0),
                Point2::new(2.0, 5.0),
                Point2::new(-1.0, 3.0),
            ],
        },
        Style::default(),
    );

    // world (-0.5, 2.5), inside only through the fifth vertex
    assert!(entity.contains(&Point2::new(95.0, 25.0), &camera, &device));
    // world (2, 2)
    assert!(entity.contains(&Point2::new(120.0, 30.0), &camera, &device));
    // world (6, 1)
    assert!(!entity.contains(&Point2::new(160.0, 40.0), &camera, &device));

    let quad = entity.device_quad(&camera, &device);
    assert_relative_eq!(quad[0], Point2::new(90.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(quad[2], Point2::new(150.0, 50.0), epsilon = 1e-9);
}

#[test]
fn test_capabilities_follow_interactions() {
    let mut interactions: Interactions<u8> = Interactions::default();
    assert!(interactions.capabilities().is_empty());

    interactions.on_click = Some(1);
    interactions.on_hover_release = Some(2);
    let caps = interactions.capabilities();

    assert!(caps.contains(Capabilities::CLICK));
    assert!(caps.contains(Capabilities::HOVER_RELEASE));
    assert!(!caps.contains(Capabilities::DRAG));
    assert!(!caps.contains(Capabilities::RELEASE));
}
