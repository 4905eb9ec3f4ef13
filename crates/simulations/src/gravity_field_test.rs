use approx::assert_relative_eq;
use fieldlines::Termination;
use geometry::PointExt;
use nalgebra::Point2;
use viewport::{Color, Dispatch, DispatchKind, Shape};

use crate::config::{BodyConfig, GravityFieldConfig};
use crate::error::SimulationError;
use crate::gravity_field::{GravityFieldAction, GravityFieldVisualizer};
use crate::visualization::Visualization;

fn single_planet() -> GravityFieldConfig {
    GravityFieldConfig {
        lines_per_side: 4,
        bodies: vec![BodyConfig::new("Earth", 5.972e24, 6.371e6, [0.0, 0.0], [0.0, 0.0])],
        ..GravityFieldConfig::default()
    }
}

fn drag(action: GravityFieldAction, world: Point2<f64>) -> Dispatch<GravityFieldAction> {
    Dispatch {
        action,
        kind: DispatchKind::Drag,
        world,
        device: Point2::origin(),
    }
}

#[test]
fn test_lines_fall_into_the_planet() {
    let visualizer = GravityFieldVisualizer::new(&single_planet()).unwrap();

    assert_eq!(visualizer.lines().len(), 8);
    for line in visualizer.lines() {
        assert_eq!(line.termination, Termination::Absorbed { body: 0 });
        let end = line.last().unwrap();
        assert_relative_eq!(end.distance_to(&Point2::origin()), 6.371e6, max_relative = 1e-9);
    }
}

#[test]
fn test_default_scene_traces_both_semicircles() {
    let visualizer = GravityFieldVisualizer::new(&GravityFieldConfig::default()).unwrap();

    assert_eq!(visualizer.lines().len(), 100);
    assert!(visualizer.lines().iter().all(|l| l.len() <= 201));
}

#[test]
fn test_probe_arrow_points_at_the_planet() {
    let visualizer = GravityFieldVisualizer::new(&single_planet()).unwrap();

    let (start, end) = visualizer
        .viewport()
        .entities()
        .iter()
        .find_map(|e| match e.shape {
            Shape::Arrow { start, end } => Some((start, end)),
            _ => None,
        })
        .unwrap();

    assert_eq!(start, Point2::new(0.0, 4.0e7));
    assert_relative_eq!(end.x, 0.0, epsilon = 1e-3);
    assert_relative_eq!(end.y, 4.0e7 - 5.0e6, max_relative = 1e-12);
    assert!(visualizer.probe_field().y < 0.0);
}

#[test]
fn test_dragging_a_body_retraces_on_tick() {
    let mut visualizer = GravityFieldVisualizer::new(&single_planet()).unwrap();
    let target = Point2::new(5.0e7, 0.0);

    visualizer
        .apply(&drag(GravityFieldAction::MoveBody(0), target))
        .unwrap();
    visualizer.tick(0.0);

    assert_eq!(visualizer.bodies()[0].position, target);
    let end = visualizer.lines()[0].last().unwrap();
    assert_relative_eq!(end.distance_to(&target), 6.371e6, max_relative = 1e-9);
}

#[test]
fn test_dragging_the_probe() {
    let mut visualizer = GravityFieldVisualizer::new(&single_planet()).unwrap();
    let target = Point2::new(-3.0e7, 0.0);

    visualizer.apply(&drag(GravityFieldAction::MoveProbe, target)).unwrap();

    assert_eq!(visualizer.probe_position(), target);
    assert!(visualizer.probe_field().x > 0.0);
}

#[test]
fn test_unknown_body_rejected() {
    let mut visualizer = GravityFieldVisualizer::new(&single_planet()).unwrap();

    let result = visualizer.apply(&drag(GravityFieldAction::MoveBody(3), Point2::origin()));

    assert_eq!(result, Err(SimulationError::UnknownBody(3)));
    assert!(visualizer.remove_body(3).is_err());
}

#[test]
fn test_colouring_toggle() {
    let mut visualizer = GravityFieldVisualizer::new(&single_planet()).unwrap();
    let line_colors = |v: &GravityFieldVisualizer| {
        v.viewport()
            .entities()
            .iter()
            .filter(|e| matches!(e.shape, Shape::Line { .. }))
            .map(|e| e.style.color)
            .collect::<Vec<_>>()
    };
    assert!(line_colors(&visualizer).iter().all(|c| *c == Color::BLACK));

    visualizer.set_colored(true);

    assert!(visualizer.is_colored());
    assert!(line_colors(&visualizer).iter().any(|c| *c != Color::BLACK));
}

#[test]
fn test_adding_a_body_retraces() {
    let mut visualizer = GravityFieldVisualizer::new(&single_planet()).unwrap();
    let moon = BodyConfig::new("Moon", 7.342e22, 1.737e6, [3.0e7, 0.0], [0.0, 0.0]);

    let index = visualizer.add_body(&moon).unwrap();

    assert_eq!(index, 1);
    assert_eq!(visualizer.bodies().len(), 2);
    assert_eq!(visualizer.lines().len(), 8);
}

#[test]
fn test_empty_scene_has_no_lines() {
    let config = GravityFieldConfig {
        bodies: Vec::new(),
        ..GravityFieldConfig::default()
    };
    let visualizer = GravityFieldVisualizer::new(&config).unwrap();

    assert!(visualizer.lines().is_empty());
    // Only the probe remains, without an arrow
    assert_eq!(visualizer.viewport().entities().len(), 1);
}
