use std::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{Point2, Vector2};
use viewport::{Color, Dispatch, DispatchKind, Shape};

use crate::config::{MagnetConfig, MagnetSimulationConfig};
use crate::error::SimulationError;
use crate::magnets::{Magnet, MagnetAction, MagnetSimulation};
use crate::visualization::Visualization;

fn lone_magnet() -> MagnetSimulationConfig {
    MagnetSimulationConfig {
        magnets: vec![MagnetConfig::new([0.0, 0.0], 0.04, 0.012)],
        compass_position: [0.1, 0.0],
        ..MagnetSimulationConfig::default()
    }
}

fn dispatch(action: MagnetAction, world: Point2<f64>) -> Dispatch<MagnetAction> {
    Dispatch {
        action,
        kind: DispatchKind::Drag,
        world,
        device: Point2::origin(),
    }
}

#[test]
fn test_poles_sit_a_quarter_width_from_the_centre() {
    let mut magnet = Magnet::from_config(&MagnetConfig::new([1.0, 2.0], 0.4, 0.1)).unwrap();
    assert_relative_eq!(magnet.north_pole(), Point2::new(0.9, 2.0), epsilon = 1e-12);
    assert_relative_eq!(magnet.south_pole(), Point2::new(1.1, 2.0), epsilon = 1e-12);

    magnet.rotation = PI;
    assert_relative_eq!(magnet.north_pole(), Point2::new(1.1, 2.0), epsilon = 1e-12);

    let corners = magnet.corners();
    assert_relative_eq!(corners.top_left, Point2::new(1.2, 1.95), epsilon = 1e-12);
}

#[test]
fn test_facing_opposite_poles_attract() {
    let mut simulation = MagnetSimulation::new(&MagnetSimulationConfig::default()).unwrap();
    let left = simulation.magnets()[0].center;
    let right = simulation.magnets()[1].center;

    simulation.step(0.1);

    let magnets = simulation.magnets();
    assert!(magnets[0].velocity.x > 0.0);
    assert!(magnets[1].velocity.x < 0.0);
    assert!(magnets[0].center.x > left.x);
    assert!(magnets[1].center.x < right.x);
    // Equal and opposite
    assert_relative_eq!(magnets[0].velocity.x, -magnets[1].velocity.x, max_relative = 1e-9);
}

#[test]
fn test_step_applies_friction_after_moving() {
    let mut simulation = MagnetSimulation::new(&MagnetSimulationConfig::default()).unwrap();
    let magnets = simulation.magnets();
    let force = magnets[0].force_from(&magnets[1]);
    let start = magnets[0].center;

    simulation.step(0.5);

    let magnet = &simulation.magnets()[0];
    let velocity = force * 0.5;
    assert_relative_eq!(magnet.center, start + velocity * 0.5, epsilon = 1e-15);
    assert_relative_eq!(magnet.velocity, velocity * 0.99, epsilon = 1e-15);
}

#[test]
fn test_first_tick_does_not_move() {
    let mut simulation = MagnetSimulation::new(&MagnetSimulationConfig::default()).unwrap();
    let start = simulation.magnets()[0].center;

    simulation.tick(1_000.0);
    assert_eq!(simulation.magnets()[0].center, start);

    simulation.tick(1_100.0);
    assert!(simulation.magnets()[0].center.x > start.x);
}

#[test]
fn test_held_magnet_stays_put() {
    let mut simulation = MagnetSimulation::new(&MagnetSimulationConfig::default()).unwrap();
    let target = Point2::new(-0.05, -0.05);

    simulation
        .apply(&dispatch(MagnetAction::MoveMagnet(0), target))
        .unwrap();
    simulation.step(0.1);

    assert!(simulation.magnets()[0].held);
    assert_eq!(simulation.magnets()[0].center, target);
    assert_eq!(simulation.magnets()[0].velocity, Vector2::zeros());

    simulation
        .apply(&dispatch(MagnetAction::ReleaseMagnet(0), target))
        .unwrap();
    simulation.step(0.1);
    assert_ne!(simulation.magnets()[0].center, target);
}

#[test]
fn test_cancel_releases_held_magnets() {
    let mut simulation = MagnetSimulation::new(&MagnetSimulationConfig::default()).unwrap();
    simulation
        .apply(&dispatch(MagnetAction::MoveMagnet(1), Point2::origin()))
        .unwrap();

    simulation.pointer_cancel();

    assert!(simulation.magnets().iter().all(|m| !m.held));
}

#[test]
fn test_paused_simulation_keeps_still() {
    let mut simulation = MagnetSimulation::new(&MagnetSimulationConfig::default()).unwrap();
    simulation.set_paused(true);
    let start = simulation.magnets()[0].center;

    simulation.tick(0.0);
    simulation.tick(500.0);

    assert!(simulation.is_paused());
    assert_eq!(simulation.magnets()[0].center, start);
}

#[test]
fn test_field_lines_per_magnet() {
    let simulation = MagnetSimulation::new(&lone_magnet()).unwrap();

    // Seven seeds on each of three edges plus the reversed one
    assert_eq!(simulation.lines().len(), 22);
    let two = MagnetSimulation::new(&MagnetSimulationConfig::default()).unwrap();
    assert_eq!(two.lines().len(), 44);
}

#[test]
fn test_compass_needle_points_away_from_the_south_pole() {
    let simulation = MagnetSimulation::new(&lone_magnet()).unwrap();
    let needle_tip = simulation
        .viewport()
        .entities()
        .iter()
        .find_map(|e| match &e.shape {
            Shape::Polygon { points } if e.style.color == Color::rgb(0xff, 0x4d, 0x4d) => {
                Some(points[0])
            }
            _ => None,
        })
        .unwrap();

    assert!(simulation.compass_field().x < 0.0);
    assert_relative_eq!(needle_tip, Point2::new(0.1 + 0.0075, 0.0), epsilon = 1e-9);
}

#[test]
fn test_dragging_the_compass() {
    let mut simulation = MagnetSimulation::new(&lone_magnet()).unwrap();
    let target = Point2::new(-0.08, 0.03);

    simulation
        .apply(&dispatch(MagnetAction::MoveCompass, target))
        .unwrap();

    assert_eq!(simulation.compass_position(), target);
}

#[test]
fn test_magnet_edits() {
    let mut simulation = MagnetSimulation::new(&lone_magnet()).unwrap();

    assert_eq!(
        simulation.apply(&dispatch(MagnetAction::MoveMagnet(4), Point2::origin())),
        Err(SimulationError::UnknownMagnet(4))
    );
    assert!(simulation.remove_magnet(4).is_err());

    let index = simulation
        .add_magnet(&MagnetConfig::new([0.0, 0.05], 0.02, 0.01))
        .unwrap();
    assert_eq!(index, 1);

    simulation.set_rotation(1, PI).unwrap();
    let north = simulation.magnets()[1].north_pole();
    assert_abs_diff_eq!(north.x, 0.005, epsilon = 1e-12);

    let bad = MagnetConfig {
        width: 0.0,
        ..MagnetConfig::new([0.0, 0.0], 0.02, 0.01)
    };
    assert!(simulation.add_magnet(&bad).is_err());
    assert_eq!(simulation.magnets().len(), 2);

    simulation.remove_magnet(0).unwrap();
    assert_eq!(simulation.lines().len(), 22);
}

#[test]
fn test_invalid_friction_rejected() {
    let config = MagnetSimulationConfig {
        friction: 1.5,
        ..MagnetSimulationConfig::default()
    };
    assert!(MagnetSimulation::new(&config).is_err());
}
