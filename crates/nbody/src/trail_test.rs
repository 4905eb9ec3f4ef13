use nalgebra::{Point2, Vector2};

use crate::state::SystemState;
use crate::trail::{Trail, TrailRecorder};

#[test]
fn test_trail_evicts_oldest() {
    let mut trail = Trail::new(3);
    for i in 0..5 {
        trail.push(Point2::new(i as f64, 0.0));
    }

    assert_eq!(trail.len(), 3);
    let xs: Vec<f64> = trail.points().map(|p| p.x).collect();
    assert_eq!(xs, vec![2.0, 3.0, 4.0]);
}

#[test]
fn test_zero_capacity_trail_stays_empty() {
    let mut trail = Trail::new(0);
    trail.push(Point2::origin());
    assert!(trail.is_empty());
}

#[test]
fn test_recorder_samples_every_other_tick() {
    let mut system = SystemState::new();
    let id = system.add_body(1.0, 1.0, Point2::origin(), Vector2::zeros());
    let mut recorder = TrailRecorder::new(10);

    let recorded: Vec<bool> = (0..6).map(|_| recorder.record(&system)).collect();

    assert_eq!(recorded, vec![false, true, false, true, false, true]);
    assert_eq!(recorder.trail(id).unwrap().len(), 3);
}

#[test]
fn test_recorder_respects_capacity() {
    let mut system = SystemState::new();
    let id = system.add_body(1.0, 1.0, Point2::origin(), Vector2::zeros());
    let mut recorder = TrailRecorder::new(4);

    for step in 0..20 {
        system.bodies[0].position.x = step as f64;
        recorder.record(&system);
    }

    let trail = recorder.trail(id).unwrap();
    assert_eq!(trail.len(), 4);
    assert_eq!(trail.points().last().unwrap().x, 19.0);
}

#[test]
fn test_recorder_forgets_removed_bodies() {
    let mut system = SystemState::new();
    let id = system.add_body(1.0, 1.0, Point2::origin(), Vector2::zeros());
    let mut recorder = TrailRecorder::new(4);
    recorder.record(&system);
    recorder.record(&system);
    assert!(recorder.trail(id).is_some());

    system.remove_body(id);
    recorder.record(&system);
    recorder.record(&system);

    assert!(recorder.trail(id).is_none());
}
