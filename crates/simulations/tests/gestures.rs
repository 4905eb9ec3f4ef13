//! Every visualization driven the way a host drives it: pixel pointer
//! gestures, scheduler ticks and a recorded draw list.

use approx::assert_relative_eq;
use geometry::PointExt;
use nalgebra::Point2;
use nbody::body::BodyId;
use simulations::{
    CircuitEditor, CircuitEditorConfig, EditMode, ElectricFieldConfig, ElectricFieldVisualizer,
    GravityFieldConfig, GravityFieldVisualizer, MagnetSimulation, MagnetSimulationConfig,
    OrbitConfig, OrbitSimulation, Scheduler, Visualization,
};
use viewport::DrawList;

/// Press at `from`, move to `to` and release there
fn drag<V: Visualization>(visualization: &mut V, from: Point2<f64>, to: Point2<f64>) {
    visualization.pointer_down(from).unwrap();
    visualization.pointer_move(to).unwrap();
    visualization.pointer_up(to).unwrap();
}

fn pixel<V: Visualization>(visualization: &V, world: Point2<f64>) -> Point2<f64> {
    visualization.viewport().to_device(&world)
}

fn drawn_texts<V: Visualization>(visualization: &V) -> Vec<String> {
    let mut surface = DrawList::new();
    visualization.draw(&mut surface);
    surface.texts().map(str::to_string).collect()
}

#[test]
fn test_orbit_pause_edit_and_drag() {
    let _ = tracing_subscriber::fmt::try_init();
    let config = OrbitConfig {
        editing: true,
        ..OrbitConfig::default()
    };
    let mut scheduler = Scheduler::new(OrbitSimulation::new(&config).unwrap());
    scheduler.start(0.0);
    scheduler.advance(0.0);
    scheduler.advance(10.0);
    let time = scheduler.simulation().state().time;
    assert!(time > 0.0);

    // "Edit" button
    let simulation = scheduler.simulation_mut();
    simulation.pointer_down(Point2::new(110.0, 20.0)).unwrap();
    simulation.pointer_up(Point2::new(110.0, 20.0)).unwrap();
    assert!(simulation.is_editing());

    let moon = simulation.state().get_body(BodyId(1)).unwrap().position;
    let from = pixel(simulation, moon);
    let to = from + nalgebra::Vector2::new(-40.0, 30.0);
    drag(simulation, from, to);

    let expected = simulation.viewport().to_world(&to);
    let moved = simulation.state().get_body(BodyId(1)).unwrap().position;
    assert_relative_eq!(moved.distance_to(&expected), 0.0, epsilon = 1.0);

    // Physics is paused while editing
    scheduler.advance(20.0);
    scheduler.advance(30.0);
    assert_eq!(scheduler.simulation().state().time, time);
    assert!(drawn_texts(scheduler.simulation()).contains(&"Moon".to_string()));
}

#[test]
fn test_gravity_field_probe_drag_and_pan() {
    let mut visualizer = GravityFieldVisualizer::new(&GravityFieldConfig::default()).unwrap();

    let from = pixel(&visualizer, visualizer.probe_position());
    let to = Point2::new(100.0, 500.0);
    drag(&mut visualizer, from, to);

    let expected = visualizer.viewport().to_world(&to);
    assert_relative_eq!(
        visualizer.probe_position().distance_to(&expected),
        0.0,
        epsilon = 1.0
    );

    // Dragging empty space pans the camera instead
    let center = visualizer.viewport().camera.center;
    drag(&mut visualizer, Point2::new(700.0, 100.0), Point2::new(650.0, 100.0));
    assert!(visualizer.viewport().camera.center.x > center.x);
    assert_relative_eq!(
        visualizer.probe_position().distance_to(&expected),
        0.0,
        epsilon = 1.0
    );
}

#[test]
fn test_electric_charge_drag_retraces_lines() {
    let mut scheduler =
        Scheduler::new(ElectricFieldVisualizer::new(&ElectricFieldConfig::default()).unwrap());
    let visualizer = scheduler.simulation_mut();
    let charge = visualizer.charges()[0].position;

    let from = pixel(visualizer, charge);
    let to = from + nalgebra::Vector2::new(0.0, -120.0);
    drag(visualizer, from, to);
    scheduler.step(0.0);

    let visualizer = scheduler.simulation();
    let moved = visualizer.charges()[0].position;
    assert!(moved.y > charge.y);
    let first = visualizer.lines()[0].first().unwrap();
    assert_relative_eq!(
        first.distance_to(&moved),
        visualizer.charges()[0].radius * 1.01,
        max_relative = 1e-9
    );
}

#[test]
fn test_magnet_grab_and_release() {
    let mut simulation = MagnetSimulation::new(&MagnetSimulationConfig::default()).unwrap();
    simulation.tick(0.0);

    let from = pixel(&simulation, simulation.magnets()[0].center);
    let to = Point2::new(200.0, 450.0);
    simulation.pointer_down(from).unwrap();
    simulation.pointer_move(to).unwrap();
    assert!(simulation.magnets()[0].held);

    // Held magnets ignore the other magnet's pull
    let held_at = simulation.magnets()[0].center;
    simulation.tick(50.0);
    assert_eq!(simulation.magnets()[0].center, held_at);

    simulation.pointer_up(to).unwrap();
    assert!(!simulation.magnets()[0].held);
    assert!(drawn_texts(&simulation).contains(&"N".to_string()));
}

#[test]
fn test_circuit_editing_session() {
    let _ = tracing_subscriber::fmt::try_init();
    let mut editor = CircuitEditor::new(&CircuitEditorConfig::default()).unwrap();
    let click = |editor: &mut CircuitEditor, at: Point2<f64>| {
        editor.pointer_down(at).unwrap();
        editor.pointer_up(at).unwrap();
    };

    // "Add" button, then a press on empty space
    click(&mut editor, Point2::new(20.0, 20.0));
    assert_eq!(editor.mode(), Some(EditMode::Add));
    let placed_at = pixel(&editor, Point2::new(-15.0, -15.0));
    click(&mut editor, placed_at);
    let added = editor
        .circuit()
        .resistors()
        .map(|(id, _)| id)
        .max()
        .unwrap();
    assert_eq!(editor.circuit().resistor_count(), 6);

    // "Connect" button, then wire start -> new resistor -> end
    click(&mut editor, Point2::new(140.0, 20.0));
    assert_eq!(editor.mode(), Some(EditMode::Connect));
    let start = pixel(&editor, editor.circuit().node(editor.circuit().start()).unwrap().position);
    let end = pixel(&editor, editor.circuit().node(editor.circuit().end()).unwrap().position);
    drag(&mut editor, start, placed_at);
    assert!(editor.circuit().connections().contains(&(editor.circuit().start(), added)));
    assert_eq!(editor.equivalent_resistance(), None);
    drag(&mut editor, placed_at, end);

    // 200 Ω in parallel with the new 100 Ω
    assert_relative_eq!(
        editor.equivalent_resistance().unwrap(),
        200.0 / 3.0,
        epsilon = 1e-9
    );
    assert!(drawn_texts(&editor).contains(&"Equivalent resistance: 66.67 Ω".to_string()));
    assert_eq!(editor.connection_preview(), None);
}
