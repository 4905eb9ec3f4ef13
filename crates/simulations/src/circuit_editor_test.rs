use approx::assert_relative_eq;
use circuit::{Circuit, CircuitError, NodeId, ReductionError};
use nalgebra::Point2;
use viewport::{Dispatch, DispatchKind, Shape};

use crate::circuit_editor::{CircuitAction, CircuitEditor, EditMode};
use crate::config::CircuitEditorConfig;
use crate::error::SimulationError;
use crate::visualization::Visualization;

const R1: NodeId = NodeId(2);
const R5: NodeId = NodeId(6);

fn editor() -> CircuitEditor {
    CircuitEditor::new(&CircuitEditorConfig::default()).unwrap()
}

fn dispatch(
    action: CircuitAction,
    kind: DispatchKind,
    world: Point2<f64>,
) -> Dispatch<CircuitAction> {
    Dispatch {
        action,
        kind,
        world,
        device: Point2::origin(),
    }
}

fn click(action: CircuitAction) -> Dispatch<CircuitAction> {
    dispatch(action, DispatchKind::Click, Point2::origin())
}

fn status(editor: &CircuitEditor) -> String {
    editor.viewport().labels[0].text.clone()
}

fn pixel_of(editor: &CircuitEditor, id: NodeId) -> Point2<f64> {
    let position = editor.circuit().node(id).unwrap().position;
    editor.viewport().to_device(&position)
}

#[test]
fn test_sample_circuit_reduces_to_two_hundred_ohms() {
    let editor = editor();

    assert_relative_eq!(editor.equivalent_resistance().unwrap(), 200.0, epsilon = 1e-9);
    assert_eq!(status(&editor), "Equivalent resistance: 200.00 Ω");
    assert!(!editor.equations().is_empty());
    assert!(editor.expression().unwrap().contains("R5"));
}

#[test]
fn test_solution_uses_the_configured_voltage() {
    let mut editor = editor();
    editor.set_voltage(20.0).unwrap();

    let solution = editor.solution().unwrap();

    assert_relative_eq!(solution.total_current, 0.1, epsilon = 1e-12);
    let r5 = solution.reading(R5).unwrap();
    assert_relative_eq!(r5.voltage, 20.0, epsilon = 1e-9);
    assert!(editor.set_voltage(-1.0).is_err());
}

#[test]
fn test_dangling_resistor_shows_undefined() {
    let mut editor = editor();

    editor.disconnect(R5, NodeId(1)).unwrap();

    assert_eq!(editor.equivalent_resistance(), None);
    assert!(matches!(
        editor.reduction(),
        Err(ReductionError::InvalidTopology(_))
    ));
    assert_eq!(status(&editor), "Equivalent resistance: undefined");
    assert!(editor.solution().is_none());
    assert!(editor.equations().is_empty());
}

#[test]
fn test_mode_buttons_toggle_and_highlight() {
    let mut editor = editor();

    editor.apply(&click(CircuitAction::ToggleMode(EditMode::Connect))).unwrap();
    assert_eq!(editor.mode(), Some(EditMode::Connect));
    let highlighted: Vec<_> = editor
        .viewport()
        .buttons
        .iter()
        .map(|b| b.is_highlighted())
        .collect();
    assert_eq!(highlighted, vec![false, false, true, false, false]);
    assert!(!editor.viewport().can_pan());
    assert_eq!(
        editor.viewport().global_release,
        Some(CircuitAction::CancelConnection)
    );

    editor.toggle_mode(EditMode::Connect);
    assert_eq!(editor.mode(), None);
    assert!(editor.viewport().buttons.iter().all(|b| !b.is_highlighted()));
    assert!(editor.viewport().can_pan());
    assert_eq!(editor.viewport().global_release, None);
}

#[test]
fn test_edit_mode_selects_then_submits() {
    let mut editor = editor();
    editor.set_mode(Some(EditMode::Edit));

    assert_eq!(
        editor.submit_resistance(50.0),
        Err(SimulationError::NoPendingEdit)
    );

    editor.apply(&click(CircuitAction::SelectForEdit(R5))).unwrap();
    assert_eq!(editor.pending_edit(), Some(R5));

    // A bad value keeps the selection
    assert!(editor.submit_resistance(0.0).is_err());
    assert_eq!(editor.pending_edit(), Some(R5));

    editor.submit_resistance(250.0).unwrap();
    assert_eq!(editor.pending_edit(), None);
    // 250 || 250
    assert_relative_eq!(editor.equivalent_resistance().unwrap(), 125.0, epsilon = 1e-9);
}

#[test]
fn test_selecting_a_terminal_is_rejected() {
    let mut editor = editor();

    let result = editor.apply(&click(CircuitAction::SelectForEdit(NodeId(0))));

    assert_eq!(
        result,
        Err(SimulationError::Circuit(CircuitError::NotAResistor(NodeId(0))))
    );
    assert_eq!(editor.pending_edit(), None);
}

#[test]
fn test_changing_mode_drops_the_pending_edit() {
    let mut editor = editor();
    editor.set_mode(Some(EditMode::Edit));
    editor.apply(&click(CircuitAction::SelectForEdit(R1))).unwrap();

    editor.toggle_mode(EditMode::Rotate);

    assert_eq!(editor.pending_edit(), None);
}

#[test]
fn test_connection_to_itself_or_twice_is_ignored() {
    let mut editor = editor();
    editor.set_mode(Some(EditMode::Connect));
    let revision = editor.circuit().revision();

    let drag = dispatch(
        CircuitAction::BeginConnection(R1),
        DispatchKind::Drag,
        Point2::new(3.0, 3.0),
    );
    editor.apply(&drag).unwrap();
    assert_eq!(editor.connection_preview(), Some((R1, Point2::new(3.0, 3.0))));
    editor
        .apply(&dispatch(
            CircuitAction::CompleteConnection(R1),
            DispatchKind::HoverRelease,
            Point2::origin(),
        ))
        .unwrap();

    editor.apply(&drag).unwrap();
    editor
        .apply(&dispatch(
            CircuitAction::CompleteConnection(NodeId(3)),
            DispatchKind::HoverRelease,
            Point2::origin(),
        ))
        .unwrap();

    assert_eq!(editor.circuit().revision(), revision);
    assert_eq!(editor.connection_preview(), None);
}

#[test]
fn test_connection_into_the_start_terminal_is_an_error() {
    let mut editor = editor();
    editor.set_mode(Some(EditMode::Connect));

    editor
        .apply(&dispatch(
            CircuitAction::BeginConnection(R5),
            DispatchKind::Drag,
            Point2::origin(),
        ))
        .unwrap();
    let result = editor.apply(&dispatch(
        CircuitAction::CompleteConnection(NodeId(0)),
        DispatchKind::HoverRelease,
        Point2::origin(),
    ));

    assert!(matches!(
        result,
        Err(SimulationError::Circuit(CircuitError::TerminalDirection { .. }))
    ));
}

#[test]
fn test_connecting_line_follows_the_pointer() {
    let mut editor = editor();
    editor.set_mode(Some(EditMode::Connect));
    let pointer = Point2::new(0.0, -20.0);

    editor
        .apply(&dispatch(
            CircuitAction::BeginConnection(R5),
            DispatchKind::Drag,
            pointer,
        ))
        .unwrap();

    let ends: Vec<_> = editor
        .viewport()
        .entities()
        .iter()
        .filter_map(|e| match e.shape {
            Shape::Line { end, .. } => Some(end),
            _ => None,
        })
        .collect();
    assert!(ends.contains(&pointer));

    editor.apply(&click(CircuitAction::CancelConnection)).unwrap();
    assert_eq!(editor.connection_preview(), None);
}

#[test]
fn test_dragging_a_wire_between_nodes() {
    let mut editor = editor();
    editor.disconnect(R5, NodeId(1)).unwrap();
    editor.set_mode(Some(EditMode::Connect));

    let from = pixel_of(&editor, R5);
    let to = pixel_of(&editor, NodeId(1));
    editor.pointer_down(from).unwrap();
    editor.pointer_move(to).unwrap();
    editor.pointer_up(to).unwrap();

    assert!(editor.circuit().connections().contains(&(R5, NodeId(1))));
    assert_relative_eq!(editor.equivalent_resistance().unwrap(), 200.0, epsilon = 1e-9);
    assert_eq!(editor.connection_preview(), None);
}

#[test]
fn test_add_mode_places_on_empty_space_only() {
    let mut editor = editor();
    editor.set_mode(Some(EditMode::Add));
    let count = editor.circuit().resistor_count();

    let empty = editor.viewport().to_device(&Point2::new(-15.0, -15.0));
    editor.pointer_down(empty).unwrap();
    editor.pointer_up(empty).unwrap();
    assert_eq!(editor.circuit().resistor_count(), count + 1);

    let occupied = pixel_of(&editor, R1);
    editor.pointer_down(occupied).unwrap();
    editor.pointer_up(occupied).unwrap();
    assert_eq!(editor.circuit().resistor_count(), count + 1);

    // The new resistor dangles, so the circuit still reduces unchanged
    assert_relative_eq!(editor.equivalent_resistance().unwrap(), 200.0, epsilon = 1e-9);
}

#[test]
fn test_add_mode_button_press_places_nothing() {
    let mut editor = editor();
    editor.set_mode(Some(EditMode::Add));
    let count = editor.circuit().resistor_count();

    // Inside the "Add" button
    editor.pointer_down(Point2::new(20.0, 20.0)).unwrap();

    assert_eq!(editor.circuit().resistor_count(), count);
    assert_eq!(editor.mode(), None);
}

#[test]
fn test_delete_mode_removes_a_clicked_resistor() {
    let mut editor = editor();
    editor.set_mode(Some(EditMode::Delete));

    let pixel = pixel_of(&editor, R5);
    editor.pointer_down(pixel).unwrap();
    editor.pointer_up(pixel).unwrap();

    assert!(editor.circuit().node(R5).is_none());
    assert_relative_eq!(editor.equivalent_resistance().unwrap(), 250.0, epsilon = 1e-9);
}

#[test]
fn test_delete_connection_action() {
    let mut editor = editor();
    editor.set_mode(Some(EditMode::Delete));

    editor
        .apply(&click(CircuitAction::DeleteConnection(NodeId(0), R5)))
        .unwrap();

    assert!(!editor.circuit().connections().contains(&(NodeId(0), R5)));
    assert_relative_eq!(editor.equivalent_resistance().unwrap(), 250.0, epsilon = 1e-9);
    let missing = editor.apply(&click(CircuitAction::DeleteConnection(NodeId(0), R5)));
    assert!(missing.is_err());
}

#[test]
fn test_rotate_mode_toggles_orientation() {
    let mut editor = editor();
    editor.set_mode(Some(EditMode::Rotate));

    editor.apply(&click(CircuitAction::Rotate(R1))).unwrap();
    let rotation = editor.circuit().node(R1).unwrap().resistor().unwrap().rotation;
    assert_relative_eq!(rotation, std::f64::consts::FRAC_PI_2);

    assert_eq!(editor.rotate(R1).unwrap(), 0.0);
}

#[test]
fn test_dragging_a_resistor_without_a_mode() {
    let mut editor = editor();
    let target = Point2::new(0.0, 12.0);

    editor
        .apply(&dispatch(CircuitAction::MoveNode(R1), DispatchKind::Drag, target))
        .unwrap();

    assert_eq!(editor.circuit().node(R1).unwrap().position, target);
}

#[test]
fn test_resistor_labels() {
    let editor = editor();

    let labels: Vec<_> = editor
        .viewport()
        .entities()
        .iter()
        .filter_map(|e| match &e.shape {
            Shape::Text { text, .. } if text.starts_with('R') => Some(text.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(labels[0], "R1 200Ω");
    assert_eq!(labels.len(), 5);
}

#[test]
fn test_empty_circuit_is_undefined() {
    let circuit = Circuit::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));

    let editor = CircuitEditor::with_circuit(&CircuitEditorConfig::default(), circuit).unwrap();

    assert_eq!(editor.equivalent_resistance(), None);
    assert_eq!(status(&editor), "Equivalent resistance: undefined");
}
