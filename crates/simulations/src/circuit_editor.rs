//! Interactive resistor network editor.
//!
//! Five mode buttons switch what a press on the scene does: place a
//! resistor, pick one for a value edit, wire two nodes together, rotate or
//! delete. With no mode active, nodes are simply dragged around. The
//! equivalent resistance is recomputed whenever the circuit changes and
//! shown in the corner, or "undefined" while the topology cannot be reduced.

use circuit::{
    Circuit, CircuitError, CircuitSolution, NodeId, NodeKind, Reduction, ReductionError,
};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use viewport::{
    Color, Dispatch, Entity, Shape, Style, TextAlign, UiAnchor, UiButton, UiLabel, Viewport,
};

use crate::config::CircuitEditorConfig;
use crate::error::{SimulationError, positive};
use crate::visualization::Visualization;

const UI_FONT_PX: f64 = 20.0;
const LABEL_FONT_PX: f64 = 25.0;
const TERMINAL_RADIUS: f64 = 1.0;
const WIRE_WIDTH: f64 = 1.0;
const SELECTED_COLOR: Color = Color::rgb(0xba, 0x23, 0x18);

/// What a press on the scene does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditMode {
    Add,
    Edit,
    Connect,
    Rotate,
    Delete,
}

impl EditMode {
    pub const ALL: [EditMode; 5] = [
        EditMode::Add,
        EditMode::Edit,
        EditMode::Connect,
        EditMode::Rotate,
        EditMode::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditMode::Add => "Add",
            EditMode::Edit => "Edit",
            EditMode::Connect => "Connect",
            EditMode::Rotate => "Rotate",
            EditMode::Delete => "Delete",
        }
    }

    /// Horizontal offset of the mode's button
    fn button_x(self) -> f64 {
        match self {
            EditMode::Add => 10.0,
            EditMode::Edit => 70.0,
            EditMode::Connect => 130.0,
            EditMode::Rotate => 230.0,
            EditMode::Delete => 315.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitAction {
    ToggleMode(EditMode),
    MoveNode(NodeId),
    SelectForEdit(NodeId),
    Rotate(NodeId),
    Delete(NodeId),
    /// Dragging a wire out of a node; repeats with every pointer move
    BeginConnection(NodeId),
    /// The wire was dropped on a node
    CompleteConnection(NodeId),
    CancelConnection,
    DeleteConnection(NodeId, NodeId),
}

/// A wire being dragged out of `from`
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingConnection {
    from: NodeId,
    pointer: Point2<f64>,
}

#[derive(Debug)]
pub struct CircuitEditor {
    viewport: Viewport<CircuitAction>,
    circuit: Circuit,
    mode: Option<EditMode>,
    connecting: Option<PendingConnection>,
    pending_edit: Option<NodeId>,
    voltage: f64,
    new_resistance: f64,
    reduction: Result<Reduction, ReductionError>,
    reduced_revision: u64,
}

impl CircuitEditor {
    /// Editor opened on the five-resistor sample circuit
    pub fn new(config: &CircuitEditorConfig) -> Result<Self, SimulationError> {
        Self::with_circuit(config, CircuitEditorConfig::sample_circuit()?)
    }

    pub fn with_circuit(
        config: &CircuitEditorConfig,
        circuit: Circuit,
    ) -> Result<Self, SimulationError> {
        let mut viewport = config.view.viewport()?;
        for mode in EditMode::ALL {
            viewport.buttons.push(
                UiButton::new(
                    UiAnchor::top_left(mode.button_x(), 10.0),
                    mode.label(),
                    CircuitAction::ToggleMode(mode),
                )
                .with_font_px(UI_FONT_PX),
            );
        }
        viewport
            .labels
            .push(UiLabel::new(UiAnchor::bottom_left(10.0, 10.0), "").with_font_px(UI_FONT_PX));

        let reduction = circuit.reduce();
        let mut editor = Self {
            viewport,
            reduced_revision: circuit.revision(),
            circuit,
            mode: None,
            connecting: None,
            pending_edit: None,
            voltage: positive("voltage", config.voltage)?,
            new_resistance: positive("new resistance", config.new_resistance)?,
            reduction,
        };
        info!(
            resistors = editor.circuit.resistor_count(),
            "circuit editor created"
        );
        editor.refresh();
        Ok(editor)
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn mode(&self) -> Option<EditMode> {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Option<EditMode>) {
        self.mode = mode;
        self.connecting = None;
        self.pending_edit = None;
        info!(?mode, "edit mode changed");
        self.refresh();
    }

    /// Activates `mode`, or clears it when it is already active
    pub fn toggle_mode(&mut self, mode: EditMode) {
        let next = if self.mode == Some(mode) {
            None
        } else {
            Some(mode)
        };
        self.set_mode(next);
    }

    /// Resistor picked in edit mode and waiting for a new value
    pub fn pending_edit(&self) -> Option<NodeId> {
        self.pending_edit
    }

    /// Applies a value to the resistor picked in edit mode. A rejected
    /// value keeps the selection so it can be corrected.
    pub fn submit_resistance(&mut self, resistance: f64) -> Result<(), SimulationError> {
        let id = self.pending_edit.ok_or(SimulationError::NoPendingEdit)?;
        self.circuit.set_resistance(id, resistance)?;
        self.pending_edit = None;
        self.refresh();
        Ok(())
    }

    pub fn add_resistor(
        &mut self,
        position: Point2<f64>,
        resistance: f64,
    ) -> Result<NodeId, SimulationError> {
        let id = self.circuit.add_resistor(position, resistance)?;
        self.refresh();
        Ok(id)
    }

    pub fn remove_resistor(&mut self, id: NodeId) -> Result<(), SimulationError> {
        self.circuit.remove_resistor(id)?;
        if self.pending_edit == Some(id) {
            self.pending_edit = None;
        }
        if self.connecting.is_some_and(|c| c.from == id) {
            self.connecting = None;
        }
        self.refresh();
        Ok(())
    }

    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), SimulationError> {
        self.circuit.add_connection(from, to)?;
        self.refresh();
        Ok(())
    }

    pub fn disconnect(&mut self, from: NodeId, to: NodeId) -> Result<(), SimulationError> {
        self.circuit.remove_connection(from, to)?;
        self.refresh();
        Ok(())
    }

    /// Toggles a resistor between horizontal and vertical; returns the new
    /// rotation
    pub fn rotate(&mut self, id: NodeId) -> Result<f64, SimulationError> {
        let rotation = self.circuit.rotate_resistor(id)?;
        self.refresh();
        Ok(rotation)
    }

    pub fn set_resistance(&mut self, id: NodeId, resistance: f64) -> Result<(), SimulationError> {
        self.circuit.set_resistance(id, resistance)?;
        self.refresh();
        Ok(())
    }

    pub fn move_node(&mut self, id: NodeId, position: Point2<f64>) -> Result<(), SimulationError> {
        self.circuit.move_node(id, position)?;
        self.refresh();
        Ok(())
    }

    /// The latest reduction, or why the circuit has none
    pub fn reduction(&self) -> Result<&Reduction, ReductionError> {
        self.reduction.as_ref().map_err(Clone::clone)
    }

    pub fn equivalent_resistance(&self) -> Option<f64> {
        self.reduction
            .as_ref()
            .ok()
            .map(Reduction::equivalent_resistance)
    }

    /// Per-resistor voltages and currents at the configured voltage
    pub fn solution(&self) -> Option<CircuitSolution> {
        self.reduction.as_ref().ok().map(|r| r.solve(self.voltage))
    }

    /// One line per fold, empty while the circuit cannot be reduced
    pub fn equations(&self) -> Vec<String> {
        self.reduction
            .as_ref()
            .map(Reduction::equations)
            .unwrap_or_default()
    }

    pub fn expression(&self) -> Option<String> {
        self.reduction.as_ref().ok().map(Reduction::expression)
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn set_voltage(&mut self, voltage: f64) -> Result<(), SimulationError> {
        self.voltage = positive("voltage", voltage)?;
        Ok(())
    }

    /// Wire end point while a connection is being dragged
    pub fn connection_preview(&self) -> Option<(NodeId, Point2<f64>)> {
        self.connecting.map(|c| (c.from, c.pointer))
    }

    fn complete_connection(&mut self, to: NodeId) -> Result<(), SimulationError> {
        let Some(pending) = self.connecting.take() else {
            return Ok(());
        };
        let from = pending.from;
        if from == to {
            debug!(%from, "connection dropped on its own node");
            return Ok(());
        }
        let duplicate = self
            .circuit
            .node(from)
            .is_some_and(|node| node.connections.contains(&to));
        if duplicate {
            debug!(%from, %to, "connection already exists");
            return Ok(());
        }
        self.circuit.add_connection(from, to)?;
        Ok(())
    }

    /// Re-reduces when the circuit changed since the last reduction
    fn sync_reduction(&mut self) {
        if self.circuit.revision() == self.reduced_revision {
            return;
        }
        self.reduction = self.circuit.reduce();
        self.reduced_revision = self.circuit.revision();
        match &self.reduction {
            Ok(reduction) => debug!(
                resistance = reduction.equivalent_resistance(),
                "circuit reduced"
            ),
            Err(e) => warn!(%e, "circuit has no equivalent resistance"),
        }
    }

    fn refresh(&mut self) {
        self.sync_reduction();
        self.sync_ui();
        self.rebuild_scene();
    }

    fn sync_ui(&mut self) {
        let mode = self.mode;
        for (button, button_mode) in self.viewport.buttons.iter_mut().zip(EditMode::ALL) {
            button.set_highlighted(mode == Some(button_mode));
        }
        let text = match self.equivalent_resistance() {
            Some(resistance) => format!("Equivalent resistance: {resistance:.2} Ω"),
            None => "Equivalent resistance: undefined".to_string(),
        };
        if let Some(label) = self.viewport.labels.get_mut(0) {
            label.text = text;
        }
        self.viewport
            .set_can_pan(!matches!(mode, Some(EditMode::Add | EditMode::Connect)));
        self.viewport.global_release =
            (mode == Some(EditMode::Connect)).then_some(CircuitAction::CancelConnection);
    }

    fn terminal_entity(&self, id: NodeId, position: Point2<f64>) -> Entity<CircuitAction> {
        let entity = Entity::new(
            Shape::Circle {
                center: position,
                radius: TERMINAL_RADIUS,
            },
            Style::fill(Color::BLACK),
        );
        match self.mode {
            Some(EditMode::Connect) if id == self.circuit.start() => {
                entity.on_drag(CircuitAction::BeginConnection(id))
            }
            Some(EditMode::Connect) => {
                entity.on_hover_release(CircuitAction::CompleteConnection(id))
            }
            _ => entity.on_drag(CircuitAction::MoveNode(id)),
        }
    }

    fn resistor_entity(&self, id: NodeId, corners: [Point2<f64>; 4]) -> Entity<CircuitAction> {
        let color = if self.pending_edit == Some(id) {
            SELECTED_COLOR
        } else {
            Color::BLACK
        };
        let [top_left, top_right, bottom_left, bottom_right] = corners;
        let entity = Entity::new(
            Shape::Polygon {
                points: vec![top_left, bottom_left, bottom_right, top_right],
            },
            Style::stroke(color),
        );
        match self.mode {
            None | Some(EditMode::Add) => entity.on_drag(CircuitAction::MoveNode(id)),
            Some(EditMode::Edit) => entity.on_click(CircuitAction::SelectForEdit(id)),
            Some(EditMode::Rotate) => entity.on_click(CircuitAction::Rotate(id)),
            Some(EditMode::Delete) => entity.on_click(CircuitAction::Delete(id)),
            Some(EditMode::Connect) => entity
                .on_drag(CircuitAction::BeginConnection(id))
                .on_hover_release(CircuitAction::CompleteConnection(id)),
        }
    }

    fn rebuild_scene(&mut self) {
        let mut entities = Vec::new();

        let terminals: Vec<_> = self
            .circuit
            .nodes()
            .filter(|(_, node)| node.is_terminal())
            .map(|(id, node)| (id, node.position, node.kind == NodeKind::Start))
            .collect();
        for &(id, position, _) in &terminals {
            entities.push(self.terminal_entity(id, position));
        }
        for &(_, position, is_start) in &terminals {
            entities.push(Entity::new(
                Shape::Text {
                    position,
                    text: if is_start { "+" } else { "-" }.to_string(),
                    font_px: LABEL_FONT_PX,
                    align: TextAlign::Center,
                },
                Style::fill(Color::WHITE),
            ));
        }

        for (id, node) in self.circuit.resistors() {
            let (Some(corners), Some(resistor)) = (node.corner_points(), node.resistor()) else {
                continue;
            };
            entities.push(self.resistor_entity(id, corners));
            entities.push(Entity::new(
                Shape::Text {
                    position: node.position,
                    text: format!("{} {}Ω", resistor.label(), resistor.resistance),
                    font_px: LABEL_FONT_PX,
                    align: TextAlign::Center,
                },
                Style::fill(Color::BLACK),
            ));
        }

        if let Some(pending) = self.connecting {
            if let Some(node) = self.circuit.node(pending.from) {
                entities.push(Entity::new(
                    Shape::Line {
                        start: node.output_point(&pending.pointer),
                        end: pending.pointer,
                    },
                    Style::stroke(Color::BLACK).with_line_width(WIRE_WIDTH),
                ));
            }
        }

        for (from, to) in self.circuit.connections() {
            let Some((start, end)) = self.circuit.wire_points(from, to) else {
                continue;
            };
            let wire = Entity::new(
                Shape::Line { start, end },
                Style::stroke(Color::BLACK).with_line_width(WIRE_WIDTH),
            );
            entities.push(if self.mode == Some(EditMode::Delete) {
                wire.on_click(CircuitAction::DeleteConnection(from, to))
            } else {
                wire
            });
        }

        self.viewport.set_entities(entities);
    }
}

impl Visualization for CircuitEditor {
    type Action = CircuitAction;

    fn viewport(&self) -> &Viewport<CircuitAction> {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport<CircuitAction> {
        &mut self.viewport
    }

    fn apply(&mut self, dispatch: &Dispatch<CircuitAction>) -> Result<(), SimulationError> {
        let result = match dispatch.action {
            CircuitAction::ToggleMode(mode) => {
                self.toggle_mode(mode);
                Ok(())
            }
            CircuitAction::MoveNode(id) => self
                .circuit
                .move_node(id, dispatch.world)
                .map_err(SimulationError::from),
            CircuitAction::SelectForEdit(id) => match self.circuit.node(id) {
                Some(node) if node.resistor().is_some() => {
                    self.pending_edit = Some(id);
                    debug!(%id, "resistor selected for editing");
                    Ok(())
                }
                Some(_) => Err(CircuitError::NotAResistor(id).into()),
                None => Err(CircuitError::UnknownNode(id).into()),
            },
            CircuitAction::Rotate(id) => self
                .circuit
                .rotate_resistor(id)
                .map(|_| ())
                .map_err(SimulationError::from),
            CircuitAction::Delete(id) => self.remove_resistor(id),
            CircuitAction::BeginConnection(from) => {
                self.connecting = Some(PendingConnection {
                    from,
                    pointer: dispatch.world,
                });
                Ok(())
            }
            CircuitAction::CompleteConnection(to) => self.complete_connection(to),
            CircuitAction::CancelConnection => {
                self.connecting = None;
                Ok(())
            }
            CircuitAction::DeleteConnection(from, to) => self
                .circuit
                .remove_connection(from, to)
                .map_err(SimulationError::from),
        };
        self.refresh();
        result
    }

    fn tick(&mut self, _now_ms: f64) {
        self.refresh();
    }

    /// In add mode a press on empty space places a resistor there
    fn pointer_down(&mut self, pixel: Point2<f64>) -> Result<(), SimulationError> {
        if self.mode == Some(EditMode::Add) {
            let device = self.viewport.device();
            let on_button = self.viewport.buttons.iter().any(|b| b.contains(&pixel, device));
            let on_entity = self.viewport.entities().iter().any(|e| {
                !e.capabilities().is_empty() && e.contains(&pixel, &self.viewport.camera, device)
            });
            if !on_button && !on_entity {
                let position = self.viewport.to_world(&pixel);
                let id = self.add_resistor(position, self.new_resistance)?;
                info!(%id, x = position.x, y = position.y, "resistor placed");
            }
        }
        let dispatches = self.viewport.pointer_down(pixel);
        self.apply_all(dispatches)
    }

    fn pointer_cancel(&mut self) {
        self.viewport.pointer_cancel();
        self.connecting = None;
        self.rebuild_scene();
    }
}
