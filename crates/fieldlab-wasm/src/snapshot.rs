//! Plain-data views of each visualization for JavaScript.
//!
//! Snapshots are built from the live models on request and never written
//! back; JavaScript edits go through the dedicated entry points instead.

use circuit::{CircuitSolution, NodeId, NodeKind};
use fieldlines::Source;
use nalgebra::{Point2, Vector2};
use nbody::forces::{ForceModel, PairwiseGravity};
use serde::Serialize;
use simulations::{
    CircuitEditor, EditMode, ElectricFieldVisualizer, GravityFieldVisualizer, Magnet,
    MagnetSimulation, OrbitSimulation,
};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::registry::Visualizer;

fn pair(point: &Point2<f64>) -> [f64; 2] {
    [point.x, point.y]
}

fn components(vector: &Vector2<f64>) -> [f64; 2] {
    [vector.x, vector.y]
}

/// State of any visualizer, tagged with its kind
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum Snapshot {
    Orbit(OrbitSnapshot),
    GravityField(GravityFieldSnapshot),
    ElectricField(ElectricFieldSnapshot),
    Magnets(MagnetsSnapshot),
    Circuit(CircuitSnapshot),
}

impl Snapshot {
    pub fn of(visualizer: &Visualizer) -> Self {
        match visualizer {
            Visualizer::Orbit(s) => Snapshot::Orbit(OrbitSnapshot::from(s.simulation())),
            Visualizer::GravityField(s) => {
                Snapshot::GravityField(GravityFieldSnapshot::from(s.simulation()))
            }
            Visualizer::ElectricField(s) => {
                Snapshot::ElectricField(ElectricFieldSnapshot::from(s.simulation()))
            }
            Visualizer::Magnets(s) => Snapshot::Magnets(MagnetsSnapshot::from(s.simulation())),
            Visualizer::Circuit(s) => Snapshot::Circuit(CircuitSnapshot::from(s.simulation())),
        }
    }
}

// =============================================================================
// Orbit
// =============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct BodySnapshot {
    pub id: u32,
    pub name: String,
    /// kg
    pub mass: f64,
    /// m
    pub radius: f64,
    /// [x, y] in m
    pub position: [f64; 2],
    /// [x, y] in m/s
    pub velocity: [f64; 2],
    pub fixed: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct OrbitSnapshot {
    /// Simulated seconds since the start
    pub time: f64,
    pub paused: bool,
    pub editing: bool,
    pub time_warp: f64,
    pub bodies: Vec<BodySnapshot>,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    /// Conserved up to integration error while nothing is edited
    pub total_energy: f64,
    pub momentum: [f64; 2],
    pub angular_momentum: f64,
}

impl From<&OrbitSimulation> for OrbitSnapshot {
    fn from(simulation: &OrbitSimulation) -> Self {
        let state = simulation.state();
        let kinetic_energy = state.kinetic_energy();
        let potential_energy = PairwiseGravity::new().potential_energy(state);
        Self {
            time: state.time,
            paused: simulation.is_paused(),
            editing: simulation.is_editing(),
            time_warp: simulation.time_warp(),
            bodies: state
                .bodies
                .iter()
                .map(|body| BodySnapshot {
                    id: body.id.0,
                    name: body.name.clone(),
                    mass: body.mass,
                    radius: body.radius,
                    position: pair(&body.position),
                    velocity: components(&body.velocity),
                    fixed: body.fixed,
                })
                .collect(),
            kinetic_energy,
            potential_energy,
            total_energy: kinetic_energy + potential_energy,
            momentum: components(&state.total_momentum()),
            angular_momentum: state.total_angular_momentum(),
        }
    }
}

// =============================================================================
// Fields
// =============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct SourceSnapshot {
    pub position: [f64; 2],
    /// Mass or signed charge
    pub strength: f64,
    pub radius: f64,
}

impl From<&Source> for SourceSnapshot {
    fn from(source: &Source) -> Self {
        Self {
            position: pair(&source.position),
            strength: source.strength,
            radius: source.radius,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct GravityFieldSnapshot {
    pub bodies: Vec<SourceSnapshot>,
    pub probe: [f64; 2],
    /// Field at the probe
    pub probe_field: [f64; 2],
    pub line_count: usize,
    pub colored: bool,
}

impl From<&GravityFieldVisualizer> for GravityFieldSnapshot {
    fn from(visualizer: &GravityFieldVisualizer) -> Self {
        Self {
            bodies: visualizer.bodies().iter().map(SourceSnapshot::from).collect(),
            probe: pair(&visualizer.probe_position()),
            probe_field: components(&visualizer.probe_field()),
            line_count: visualizer.lines().len(),
            colored: visualizer.is_colored(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct ElectricFieldSnapshot {
    pub charges: Vec<SourceSnapshot>,
    pub probe: SourceSnapshot,
    /// Force on the probe charge
    pub probe_force: [f64; 2],
    pub line_count: usize,
    pub colored: bool,
}

impl From<&ElectricFieldVisualizer> for ElectricFieldSnapshot {
    fn from(visualizer: &ElectricFieldVisualizer) -> Self {
        Self {
            charges: visualizer.charges().iter().map(SourceSnapshot::from).collect(),
            probe: SourceSnapshot::from(visualizer.probe()),
            probe_force: components(&visualizer.probe_force()),
            line_count: visualizer.lines().len(),
            colored: visualizer.is_colored(),
        }
    }
}

// =============================================================================
// Magnets
// =============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct MagnetSnapshot {
    pub center: [f64; 2],
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub north_pole: [f64; 2],
    pub south_pole: [f64; 2],
    pub velocity: [f64; 2],
    pub held: bool,
}

impl From<&Magnet> for MagnetSnapshot {
    fn from(magnet: &Magnet) -> Self {
        Self {
            center: pair(&magnet.center),
            rotation: magnet.rotation,
            width: magnet.width,
            height: magnet.height,
            north_pole: pair(&magnet.north_pole()),
            south_pole: pair(&magnet.south_pole()),
            velocity: components(&magnet.velocity),
            held: magnet.held,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct MagnetsSnapshot {
    pub magnets: Vec<MagnetSnapshot>,
    pub compass: [f64; 2],
    pub compass_field: [f64; 2],
    pub paused: bool,
    pub line_count: usize,
}

impl From<&MagnetSimulation> for MagnetsSnapshot {
    fn from(simulation: &MagnetSimulation) -> Self {
        Self {
            magnets: simulation.magnets().iter().map(MagnetSnapshot::from).collect(),
            compass: pair(&simulation.compass_position()),
            compass_field: components(&simulation.compass_field()),
            paused: simulation.is_paused(),
            line_count: simulation.lines().len(),
        }
    }
}

// =============================================================================
// Circuit
// =============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct CircuitNodeSnapshot {
    pub id: usize,
    pub position: [f64; 2],
    /// "R1", "R2", ... for resistors, absent on the terminals
    pub label: Option<String>,
    pub resistance: Option<f64>,
    pub rotation: Option<f64>,
    pub terminal: bool,
    /// Downstream node ids
    pub connections: Vec<usize>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct CircuitSnapshot {
    #[cfg_attr(
        feature = "tsify",
        tsify(type = "\"add\" | \"edit\" | \"connect\" | \"rotate\" | \"delete\" | null")
    )]
    pub mode: Option<EditMode>,
    /// Resistor awaiting a new value
    pub pending_edit: Option<usize>,
    pub start: usize,
    pub end: usize,
    pub nodes: Vec<CircuitNodeSnapshot>,
    pub voltage: f64,
    pub equivalent_resistance: Option<f64>,
    /// Why the circuit has no equivalent resistance
    pub error: Option<String>,
    pub expression: Option<String>,
    pub equations: Vec<String>,
    #[cfg_attr(feature = "tsify", tsify(type = "unknown"))]
    pub solution: Option<CircuitSolution>,
}

fn node_snapshot(
    id: NodeId,
    kind: &NodeKind,
    position: &Point2<f64>,
    next: &[NodeId],
) -> CircuitNodeSnapshot {
    let resistor = match kind {
        NodeKind::Resistor(resistor) => Some(resistor),
        NodeKind::Start | NodeKind::End => None,
    };
    CircuitNodeSnapshot {
        id: id.0,
        position: pair(position),
        label: resistor.map(|r| r.label()),
        resistance: resistor.map(|r| r.resistance),
        rotation: resistor.map(|r| r.rotation),
        terminal: resistor.is_none(),
        connections: next.iter().map(|n| n.0).collect(),
    }
}

impl From<&CircuitEditor> for CircuitSnapshot {
    fn from(editor: &CircuitEditor) -> Self {
        let circuit = editor.circuit();
        Self {
            mode: editor.mode(),
            pending_edit: editor.pending_edit().map(|id| id.0),
            start: circuit.start().0,
            end: circuit.end().0,
            nodes: circuit
                .nodes()
                .map(|(id, node)| {
                    node_snapshot(id, &node.kind, &node.position, &node.connections)
                })
                .collect(),
            voltage: editor.voltage(),
            equivalent_resistance: editor.equivalent_resistance(),
            error: editor.reduction().err().map(|e| e.to_string()),
            expression: editor.expression(),
            equations: editor.equations(),
            solution: editor.solution(),
        }
    }
}
