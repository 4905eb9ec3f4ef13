//! Live visualizers addressed by the ids handed to JavaScript.

use std::collections::HashMap;
use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use simulations::{
    CircuitEditor, ElectricFieldVisualizer, GravityFieldVisualizer, MagnetSimulation,
    OrbitSimulation, Scheduler, SimulationError, Visualization,
};
use thiserror::Error;
use tracing::info;
use viewport::DrawList;

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum VisualizerKind {
    Orbit,
    GravityField,
    ElectricField,
    Magnets,
    Circuit,
}

impl fmt::Display for VisualizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VisualizerKind::Orbit => "orbit",
            VisualizerKind::GravityField => "gravity field",
            VisualizerKind::ElectricField => "electric field",
            VisualizerKind::Magnets => "magnets",
            VisualizerKind::Circuit => "circuit",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("Simulation {0} not found")]
    NotFound(u32),

    #[error("Simulation {id} is a {actual} simulation, not {expected}")]
    WrongKind {
        id: u32,
        expected: VisualizerKind,
        actual: VisualizerKind,
    },
}

/// One scheduled visualization of any kind
#[derive(Debug)]
pub enum Visualizer {
    Orbit(Scheduler<OrbitSimulation>),
    GravityField(Scheduler<GravityFieldVisualizer>),
    ElectricField(Scheduler<ElectricFieldVisualizer>),
    Magnets(Scheduler<MagnetSimulation>),
    Circuit(Scheduler<CircuitEditor>),
}

/// Runs `$body` with `$scheduler` bound to whichever scheduler `$visualizer`
/// holds
macro_rules! on_scheduler {
    ($visualizer:expr, $scheduler:ident => $body:expr) => {
        match $visualizer {
            Visualizer::Orbit($scheduler) => $body,
            Visualizer::GravityField($scheduler) => $body,
            Visualizer::ElectricField($scheduler) => $body,
            Visualizer::Magnets($scheduler) => $body,
            Visualizer::Circuit($scheduler) => $body,
        }
    };
}

impl Visualizer {
    pub fn kind(&self) -> VisualizerKind {
        match self {
            Visualizer::Orbit(_) => VisualizerKind::Orbit,
            Visualizer::GravityField(_) => VisualizerKind::GravityField,
            Visualizer::ElectricField(_) => VisualizerKind::ElectricField,
            Visualizer::Magnets(_) => VisualizerKind::Magnets,
            Visualizer::Circuit(_) => VisualizerKind::Circuit,
        }
    }

    pub fn start(&mut self, now_ms: f64) {
        on_scheduler!(self, s => s.start(now_ms))
    }

    pub fn stop(&mut self) {
        on_scheduler!(self, s => s.stop())
    }

    pub fn is_running(&self) -> bool {
        on_scheduler!(self, s => s.is_running())
    }

    pub fn advance(&mut self, now_ms: f64) -> bool {
        on_scheduler!(self, s => s.advance(now_ms))
    }

    pub fn step(&mut self, now_ms: f64) {
        on_scheduler!(self, s => s.step(now_ms))
    }

    pub fn ticks(&self) -> u64 {
        on_scheduler!(self, s => s.ticks())
    }

    pub fn pointer_down(&mut self, pixel: Point2<f64>) -> Result<(), SimulationError> {
        on_scheduler!(self, s => s.simulation_mut().pointer_down(pixel))
    }

    pub fn pointer_move(&mut self, pixel: Point2<f64>) -> Result<(), SimulationError> {
        on_scheduler!(self, s => s.simulation_mut().pointer_move(pixel))
    }

    pub fn pointer_up(&mut self, pixel: Point2<f64>) -> Result<(), SimulationError> {
        on_scheduler!(self, s => s.simulation_mut().pointer_up(pixel))
    }

    pub fn pointer_cancel(&mut self) {
        on_scheduler!(self, s => s.simulation_mut().pointer_cancel())
    }

    pub fn wheel(&mut self, delta_y: f64) {
        on_scheduler!(self, s => s.simulation_mut().wheel(delta_y))
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), SimulationError> {
        on_scheduler!(self, s => s.simulation_mut().resize(width, height))
    }

    pub fn set_visible(&mut self, visible: bool, now_ms: f64) {
        on_scheduler!(self, s => s.simulation_mut().set_visible(visible, now_ms))
    }

    /// Frame-limited draw into `surface`; false when the frame was skipped
    pub fn render(&mut self, now_ms: f64, surface: &mut DrawList) -> bool {
        on_scheduler!(self, s => s.simulation_mut().render(now_ms, surface))
    }

    pub fn draw(&self, surface: &mut DrawList) {
        on_scheduler!(self, s => s.simulation().draw(surface))
    }
}

/// A visualization type that can be picked out of a [`Visualizer`]
pub trait Variant: Visualization + Sized {
    const KIND: VisualizerKind;

    fn wrap(scheduler: Scheduler<Self>) -> Visualizer;

    fn scheduler(visualizer: &Visualizer) -> Option<&Scheduler<Self>>;

    fn scheduler_mut(visualizer: &mut Visualizer) -> Option<&mut Scheduler<Self>>;
}

macro_rules! variant {
    ($ty:ty, $variant:ident) => {
        impl Variant for $ty {
            const KIND: VisualizerKind = VisualizerKind::$variant;

            fn wrap(scheduler: Scheduler<Self>) -> Visualizer {
                Visualizer::$variant(scheduler)
            }

            fn scheduler(visualizer: &Visualizer) -> Option<&Scheduler<Self>> {
                match visualizer {
                    Visualizer::$variant(s) => Some(s),
                    _ => None,
                }
            }

            fn scheduler_mut(visualizer: &mut Visualizer) -> Option<&mut Scheduler<Self>> {
                match visualizer {
                    Visualizer::$variant(s) => Some(s),
                    _ => None,
                }
            }
        }
    };
}

variant!(OrbitSimulation, Orbit);
variant!(GravityFieldVisualizer, GravityField);
variant!(ElectricFieldVisualizer, ElectricField);
variant!(MagnetSimulation, Magnets);
variant!(CircuitEditor, Circuit);

/// Visualizers by id. Ids are never reused.
#[derive(Debug, Default)]
pub struct Registry {
    visualizers: HashMap<u32, Visualizer>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `simulation` (stopped) and returns its id
    pub fn insert<S: Variant>(&mut self, simulation: S) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.visualizers
            .insert(id, S::wrap(Scheduler::new(simulation)));
        info!(id, kind = %S::KIND, "simulation registered");
        id
    }

    /// Drops the visualizer; nothing can tick it afterwards
    pub fn remove(&mut self, id: u32) -> Option<Visualizer> {
        let removed = self.visualizers.remove(&id);
        if removed.is_some() {
            info!(id, "simulation removed");
        }
        removed
    }

    pub fn get(&self, id: u32) -> Result<&Visualizer, RegistryError> {
        self.visualizers.get(&id).ok_or(RegistryError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: u32) -> Result<&mut Visualizer, RegistryError> {
        self.visualizers
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))
    }

    pub fn simulation<S: Variant>(&self, id: u32) -> Result<&S, RegistryError> {
        let visualizer = self.get(id)?;
        S::scheduler(visualizer)
            .map(Scheduler::simulation)
            .ok_or(RegistryError::WrongKind {
                id,
                expected: S::KIND,
                actual: visualizer.kind(),
            })
    }

    pub fn simulation_mut<S: Variant>(&mut self, id: u32) -> Result<&mut S, RegistryError> {
        let visualizer = self.get_mut(id)?;
        let actual = visualizer.kind();
        S::scheduler_mut(visualizer)
            .map(Scheduler::simulation_mut)
            .ok_or(RegistryError::WrongKind {
                id,
                expected: S::KIND,
                actual,
            })
    }

    pub fn len(&self) -> usize {
        self.visualizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visualizers.is_empty()
    }

    /// Advances every running visualizer; returns how many ticked
    pub fn advance_all(&mut self, now_ms: f64) -> usize {
        self.visualizers
            .values_mut()
            .map(|v| v.advance(now_ms))
            .filter(|ticked| *ticked)
            .count()
    }
}
