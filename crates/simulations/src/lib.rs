//! The interactive visualizations.
//!
//! Each visualization owns a [`Viewport`](viewport::Viewport) and its model
//! (bodies, charges, magnets or a circuit). A tick advances the model and
//! rebuilds the scene; pointer input comes back from the viewport as typed
//! actions that the visualization applies to its model. Nothing schedules
//! itself: a [`Scheduler`] decides when ticks happen, so tests can step a
//! visualization one tick at a time.

pub mod circuit_editor;
pub mod config;
pub mod electric_field;
pub mod error;
pub mod field_render;
pub mod format;
pub mod gravity_field;
pub mod magnets;
pub mod orbit;
pub mod scheduler;
pub mod visualization;

#[cfg(test)]
mod circuit_editor_test;
#[cfg(test)]
mod gravity_field_test;
#[cfg(test)]
mod magnets_test;

pub use circuit_editor::{CircuitAction, CircuitEditor, EditMode};
pub use config::{
    BodyConfig, ChargeConfig, CircuitEditorConfig, ElectricFieldConfig, GravityFieldConfig,
    MagnetConfig, MagnetSimulationConfig, OrbitConfig, ViewConfig,
};
pub use electric_field::{ElectricFieldAction, ElectricFieldVisualizer};
pub use error::SimulationError;
pub use field_render::{FieldLineStyle, field_line_entities};
pub use format::format_duration;
pub use gravity_field::{GravityFieldAction, GravityFieldVisualizer};
pub use magnets::{Magnet, MagnetAction, MagnetSimulation};
pub use orbit::{OrbitAction, OrbitSimulation};
pub use scheduler::{DEFAULT_TICK_PERIOD_MS, Scheduler};
pub use visualization::Visualization;
