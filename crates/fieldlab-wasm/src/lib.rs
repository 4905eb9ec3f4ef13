//! WASM bindings for the fieldlab visualizations.
//!
//! # Architecture
//!
//! Visualizations live in a thread-local [`Registry`] (WASM is
//! single-threaded) and are addressed by the ids the create functions
//! return. The page owns the canvas, the DOM listeners and the timer: it
//! forwards pointer events, calls `simulation_advance` from its timer and
//! paints the draw commands returned by `simulation_render`. Deleting a
//! simulation drops it, so a late timer callback only gets a "not found"
//! error.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! const id = circuit_create({ voltage: 12 });
//! simulation_resize(id, canvas.width, canvas.height);
//! simulation_start(id, performance.now());
//!
//! canvas.onpointerdown = (e) => simulation_pointer_down(id, e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => simulation_pointer_move(id, e.offsetX, e.offsetY);
//! canvas.onpointerup = (e) => simulation_pointer_up(id, e.offsetX, e.offsetY);
//!
//! setInterval(() => {
//!   const now = performance.now();
//!   simulation_advance(id, now);
//!   const frame = simulation_render(id, now);
//!   if (frame) paint(ctx, frame.commands);
//! }, 4);
//!
//! const { equivalentResistance, equations } = simulation_snapshot(id);
//! ```

use std::cell::RefCell;

use nalgebra::Point2;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use simulations::{
    CircuitEditor, CircuitEditorConfig, ElectricFieldConfig, ElectricFieldVisualizer,
    GravityFieldConfig, GravityFieldVisualizer, MagnetSimulation, MagnetSimulationConfig,
    OrbitConfig, OrbitSimulation,
};
use viewport::DrawList;

mod edit;
mod registry;
mod snapshot;


pub use registry::{Registry, RegistryError, Variant, Visualizer, VisualizerKind};
pub use snapshot::Snapshot;

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Deserializes a config, falling back to the defaults for `undefined` or
/// `null`
fn config_or_default<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsError> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        from_js(value)
    }
}

// =============================================================================
// Thread-local registry
// =============================================================================

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::new());
}

fn with_registry<T>(f: impl FnOnce(&mut Registry) -> T) -> T {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

fn with_visualizer<T>(
    sim_id: u32,
    f: impl FnOnce(&mut Visualizer) -> Result<T, JsError>,
) -> Result<T, JsError> {
    with_registry(|registry| f(registry.get_mut(sim_id)?))
}

fn with_simulation<S: Variant, T>(
    sim_id: u32,
    f: impl FnOnce(&mut S) -> Result<T, JsError>,
) -> Result<T, JsError> {
    with_registry(|registry| f(registry.simulation_mut::<S>(sim_id)?))
}

// =============================================================================
// Creation
// =============================================================================

/// Create an orbit simulation.
///
/// # Arguments
/// * `config` - Orbit configuration; `undefined` for the defaults
///
/// # Returns
/// Simulation ID; the simulation is stopped until `simulation_start`
#[wasm_bindgen]
pub fn orbit_create(config: JsValue) -> Result<u32, JsError> {
    let config: OrbitConfig = config_or_default(config)?;
    let simulation = OrbitSimulation::new(&config)?;
    Ok(with_registry(|registry| registry.insert(simulation)))
}

/// Create an orbit simulation from a named preset.
///
/// # Arguments
/// * `preset` - "earthAndMoon" or "solarSystem"
#[wasm_bindgen]
pub fn orbit_create_preset(preset: &str) -> Result<u32, JsError> {
    let config = match preset {
        "earthAndMoon" => OrbitConfig::earth_and_moon(),
        "solarSystem" => OrbitConfig::solar_system(),
        other => return Err(JsError::new(&format!("Unknown orbit preset: {other}"))),
    };
    let simulation = OrbitSimulation::new(&config)?;
    Ok(with_registry(|registry| registry.insert(simulation)))
}

/// Create a gravity field visualizer.
#[wasm_bindgen]
pub fn gravity_field_create(config: JsValue) -> Result<u32, JsError> {
    let config: GravityFieldConfig = config_or_default(config)?;
    let visualizer = GravityFieldVisualizer::new(&config)?;
    Ok(with_registry(|registry| registry.insert(visualizer)))
}

/// Create an electric field visualizer.
#[wasm_bindgen]
pub fn electric_field_create(config: JsValue) -> Result<u32, JsError> {
    let config: ElectricFieldConfig = config_or_default(config)?;
    let visualizer = ElectricFieldVisualizer::new(&config)?;
    Ok(with_registry(|registry| registry.insert(visualizer)))
}

/// Create a bar magnet simulation.
#[wasm_bindgen]
pub fn magnets_create(config: JsValue) -> Result<u32, JsError> {
    let config: MagnetSimulationConfig = config_or_default(config)?;
    let simulation = MagnetSimulation::new(&config)?;
    Ok(with_registry(|registry| registry.insert(simulation)))
}

/// Create a circuit editor holding the sample circuit.
#[wasm_bindgen]
pub fn circuit_create(config: JsValue) -> Result<u32, JsError> {
    let config: CircuitEditorConfig = config_or_default(config)?;
    let editor = CircuitEditor::new(&config)?;
    Ok(with_registry(|registry| registry.insert(editor)))
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Delete a simulation to free memory.
///
/// # Returns
/// `false` if no simulation had this ID
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) -> bool {
    with_registry(|registry| registry.remove(sim_id).is_some())
}

/// Kind of a simulation: "orbit", "gravityField", "electricField",
/// "magnets" or "circuit".
#[wasm_bindgen]
pub fn simulation_kind(sim_id: u32) -> Result<JsValue, JsError> {
    with_visualizer(sim_id, |visualizer| to_js(&visualizer.kind()))
}

/// Number of live simulations.
#[wasm_bindgen]
pub fn simulation_count() -> usize {
    with_registry(|registry| registry.len())
}

/// Start ticking at the next `simulation_advance`.
///
/// # Arguments
/// * `now_ms` - Host clock in milliseconds (e.g. `performance.now()`)
#[wasm_bindgen]
pub fn simulation_start(sim_id: u32, now_ms: f64) -> Result<(), JsError> {
    with_visualizer(sim_id, |visualizer| {
        visualizer.start(now_ms);
        Ok(())
    })
}

/// Stop ticking; state is kept.
#[wasm_bindgen]
pub fn simulation_stop(sim_id: u32) -> Result<(), JsError> {
    with_visualizer(sim_id, |visualizer| {
        visualizer.stop();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn simulation_is_running(sim_id: u32) -> Result<bool, JsError> {
    with_visualizer(sim_id, |visualizer| Ok(visualizer.is_running()))
}

/// Run one tick if the tick period has elapsed since the last one.
///
/// # Returns
/// Whether a tick ran
#[wasm_bindgen]
pub fn simulation_advance(sim_id: u32, now_ms: f64) -> Result<bool, JsError> {
    with_visualizer(sim_id, |visualizer| Ok(visualizer.advance(now_ms)))
}

/// Run exactly one tick, running or not.
#[wasm_bindgen]
pub fn simulation_step(sim_id: u32, now_ms: f64) -> Result<(), JsError> {
    with_visualizer(sim_id, |visualizer| {
        visualizer.step(now_ms);
        Ok(())
    })
}

/// Advance every running simulation from a single host timer.
///
/// # Returns
/// Number of simulations that ticked
#[wasm_bindgen]
pub fn simulation_advance_all(now_ms: f64) -> usize {
    with_registry(|registry| registry.advance_all(now_ms))
}

// =============================================================================
// Input
// =============================================================================

/// Pointer pressed at canvas pixel (x, y).
#[wasm_bindgen]
pub fn simulation_pointer_down(sim_id: u32, x: f64, y: f64) -> Result<(), JsError> {
    with_visualizer(sim_id, |visualizer| {
        Ok(visualizer.pointer_down(Point2::new(x, y))?)
    })
}

#[wasm_bindgen]
pub fn simulation_pointer_move(sim_id: u32, x: f64, y: f64) -> Result<(), JsError> {
    with_visualizer(sim_id, |visualizer| {
        Ok(visualizer.pointer_move(Point2::new(x, y))?)
    })
}

#[wasm_bindgen]
pub fn simulation_pointer_up(sim_id: u32, x: f64, y: f64) -> Result<(), JsError> {
    with_visualizer(sim_id, |visualizer| {
        Ok(visualizer.pointer_up(Point2::new(x, y))?)
    })
}

/// Pointer left the canvas or the gesture was interrupted.
#[wasm_bindgen]
pub fn simulation_pointer_cancel(sim_id: u32) -> Result<(), JsError> {
    with_visualizer(sim_id, |visualizer| {
        visualizer.pointer_cancel();
        Ok(())
    })
}

/// Zoom by a wheel delta; positive zooms out.
#[wasm_bindgen]
pub fn simulation_wheel(sim_id: u32, delta_y: f64) -> Result<(), JsError> {
    with_visualizer(sim_id, |visualizer| {
        visualizer.wheel(delta_y);
        Ok(())
    })
}

/// Canvas resized, in pixels.
#[wasm_bindgen]
pub fn simulation_resize(sim_id: u32, width: f64, height: f64) -> Result<(), JsError> {
    with_visualizer(sim_id, |visualizer| Ok(visualizer.resize(width, height)?))
}

/// Page visibility changed; hidden simulations skip rendering.
#[wasm_bindgen]
pub fn simulation_set_visible(sim_id: u32, visible: bool, now_ms: f64) -> Result<(), JsError> {
    with_visualizer(sim_id, |visualizer| {
        visualizer.set_visible(visible, now_ms);
        Ok(())
    })
}

// =============================================================================
// Output
// =============================================================================

/// Draw the current frame if the frame limiter allows it.
///
/// # Returns
/// A draw list (`{ commands: [...] }` in canvas pixels), or `null` when the
/// frame was skipped
#[wasm_bindgen]
pub fn simulation_render(sim_id: u32, now_ms: f64) -> Result<JsValue, JsError> {
    with_visualizer(sim_id, |visualizer| {
        let mut surface = DrawList::new();
        if visualizer.render(now_ms, &mut surface) {
            to_js(&surface)
        } else {
            Ok(JsValue::NULL)
        }
    })
}

/// Draw the current frame unconditionally.
#[wasm_bindgen]
pub fn simulation_draw(sim_id: u32) -> Result<JsValue, JsError> {
    with_visualizer(sim_id, |visualizer| {
        let mut surface = DrawList::new();
        visualizer.draw(&mut surface);
        to_js(&surface)
    })
}

/// Current state of a simulation, tagged with its `kind`.
#[wasm_bindgen]
pub fn simulation_snapshot(sim_id: u32) -> Result<JsValue, JsError> {
    with_visualizer(sim_id, |visualizer| to_js(&Snapshot::of(visualizer)))
}
