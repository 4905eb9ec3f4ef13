//! Edit entry points for form controls outside the canvas.

use circuit::NodeId;
use nalgebra::{Point2, Vector2};
use nbody::body::BodyId;
use wasm_bindgen::prelude::*;

use simulations::{
    BodyConfig, ChargeConfig, CircuitEditor, EditMode, ElectricFieldVisualizer,
    GravityFieldVisualizer, MagnetConfig, MagnetSimulation, OrbitSimulation,
};

use crate::{from_js, to_js, with_simulation};

// =============================================================================
// Orbit
// =============================================================================

/// Add a body to an orbit simulation.
///
/// # Arguments
/// * `body` - `{ name, mass, radius, position: [x, y], velocity: [x, y] }`
///   in kg, m and m/s
///
/// # Returns
/// ID of the new body
#[wasm_bindgen]
pub fn orbit_add_body(sim_id: u32, body: JsValue) -> Result<u32, JsError> {
    let body: BodyConfig = from_js(body)?;
    with_simulation(sim_id, |simulation: &mut OrbitSimulation| {
        Ok(simulation.add_body(&body)?.0)
    })
}

/// Remove a body from an orbit simulation.
///
/// # Returns
/// The removed body
#[wasm_bindgen]
pub fn orbit_remove_body(sim_id: u32, body_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |simulation: &mut OrbitSimulation| {
        to_js(&simulation.remove_body(BodyId(body_id))?)
    })
}

#[wasm_bindgen]
pub fn orbit_set_body_position(sim_id: u32, body_id: u32, x: f64, y: f64) -> Result<(), JsError> {
    with_simulation(sim_id, |simulation: &mut OrbitSimulation| {
        Ok(simulation.set_body_position(BodyId(body_id), Point2::new(x, y))?)
    })
}

#[wasm_bindgen]
pub fn orbit_set_body_velocity(
    sim_id: u32,
    body_id: u32,
    vx: f64,
    vy: f64,
) -> Result<(), JsError> {
    with_simulation(sim_id, |simulation: &mut OrbitSimulation| {
        Ok(simulation.set_body_velocity(BodyId(body_id), Vector2::new(vx, vy))?)
    })
}

/// Simulated seconds per real second.
#[wasm_bindgen]
pub fn orbit_set_time_warp(sim_id: u32, time_warp: f64) -> Result<(), JsError> {
    with_simulation(sim_id, |simulation: &mut OrbitSimulation| {
        Ok(simulation.set_time_warp(time_warp)?)
    })
}

/// Pause or resume the physics.
///
/// # Returns
/// Whether the simulation is now paused
#[wasm_bindgen]
pub fn orbit_toggle_pause(sim_id: u32) -> Result<bool, JsError> {
    with_simulation(sim_id, |simulation: &mut OrbitSimulation| {
        simulation.toggle_pause();
        Ok(simulation.is_paused())
    })
}

/// Enter or leave edit mode.
///
/// # Returns
/// Whether the simulation is now editing
#[wasm_bindgen]
pub fn orbit_toggle_edit(sim_id: u32) -> Result<bool, JsError> {
    with_simulation(sim_id, |simulation: &mut OrbitSimulation| {
        simulation.toggle_edit();
        Ok(simulation.is_editing())
    })
}

#[wasm_bindgen]
pub fn orbit_set_show_trails(sim_id: u32, show: bool) -> Result<(), JsError> {
    with_simulation(sim_id, |simulation: &mut OrbitSimulation| {
        simulation.set_show_trails(show);
        Ok(())
    })
}

// =============================================================================
// Gravity field
// =============================================================================

/// Add an attracting body; returns its index.
#[wasm_bindgen]
pub fn gravity_field_add_body(sim_id: u32, body: JsValue) -> Result<usize, JsError> {
    let body: BodyConfig = from_js(body)?;
    with_simulation(sim_id, |visualizer: &mut GravityFieldVisualizer| {
        Ok(visualizer.add_body(&body)?)
    })
}

#[wasm_bindgen]
pub fn gravity_field_remove_body(sim_id: u32, index: usize) -> Result<(), JsError> {
    with_simulation(sim_id, |visualizer: &mut GravityFieldVisualizer| {
        visualizer.remove_body(index)?;
        Ok(())
    })
}

#[wasm_bindgen]
pub fn gravity_field_move_body(sim_id: u32, index: usize, x: f64, y: f64) -> Result<(), JsError> {
    with_simulation(sim_id, |visualizer: &mut GravityFieldVisualizer| {
        Ok(visualizer.move_body(index, Point2::new(x, y))?)
    })
}

/// Color field lines by magnitude instead of plain white.
#[wasm_bindgen]
pub fn gravity_field_set_colored(sim_id: u32, colored: bool) -> Result<(), JsError> {
    with_simulation(sim_id, |visualizer: &mut GravityFieldVisualizer| {
        visualizer.set_colored(colored);
        Ok(())
    })
}

// =============================================================================
// Electric field
// =============================================================================

/// Add a point charge; returns its index.
///
/// # Arguments
/// * `charge` - `{ position: [x, y], charge, radius }`
#[wasm_bindgen]
pub fn electric_field_add_charge(sim_id: u32, charge: JsValue) -> Result<usize, JsError> {
    let charge: ChargeConfig = from_js(charge)?;
    with_simulation(sim_id, |visualizer: &mut ElectricFieldVisualizer| {
        Ok(visualizer.add_charge(&charge)?)
    })
}

#[wasm_bindgen]
pub fn electric_field_remove_charge(sim_id: u32, index: usize) -> Result<(), JsError> {
    with_simulation(sim_id, |visualizer: &mut ElectricFieldVisualizer| {
        visualizer.remove_charge(index)?;
        Ok(())
    })
}

#[wasm_bindgen]
pub fn electric_field_move_charge(
    sim_id: u32,
    index: usize,
    x: f64,
    y: f64,
) -> Result<(), JsError> {
    with_simulation(sim_id, |visualizer: &mut ElectricFieldVisualizer| {
        Ok(visualizer.move_charge(index, Point2::new(x, y))?)
    })
}

#[wasm_bindgen]
pub fn electric_field_set_colored(sim_id: u32, colored: bool) -> Result<(), JsError> {
    with_simulation(sim_id, |visualizer: &mut ElectricFieldVisualizer| {
        visualizer.set_colored(colored);
        Ok(())
    })
}

// =============================================================================
// Magnets
// =============================================================================

/// Add a bar magnet; returns its index.
#[wasm_bindgen]
pub fn magnets_add(sim_id: u32, magnet: JsValue) -> Result<usize, JsError> {
    let magnet: MagnetConfig = from_js(magnet)?;
    with_simulation(sim_id, |simulation: &mut MagnetSimulation| {
        Ok(simulation.add_magnet(&magnet)?)
    })
}

#[wasm_bindgen]
pub fn magnets_remove(sim_id: u32, index: usize) -> Result<(), JsError> {
    with_simulation(sim_id, |simulation: &mut MagnetSimulation| {
        simulation.remove_magnet(index)?;
        Ok(())
    })
}

/// Rotation in radians, counter-clockwise.
#[wasm_bindgen]
pub fn magnets_set_rotation(sim_id: u32, index: usize, rotation: f64) -> Result<(), JsError> {
    with_simulation(sim_id, |simulation: &mut MagnetSimulation| {
        Ok(simulation.set_rotation(index, rotation)?)
    })
}

#[wasm_bindgen]
pub fn magnets_set_paused(sim_id: u32, paused: bool) -> Result<(), JsError> {
    with_simulation(sim_id, |simulation: &mut MagnetSimulation| {
        simulation.set_paused(paused);
        Ok(())
    })
}

// =============================================================================
// Circuit
// =============================================================================

/// Switch the editing mode.
///
/// # Arguments
/// * `mode` - "add", "edit", "connect", "rotate", "delete", or `null` to
///   leave editing
#[wasm_bindgen]
pub fn circuit_set_mode(sim_id: u32, mode: JsValue) -> Result<(), JsError> {
    let mode: Option<EditMode> = from_js(mode)?;
    with_simulation(sim_id, |editor: &mut CircuitEditor| {
        editor.set_mode(mode);
        Ok(())
    })
}

/// Apply the value typed for the resistor picked in edit mode.
///
/// Fails without clearing the selection when the value is not a positive
/// number, so the page can ask again.
#[wasm_bindgen]
pub fn circuit_submit_resistance(sim_id: u32, resistance: f64) -> Result<(), JsError> {
    with_simulation(sim_id, |editor: &mut CircuitEditor| {
        Ok(editor.submit_resistance(resistance)?)
    })
}

/// Add an unconnected resistor; returns its node ID.
#[wasm_bindgen]
pub fn circuit_add_resistor(
    sim_id: u32,
    x: f64,
    y: f64,
    resistance: f64,
) -> Result<usize, JsError> {
    with_simulation(sim_id, |editor: &mut CircuitEditor| {
        Ok(editor.add_resistor(Point2::new(x, y), resistance)?.0)
    })
}

#[wasm_bindgen]
pub fn circuit_remove_resistor(sim_id: u32, node: usize) -> Result<(), JsError> {
    with_simulation(sim_id, |editor: &mut CircuitEditor| {
        Ok(editor.remove_resistor(NodeId(node))?)
    })
}

/// Wire `from`'s output to `to`'s input.
#[wasm_bindgen]
pub fn circuit_connect(sim_id: u32, from: usize, to: usize) -> Result<(), JsError> {
    with_simulation(sim_id, |editor: &mut CircuitEditor| {
        Ok(editor.connect(NodeId(from), NodeId(to))?)
    })
}

#[wasm_bindgen]
pub fn circuit_disconnect(sim_id: u32, from: usize, to: usize) -> Result<(), JsError> {
    with_simulation(sim_id, |editor: &mut CircuitEditor| {
        Ok(editor.disconnect(NodeId(from), NodeId(to))?)
    })
}

/// Toggle a resistor between horizontal and vertical.
///
/// # Returns
/// The new rotation in radians
#[wasm_bindgen]
pub fn circuit_rotate(sim_id: u32, node: usize) -> Result<f64, JsError> {
    with_simulation(sim_id, |editor: &mut CircuitEditor| {
        Ok(editor.rotate(NodeId(node))?)
    })
}

#[wasm_bindgen]
pub fn circuit_set_resistance(sim_id: u32, node: usize, resistance: f64) -> Result<(), JsError> {
    with_simulation(sim_id, |editor: &mut CircuitEditor| {
        Ok(editor.set_resistance(NodeId(node), resistance)?)
    })
}

/// Voltage applied across the terminals when solving.
#[wasm_bindgen]
pub fn circuit_set_voltage(sim_id: u32, voltage: f64) -> Result<(), JsError> {
    with_simulation(sim_id, |editor: &mut CircuitEditor| {
        Ok(editor.set_voltage(voltage)?)
    })
}

/// Per-resistor voltages and currents.
///
/// # Returns
/// The solution, or `null` while the circuit cannot be reduced
#[wasm_bindgen]
pub fn circuit_solution(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |editor: &mut CircuitEditor| match editor.solution() {
        Some(solution) => to_js(&solution),
        None => Ok(JsValue::NULL),
    })
}
