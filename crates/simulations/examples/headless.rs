//! Runs every visualization for a few simulated seconds without a display,
//! recording each frame into a draw list.
//!
//! Run with: RUST_LOG=debug cargo run --package simulations --example headless

use simulations::{
    CircuitEditor, CircuitEditorConfig, ElectricFieldConfig, ElectricFieldVisualizer,
    GravityFieldConfig, GravityFieldVisualizer, MagnetSimulation, MagnetSimulationConfig,
    OrbitConfig, OrbitSimulation, Scheduler, SimulationError, Visualization, format_duration,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use viewport::DrawList;

const RUN_MS: f64 = 2_000.0;
/// Host timer resolution; the scheduler decides which calls tick
const TIMER_MS: f64 = 4.0;

/// Drives `scheduler` for [`RUN_MS`] and returns the frames drawn and the
/// size of the last one
fn run<V: Visualization>(scheduler: &mut Scheduler<V>) -> (usize, usize) {
    let mut surface = DrawList::new();
    let mut frames = 0;
    let mut now_ms = 0.0;
    scheduler.start(now_ms);
    while now_ms <= RUN_MS {
        if scheduler.advance(now_ms) && scheduler.simulation_mut().render(now_ms, &mut surface) {
            frames += 1;
        }
        now_ms += TIMER_MS;
    }
    scheduler.stop();
    (frames, surface.len())
}

fn report<V: Visualization>(name: &str, simulation: V) {
    let mut scheduler = Scheduler::new(simulation);
    let (frames, commands) = run(&mut scheduler);
    println!(
        "{name:<16} {:>4} ticks {frames:>4} frames, {commands:>6} commands in the last frame",
        scheduler.ticks()
    );
}

fn main() -> Result<(), SimulationError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Headless run of {} s per visualization\n", RUN_MS / 1000.0);

    let orbit = OrbitSimulation::new(&OrbitConfig::earth_and_moon())?;
    let mut scheduler = Scheduler::new(orbit);
    let (frames, commands) = run(&mut scheduler);
    let orbit = scheduler.into_inner();
    println!(
        "{:<16} {frames:>4} frames, {commands:>6} commands in the last frame, simulated {}",
        "orbit",
        format_duration(orbit.state().time)
    );

    report("gravity field", GravityFieldVisualizer::new(&GravityFieldConfig::default())?);
    report("electric field", ElectricFieldVisualizer::new(&ElectricFieldConfig::default())?);
    report("magnets", MagnetSimulation::new(&MagnetSimulationConfig::default())?);

    let editor = CircuitEditor::new(&CircuitEditorConfig::default())?;
    match editor.solution() {
        Some(solution) => {
            println!(
                "\ncircuit: {} = {:.2} Ω, {:.4} A at {} V",
                editor.expression().unwrap_or_default(),
                solution.equivalent_resistance,
                solution.total_current,
                solution.voltage
            );
            for line in editor.equations() {
                println!("  {line}");
            }
            for reading in &solution.resistors {
                println!(
                    "  R{}: {:.3} V, {:.5} A",
                    reading.index + 1,
                    reading.voltage,
                    reading.current
                );
            }
        }
        None => println!("\ncircuit: no equivalent resistance"),
    }
    report("circuit editor", editor);

    Ok(())
}
