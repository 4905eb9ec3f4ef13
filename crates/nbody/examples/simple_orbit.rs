//! Earth around a pinned Sun, in SI units.
//!
//! Drives the stepper from a fake 25 ms frame timer through the averaged
//! clock, records trails and compares against a path prediction.
//!
//! Run with: cargo run --package nbody --example simple_orbit

use nalgebra::{Point2, Vector2};
use nbody::body::Body;
use nbody::clock::AveragedClock;
use nbody::forces::{ForceModel, G, PairwiseGravity};
use nbody::integrator::{Integrator, SemiImplicitEuler};
use nbody::prediction::predict_paths;
use nbody::state::SystemState;
use nbody::trail::TrailRecorder;

const SUN_MASS: f64 = 1.989e30;
const EARTH_MASS: f64 = 5.972e24;
const AU: f64 = 1.496e11;

fn main() {
    println!("N-body stepper: Earth orbit\n");
    println!("{}", "=".repeat(60));

    let mut system = SystemState::new();
    system.insert(Body::new(SUN_MASS, 6.96e8, [0.0, 0.0], [0.0, 0.0]).named("Sun").pinned());
    let v_circular = (G * SUN_MASS / AU).sqrt();
    let earth = system.add_body(
        EARTH_MASS,
        6.371e6,
        Point2::new(AU, 0.0),
        Vector2::new(0.0, v_circular),
    );

    let force = PairwiseGravity::new();
    let integrator = SemiImplicitEuler;
    let initial_energy = system.kinetic_energy() + force.potential_energy(&system);
    let initial_l = system.total_angular_momentum();

    println!("Circular velocity: {:.1} m/s", v_circular);
    println!("Initial energy: {:.6e} J", initial_energy);

    // One simulated day per real 25 ms frame
    let mut clock = AveragedClock::new(86_400.0 / 0.025);
    let mut trails = TrailRecorder::default();

    let frames = 365;
    let mut now_ms = 0.0;
    for frame in 0..=frames {
        // Jittery timer
        now_ms += if frame % 2 == 0 { 20.0 } else { 30.0 };
        let Some(dt) = clock.tick(now_ms) else {
            continue;
        };
        integrator.step(&mut system, dt, &force);
        trails.record(&system);

        if frame % 73 == 0 {
            let Some(body) = system.get_body(earth) else {
                break;
            };
            println!(
                "t = {:6.1} d: r = {:.4} AU, v = {:.1} m/s",
                system.time / 86_400.0,
                body.position.coords.magnitude() / AU,
                body.speed()
            );
        }
    }

    let energy = system.kinetic_energy() + force.potential_energy(&system);
    let l = system.total_angular_momentum();

    println!("\n{}", "=".repeat(60));
    println!("Average frame: {:.2} ms", clock.average_dt() * 1000.0);
    println!(
        "Trail points: {}",
        trails.trail(earth).map(|t| t.len()).unwrap_or(0)
    );
    println!(
        "Energy error: {:.2e}",
        ((energy - initial_energy) / initial_energy).abs()
    );
    println!(
        "Angular momentum error: {:.2e}",
        ((l - initial_l) / initial_l).abs()
    );

    let paths = predict_paths(&system, &integrator, &force, 10_000.0, 2000);
    if let Some(path) = paths.iter().find(|p| p.id == earth) {
        if let Some(end) = path.points.last() {
            println!(
                "Predicted position in {:.0} days: ({:.3}, {:.3}) AU",
                10_000.0 * 2000.0 / 86_400.0,
                end.x / AU,
                end.y / AU
            );
        }
    }
}
