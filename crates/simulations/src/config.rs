//! Serializable construction parameters for every visualization.
//!
//! Every field has a default, so a host may send a partial JSON object and
//! get the stock scene for everything it leaves out.

use circuit::Circuit;
use fieldlines::{ELEMENTARY_CHARGE, Source};
use nalgebra::Point2;
use nbody::body::Body;
use nbody::prediction::{DEFAULT_PREDICTION_DT, DEFAULT_PREDICTION_STEPS};
use nbody::trail::DEFAULT_TRAIL_CAPACITY;
use serde::{Deserialize, Serialize};
use viewport::{Camera, DeviceSize, Viewport};

use crate::error::{SimulationError, nonzero, positive};

fn point(xy: [f64; 2]) -> Point2<f64> {
    Point2::new(xy[0], xy[1])
}

// =============================================================================
// View
// =============================================================================

/// Initial camera and surface size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    /// World position in the middle of the surface
    pub center: [f64; 2],
    pub world_width: f64,
    pub world_height: f64,
    /// Surface width in pixels
    #[serde(default = "default_device_width")]
    pub device_width: f64,
    /// Surface height in pixels
    #[serde(default = "default_device_height")]
    pub device_height: f64,
}

fn default_device_width() -> f64 {
    800.0
}

fn default_device_height() -> f64 {
    600.0
}

impl ViewConfig {
    /// A view of `world_width × world_height` centred on `center`, on the
    /// default 800×600 surface
    pub fn new(center: [f64; 2], world_width: f64, world_height: f64) -> Self {
        Self {
            center,
            world_width,
            world_height,
            device_width: default_device_width(),
            device_height: default_device_height(),
        }
    }

    pub fn viewport<A: Clone>(&self) -> Result<Viewport<A>, SimulationError> {
        let camera = Camera::new(point(self.center), self.world_width, self.world_height)?;
        let device = DeviceSize::new(self.device_width, self.device_height)?;
        Ok(Viewport::new(camera, device))
    }
}

// =============================================================================
// Orbits
// =============================================================================

/// One body of an orbit or gravity field scene, in SI units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyConfig {
    #[serde(default)]
    pub name: String,
    /// kg
    pub mass: f64,
    /// m
    pub radius: f64,
    /// m
    pub position: [f64; 2],
    /// m/s
    #[serde(default)]
    pub velocity: [f64; 2],
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub ignore_for_calculation: bool,
}

impl BodyConfig {
    pub fn new(name: &str, mass: f64, radius: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self {
            name: name.to_string(),
            mass,
            radius,
            position,
            velocity,
            fixed: false,
            ignore_for_calculation: false,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn to_body(&self) -> Result<Body, SimulationError> {
        positive("body mass", self.mass)?;
        positive("body radius", self.radius)?;
        let mut body = Body::new(self.mass, self.radius, self.position, self.velocity)
            .named(self.name.clone());
        body.fixed = self.fixed;
        body.ignore_for_calculation = self.ignore_for_calculation;
        Ok(body)
    }

    /// The body as a field source; its mass is the source strength
    pub fn to_source(&self) -> Result<Source, SimulationError> {
        Ok(Source::new(
            point(self.position),
            positive("body mass", self.mass)?,
            positive("body radius", self.radius)?,
        ))
    }
}

fn earth_and_moon_bodies() -> Vec<BodyConfig> {
    vec![
        BodyConfig::new("Earth", 5.972e24, 6.371e6, [0.0, 0.0], [0.0, 0.0]).pinned(),
        BodyConfig::new("Moon", 7.342e22, 1.737e6, [3.844e8, 0.0], [0.0, 1022.0]),
    ]
}

/// Parameters of the N-body orbit visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitConfig {
    /// Simulated seconds per real second
    #[serde(default = "default_time_warp")]
    pub time_warp: f64,
    /// Shows the Edit button
    #[serde(default)]
    pub editing: bool,
    /// Points kept per trail
    #[serde(default = "default_trail_capacity")]
    pub trail_capacity: usize,
    /// Timestep of the edit-mode path preview, in seconds
    #[serde(default = "default_prediction_dt")]
    pub prediction_dt: f64,
    #[serde(default = "default_prediction_steps")]
    pub prediction_steps: usize,
    #[serde(default = "earth_and_moon_bodies")]
    pub bodies: Vec<BodyConfig>,
    #[serde(default = "default_orbit_view")]
    pub view: ViewConfig,
}

fn default_time_warp() -> f64 {
    1.0
}

fn default_trail_capacity() -> usize {
    DEFAULT_TRAIL_CAPACITY
}

fn default_prediction_dt() -> f64 {
    DEFAULT_PREDICTION_DT
}

fn default_prediction_steps() -> usize {
    DEFAULT_PREDICTION_STEPS
}

fn default_orbit_view() -> ViewConfig {
    ViewConfig::new([0.0, 0.0], 1.0e9, 7.5e8)
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            time_warp: default_time_warp(),
            editing: false,
            trail_capacity: default_trail_capacity(),
            prediction_dt: default_prediction_dt(),
            prediction_steps: default_prediction_steps(),
            bodies: earth_and_moon_bodies(),
            view: default_orbit_view(),
        }
    }
}

impl OrbitConfig {
    /// The Moon around a pinned Earth, one lunar month in about 24 s
    pub fn earth_and_moon() -> Self {
        Self {
            time_warp: 1.0e5,
            editing: true,
            ..Self::default()
        }
    }

    /// The inner planets around a pinned Sun, ten days per second.
    ///
    /// Radii are enlarged so the bodies stay visible at this scale.
    pub fn solar_system() -> Self {
        Self {
            time_warp: 864_000.0,
            editing: true,
            bodies: vec![
                BodyConfig::new("Sun", 1.989e30, 7.0e9, [0.0, 0.0], [0.0, 0.0]).pinned(),
                BodyConfig::new("Mercury", 3.301e23, 1.5e9, [5.79e10, 0.0], [0.0, 47_360.0]),
                BodyConfig::new("Venus", 4.867e24, 2.0e9, [1.082e11, 0.0], [0.0, 35_020.0]),
                BodyConfig::new("Earth", 5.972e24, 2.0e9, [1.496e11, 0.0], [0.0, 29_780.0]),
                BodyConfig::new("Mars", 6.417e23, 1.5e9, [2.279e11, 0.0], [0.0, 24_070.0]),
            ],
            view: ViewConfig::new([0.0, 0.0], 6.0e11, 4.5e11),
            ..Self::default()
        }
    }
}

// =============================================================================
// Gravitational field
// =============================================================================

/// Parameters of the gravitational field-line visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GravityFieldConfig {
    /// Seeds on each half circle around the barycentre
    #[serde(default = "default_lines_per_side")]
    pub lines_per_side: usize,
    /// Radius of the seed circle, in m
    #[serde(default = "default_gravity_start_distance")]
    pub start_distance: f64,
    #[serde(default = "default_gravity_step")]
    pub step_distance: f64,
    #[serde(default = "default_gravity_max_steps")]
    pub max_steps: usize,
    /// Colours lines by field strength instead of drawing them black
    #[serde(default)]
    pub colored: bool,
    /// Samples between arrowheads
    #[serde(default = "default_arrow_spacing")]
    pub arrow_spacing: usize,
    #[serde(default = "default_gravity_arrow_length")]
    pub arrow_length: f64,
    #[serde(default = "default_gravity_probe")]
    pub probe_position: [f64; 2],
    #[serde(default = "default_gravity_probe_radius")]
    pub probe_radius: f64,
    /// Length of the arrow showing the field direction at the probe
    #[serde(default = "default_gravity_probe_arrow")]
    pub probe_arrow_length: f64,
    #[serde(default = "default_field_bodies")]
    pub bodies: Vec<BodyConfig>,
    #[serde(default = "default_gravity_view")]
    pub view: ViewConfig,
}

fn default_lines_per_side() -> usize {
    50
}

fn default_gravity_start_distance() -> f64 {
    1.0e8
}

fn default_gravity_step() -> f64 {
    1.0e6
}

fn default_gravity_max_steps() -> usize {
    200
}

fn default_arrow_spacing() -> usize {
    20
}

fn default_gravity_arrow_length() -> f64 {
    1.0e6
}

fn default_gravity_probe() -> [f64; 2] {
    [0.0, 4.0e7]
}

fn default_gravity_probe_radius() -> f64 {
    1.0e6
}

fn default_gravity_probe_arrow() -> f64 {
    5.0e6
}

fn default_field_bodies() -> Vec<BodyConfig> {
    vec![
        BodyConfig::new("Earth", 5.972e24, 6.371e6, [-1.5e7, 0.0], [0.0, 0.0]),
        BodyConfig::new("Moon", 7.342e22, 1.737e6, [3.0e7, 0.0], [0.0, 0.0]),
    ]
}

fn default_gravity_view() -> ViewConfig {
    ViewConfig::new([0.0, 0.0], 3.0e8, 2.25e8)
}

impl Default for GravityFieldConfig {
    fn default() -> Self {
        Self {
            lines_per_side: default_lines_per_side(),
            start_distance: default_gravity_start_distance(),
            step_distance: default_gravity_step(),
            max_steps: default_gravity_max_steps(),
            colored: false,
            arrow_spacing: default_arrow_spacing(),
            arrow_length: default_gravity_arrow_length(),
            probe_position: default_gravity_probe(),
            probe_radius: default_gravity_probe_radius(),
            probe_arrow_length: default_gravity_probe_arrow(),
            bodies: default_field_bodies(),
            view: default_gravity_view(),
        }
    }
}

// =============================================================================
// Electric field
// =============================================================================

/// A point charge, in C and m
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeConfig {
    pub charge: f64,
    pub radius: f64,
    pub position: [f64; 2],
}

impl ChargeConfig {
    pub fn to_source(&self) -> Result<Source, SimulationError> {
        Ok(Source::new(
            point(self.position),
            nonzero("charge", self.charge)?,
            positive("charge radius", self.radius)?,
        ))
    }
}

/// Parameters of the electric field-line visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricFieldConfig {
    #[serde(default = "default_lines_per_charge")]
    pub lines_per_charge: usize,
    #[serde(default = "default_electric_step")]
    pub step_distance: f64,
    #[serde(default = "default_electric_max_steps")]
    pub max_steps: usize,
    #[serde(default)]
    pub colored: bool,
    #[serde(default = "default_arrow_spacing")]
    pub arrow_spacing: usize,
    #[serde(default = "default_electric_arrow_length")]
    pub arrow_length: f64,
    /// Draggable test charge
    #[serde(default = "default_test_charge")]
    pub probe: ChargeConfig,
    #[serde(default = "default_electric_probe_arrow")]
    pub probe_arrow_length: f64,
    #[serde(default = "default_charges")]
    pub charges: Vec<ChargeConfig>,
    #[serde(default = "default_electric_view")]
    pub view: ViewConfig,
}

fn default_lines_per_charge() -> usize {
    25
}

fn default_electric_step() -> f64 {
    1.0e-16
}

fn default_electric_max_steps() -> usize {
    700
}

fn default_electric_arrow_length() -> f64 {
    4.0e-16
}

fn default_test_charge() -> ChargeConfig {
    ChargeConfig {
        charge: ELEMENTARY_CHARGE,
        radius: 2.18e-16,
        position: [0.0, 4.7e-15],
    }
}

fn default_electric_probe_arrow() -> f64 {
    8.0e-16
}

fn default_charges() -> Vec<ChargeConfig> {
    vec![
        ChargeConfig {
            charge: -ELEMENTARY_CHARGE,
            radius: 8.0e-16,
            position: [-3.0e-15, 0.0],
        },
        ChargeConfig {
            charge: ELEMENTARY_CHARGE,
            radius: 8.0e-16,
            position: [3.0e-15, 0.0],
        },
    ]
}

fn default_electric_view() -> ViewConfig {
    ViewConfig::new([0.0, 0.0], 2.0e-14, 1.5e-14)
}

impl Default for ElectricFieldConfig {
    fn default() -> Self {
        Self {
            lines_per_charge: default_lines_per_charge(),
            step_distance: default_electric_step(),
            max_steps: default_electric_max_steps(),
            colored: false,
            arrow_spacing: default_arrow_spacing(),
            arrow_length: default_electric_arrow_length(),
            probe: default_test_charge(),
            probe_arrow_length: default_electric_probe_arrow(),
            charges: default_charges(),
            view: default_electric_view(),
        }
    }
}

// =============================================================================
// Magnets
// =============================================================================

/// A bar magnet with its north pole on the left before rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnetConfig {
    pub center: [f64; 2],
    /// Radians, counter-clockwise
    #[serde(default)]
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    /// Pole strength in ampere-metres
    #[serde(default = "default_north_strength")]
    pub north_strength: f64,
    #[serde(default = "default_south_strength")]
    pub south_strength: f64,
    #[serde(default = "default_permeability")]
    pub permeability: f64,
    #[serde(default = "default_magnet_mass")]
    pub mass: f64,
}

fn default_north_strength() -> f64 {
    80.0
}

fn default_south_strength() -> f64 {
    -80.0
}

fn default_permeability() -> f64 {
    fieldlines::law::DEFAULT_PERMEABILITY
}

fn default_magnet_mass() -> f64 {
    1.0
}

impl MagnetConfig {
    pub fn new(center: [f64; 2], width: f64, height: f64) -> Self {
        Self {
            center,
            rotation: 0.0,
            width,
            height,
            north_strength: default_north_strength(),
            south_strength: default_south_strength(),
            permeability: default_permeability(),
            mass: default_magnet_mass(),
        }
    }
}

/// Parameters of the magnet visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnetSimulationConfig {
    #[serde(default = "default_magnets")]
    pub magnets: Vec<MagnetConfig>,
    /// Edge seeds per magnet
    #[serde(default = "default_seeds_per_magnet")]
    pub seeds_per_magnet: usize,
    #[serde(default = "default_magnet_step")]
    pub step_distance: f64,
    #[serde(default = "default_magnet_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_magnet_arrow_spacing")]
    pub arrow_spacing: usize,
    #[serde(default = "default_magnet_arrow_length")]
    pub arrow_length: f64,
    #[serde(default = "default_compass_position")]
    pub compass_position: [f64; 2],
    #[serde(default = "default_compass_radius")]
    pub compass_radius: f64,
    /// Fraction of its velocity a magnet keeps after each tick
    #[serde(default = "default_friction")]
    pub friction: f64,
    #[serde(default = "default_magnet_view")]
    pub view: ViewConfig,
}

fn default_magnets() -> Vec<MagnetConfig> {
    vec![
        MagnetConfig::new([-0.04, 0.02], 0.04, 0.012),
        MagnetConfig::new([0.04, 0.02], 0.04, 0.012),
    ]
}

fn default_seeds_per_magnet() -> usize {
    20
}

fn default_magnet_step() -> f64 {
    0.0008
}

fn default_magnet_max_steps() -> usize {
    2000
}

fn default_magnet_arrow_spacing() -> usize {
    50
}

fn default_magnet_arrow_length() -> f64 {
    0.0025
}

fn default_compass_position() -> [f64; 2] {
    [0.0, -0.025]
}

fn default_compass_radius() -> f64 {
    0.01
}

fn default_friction() -> f64 {
    0.99
}

fn default_magnet_view() -> ViewConfig {
    ViewConfig::new([0.0, 0.0], 0.2, 0.15)
}

impl Default for MagnetSimulationConfig {
    fn default() -> Self {
        Self {
            magnets: default_magnets(),
            seeds_per_magnet: default_seeds_per_magnet(),
            step_distance: default_magnet_step(),
            max_steps: default_magnet_max_steps(),
            arrow_spacing: default_magnet_arrow_spacing(),
            arrow_length: default_magnet_arrow_length(),
            compass_position: default_compass_position(),
            compass_radius: default_compass_radius(),
            friction: default_friction(),
            view: default_magnet_view(),
        }
    }
}

// =============================================================================
// Circuit editor
// =============================================================================

/// Parameters of the circuit editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitEditorConfig {
    /// Voltage across the terminals, used for the per-resistor readings
    #[serde(default = "default_voltage")]
    pub voltage: f64,
    /// Resistance of resistors placed in add mode, in ohms
    #[serde(default = "default_new_resistance")]
    pub new_resistance: f64,
    #[serde(default = "default_circuit_view")]
    pub view: ViewConfig,
}

fn default_voltage() -> f64 {
    10.0
}

fn default_new_resistance() -> f64 {
    100.0
}

fn default_circuit_view() -> ViewConfig {
    ViewConfig::new([7.5, -2.0], 50.0, 37.5)
}

impl Default for CircuitEditorConfig {
    fn default() -> Self {
        Self {
            voltage: default_voltage(),
            new_resistance: default_new_resistance(),
            view: default_circuit_view(),
        }
    }
}

impl CircuitEditorConfig {
    /// Five resistors: R1 feeding R2, R3 and R4 in parallel, the whole
    /// branch in parallel with R5
    pub fn sample_circuit() -> Result<Circuit, SimulationError> {
        let mut circuit = Circuit::new(Point2::new(-5.0, 5.0), Point2::new(20.0, 0.5));
        let r1 = circuit.add_resistor(Point2::new(1.5, 7.5), 200.0)?;
        let r2 = circuit.add_resistor(Point2::new(10.0, 5.0), 100.0)?;
        let r3 = circuit.add_resistor(Point2::new(10.0, 0.0), 125.0)?;
        let r4 = circuit.add_resistor(Point2::new(10.0, -5.0), 500.0)?;
        let r5 = circuit.add_resistor(Point2::new(5.0, -12.0), 1000.0)?;
        let (start, end) = (circuit.start(), circuit.end());
        for (from, to) in [
            (start, r1),
            (start, r5),
            (r1, r2),
            (r1, r3),
            (r1, r4),
            (r2, end),
            (r3, end),
            (r4, end),
            (r5, end),
        ] {
            circuit.add_connection(from, to)?;
        }
        Ok(circuit)
    }
}

pub(crate) fn to_point(xy: [f64; 2]) -> Point2<f64> {
    point(xy)
}
