use crate::body::{Body, BodyId};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Complete state of an N-body system at a given time
///
/// Cloning a state gives an independent copy that can be integrated without
/// touching the original; path prediction relies on this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    /// Simulated time in seconds
    pub time: f64,
    pub bodies: Vec<Body>,
    /// Next available body ID
    next_id: u32,
}

impl SystemState {
    /// Creates an empty system
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::state::SystemState;
    ///
    /// let system = SystemState::new();
    /// assert_eq!(system.body_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new free body to the system and returns its ID
    ///
    /// # Arguments
    ///
    /// * `mass` - Body mass in kg
    /// * `radius` - Physical radius in m
    /// * `position` - Position in m
    /// * `velocity` - Velocity in m/s
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::state::SystemState;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let mut system = SystemState::new();
    /// let moon = system.add_body(7.35e22, 1.737e6, Point2::new(3.84e8, 0.0), Vector2::new(0.0, 1022.0));
    ///
    /// assert_eq!(system.body_count(), 1);
    /// assert_eq!(system.get_body(moon).unwrap().mass, 7.35e22);
    /// ```
    pub fn add_body(
        &mut self,
        mass: f64,
        radius: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    ) -> BodyId {
        self.insert(Body::new(
            mass,
            radius,
            [position.x, position.y],
            [velocity.x, velocity.y],
        ))
    }

    /// Inserts a prepared body, assigning it a fresh ID
    pub fn insert(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        self.bodies.push(body);
        id
    }

    /// Removes a body from the system
    ///
    /// # Returns
    ///
    /// The removed Body if found, None otherwise
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Mass-weighted mean position, `None` for an empty or massless system
    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        let total = self.total_mass();
        if total <= 0.0 {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .fold(Vector2::zeros(), |acc, b| acc + b.position.coords * b.mass);
        Some(Point2::from(weighted / total))
    }

    /// Returns the total momentum of all bodies
    ///
    /// This should stay constant for an isolated system without fixed bodies
    /// (useful for checking numerical drift)
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    pub fn total_angular_momentum(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.specific_angular_momentum() * b.mass)
            .sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }
}
