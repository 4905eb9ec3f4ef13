use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub id: BodyId,
    #[serde(default)]
    pub name: String,
    pub mass: f64,              // kg
    pub radius: f64,            // m
    pub position: Point2<f64>,  // m
    pub velocity: Vector2<f64>, // m/s
    /// Pinned in place: neither accelerates nor moves
    #[serde(default)]
    pub fixed: bool,
    /// Exerts no gravity on other bodies (test particles)
    #[serde(default)]
    pub ignore_for_calculation: bool,
}

impl Body {
    /// Creates an unnamed, free body.
    ///
    /// The id is a placeholder until the body is inserted into a
    /// [`SystemState`](crate::state::SystemState).
    ///
    /// ```
    /// use nbody::body::Body;
    ///
    /// let earth = Body::new(5.972e24, 6.371e6, [0.0, 0.0], [0.0, 0.0]);
    /// assert!(!earth.fixed);
    /// assert_eq!(earth.momentum().magnitude(), 0.0);
    /// ```
    pub fn new(mass: f64, radius: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Body {
            id: BodyId(0),
            name: String::new(),
            mass,
            radius,
            position: Point2::new(position[0], position[1]),
            velocity: Vector2::new(velocity[0], velocity[1]),
            fixed: false,
            ignore_for_calculation: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn pinned(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore_for_calculation = true;
        self
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Angular momentum about the origin (z component, per unit mass)
    pub fn specific_angular_momentum(&self) -> f64 {
        self.position.x * self.velocity.y - self.position.y * self.velocity.x
    }
}
