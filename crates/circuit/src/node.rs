//! Circuit nodes and their drawing geometry.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;

use geometry::{PointExt, normalize_angle};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Distance from a terminal's centre to the point where wires attach
pub const TERMINAL_OFFSET: f64 = 1.0;

const DEFAULT_WIDTH: f64 = 5.0;
const DEFAULT_HEIGHT: f64 = 3.0;

/// Arena index of a node in a [`Circuit`](crate::Circuit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resistor {
    /// Ohms, always positive and finite
    pub resistance: f64,
    /// Radians, either 0 or π/2
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    /// Zero-based position among the circuit's resistors, shown as `R{index + 1}`
    pub index: usize,
}

impl Resistor {
    pub fn new(resistance: f64, index: usize) -> Self {
        Self {
            resistance,
            rotation: 0.0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            index,
        }
    }

    pub fn label(&self) -> String {
        format!("R{}", self.index + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    Start,
    End,
    Resistor(Resistor),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub kind: NodeKind,
    pub position: Point2<f64>,
    /// Downstream nodes, in insertion order
    pub connections: Vec<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind, position: Point2<f64>) -> Self {
        Self {
            kind,
            position,
            connections: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Start | NodeKind::End)
    }

    pub fn resistor(&self) -> Option<&Resistor> {
        match &self.kind {
            NodeKind::Resistor(r) => Some(r),
            _ => None,
        }
    }

    pub fn resistor_mut(&mut self) -> Option<&mut Resistor> {
        match &mut self.kind {
            NodeKind::Resistor(r) => Some(r),
            _ => None,
        }
    }

    /// Corners of a resistor body as `[top_left, top_right, bottom_left,
    /// bottom_right]`, rotated about its position. Terminals have none.
    pub fn corner_points(&self) -> Option<[Point2<f64>; 4]> {
        let r = self.resistor()?;
        let half = Vector2::new(r.width / 2.0, r.height / 2.0);
        let p = self.position;
        Some(
            [
                Point2::new(p.x - half.x, p.y + half.y),
                Point2::new(p.x + half.x, p.y + half.y),
                Point2::new(p.x - half.x, p.y - half.y),
                Point2::new(p.x + half.x, p.y - half.y),
            ]
            .map(|corner| corner.rotate_around(&p, r.rotation)),
        )
    }

    /// Where an incoming wire attaches
    pub fn input_point(&self, from: &Point2<f64>) -> Point2<f64> {
        match self.corner_points() {
            Some([top_left, _, bottom_left, _]) => top_left.midpoint(&bottom_left),
            None => self.terminal_point(from),
        }
    }

    /// Where an outgoing wire leaves
    pub fn output_point(&self, to: &Point2<f64>) -> Point2<f64> {
        match self.corner_points() {
            Some([_, top_right, _, bottom_right]) => top_right.midpoint(&bottom_right),
            None => self.terminal_point(to),
        }
    }

    /// Attachment point on a terminal facing `other`: one of four points at
    /// [`TERMINAL_OFFSET`], picked by the quarter the direction falls into.
    pub fn terminal_point(&self, other: &Point2<f64>) -> Point2<f64> {
        let angle = normalize_angle(self.position.angle_to(other));
        let offset = if angle < FRAC_PI_4 || angle >= 2.0 * PI - FRAC_PI_4 {
            Vector2::new(TERMINAL_OFFSET, 0.0)
        } else if angle < FRAC_PI_2 + FRAC_PI_4 {
            Vector2::new(0.0, TERMINAL_OFFSET)
        } else if angle < PI + FRAC_PI_4 {
            Vector2::new(-TERMINAL_OFFSET, 0.0)
        } else {
            Vector2::new(0.0, -TERMINAL_OFFSET)
        };
        self.position + offset
    }
}
