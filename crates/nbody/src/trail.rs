//! Position history behind each body.

use std::collections::{HashMap, VecDeque};

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::body::BodyId;
use crate::state::SystemState;

/// Default number of points kept per trail
pub const DEFAULT_TRAIL_CAPACITY: usize = 1000;

/// Bounded ring buffer of past positions, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Point2<f64>>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a point, evicting the oldest one when full
    pub fn push(&mut self, point: Point2<f64>) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn points(&self) -> impl Iterator<Item = &Point2<f64>> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Trails for every body, sampled on every other physics tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailRecorder {
    trails: HashMap<BodyId, Trail>,
    capacity: usize,
    odd_tick: bool,
}

impl TrailRecorder {
    pub fn new(capacity: usize) -> Self {
        Self {
            trails: HashMap::new(),
            capacity,
            odd_tick: false,
        }
    }

    /// Called once per physics tick; records positions on every second call.
    /// Returns whether this tick was recorded.
    pub fn record(&mut self, state: &SystemState) -> bool {
        self.odd_tick = !self.odd_tick;
        if self.odd_tick {
            return false;
        }
        for body in &state.bodies {
            let capacity = self.capacity;
            self.trails
                .entry(body.id)
                .or_insert_with(|| Trail::new(capacity))
                .push(body.position);
        }
        self.trails.retain(|id, _| state.get_body(*id).is_some());
        true
    }

    pub fn trail(&self, id: BodyId) -> Option<&Trail> {
        self.trails.get(&id)
    }

    pub fn clear(&mut self) {
        self.trails.clear();
        self.odd_tick = false;
    }
}

impl Default for TrailRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_CAPACITY)
    }
}
