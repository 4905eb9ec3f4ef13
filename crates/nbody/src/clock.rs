//! Real-time driven timestep.
//!
//! Tick intervals from a browser timer jitter a lot. Rather than feeding the
//! raw interval into the integrator, the clock feeds the running average of
//! every real interval seen so far, scaled by the time warp.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragedClock {
    /// Simulated seconds per real second
    pub time_warp: f64,
    real_elapsed: f64,
    ticks: u64,
    last_tick_ms: Option<f64>,
}

impl AveragedClock {
    pub fn new(time_warp: f64) -> Self {
        Self {
            time_warp,
            real_elapsed: 0.0,
            ticks: 0,
            last_tick_ms: None,
        }
    }

    /// Records a tick at `now_ms` and returns the simulated timestep in
    /// seconds.
    ///
    /// The first tick after creation or [`suspend`](Self::suspend) only
    /// anchors the clock and returns `None`.
    ///
    /// ```
    /// use nbody::clock::AveragedClock;
    ///
    /// let mut clock = AveragedClock::new(100.0);
    /// assert_eq!(clock.tick(0.0), None);
    /// let first = clock.tick(10.0).unwrap();
    /// assert!((first - 1.0).abs() < 1e-12);
    /// // (10 ms + 30 ms) / 2 ticks = 20 ms average
    /// let second = clock.tick(40.0).unwrap();
    /// assert!((second - 2.0).abs() < 1e-12);
    /// ```
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        let last = self.last_tick_ms.replace(now_ms)?;
        let delta = ((now_ms - last) / 1000.0).max(0.0);
        self.real_elapsed += delta;
        self.ticks += 1;
        Some(self.average_dt() * self.time_warp)
    }

    /// Average real interval between ticks, in seconds
    pub fn average_dt(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.real_elapsed / self.ticks as f64
        }
    }

    /// Drops the wall-clock anchor; the next tick re-anchors
    pub fn suspend(&mut self) {
        self.last_tick_ms = None;
    }

    /// Re-anchors at `now_ms` so time spent hidden is not counted
    pub fn resume(&mut self, now_ms: f64) {
        self.last_tick_ms = Some(now_ms);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for AveragedClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}
