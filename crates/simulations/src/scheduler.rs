//! Caller-driven tick scheduling.

use tracing::{debug, info};

use crate::error::{SimulationError, positive};
use crate::visualization::Visualization;

/// Default time between ticks, in milliseconds
pub const DEFAULT_TICK_PERIOD_MS: f64 = 10.0;

/// Owns one visualization and decides when it ticks.
///
/// A scheduler is created stopped. The host calls [`advance`](Self::advance)
/// from its own timer or animation loop; tests call [`step`](Self::step) to
/// force single ticks. Dropping the scheduler drops the visualization, so no
/// tick can reach it afterwards.
///
/// # Examples
///
/// ```
/// use simulations::{CircuitEditor, CircuitEditorConfig, Scheduler};
///
/// let editor = CircuitEditor::new(&CircuitEditorConfig::default()).unwrap();
/// let mut scheduler = Scheduler::new(editor);
///
/// assert!(!scheduler.advance(0.0));
/// scheduler.start(0.0);
/// assert!(scheduler.advance(0.0));
/// assert!(!scheduler.advance(5.0));
/// assert!(scheduler.advance(10.0));
/// ```
#[derive(Debug)]
pub struct Scheduler<S> {
    simulation: S,
    period_ms: f64,
    running: bool,
    next_tick_ms: Option<f64>,
    ticks: u64,
}

impl<S: Visualization> Scheduler<S> {
    pub fn new(simulation: S) -> Self {
        Self {
            simulation,
            period_ms: DEFAULT_TICK_PERIOD_MS,
            running: false,
            next_tick_ms: None,
            ticks: 0,
        }
    }

    pub fn with_period(simulation: S, period_ms: f64) -> Result<Self, SimulationError> {
        let period_ms = positive("tick period", period_ms)?;
        Ok(Self {
            period_ms,
            ..Self::new(simulation)
        })
    }

    /// Starts ticking; the first [`advance`](Self::advance) at or after
    /// `now_ms` ticks
    pub fn start(&mut self, now_ms: f64) {
        if !self.running {
            info!(period_ms = self.period_ms, "scheduler started");
        }
        self.running = true;
        self.next_tick_ms = Some(now_ms);
    }

    pub fn stop(&mut self) {
        if self.running {
            info!(ticks = self.ticks, "scheduler stopped");
        }
        self.running = false;
        self.next_tick_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks once if running and a period has passed since the last tick.
    ///
    /// Missed periods are not made up: a late call runs a single tick and
    /// the next one is due a full period later.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        if !self.running {
            return false;
        }
        match self.next_tick_ms {
            Some(due) if now_ms >= due => {
                self.step(now_ms);
                self.next_tick_ms = Some(now_ms + self.period_ms);
                true
            }
            _ => false,
        }
    }

    /// Ticks once, running or not
    pub fn step(&mut self, now_ms: f64) {
        self.simulation.tick(now_ms);
        self.ticks += 1;
        debug!(now_ms, ticks = self.ticks, "tick");
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.simulation
    }

    pub fn into_inner(self) -> S {
        self.simulation
    }
}
