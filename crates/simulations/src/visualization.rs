use std::fmt;

use nalgebra::Point2;
use tracing::warn;
use viewport::{Dispatch, Surface, Viewport};

use crate::error::SimulationError;

/// An interactive visualization driven by ticks and pointer input.
///
/// Implementors supply the viewport, the tick and [`apply`](Self::apply);
/// the pointer methods route raw input through the viewport's dispatcher
/// and apply whatever actions come back.
pub trait Visualization {
    /// What the visualization's entities and buttons ask it to do
    type Action: Clone + fmt::Debug;

    fn viewport(&self) -> &Viewport<Self::Action>;

    fn viewport_mut(&mut self) -> &mut Viewport<Self::Action>;

    /// Applies one dispatched action to the model
    fn apply(&mut self, dispatch: &Dispatch<Self::Action>) -> Result<(), SimulationError>;

    /// Advances the model to `now_ms` and rebuilds the scene
    fn tick(&mut self, now_ms: f64);

    /// The host surface was hidden or shown again
    fn set_visible(&mut self, _visible: bool, _now_ms: f64) {}

    /// Applies every dispatch in order. A rejected action does not stop the
    /// ones after it; the first rejection is returned.
    fn apply_all(&mut self, dispatches: Vec<Dispatch<Self::Action>>) -> Result<(), SimulationError> {
        let mut first_error = None;
        for dispatch in &dispatches {
            if let Err(e) = self.apply(dispatch) {
                warn!(%e, action = ?dispatch.action, "action rejected");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn pointer_down(&mut self, pixel: Point2<f64>) -> Result<(), SimulationError> {
        let dispatches = self.viewport_mut().pointer_down(pixel);
        self.apply_all(dispatches)
    }

    fn pointer_move(&mut self, pixel: Point2<f64>) -> Result<(), SimulationError> {
        let dispatches = self.viewport_mut().pointer_move(pixel);
        self.apply_all(dispatches)
    }

    fn pointer_up(&mut self, pixel: Point2<f64>) -> Result<(), SimulationError> {
        let dispatches = self.viewport_mut().pointer_up(pixel);
        self.apply_all(dispatches)
    }

    fn pointer_cancel(&mut self) {
        self.viewport_mut().pointer_cancel();
    }

    fn wheel(&mut self, delta_y: f64) {
        self.viewport_mut().wheel(delta_y);
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), SimulationError> {
        Ok(self.viewport_mut().resize(width, height)?)
    }

    /// Frame-limited draw of the current scene
    fn render<S: Surface>(&mut self, now_ms: f64, surface: &mut S) -> bool {
        self.viewport_mut().render(now_ms, surface)
    }

    /// Unconditional draw of the current scene
    fn draw<S: Surface>(&self, surface: &mut S) {
        self.viewport().draw(surface);
    }
}
