use nalgebra::Point2;
use tracing::debug;

use crate::camera::{Camera, DeviceSize};
use crate::dispatcher::{Dispatch, Dispatcher};
use crate::error::ViewportError;
use crate::renderer::Renderer;
use crate::scene::Entity;
use crate::surface::Surface;
use crate::ui::{UiButton, UiLabel};

/// Camera, entities, UI and pointer handling for one visualization.
///
/// The entity list is replaced wholesale by [`Viewport::set_entities`] every
/// tick; buttons and labels persist until changed.
#[derive(Debug, Clone)]
pub struct Viewport<A> {
    pub camera: Camera,
    device: DeviceSize,
    entities: Vec<Entity<A>>,
    pub buttons: Vec<UiButton<A>>,
    pub labels: Vec<UiLabel>,
    /// Fired on every pointer-up, after the entity actions
    pub global_release: Option<A>,
    dispatcher: Dispatcher<A>,
    renderer: Renderer,
}

impl<A: Clone> Viewport<A> {
    pub fn new(camera: Camera, device: DeviceSize) -> Self {
        Self {
            camera,
            device,
            entities: Vec::new(),
            buttons: Vec::new(),
            labels: Vec::new(),
            global_release: None,
            dispatcher: Dispatcher::new(),
            renderer: Renderer::default(),
        }
    }

    pub fn device(&self) -> &DeviceSize {
        &self.device
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ViewportError> {
        self.device = DeviceSize::new(width, height)?;
        debug!(width, height, "viewport resized");
        Ok(())
    }

    pub fn entities(&self) -> &[Entity<A>] {
        &self.entities
    }

    pub fn set_entities(&mut self, entities: Vec<Entity<A>>) {
        self.entities = entities;
    }

    pub fn set_can_pan(&mut self, can_pan: bool) {
        self.dispatcher.can_pan = can_pan;
    }

    pub fn can_pan(&self) -> bool {
        self.dispatcher.can_pan
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn is_dragging(&self) -> bool {
        self.dispatcher.is_dragging()
    }

    pub fn to_world(&self, pixel: &Point2<f64>) -> Point2<f64> {
        self.camera.device_to_world(pixel, &self.device)
    }

    pub fn to_device(&self, world: &Point2<f64>) -> Point2<f64> {
        self.camera.world_to_device(world, &self.device)
    }

    pub fn pointer_down(&mut self, pixel: Point2<f64>) -> Vec<Dispatch<A>> {
        self.dispatcher.pointer_down(
            pixel,
            &self.camera,
            &self.device,
            &self.entities,
            &self.buttons,
        )
    }

    pub fn pointer_move(&mut self, pixel: Point2<f64>) -> Vec<Dispatch<A>> {
        self.dispatcher
            .pointer_move(pixel, &mut self.camera, &self.device)
    }

    pub fn pointer_up(&mut self, pixel: Point2<f64>) -> Vec<Dispatch<A>> {
        self.dispatcher.pointer_up(
            pixel,
            &self.camera,
            &self.device,
            &self.entities,
            self.global_release.as_ref(),
        )
    }

    pub fn pointer_cancel(&mut self) {
        self.dispatcher.cancel();
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.camera.wheel(delta_y);
    }

    /// Frame-limited draw; returns whether a frame was produced
    pub fn render<S: Surface>(&mut self, now_ms: f64, surface: &mut S) -> bool {
        self.renderer.render(
            now_ms,
            surface,
            &self.camera,
            &self.device,
            &self.entities,
            &self.buttons,
            &self.labels,
        )
    }

    /// Draws regardless of the frame limiter
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        self.renderer.draw(
            surface,
            &self.camera,
            &self.device,
            &self.entities,
            &self.buttons,
            &self.labels,
        );
    }

    /// Drops every entity and UI widget and releases any grabbed entity
    pub fn clear(&mut self) {
        self.entities.clear();
        self.buttons.clear();
        self.labels.clear();
        self.global_release = None;
        self.dispatcher.cancel();
    }
}
