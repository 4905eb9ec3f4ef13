//! Frame-limited drawing of entities and UI widgets onto a [`Surface`].

use nalgebra::{Point2, Vector2};
use tracing::trace;

use crate::camera::{Camera, DeviceSize};
use crate::scene::{Entity, Shape};
use crate::style::Style;
use crate::surface::Surface;
use crate::ui::{BUTTON_PADDING_X, BUTTON_PADDING_Y, UiButton, UiLabel};

/// Minimum time between two drawn frames
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 25.0;

/// Arrowhead half-width in pixels
const ARROW_WIDTH: f64 = 5.0;

/// Arrowhead length in pixels
const ARROW_LENGTH: f64 = 8.0;

/// Drops frames requested sooner than the minimum interval after the last
/// drawn one.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLimiter {
    min_interval_ms: f64,
    last_frame_ms: Option<f64>,
}

impl FrameLimiter {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_frame_ms: None,
        }
    }

    /// Returns true and records the frame when enough time has passed
    pub fn ready(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_frame_ms {
            if now_ms - last < self.min_interval_ms {
                return false;
            }
        }
        self.last_frame_ms = Some(now_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last_frame_ms = None;
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL_MS)
    }
}

/// Draws a frame in a fixed order: clear, entities in list order, UI buttons,
/// UI labels.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    limiter: FrameLimiter,
    /// Outline every interactive entity's hit quad
    pub debug_hit_boxes: bool,
}

impl Renderer {
    pub fn new(limiter: FrameLimiter) -> Self {
        Self {
            limiter,
            debug_hit_boxes: false,
        }
    }

    /// Draws a frame unless one was drawn too recently. Returns whether a
    /// frame was drawn.
    #[allow(clippy::too_many_arguments)]
    pub fn render<A, S: Surface>(
        &mut self,
        now_ms: f64,
        surface: &mut S,
        camera: &Camera,
        device: &DeviceSize,
        entities: &[Entity<A>],
        buttons: &[UiButton<A>],
        labels: &[UiLabel],
    ) -> bool {
        if !self.limiter.ready(now_ms) {
            trace!(now_ms, "frame skipped");
            return false;
        }
        self.draw(surface, camera, device, entities, buttons, labels);
        true
    }

    /// Draws a frame unconditionally.
    pub fn draw<A, S: Surface>(
        &self,
        surface: &mut S,
        camera: &Camera,
        device: &DeviceSize,
        entities: &[Entity<A>],
        buttons: &[UiButton<A>],
        labels: &[UiLabel],
    ) {
        surface.clear(device);
        for entity in entities {
            draw_entity(surface, camera, device, entity);
            if self.debug_hit_boxes && !entity.capabilities().is_empty() {
                let quad = entity.device_quad(camera, device);
                surface.polygon(&quad, &Style::stroke(crate::style::Color::RED));
            }
        }
        for button in buttons {
            draw_button(surface, device, button);
        }
        for label in labels {
            surface.text(
                &label.position(device),
                &label.text,
                label.font_px,
                label.align,
                &Style::fill(label.color),
            );
        }
    }
}

/// Shaft plus the two head strokes of an arrow, in device space
pub fn arrow_strokes(from: &Point2<f64>, to: &Point2<f64>) -> [Point2<f64>; 3] {
    let shaft = to - from;
    let direction = shaft
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(|| Vector2::new(1.0, 0.0));
    let normal = Vector2::new(-direction.y, direction.x);
    let back = to - direction * ARROW_LENGTH;
    [back + normal * ARROW_WIDTH, *to, back - normal * ARROW_WIDTH]
}

fn draw_entity<A, S: Surface>(
    surface: &mut S,
    camera: &Camera,
    device: &DeviceSize,
    entity: &Entity<A>,
) {
    let project = |p: &Point2<f64>| camera.world_to_device(p, device);
    let style = &entity.style;
    match &entity.shape {
        Shape::Circle { center, radius } => {
            let centre = project(center);
            let edge = project(&Point2::new(center.x + radius, center.y));
            surface.circle(&centre, (edge.x - centre.x).abs(), style);
        }
        Shape::Rect { origin, size } => {
            let a = project(origin);
            let b = project(&(origin + size));
            let top_left = Point2::new(a.x.min(b.x), a.y.min(b.y));
            let extent = Vector2::new((b.x - a.x).abs(), (b.y - a.y).abs());
            surface.rect(&top_left, &extent, style);
        }
        Shape::Line { start, end } => {
            surface.line(&project(start), &project(end), style);
        }
        Shape::Arrow { start, end } => {
            let from = project(start);
            let to = project(end);
            surface.line(&from, &to, style);
            surface.polyline(&arrow_strokes(&from, &to), style);
        }
        Shape::Polygon { points } => {
            let projected: Vec<Point2<f64>> = points.iter().map(project).collect();
            surface.polygon(&projected, style);
        }
        Shape::Text {
            position,
            text,
            font_px,
            align,
        } => {
            surface.text(&project(position), text, *font_px, *align, style);
        }
    }
}

fn draw_button<A, S: Surface>(surface: &mut S, device: &DeviceSize, button: &UiButton<A>) {
    let (min, max) = button.bounds(device);
    surface.rect(&min, &(max - min), &Style::fill(button.color));
    let baseline = Point2::new(min.x + BUTTON_PADDING_X, max.y - BUTTON_PADDING_Y);
    surface.text(
        &baseline,
        &button.label,
        button.font_px,
        crate::scene::TextAlign::Left,
        &Style::fill(button.text_color),
    );
}
