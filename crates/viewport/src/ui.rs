//! Screen-anchored UI widgets.
//!
//! UI widgets live in device space and survive the per-tick entity rebuild.
//! Their position is resolved against the current surface size on every
//! query, so they stay put when the surface is resized.

use nalgebra::{Point2, Vector2};

use crate::camera::DeviceSize;
use crate::scene::{TextAlign, estimate_text_width};
use crate::style::Color;

/// Horizontal padding around a button label, in pixels
pub const BUTTON_PADDING_X: f64 = 10.0;

/// Vertical padding around a button label, in pixels
pub const BUTTON_PADDING_Y: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAnchor {
    #[default]
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAnchor {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Position of a widget relative to an edge or the middle of the surface.
///
/// The offset points inwards from the chosen edge: a `Right` anchor with an
/// offset of 10 sits 10 pixels left of the right edge. When `relative` is
/// set the offset is a fraction of the surface size instead of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UiAnchor {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
    pub offset: Vector2<f64>,
    pub relative: bool,
}

impl UiAnchor {
    pub fn new(horizontal: HorizontalAnchor, vertical: VerticalAnchor, x: f64, y: f64) -> Self {
        Self {
            horizontal,
            vertical,
            offset: Vector2::new(x, y),
            relative: false,
        }
    }

    pub fn top_left(x: f64, y: f64) -> Self {
        Self::new(HorizontalAnchor::Left, VerticalAnchor::Top, x, y)
    }

    pub fn top_right(x: f64, y: f64) -> Self {
        Self::new(HorizontalAnchor::Right, VerticalAnchor::Top, x, y)
    }

    pub fn bottom_left(x: f64, y: f64) -> Self {
        Self::new(HorizontalAnchor::Left, VerticalAnchor::Bottom, x, y)
    }

    /// Top-left corner of a widget of `size` on a surface of `device`
    pub fn resolve(&self, size: Vector2<f64>, device: &DeviceSize) -> Point2<f64> {
        let offset = if self.relative {
            Vector2::new(self.offset.x * device.width, self.offset.y * device.height)
        } else {
            self.offset
        };
        let x = match self.horizontal {
            HorizontalAnchor::Left => offset.x,
            HorizontalAnchor::Middle => device.width / 2.0 - size.x / 2.0 + offset.x,
            HorizontalAnchor::Right => device.width - size.x - offset.x,
        };
        let y = match self.vertical {
            VerticalAnchor::Top => offset.y,
            VerticalAnchor::Middle => device.height / 2.0 - size.y / 2.0 + offset.y,
            VerticalAnchor::Bottom => device.height - size.y - offset.y,
        };
        Point2::new(x, y)
    }
}

/// Clickable text button.
#[derive(Debug, Clone, PartialEq)]
pub struct UiButton<A> {
    pub anchor: UiAnchor,
    pub label: String,
    pub font_px: f64,
    pub color: Color,
    pub text_color: Color,
    pub action: Option<A>,
}

impl<A> UiButton<A> {
    pub fn new(anchor: UiAnchor, label: impl Into<String>, action: A) -> Self {
        Self {
            anchor,
            label: label.into(),
            font_px: 16.0,
            color: Color::BUTTON,
            text_color: Color::BLACK,
            action: Some(action),
        }
    }

    pub fn with_font_px(mut self, font_px: f64) -> Self {
        self.font_px = font_px;
        self
    }

    /// Switches between the highlighted and the plain background
    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.color = if highlighted {
            Color::BUTTON_ACTIVE
        } else {
            Color::BUTTON
        };
    }

    pub fn is_highlighted(&self) -> bool {
        self.color == Color::BUTTON_ACTIVE
    }

    pub fn size(&self) -> Vector2<f64> {
        Vector2::new(
            estimate_text_width(&self.label, self.font_px) + BUTTON_PADDING_X * 2.0,
            self.font_px + BUTTON_PADDING_Y * 2.0,
        )
    }

    /// Device-space `(top_left, bottom_right)`
    pub fn bounds(&self, device: &DeviceSize) -> (Point2<f64>, Point2<f64>) {
        let size = self.size();
        let min = self.anchor.resolve(size, device);
        (min, min + size)
    }

    /// Strict containment; the border itself does not count
    pub fn contains(&self, pixel: &Point2<f64>, device: &DeviceSize) -> bool {
        let (min, max) = self.bounds(device);
        pixel.x > min.x && pixel.x < max.x && pixel.y > min.y && pixel.y < max.y
    }
}

/// Screen-anchored text.
#[derive(Debug, Clone, PartialEq)]
pub struct UiLabel {
    pub anchor: UiAnchor,
    pub text: String,
    pub font_px: f64,
    pub color: Color,
    pub align: TextAlign,
}

impl UiLabel {
    pub fn new(anchor: UiAnchor, text: impl Into<String>) -> Self {
        Self {
            anchor,
            text: text.into(),
            font_px: 16.0,
            color: Color::BLACK,
            align: TextAlign::Left,
        }
    }

    pub fn with_font_px(mut self, font_px: f64) -> Self {
        self.font_px = font_px;
        self
    }

    /// Baseline-left position of the text
    pub fn position(&self, device: &DeviceSize) -> Point2<f64> {
        let size = Vector2::new(estimate_text_width(&self.text, self.font_px), self.font_px);
        self.anchor.resolve(size, device) + Vector2::new(0.0, self.font_px)
    }
}
