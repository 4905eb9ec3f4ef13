//! Drawing backend abstraction.
//!
//! The renderer only talks to a [`Surface`]. [`DrawList`] records the calls
//! as serializable commands; the wasm layer ships those to the browser, and
//! tests inspect them directly.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::camera::DeviceSize;
use crate::scene::TextAlign;
use crate::style::Style;

/// Immediate-mode 2D drawing target in device pixels.
pub trait Surface {
    fn clear(&mut self, size: &DeviceSize);
    fn line(&mut self, from: &Point2<f64>, to: &Point2<f64>, style: &Style);
    fn polyline(&mut self, points: &[Point2<f64>], style: &Style);
    /// Closed polygon; filled when `style.filled` is set
    fn polygon(&mut self, points: &[Point2<f64>], style: &Style);
    /// `origin` is the top-left corner
    fn rect(&mut self, origin: &Point2<f64>, size: &Vector2<f64>, style: &Style);
    fn circle(&mut self, center: &Point2<f64>, radius: f64, style: &Style);
    /// `position` is the left end of the baseline before alignment
    fn text(
        &mut self,
        position: &Point2<f64>,
        text: &str,
        font_px: f64,
        align: TextAlign,
        style: &Style,
    );
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        style: Style,
    },
    Polyline {
        points: Vec<[f64; 2]>,
        style: Style,
    },
    Polygon {
        points: Vec<[f64; 2]>,
        style: Style,
    },
    Rect {
        origin: [f64; 2],
        size: [f64; 2],
        style: Style,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
        style: Style,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        position: [f64; 2],
        text: String,
        font_px: f64,
        align: TextAlign,
        style: Style,
    },
}

fn pair(point: &Point2<f64>) -> [f64; 2] {
    [point.x, point.y]
}

/// Surface that records every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drops everything recorded so far and hands it back
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded text strings, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn clear(&mut self, size: &DeviceSize) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            width: size.width,
            height: size.height,
        });
    }

    fn line(&mut self, from: &Point2<f64>, to: &Point2<f64>, style: &Style) {
        self.commands.push(DrawCommand::Line {
            from: pair(from),
            to: pair(to),
            style: *style,
        });
    }

    fn polyline(&mut self, points: &[Point2<f64>], style: &Style) {
        self.commands.push(DrawCommand::Polyline {
            points: points.iter().map(pair).collect(),
            style: *style,
        });
    }

    fn polygon(&mut self, points: &[Point2<f64>], style: &Style) {
        self.commands.push(DrawCommand::Polygon {
            points: points.iter().map(pair).collect(),
            style: *style,
        });
    }

    fn rect(&mut self, origin: &Point2<f64>, size: &Vector2<f64>, style: &Style) {
        self.commands.push(DrawCommand::Rect {
            origin: pair(origin),
            size: [size.x, size.y],
            style: *style,
        });
    }

    fn circle(&mut self, center: &Point2<f64>, radius: f64, style: &Style) {
        self.commands.push(DrawCommand::Circle {
            center: pair(center),
            radius,
            style: *style,
        });
    }

    fn text(
        &mut self,
        position: &Point2<f64>,
        text: &str,
        font_px: f64,
        align: TextAlign,
        style: &Style,
    ) {
        self.commands.push(DrawCommand::Text {
            position: pair(position),
            text: text.to_string(),
            font_px,
            align,
            style: *style,
        });
    }
}
