//! Colours and stroke/fill styles.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const BUTTON: Color = Color::rgb(0xd3, 0xd3, 0xd3);
    pub const BUTTON_ACTIVE: Color = Color::rgb(0x3d, 0x87, 0xff);
    /// Weak end of the field strength gradient
    pub const FIELD_WEAK: Color = Color::rgb(0x00, 0xbd, 0xfc);
    /// Strong end of the field strength gradient
    pub const FIELD_STRONG: Color = Color::rgb(0xff, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation between two colours.
    ///
    /// `factor` is clamped to `[0, 1]`; a NaN factor yields `self`.
    ///
    /// ```
    /// use viewport::Color;
    ///
    /// let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
    /// assert_eq!(mid, Color::rgb(128, 128, 128));
    /// ```
    pub fn lerp(self, other: Color, factor: f64) -> Color {
        let t = if factor.is_nan() {
            0.0
        } else {
            factor.clamp(0.0, 1.0)
        };
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgb(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    /// `#rrggbb` notation
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// How an entity is stroked or filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct Style {
    pub color: Color,
    /// Stroke width in pixels
    pub line_width: f64,
    pub filled: bool,
}

impl Style {
    pub fn stroke(color: Color) -> Self {
        Self {
            color,
            line_width: 1.0,
            filled: false,
        }
    }

    pub fn fill(color: Color) -> Self {
        Self {
            color,
            line_width: 1.0,
            filled: true,
        }
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::stroke(Color::BLACK)
    }
}
