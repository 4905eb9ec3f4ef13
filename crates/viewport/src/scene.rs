//! Drawable, hit-testable scene entities.
//!
//! Entities are rebuilt by the owning simulation every tick. Each one carries
//! a shape in world coordinates, a style and an optional set of pointer
//! actions. Actions are plain values of the simulation's own type; the
//! dispatcher hands them back when the pointer hits the entity.

use geometry::{Quad, point_in_polygon, point_in_quad, quad_bounds, rect_quad};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::camera::{Camera, DeviceSize};
use crate::style::Style;

/// Width of a glyph relative to the font size, used to size text boxes
pub const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Minimum pixel width of the hit box around a line
pub const LINE_HIT_WIDTH: f64 = 6.0;

/// Estimated pixel width of `text` at `font_px`
pub fn estimate_text_width(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * GLYPH_WIDTH_RATIO
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Geometry of an entity, in world coordinates unless noted.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: Point2<f64>,
        radius: f64,
    },
    /// Axis-aligned rectangle; `origin` is the bottom-left corner
    Rect {
        origin: Point2<f64>,
        size: Vector2<f64>,
    },
    Line {
        start: Point2<f64>,
        end: Point2<f64>,
    },
    /// Line with an arrowhead at `end`
    Arrow {
        start: Point2<f64>,
        end: Point2<f64>,
    },
    Polygon {
        points: Vec<Point2<f64>>,
    },
    /// Text anchored at a world position; the size is in pixels
    Text {
        position: Point2<f64>,
        text: String,
        font_px: f64,
        align: TextAlign,
    },
}

impl Shape {
    /// True when the device pixel lies inside the shape's hit area.
    ///
    /// Polygons are tested against every vertex; the rest use their hit quad.
    pub fn contains(
        &self,
        pixel: &Point2<f64>,
        camera: &Camera,
        device: &DeviceSize,
        line_width: f64,
    ) -> bool {
        match self {
            Shape::Polygon { points } => {
                let projected: Vec<Point2<f64>> = points
                    .iter()
                    .map(|p| camera.world_to_device(p, device))
                    .collect();
                point_in_polygon(pixel, &projected)
            }
            _ => point_in_quad(pixel, &self.device_quad(camera, device, line_width)),
        }
    }

    /// Device-space quadrilateral around the shape.
    ///
    /// Polygons get their bounding box.
    pub fn device_quad(&self, camera: &Camera, device: &DeviceSize, line_width: f64) -> Quad {
        let project = |p: &Point2<f64>| camera.world_to_device(p, device);
        match self {
            Shape::Circle { center, radius } => {
                let offset = Vector2::new(*radius, *radius);
                project_rect(camera, device, &(center - offset), &(center + offset))
            }
            Shape::Rect { origin, size } => {
                project_rect(camera, device, origin, &(origin + size))
            }
            Shape::Line { start, end } => {
                let a = project(start);
                let b = project(end);
                let half = line_width.max(LINE_HIT_WIDTH) / 2.0;
                let direction = b - a;
                let normal = match direction.try_normalize(f64::EPSILON) {
                    Some(unit) => Vector2::new(-unit.y, unit.x) * half,
                    None => Vector2::new(0.0, half),
                };
                [a + normal, b + normal, b - normal, a - normal]
            }
            Shape::Arrow { end, .. } => {
                let tip = project(end);
                rect_quad(
                    Point2::new(tip.x - 10.0, tip.y - 10.0),
                    Point2::new(tip.x + 10.0, tip.y + 15.0),
                )
            }
            Shape::Polygon { points } => {
                if points.is_empty() {
                    return [Point2::origin(); 4];
                }
                let projected: Vec<Point2<f64>> = points.iter().map(project).collect();
                let (min, max) = quad_bounds(&projected);
                rect_quad(min, max)
            }
            Shape::Text {
                position,
                text,
                font_px,
                align,
            } => {
                let anchor = project(position);
                let width = estimate_text_width(text, *font_px);
                let left = match align {
                    TextAlign::Left => anchor.x,
                    TextAlign::Center => anchor.x - width / 2.0,
                    TextAlign::Right => anchor.x - width,
                };
                rect_quad(
                    Point2::new(left, anchor.y - font_px),
                    Point2::new(left + width, anchor.y),
                )
            }
        }
    }
}

fn project_rect(camera: &Camera, device: &DeviceSize, a: &Point2<f64>, b: &Point2<f64>) -> Quad {
    let a = camera.world_to_device(a, device);
    let b = camera.world_to_device(b, device);
    rect_quad(
        Point2::new(a.x.min(b.x), a.y.min(b.y)),
        Point2::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// Set of interactions an entity responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    pub const CLICK: Capabilities = Capabilities(1);
    pub const DRAG: Capabilities = Capabilities(1 << 1);
    pub const RELEASE: Capabilities = Capabilities(1 << 2);
    pub const HOVER_RELEASE: Capabilities = Capabilities(1 << 3);

    pub fn contains(&self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Capabilities) {
        self.0 |= other.0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Actions attached to an entity, one slot per pointer gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Interactions<A> {
    pub on_click: Option<A>,
    pub on_drag: Option<A>,
    pub on_release: Option<A>,
    /// Fired when a pointer is released while over the entity
    pub on_hover_release: Option<A>,
}

impl<A> Default for Interactions<A> {
    fn default() -> Self {
        Self {
            on_click: None,
            on_drag: None,
            on_release: None,
            on_hover_release: None,
        }
    }
}

impl<A> Interactions<A> {
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::NONE;
        if self.on_click.is_some() {
            caps.insert(Capabilities::CLICK);
        }
        if self.on_drag.is_some() {
            caps.insert(Capabilities::DRAG);
        }
        if self.on_release.is_some() {
            caps.insert(Capabilities::RELEASE);
        }
        if self.on_hover_release.is_some() {
            caps.insert(Capabilities::HOVER_RELEASE);
        }
        caps
    }
}

/// A drawable entity.
///
/// # Examples
///
/// ```
/// use viewport::{Capabilities, Entity, Shape, Style};
/// use nalgebra::Point2;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Action {
///     Grab,
/// }
///
/// let entity = Entity::new(
///     Shape::Circle { center: Point2::origin(), radius: 1.0 },
///     Style::default(),
/// )
/// .on_drag(Action::Grab);
///
/// assert!(entity.capabilities().contains(Capabilities::DRAG));
/// assert!(!entity.capabilities().contains(Capabilities::CLICK));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entity<A> {
    pub shape: Shape,
    pub style: Style,
    pub interactions: Interactions<A>,
}

impl<A> Entity<A> {
    pub fn new(shape: Shape, style: Style) -> Self {
        Self {
            shape,
            style,
            interactions: Interactions::default(),
        }
    }

    pub fn on_click(mut self, action: A) -> Self {
        self.interactions.on_click = Some(action);
        self
    }

    pub fn on_drag(mut self, action: A) -> Self {
        self.interactions.on_drag = Some(action);
        self
    }

    pub fn on_release(mut self, action: A) -> Self {
        self.interactions.on_release = Some(action);
        self
    }

    pub fn on_hover_release(mut self, action: A) -> Self {
        self.interactions.on_hover_release = Some(action);
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        self.interactions.capabilities()
    }

    pub fn device_quad(&self, camera: &Camera, device: &DeviceSize) -> Quad {
        self.shape
            .device_quad(camera, device, self.style.line_width)
    }

    /// True when `pixel` lies inside the entity's hit area
    pub fn contains(&self, pixel: &Point2<f64>, camera: &Camera, device: &DeviceSize) -> bool {
        self.shape
            .contains(pixel, camera, device, self.style.line_width)
    }
}
