//! Viewport layer for the visualizers.
//!
//! A [`Viewport`] owns the camera, the per-frame entity list, the persistent
//! UI buttons and the pointer [`Dispatcher`]. Pointer input goes in as device
//! pixels and comes back out as [`Dispatch`] values carrying the owning
//! simulation's own action type, already converted to world space.

pub mod camera;
pub mod dispatcher;
pub mod error;
pub mod renderer;
pub mod scene;
pub mod style;
pub mod surface;
pub mod ui;
pub mod viewport;

#[cfg(test)]
mod camera_test;
#[cfg(test)]
mod scene_test;

pub use camera::{Camera, DeviceSize, MIN_ZOOM, ZOOM_STEP};
pub use dispatcher::{Dispatch, DispatchKind, Dispatcher, PointerState};
pub use error::ViewportError;
pub use renderer::{FrameLimiter, Renderer};
pub use scene::{Capabilities, Entity, Interactions, Shape, TextAlign};
pub use style::{Color, Style};
pub use surface::{DrawCommand, DrawList, Surface};
pub use ui::{HorizontalAnchor, UiAnchor, UiButton, UiLabel, VerticalAnchor};
pub use viewport::Viewport;
