//! Pointer state machine.
//!
//! A pointer-down first tries the UI buttons, then the scene entities. A
//! drag either feeds the grabbed entity's drag action or pans the camera,
//! never both. A pointer-up fires the grabbed entity's release action, the
//! hover-release action of whatever lies under the pointer, and finally the
//! global release action.

use nalgebra::Point2;
use tracing::debug;

use crate::camera::{Camera, DeviceSize};
use crate::scene::{Capabilities, Entity, Interactions};
use crate::ui::UiButton;

/// Which gesture produced a [`Dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchKind {
    Ui,
    Click,
    Drag,
    Release,
    HoverRelease,
    GlobalRelease,
}

/// An action to be applied by the owning simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch<A> {
    pub action: A,
    pub kind: DispatchKind,
    /// Pointer position in world coordinates
    pub world: Point2<f64>,
    /// Pointer position in device pixels
    pub device: Point2<f64>,
}

/// Where the pointer is in its gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerState<A> {
    Idle,
    Dragging {
        /// Device position of the pointer-down
        start: Point2<f64>,
        /// Camera centre at the pointer-down
        camera_anchor: Point2<f64>,
        /// Interactions of the entity grabbed at the pointer-down
        target: Option<Interactions<A>>,
    },
}

/// Turns raw pointer events into dispatches.
///
/// The grabbed entity's interactions are cloned at pointer-down, so a drag
/// keeps working after the entity list has been rebuilt.
#[derive(Debug, Clone)]
pub struct Dispatcher<A> {
    state: PointerState<A>,
    /// When false, empty-space drags leave the camera alone
    pub can_pan: bool,
}

impl<A> Default for Dispatcher<A> {
    fn default() -> Self {
        Self {
            state: PointerState::Idle,
            can_pan: true,
        }
    }
}

impl<A: Clone> Dispatcher<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PointerState<A> {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PointerState::Dragging { .. })
    }

    /// Pointer pressed at `pixel`.
    ///
    /// A hit on a UI button with an action consumes the press: nothing in the
    /// scene is grabbed and the camera does not pan. Buttons without an
    /// action are passed through.
    pub fn pointer_down(
        &mut self,
        pixel: Point2<f64>,
        camera: &Camera,
        device: &DeviceSize,
        entities: &[Entity<A>],
        buttons: &[UiButton<A>],
    ) -> Vec<Dispatch<A>> {
        let world = camera.device_to_world(&pixel, device);

        if let Some(button) = buttons
            .iter()
            .find(|b| b.action.is_some() && b.contains(&pixel, device))
        {
            debug!(label = %button.label, "ui button pressed");
            self.state = PointerState::Idle;
            return button
                .action
                .iter()
                .map(|action| Dispatch {
                    action: action.clone(),
                    kind: DispatchKind::Ui,
                    world,
                    device: pixel,
                })
                .collect();
        }

        let target = entities
            .iter()
            .find(|e| !e.capabilities().is_empty() && e.contains(&pixel, camera, device))
            .map(|e| e.interactions.clone());

        let mut dispatches = Vec::new();
        if let Some(action) = target.as_ref().and_then(|t| t.on_click.clone()) {
            dispatches.push(Dispatch {
                action,
                kind: DispatchKind::Click,
                world,
                device: pixel,
            });
        }
        debug!(x = pixel.x, y = pixel.y, grabbed = target.is_some(), "pointer down");

        self.state = PointerState::Dragging {
            start: pixel,
            camera_anchor: camera.center,
            target,
        };
        dispatches
    }

    /// Pointer moved to `pixel`. Only does anything while dragging.
    pub fn pointer_move(
        &mut self,
        pixel: Point2<f64>,
        camera: &mut Camera,
        device: &DeviceSize,
    ) -> Vec<Dispatch<A>> {
        let PointerState::Dragging {
            start,
            camera_anchor,
            target,
        } = &self.state
        else {
            return Vec::new();
        };

        if let Some(action) = target.as_ref().and_then(|t| t.on_drag.clone()) {
            return vec![Dispatch {
                action,
                kind: DispatchKind::Drag,
                world: camera.device_to_world(&pixel, device),
                device: pixel,
            }];
        }

        if self.can_pan {
            camera.pan_from(*camera_anchor, start, &pixel, device);
        }
        Vec::new()
    }

    /// Pointer released at `pixel`.
    pub fn pointer_up(
        &mut self,
        pixel: Point2<f64>,
        camera: &Camera,
        device: &DeviceSize,
        entities: &[Entity<A>],
        global_release: Option<&A>,
    ) -> Vec<Dispatch<A>> {
        let world = camera.device_to_world(&pixel, device);
        let mut dispatches = Vec::new();
        let mut emit = |action: &A, kind| {
            dispatches.push(Dispatch {
                action: action.clone(),
                kind,
                world,
                device: pixel,
            })
        };

        if let PointerState::Dragging {
            target: Some(target),
            ..
        } = &self.state
        {
            if let Some(action) = &target.on_release {
                emit(action, DispatchKind::Release);
            }
        }

        let hovered = entities.iter().find(|e| {
            e.capabilities().contains(Capabilities::HOVER_RELEASE)
                && e.contains(&pixel, camera, device)
        });
        if let Some(action) = hovered.and_then(|e| e.interactions.on_hover_release.as_ref()) {
            emit(action, DispatchKind::HoverRelease);
        }

        if let Some(action) = global_release {
            emit(action, DispatchKind::GlobalRelease);
        }

        self.state = PointerState::Idle;
        dispatches
    }

    /// Pointer left the surface or the gesture was interrupted.
    pub fn cancel(&mut self) {
        self.state = PointerState::Idle;
    }
}
