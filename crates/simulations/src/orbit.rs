//! N-body orbit visualization with an edit mode.
//!
//! While running, bodies move under pairwise gravity and leave trails. Edit
//! mode pauses the physics; bodies can then be dragged, their velocity set by
//! dragging an arrow, and the predicted paths of every body are drawn.

use std::collections::HashMap;

use geometry::VectorExt;
use nalgebra::{Point2, Vector2};
use nbody::body::{Body, BodyId};
use nbody::clock::AveragedClock;
use nbody::forces::PairwiseGravity;
use nbody::integrator::{Integrator, SemiImplicitEuler};
use nbody::prediction::predict_paths;
use nbody::state::SystemState;
use nbody::trail::TrailRecorder;
use tracing::{debug, info};
use viewport::{
    Color, Dispatch, Entity, Shape, Style, TextAlign, UiAnchor, UiButton, UiLabel, Viewport,
};

use crate::config::{BodyConfig, OrbitConfig};
use crate::error::{SimulationError, positive};
use crate::format::format_duration;
use crate::visualization::Visualization;

const EDIT_COLOR: Color = Color::rgb(0xba, 0x23, 0x18);
const TRAIL_WIDTH: f64 = 0.25;
const NAME_FONT_PX: f64 = 15.0;
const UI_FONT_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitAction {
    TogglePause,
    ToggleEdit,
    MoveBody(BodyId),
    DragVelocity(BodyId),
    ReleaseVelocity(BodyId),
}

/// A velocity arrow being dragged
#[derive(Debug, Clone, Copy, PartialEq)]
struct ArrowDrag {
    initial_speed: f64,
    /// World length of the arrow when the drag began
    length: f64,
    tip: Point2<f64>,
}

#[derive(Debug)]
pub struct OrbitSimulation {
    viewport: Viewport<OrbitAction>,
    state: SystemState,
    gravity: PairwiseGravity,
    integrator: SemiImplicitEuler,
    clock: AveragedClock,
    trails: TrailRecorder,
    show_trails: bool,
    paused: bool,
    editing_enabled: bool,
    edit_mode: bool,
    visible: bool,
    arrow_drags: HashMap<BodyId, ArrowDrag>,
    prediction_dt: f64,
    prediction_steps: usize,
}

impl OrbitSimulation {
    pub fn new(config: &OrbitConfig) -> Result<Self, SimulationError> {
        let mut state = SystemState::new();
        for body in &config.bodies {
            state.insert(body.to_body()?);
        }

        let mut viewport = config.view.viewport()?;
        viewport
            .labels
            .push(UiLabel::new(UiAnchor::bottom_left(10.0, 10.0), "").with_font_px(UI_FONT_PX));
        viewport.buttons.push(
            UiButton::new(UiAnchor::top_left(10.0, 10.0), "Pause", OrbitAction::TogglePause)
                .with_font_px(UI_FONT_PX),
        );
        if config.editing {
            viewport.buttons.push(
                UiButton::new(UiAnchor::top_left(100.0, 10.0), "Edit", OrbitAction::ToggleEdit)
                    .with_font_px(UI_FONT_PX),
            );
        }

        let mut simulation = Self {
            viewport,
            state,
            gravity: PairwiseGravity::new(),
            integrator: SemiImplicitEuler,
            clock: AveragedClock::new(positive("time warp", config.time_warp)?),
            trails: TrailRecorder::new(config.trail_capacity),
            show_trails: true,
            paused: false,
            editing_enabled: config.editing,
            edit_mode: false,
            visible: true,
            arrow_drags: HashMap::new(),
            prediction_dt: positive("prediction timestep", config.prediction_dt)?,
            prediction_steps: config.prediction_steps,
        };
        info!(bodies = simulation.state.body_count(), "orbit simulation created");
        simulation.rebuild_scene();
        Ok(simulation)
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn trails(&self) -> &TrailRecorder {
        &self.trails
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    pub fn time_warp(&self) -> f64 {
        self.clock.time_warp
    }

    pub fn set_time_warp(&mut self, time_warp: f64) -> Result<(), SimulationError> {
        self.clock.time_warp = positive("time warp", time_warp)?;
        Ok(())
    }

    pub fn set_show_trails(&mut self, show: bool) {
        self.show_trails = show;
        self.rebuild_scene();
    }

    pub fn add_body(&mut self, config: &BodyConfig) -> Result<BodyId, SimulationError> {
        let id = self.state.insert(config.to_body()?);
        debug!(id = id.0, name = %config.name, "body added");
        self.rebuild_scene();
        Ok(id)
    }

    pub fn remove_body(&mut self, id: BodyId) -> Result<Body, SimulationError> {
        let body = self
            .state
            .remove_body(id)
            .ok_or(SimulationError::UnknownBody(id.0))?;
        self.arrow_drags.remove(&id);
        self.rebuild_scene();
        Ok(body)
    }

    pub fn set_body_position(
        &mut self,
        id: BodyId,
        position: Point2<f64>,
    ) -> Result<(), SimulationError> {
        self.body_mut(id)?.position = position;
        self.rebuild_scene();
        Ok(())
    }

    pub fn set_body_velocity(
        &mut self,
        id: BodyId,
        velocity: Vector2<f64>,
    ) -> Result<(), SimulationError> {
        if !(velocity.x.is_finite() && velocity.y.is_finite()) {
            return Err(SimulationError::InvalidValue {
                field: "velocity",
                value: velocity.norm(),
            });
        }
        self.body_mut(id)?.velocity = velocity;
        self.rebuild_scene();
        Ok(())
    }

    /// Pauses or resumes the physics. Resuming leaves edit mode.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.edit_mode = false;
            self.play();
        } else {
            self.pause();
        }
        self.sync_ui();
    }

    /// Enters edit mode, pausing the physics, or leaves it and resumes
    pub fn toggle_edit(&mut self) {
        if !self.editing_enabled {
            return;
        }
        if self.edit_mode {
            self.edit_mode = false;
            self.play();
        } else {
            self.edit_mode = true;
            self.pause();
        }
        info!(editing = self.edit_mode, "edit mode toggled");
        self.sync_ui();
    }

    fn play(&mut self) {
        self.paused = false;
        self.arrow_drags.clear();
    }

    fn pause(&mut self) {
        self.paused = true;
        // the next tick after resuming re-anchors, so paused time is not counted
        self.clock.suspend();
    }

    fn running(&self) -> bool {
        !self.paused && !self.edit_mode && self.visible
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut Body, SimulationError> {
        self.state
            .get_body_mut(id)
            .ok_or(SimulationError::UnknownBody(id.0))
    }

    /// World length of an undragged velocity arrow: a twentieth of the
    /// surface width
    fn arrow_length(&self) -> f64 {
        let device = self.viewport.device();
        self.viewport
            .camera
            .world_length_of(device.width / 20.0, device)
    }

    fn drag_velocity(&mut self, id: BodyId, world: Point2<f64>) -> Result<(), SimulationError> {
        let length = self.arrow_length();
        let body = self
            .state
            .get_body_mut(id)
            .ok_or(SimulationError::UnknownBody(id.0))?;
        let drag = self.arrow_drags.entry(id).or_insert(ArrowDrag {
            initial_speed: body.speed(),
            length,
            tip: world,
        });
        drag.tip = world;

        // The arrow's direction becomes the velocity's; its length scales the
        // speed it had when the drag began
        let offset = world - body.position;
        let scale = if drag.initial_speed > 0.0 {
            drag.initial_speed / drag.length
        } else {
            1.0 / drag.length
        };
        body.velocity = offset * scale;
        Ok(())
    }

    fn sync_ui(&mut self) {
        let paused = self.paused;
        let editing = self.edit_mode;
        if let Some(button) = self.viewport.buttons.get_mut(0) {
            button.label = if paused { "Play" } else { "Pause" }.to_string();
        }
        if let Some(button) = self.viewport.buttons.get_mut(1) {
            button.set_highlighted(editing);
        }
        let elapsed = format!(
            "Simulation has been running for {}",
            format_duration(self.state.time)
        );
        if let Some(label) = self.viewport.labels.get_mut(0) {
            label.text = elapsed;
        }
    }

    fn rebuild_scene(&mut self) {
        self.sync_ui();
        let arrow_length = self.arrow_length();
        let mut entities = Vec::new();

        for body in &self.state.bodies {
            if self.edit_mode {
                let tip = match self.arrow_drags.get(&body.id) {
                    Some(drag) => drag.tip,
                    None => {
                        body.position
                            + Vector2::from_polar(body.velocity.heading(), arrow_length)
                    }
                };
                entities.push(
                    Entity::new(
                        Shape::Arrow {
                            start: body.position,
                            end: tip,
                        },
                        Style::stroke(EDIT_COLOR),
                    )
                    .on_drag(OrbitAction::DragVelocity(body.id))
                    .on_release(OrbitAction::ReleaseVelocity(body.id)),
                );
            }

            let circle = Entity::new(
                Shape::Circle {
                    center: body.position,
                    radius: body.radius,
                },
                Style::fill(Color::BLACK),
            );
            entities.push(if self.edit_mode {
                circle.on_drag(OrbitAction::MoveBody(body.id))
            } else {
                circle
            });
            entities.push(Entity::new(
                Shape::Text {
                    position: Point2::new(body.position.x + body.radius * 1.2, body.position.y),
                    text: body.name.clone(),
                    font_px: NAME_FONT_PX,
                    align: TextAlign::Left,
                },
                Style::fill(Color::BLACK),
            ));

            if !self.edit_mode && self.show_trails {
                if let Some(trail) = self.trails.trail(body.id) {
                    let points: Vec<_> = trail.points().copied().collect();
                    entities.extend(points.windows(2).map(|pair| {
                        Entity::new(
                            Shape::Line {
                                start: pair[0],
                                end: pair[1],
                            },
                            Style::stroke(Color::BLACK).with_line_width(TRAIL_WIDTH),
                        )
                    }));
                }
            }
        }

        if self.edit_mode {
            let paths = predict_paths(
                &self.state,
                &self.integrator,
                &self.gravity,
                self.prediction_dt,
                self.prediction_steps,
            );
            for path in &paths {
                entities.extend(path.points.windows(2).map(|pair| {
                    Entity::new(
                        Shape::Line {
                            start: pair[0],
                            end: pair[1],
                        },
                        Style::stroke(EDIT_COLOR).with_line_width(TRAIL_WIDTH),
                    )
                }));
            }
        }

        self.viewport.set_entities(entities);
    }
}

impl Visualization for OrbitSimulation {
    type Action = OrbitAction;

    fn viewport(&self) -> &Viewport<OrbitAction> {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport<OrbitAction> {
        &mut self.viewport
    }

    fn apply(&mut self, dispatch: &Dispatch<OrbitAction>) -> Result<(), SimulationError> {
        match dispatch.action {
            OrbitAction::TogglePause => self.toggle_pause(),
            OrbitAction::ToggleEdit => self.toggle_edit(),
            OrbitAction::MoveBody(id) => self.body_mut(id)?.position = dispatch.world,
            OrbitAction::DragVelocity(id) => self.drag_velocity(id, dispatch.world)?,
            OrbitAction::ReleaseVelocity(id) => {
                self.arrow_drags.remove(&id);
            }
        }
        Ok(())
    }

    fn tick(&mut self, now_ms: f64) {
        if self.running() {
            if let Some(dt) = self.clock.tick(now_ms) {
                self.integrator.step(&mut self.state, dt, &self.gravity);
                self.trails.record(&self.state);
            }
        }
        self.rebuild_scene();
    }

    /// Hidden time is not simulated
    fn set_visible(&mut self, visible: bool, now_ms: f64) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        if !visible {
            self.clock.suspend();
        } else if !self.paused && !self.edit_mode {
            self.clock.resume(now_ms);
        }
        debug!(visible, "visibility changed");
    }

    fn pointer_cancel(&mut self) {
        self.arrow_drags.clear();
        self.viewport.pointer_cancel();
    }
}
