//! Gravitational field lines around draggable bodies.

use fieldlines::{
    Absorber, FieldLaw, FieldLine, FieldLineIntegrator, InverseSquare, Source, barycentric_seeds,
};
use geometry::VectorExt;
use nalgebra::{Point2, Vector2};
use tracing::{debug, info};
use viewport::{Color, Dispatch, Entity, Shape, Style, Viewport};

use crate::config::{BodyConfig, GravityFieldConfig, to_point};
use crate::error::{SimulationError, positive};
use crate::field_render::{FieldLineStyle, field_line_entities};
use crate::visualization::Visualization;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityFieldAction {
    MoveBody(usize),
    MoveProbe,
}

/// Field lines start on a circle around the barycentre of all bodies and
/// follow the field until they fall into a body. A red test body shows the
/// direction of the field wherever it is dragged.
#[derive(Debug)]
pub struct GravityFieldVisualizer {
    viewport: Viewport<GravityFieldAction>,
    law: InverseSquare,
    bodies: Vec<Source>,
    probe: Point2<f64>,
    probe_radius: f64,
    probe_arrow_length: f64,
    lines_per_side: usize,
    start_distance: f64,
    step_distance: f64,
    max_steps: usize,
    style: FieldLineStyle,
    lines: Vec<FieldLine>,
    stale: bool,
}

impl GravityFieldVisualizer {
    pub fn new(config: &GravityFieldConfig) -> Result<Self, SimulationError> {
        let bodies = config
            .bodies
            .iter()
            .map(BodyConfig::to_source)
            .collect::<Result<Vec<_>, _>>()?;
        let mut visualizer = Self {
            viewport: config.view.viewport()?,
            law: InverseSquare::gravity(),
            bodies,
            probe: to_point(config.probe_position),
            probe_radius: positive("probe radius", config.probe_radius)?,
            probe_arrow_length: positive("probe arrow length", config.probe_arrow_length)?,
            lines_per_side: config.lines_per_side,
            start_distance: positive("start distance", config.start_distance)?,
            step_distance: positive("step distance", config.step_distance)?,
            max_steps: config.max_steps,
            style: FieldLineStyle {
                colored: config.colored,
                arrow_spacing: config.arrow_spacing,
                arrow_length: positive("arrow length", config.arrow_length)?,
            },
            lines: Vec::new(),
            stale: true,
        };
        info!(bodies = visualizer.bodies.len(), "gravity field created");
        visualizer.refresh();
        Ok(visualizer)
    }

    pub fn bodies(&self) -> &[Source] {
        &self.bodies
    }

    pub fn lines(&self) -> &[FieldLine] {
        &self.lines
    }

    pub fn probe_position(&self) -> Point2<f64> {
        self.probe
    }

    /// Gravitational acceleration at the test body, in m/s²
    pub fn probe_field(&self) -> Vector2<f64> {
        self.law.field_at(&self.probe, &self.bodies)
    }

    pub fn is_colored(&self) -> bool {
        self.style.colored
    }

    pub fn set_colored(&mut self, colored: bool) {
        self.style.colored = colored;
        self.rebuild_scene();
    }

    pub fn add_body(&mut self, config: &BodyConfig) -> Result<usize, SimulationError> {
        self.bodies.push(config.to_source()?);
        self.stale = true;
        self.refresh();
        Ok(self.bodies.len() - 1)
    }

    pub fn remove_body(&mut self, index: usize) -> Result<Source, SimulationError> {
        if index >= self.bodies.len() {
            return Err(SimulationError::UnknownBody(index as u32));
        }
        let body = self.bodies.remove(index);
        self.stale = true;
        self.refresh();
        Ok(body)
    }

    pub fn move_body(&mut self, index: usize, position: Point2<f64>) -> Result<(), SimulationError> {
        let body = self
            .bodies
            .get_mut(index)
            .ok_or(SimulationError::UnknownBody(index as u32))?;
        body.position = position;
        self.stale = true;
        Ok(())
    }

    pub fn move_probe(&mut self, position: Point2<f64>) {
        self.probe = position;
    }

    fn trace_lines(&mut self) {
        let absorbers: Vec<Absorber> = self.bodies.iter().map(Absorber::circle).collect();
        let positions: Vec<Point2<f64>> = self.bodies.iter().map(|b| b.position).collect();
        let integrator = FieldLineIntegrator::new(&self.law, &self.bodies, &absorbers)
            .with_step(self.step_distance)
            .with_max_steps(self.max_steps);
        self.lines = barycentric_seeds(&positions, self.start_distance, self.lines_per_side)
            .into_iter()
            .map(|seed| integrator.trace(seed, false))
            .collect();
        self.stale = false;
        debug!(lines = self.lines.len(), "traced gravity field");
    }

    fn refresh(&mut self) {
        if self.stale {
            self.trace_lines();
        }
        self.rebuild_scene();
    }

    fn rebuild_scene(&mut self) {
        let mut entities: Vec<Entity<GravityFieldAction>> = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, body)| {
                Entity::new(
                    Shape::Circle {
                        center: body.position,
                        radius: body.radius,
                    },
                    Style::fill(Color::BLACK),
                )
                .on_drag(GravityFieldAction::MoveBody(i))
            })
            .collect();

        if let Some(direction) = self.probe_field().try_unit() {
            entities.push(Entity::new(
                Shape::Arrow {
                    start: self.probe,
                    end: self.probe + direction * self.probe_arrow_length,
                },
                Style::stroke(Color::RED),
            ));
        }
        entities.push(
            Entity::new(
                Shape::Circle {
                    center: self.probe,
                    radius: self.probe_radius,
                },
                Style::fill(Color::RED),
            )
            .on_drag(GravityFieldAction::MoveProbe),
        );

        entities.extend(field_line_entities(&self.lines, &self.style));
        self.viewport.set_entities(entities);
    }
}

impl Visualization for GravityFieldVisualizer {
    type Action = GravityFieldAction;

    fn viewport(&self) -> &Viewport<GravityFieldAction> {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport<GravityFieldAction> {
        &mut self.viewport
    }

    fn apply(&mut self, dispatch: &Dispatch<GravityFieldAction>) -> Result<(), SimulationError> {
        match dispatch.action {
            GravityFieldAction::MoveBody(index) => self.move_body(index, dispatch.world),
            GravityFieldAction::MoveProbe => {
                self.move_probe(dispatch.world);
                Ok(())
            }
        }
    }

    fn tick(&mut self, _now_ms: f64) {
        self.refresh();
    }
}
