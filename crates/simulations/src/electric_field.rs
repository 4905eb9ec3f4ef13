//! Electric field lines between draggable point charges.

use fieldlines::{
    Absorber, ELECTRIC_CONSTANT, FieldLaw, FieldLine, FieldLineIntegrator, InverseSquare, Source,
    trace_polarised,
};
use geometry::VectorExt;
use nalgebra::{Point2, Vector2};
use tracing::{debug, info};
use viewport::{Color, Dispatch, Entity, Shape, Style, TextAlign, Viewport};

use crate::config::{ChargeConfig, ElectricFieldConfig};
use crate::error::{SimulationError, positive};
use crate::field_render::{FieldLineStyle, field_line_entities};
use crate::visualization::Visualization;

const SIGN_FONT_PX: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectricFieldAction {
    MoveCharge(usize),
    MoveProbe,
}

/// Lines leave every positive charge on a ring of evenly spaced seeds and
/// end on negative charges; negative charges then seed the lines that no
/// positive charge reached. A draggable test charge shows the force it
/// feels.
#[derive(Debug)]
pub struct ElectricFieldVisualizer {
    viewport: Viewport<ElectricFieldAction>,
    law: InverseSquare,
    charges: Vec<Source>,
    probe: Source,
    probe_arrow_length: f64,
    lines_per_charge: usize,
    step_distance: f64,
    max_steps: usize,
    style: FieldLineStyle,
    lines: Vec<FieldLine>,
    stale: bool,
}

impl ElectricFieldVisualizer {
    pub fn new(config: &ElectricFieldConfig) -> Result<Self, SimulationError> {
        let charges = config
            .charges
            .iter()
            .map(ChargeConfig::to_source)
            .collect::<Result<Vec<_>, _>>()?;
        let mut visualizer = Self {
            viewport: config.view.viewport()?,
            law: InverseSquare::electric(),
            charges,
            probe: config.probe.to_source()?,
            probe_arrow_length: positive("probe arrow length", config.probe_arrow_length)?,
            lines_per_charge: config.lines_per_charge,
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
        info!(charges = visualizer.charges.len(), "electric field created");
        visualizer.refresh();
        Ok(visualizer)
    }

    pub fn charges(&self) -> &[Source] {
        &self.charges
    }

    pub fn lines(&self) -> &[FieldLine] {
        &self.lines
    }

    pub fn probe(&self) -> &Source {
        &self.probe
    }

    /// Force on the test charge, in newtons
    pub fn probe_force(&self) -> Vector2<f64> {
        let law = InverseSquare {
            constant: ELECTRIC_CONSTANT,
            probe_strength: self.probe.strength,
        };
        law.field_at(&self.probe.position, &self.charges)
    }

    pub fn is_colored(&self) -> bool {
        self.style.colored
    }

    pub fn set_colored(&mut self, colored: bool) {
        self.style.colored = colored;
        self.rebuild_scene();
    }

    pub fn add_charge(&mut self, config: &ChargeConfig) -> Result<usize, SimulationError> {
        self.charges.push(config.to_source()?);
        self.stale = true;
        self.refresh();
        Ok(self.charges.len() - 1)
    }

    pub fn remove_charge(&mut self, index: usize) -> Result<Source, SimulationError> {
        if index >= self.charges.len() {
            return Err(SimulationError::UnknownCharge(index));
        }
        let charge = self.charges.remove(index);
        self.stale = true;
        self.refresh();
        Ok(charge)
    }

    pub fn move_charge(
        &mut self,
        index: usize,
        position: Point2<f64>,
    ) -> Result<(), SimulationError> {
        let charge = self
            .charges
            .get_mut(index)
            .ok_or(SimulationError::UnknownCharge(index))?;
        charge.position = position;
        self.stale = true;
        Ok(())
    }

    pub fn move_probe(&mut self, position: Point2<f64>) {
        self.probe.position = position;
    }

    fn trace_lines(&mut self) {
        let absorbers: Vec<Absorber> = self.charges.iter().map(Absorber::circle).collect();
        let integrator = FieldLineIntegrator::new(&self.law, &self.charges, &absorbers)
            .with_step(self.step_distance)
            .with_max_steps(self.max_steps);
        self.lines = trace_polarised(&integrator, self.lines_per_charge);
        self.stale = false;
        debug!(lines = self.lines.len(), "traced electric field");
    }

    fn refresh(&mut self) {
        if self.stale {
            self.trace_lines();
        }
        self.rebuild_scene();
    }

    fn rebuild_scene(&mut self) {
        let mut entities = Vec::new();

        if let Some(direction) = self.probe_force().try_unit() {
            entities.push(Entity::new(
                Shape::Arrow {
                    start: self.probe.position,
                    end: self.probe.position + direction * self.probe_arrow_length,
                },
                Style::stroke(Color::RED),
            ));
        }
        entities.push(
            Entity::new(
                Shape::Circle {
                    center: self.probe.position,
                    radius: self.probe.radius,
                },
                Style::fill(Color::RED),
            )
            .on_drag(ElectricFieldAction::MoveProbe),
        );

        for (i, charge) in self.charges.iter().enumerate() {
            entities.push(
                Entity::new(
                    Shape::Circle {
                        center: charge.position,
                        radius: charge.radius,
                    },
                    Style::fill(Color::BLACK),
                )
                .on_drag(ElectricFieldAction::MoveCharge(i)),
            );
            entities.push(Entity::new(
                Shape::Text {
                    position: charge.position,
                    text: if charge.is_sink() { "-" } else { "+" }.to_string(),
                    font_px: SIGN_FONT_PX,
                    align: TextAlign::Center,
                },
                Style::fill(Color::WHITE),
            ));
        }

        entities.extend(field_line_entities(&self.lines, &self.style));
        self.viewport.set_entities(entities);
    }
}

impl Visualization for ElectricFieldVisualizer {
    type Action = ElectricFieldAction;

    fn viewport(&self) -> &Viewport<ElectricFieldAction> {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport<ElectricFieldAction> {
        &mut self.viewport
    }

    fn apply(&mut self, dispatch: &Dispatch<ElectricFieldAction>) -> Result<(), SimulationError> {
        match dispatch.action {
            ElectricFieldAction::MoveCharge(index) => self.move_charge(index, dispatch.world),
            ElectricFieldAction::MoveProbe => {
                self.move_probe(dispatch.world);
                Ok(())
            }
        }
    }

    fn tick(&mut self, _now_ms: f64) {
        self.refresh();
    }
}
