//! Bar magnets that push and pull each other, with their field lines and a
//! compass.
//!
//! Each magnet is modelled as two point poles a quarter of its width either
//! side of its centre. Pole pairs interact through [`PoleLaw`]; the force on
//! a magnet is the average over its four pole pairings with every other
//! magnet, applied to the whole bar.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use fieldlines::{
    Absorber, FieldLaw, FieldLine, FieldLineIntegrator, PoleLaw, RectCorners, Source,
    rect_edge_seeds,
};
use geometry::{PointExt, VectorExt};
use nalgebra::{Point2, Vector2};
use serde::Serialize;
use tracing::{debug, info};
use viewport::{Color, Dispatch, Entity, Shape, Style, TextAlign, Viewport};

use crate::config::{MagnetConfig, MagnetSimulationConfig, to_point};
use crate::error::{SimulationError, nonzero, positive};
use crate::field_render::{FieldLineStyle, field_line_entities};
use crate::visualization::Visualization;

const NORTH_COLOR: Color = Color::rgb(0xeb, 0x40, 0x34);
const SOUTH_COLOR: Color = Color::rgb(0x0a, 0xcc, 0x17);
const POLE_FONT_PX: f64 = 20.0;

const COMPASS_RIM: Color = Color::rgb(0x99, 0x99, 0x99);
const COMPASS_FACE: Color = Color::rgb(0xcf, 0xcf, 0xcf);
const COMPASS_ROSE: Color = Color::rgb(0xb8, 0xb8, 0xb8);
const NEEDLE_NORTH: Color = Color::rgb(0xff, 0x4d, 0x4d);
const COMPASS_HUB: Color = Color::rgb(0x57, 0x57, 0x57);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnetAction {
    MoveMagnet(usize),
    ReleaseMagnet(usize),
    MoveCompass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Magnet {
    pub center: Point2<f64>,
    /// Radians, counter-clockwise
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub north_strength: f64,
    pub south_strength: f64,
    pub permeability: f64,
    pub mass: f64,
    pub velocity: Vector2<f64>,
    /// Held magnets ignore forces and stay where the pointer puts them
    pub held: bool,
}

impl Magnet {
    pub fn from_config(config: &MagnetConfig) -> Result<Self, SimulationError> {
        Ok(Self {
            center: to_point(config.center),
            rotation: finite("magnet rotation", config.rotation)?,
            width: positive("magnet width", config.width)?,
            height: positive("magnet height", config.height)?,
            north_strength: nonzero("north pole strength", config.north_strength)?,
            south_strength: nonzero("south pole strength", config.south_strength)?,
            permeability: positive("permeability", config.permeability)?,
            mass: positive("magnet mass", config.mass)?,
            velocity: Vector2::zeros(),
            held: false,
        })
    }

    pub fn north_pole(&self) -> Point2<f64> {
        Point2::new(self.center.x - self.width / 4.0, self.center.y)
            .rotate_around(&self.center, self.rotation)
    }

    pub fn south_pole(&self) -> Point2<f64> {
        Point2::new(self.center.x + self.width / 4.0, self.center.y)
            .rotate_around(&self.center, self.rotation)
    }

    pub fn corners(&self) -> RectCorners {
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let c = self.center;
        let corner = |dx: f64, dy: f64| Point2::new(c.x + dx, c.y + dy).rotate_around(&c, self.rotation);
        RectCorners {
            top_left: corner(-hw, hh),
            top_right: corner(hw, hh),
            bottom_left: corner(-hw, -hh),
            bottom_right: corner(hw, -hh),
        }
    }

    /// North then south pole as point sources
    pub fn poles(&self) -> [Source; 2] {
        [
            Source::new(self.north_pole(), self.north_strength, 0.0),
            Source::new(self.south_pole(), self.south_strength, 0.0),
        ]
    }

    /// Force `other` exerts on this magnet: the mean of the four pole-pair
    /// forces
    pub fn force_from(&self, other: &Magnet) -> Vector2<f64> {
        let targets = other.poles();
        let total = self
            .poles()
            .iter()
            .flat_map(|pole| {
                let law = PoleLaw {
                    permeability: self.permeability,
                    probe_strength: pole.strength,
                };
                targets
                    .iter()
                    .map(move |target| law.contribution(&pole.position, target))
            })
            .fold(Vector2::zeros(), |acc, f| acc + f);
        total / 4.0
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimulationError::InvalidValue { field, value })
    }
}

#[derive(Debug)]
pub struct MagnetSimulation {
    viewport: Viewport<MagnetAction>,
    law: PoleLaw,
    magnets: Vec<Magnet>,
    compass: Point2<f64>,
    compass_radius: f64,
    friction: f64,
    seeds_per_magnet: usize,
    step_distance: f64,
    max_steps: usize,
    style: FieldLineStyle,
    lines: Vec<FieldLine>,
    paused: bool,
    visible: bool,
    last_tick_ms: Option<f64>,
}

impl MagnetSimulation {
    pub fn new(config: &MagnetSimulationConfig) -> Result<Self, SimulationError> {
        let magnets = config
            .magnets
            .iter()
            .map(Magnet::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        if !(0.0..=1.0).contains(&config.friction) {
            return Err(SimulationError::InvalidValue {
                field: "friction",
                value: config.friction,
            });
        }
        let mut simulation = Self {
            viewport: config.view.viewport()?,
            law: PoleLaw::default(),
            magnets,
            compass: to_point(config.compass_position),
            compass_radius: positive("compass radius", config.compass_radius)?,
            friction: config.friction,
            seeds_per_magnet: config.seeds_per_magnet,
            step_distance: positive("step distance", config.step_distance)?,
            max_steps: config.max_steps,
            style: FieldLineStyle {
                colored: false,
                arrow_spacing: config.arrow_spacing,
                arrow_length: positive("arrow length", config.arrow_length)?,
            },
            lines: Vec::new(),
            paused: false,
            visible: true,
            last_tick_ms: None,
        };
        info!(magnets = simulation.magnets.len(), "magnet simulation created");
        simulation.refresh();
        Ok(simulation)
    }

    pub fn magnets(&self) -> &[Magnet] {
        &self.magnets
    }

    pub fn lines(&self) -> &[FieldLine] {
        &self.lines
    }

    pub fn compass_position(&self) -> Point2<f64> {
        self.compass
    }

    /// Field felt by a unit north pole at the compass
    pub fn compass_field(&self) -> Vector2<f64> {
        self.law.field_at(&self.compass, &self.poles())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn add_magnet(&mut self, config: &MagnetConfig) -> Result<usize, SimulationError> {
        self.magnets.push(Magnet::from_config(config)?);
        self.refresh();
        Ok(self.magnets.len() - 1)
    }

    pub fn remove_magnet(&mut self, index: usize) -> Result<Magnet, SimulationError> {
        if index >= self.magnets.len() {
            return Err(SimulationError::UnknownMagnet(index));
        }
        let magnet = self.magnets.remove(index);
        self.refresh();
        Ok(magnet)
    }

    pub fn set_rotation(&mut self, index: usize, rotation: f64) -> Result<(), SimulationError> {
        let rotation = finite("magnet rotation", rotation)?;
        self.magnet_mut(index)?.rotation = rotation;
        self.refresh();
        Ok(())
    }

    pub fn move_compass(&mut self, position: Point2<f64>) {
        self.compass = position;
    }

    fn magnet_mut(&mut self, index: usize) -> Result<&mut Magnet, SimulationError> {
        self.magnets
            .get_mut(index)
            .ok_or(SimulationError::UnknownMagnet(index))
    }

    fn poles(&self) -> Vec<Source> {
        self.magnets.iter().flat_map(Magnet::poles).collect()
    }

    /// Moves every free magnet by `dt` seconds. Forces come from the
    /// positions before the step.
    pub fn step(&mut self, dt: f64) {
        let forces: Vec<Vector2<f64>> = self
            .magnets
            .iter()
            .enumerate()
            .map(|(i, magnet)| {
                self.magnets
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .fold(Vector2::zeros(), |acc, (_, other)| acc + magnet.force_from(other))
            })
            .collect();

        for (magnet, force) in self.magnets.iter_mut().zip(forces) {
            if magnet.held {
                continue;
            }
            magnet.velocity += force / magnet.mass * dt;
            magnet.center += magnet.velocity * dt;
            magnet.velocity *= self.friction;
        }
    }

    fn trace_lines(&mut self) {
        let poles = self.poles();
        let absorbers: Vec<Absorber> = self
            .magnets
            .iter()
            .map(|m| Absorber::Quad(m.corners().quad()))
            .collect();
        let integrator = FieldLineIntegrator::new(&self.law, &poles, &absorbers)
            .with_step(self.step_distance)
            .with_max_steps(self.max_steps);

        let mut lines = Vec::new();
        for magnet in &self.magnets {
            let (forward, reverse) = rect_edge_seeds(&magnet.corners(), self.seeds_per_magnet);
            lines.extend(forward.into_iter().map(|seed| integrator.trace(seed, false)));
            lines.extend(reverse.into_iter().map(|seed| {
                let mut line = integrator.trace(seed, true);
                line.reverse();
                line
            }));
        }
        self.lines = lines;
    }

    fn refresh(&mut self) {
        self.trace_lines();
        self.rebuild_scene();
    }

    fn rebuild_scene(&mut self) {
        let mut entities = Vec::new();

        for (i, magnet) in self.magnets.iter().enumerate() {
            let c = magnet.corners();
            let top_mid = c.top_left.midpoint(&c.top_right);
            let bottom_mid = c.bottom_left.midpoint(&c.bottom_right);
            entities.push(Entity::new(
                Shape::Polygon {
                    points: vec![c.top_left, top_mid, bottom_mid, c.bottom_left],
                },
                Style::fill(NORTH_COLOR),
            ));
            entities.push(Entity::new(
                Shape::Polygon {
                    points: vec![c.top_right, top_mid, bottom_mid, c.bottom_right],
                },
                Style::fill(SOUTH_COLOR),
            ));
            entities.push(
                Entity::new(
                    Shape::Polygon {
                        points: vec![c.top_left, c.top_right, c.bottom_right, c.bottom_left],
                    },
                    Style::stroke(Color::BLACK),
                )
                .on_drag(MagnetAction::MoveMagnet(i))
                .on_release(MagnetAction::ReleaseMagnet(i)),
            );
            for (label, position) in [("N", magnet.north_pole()), ("S", magnet.south_pole())] {
                entities.push(Entity::new(
                    Shape::Text {
                        position,
                        text: label.to_string(),
                        font_px: POLE_FONT_PX,
                        align: TextAlign::Center,
                    },
                    Style::fill(Color::BLACK),
                ));
            }
        }

        entities.extend(field_line_entities(&self.lines, &self.style));
        entities.extend(self.compass_entities());
        self.viewport.set_entities(entities);
    }

    fn compass_entities(&self) -> Vec<Entity<MagnetAction>> {
        let center = self.compass;
        let r = self.compass_radius;
        let circle = |radius: f64, color: Color| {
            Entity::new(Shape::Circle { center, radius }, Style::fill(color))
        };

        let mut entities = vec![
            circle(r, COMPASS_RIM).on_drag(MagnetAction::MoveCompass),
            circle(r * 0.9, COMPASS_FACE),
        ];

        // Compass rose: long points on the axes, short ones on the diagonals
        for i in 0..8 {
            let (size, length) = if i % 2 == 0 {
                (r * 0.1, r * 0.8)
            } else {
                (r * 0.05, r * 0.6)
            };
            let angle = FRAC_PI_4 * i as f64;
            entities.push(Entity::new(
                Shape::Polygon {
                    points: vec![
                        center.move_at_angle(angle, length),
                        center.move_at_angle(angle - FRAC_PI_2, size),
                        center.move_at_angle(angle + FRAC_PI_2, size),
                    ],
                },
                Style::fill(COMPASS_ROSE),
            ));
        }

        let needle = self.compass_field().heading() - PI;
        for (tip, color) in [(needle, NEEDLE_NORTH), (needle + PI, Color::WHITE)] {
            entities.push(Entity::new(
                Shape::Polygon {
                    points: vec![
                        center.move_at_angle(tip, r * 0.75),
                        center.move_at_angle(needle + FRAC_PI_2, r * 0.2),
                        center.move_at_angle(needle - FRAC_PI_2, r * 0.2),
                    ],
                },
                Style::fill(color),
            ));
        }
        entities.push(circle(r * 0.1, COMPASS_HUB));

        let step = TAU / 12.0;
        for i in 0..12 {
            let angle = step * i as f64;
            entities.push(Entity::new(
                Shape::Line {
                    start: center.move_at_angle(angle, r * 0.9),
                    end: center.move_at_angle(angle, r * 0.8),
                },
                Style::stroke(COMPASS_RIM).with_line_width(2.0),
            ));
        }
        entities
    }
}

impl Visualization for MagnetSimulation {
    type Action = MagnetAction;

    fn viewport(&self) -> &Viewport<MagnetAction> {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport<MagnetAction> {
        &mut self.viewport
    }

    fn apply(&mut self, dispatch: &Dispatch<MagnetAction>) -> Result<(), SimulationError> {
        match dispatch.action {
            MagnetAction::MoveMagnet(index) => {
                let magnet = self.magnet_mut(index)?;
                if !magnet.held {
                    debug!(index, "magnet grabbed");
                }
                magnet.center = dispatch.world;
                magnet.velocity = Vector2::zeros();
                magnet.held = true;
            }
            MagnetAction::ReleaseMagnet(index) => self.magnet_mut(index)?.held = false,
            MagnetAction::MoveCompass => self.move_compass(dispatch.world),
        }
        Ok(())
    }

    /// Steps by the real time since the previous tick
    fn tick(&mut self, now_ms: f64) {
        let dt = self
            .last_tick_ms
            .replace(now_ms)
            .map_or(0.0, |last| ((now_ms - last) / 1000.0).max(0.0));
        if !self.paused && self.visible {
            self.step(dt);
        }
        self.refresh();
    }

    fn set_visible(&mut self, visible: bool, now_ms: f64) {
        self.visible = visible;
        if visible {
            self.last_tick_ms = Some(now_ms);
        }
    }

    fn pointer_cancel(&mut self) {
        for magnet in &mut self.magnets {
            magnet.held = false;
        }
        self.viewport.pointer_cancel();
    }
}
