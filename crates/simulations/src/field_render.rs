//! Field lines as drawable entities.

use std::f64::consts::FRAC_PI_4;

use fieldlines::{FieldLine, MagnitudeRange};
use geometry::PointExt;
use viewport::{Color, Entity, Shape, Style};

/// How traced field lines are drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLineStyle {
    /// Colours segments from weak to strong field; black otherwise
    pub colored: bool,
    /// Samples between arrowheads; zero draws none
    pub arrow_spacing: usize,
    /// Length of each arrowhead stroke, in world units
    pub arrow_length: f64,
}

/// One line entity per segment plus an arrowhead every
/// `style.arrow_spacing` samples, pointing along the line.
///
/// Colours are scaled over the magnitudes of all `lines` together.
pub fn field_line_entities<A>(lines: &[FieldLine], style: &FieldLineStyle) -> Vec<Entity<A>> {
    let range = if style.colored {
        MagnitudeRange::from_lines(lines)
    } else {
        None
    };
    let color_of = |magnitude: f64| match range {
        Some(range) => Color::FIELD_WEAK.lerp(Color::FIELD_STRONG, range.factor(magnitude)),
        None => Color::BLACK,
    };

    let mut entities = Vec::new();
    for line in lines {
        for (j, pair) in line.samples.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            let color = color_of(previous.magnitude);
            entities.push(Entity::new(
                Shape::Line {
                    start: previous.point,
                    end: current.point,
                },
                Style::stroke(color),
            ));

            let index = j + 1;
            if style.arrow_spacing > 0 && index % style.arrow_spacing == 0 {
                let back = current.point.angle_to(&previous.point);
                for side in [FRAC_PI_4, -FRAC_PI_4] {
                    entities.push(Entity::new(
                        Shape::Line {
                            start: current.point,
                            end: current.point.move_at_angle(back + side, style.arrow_length),
                        },
                        Style::stroke(color),
                    ));
                }
            }
        }
    }
    entities
}
