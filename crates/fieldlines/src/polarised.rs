use geometry::PointExt;
use nalgebra::Point2;
use tracing::debug;

use crate::integrator::{FieldLine, FieldLineIntegrator, Termination};
use crate::law::FieldLaw;
use crate::seeding::{RING_START_ANGLE, ring_seeds};

/// Ring seeds sit this far out, relative to the source radius
pub const SEED_RADIUS_FACTOR: f64 = 1.01;

/// A sink's ring seed is skipped when it lies within `radius · ratio` of a
/// point where an earlier line was absorbed by that sink
pub const SINK_EXCLUSION_RATIO: f64 = 0.2;

/// Traces `lines_per_source` lines out of every source of a mixed-polarity
/// field.
///
/// Sources with non-negative strength are processed first, in their original
/// order, then the sinks. Lines from sinks are walked against the field and
/// reversed afterwards so that every returned line follows the field. Where
/// a line from a source ends on a sink, no extra line is started from that
/// sink close to the same spot.
///
/// The integrator's absorbers must be indexed like its sources.
pub fn trace_polarised<L: FieldLaw>(
    integrator: &FieldLineIntegrator<'_, L>,
    lines_per_source: usize,
) -> Vec<FieldLine> {
    let sources = integrator.sources();
    let mut order: Vec<usize> = (0..sources.len()).collect();
    order.sort_by_key(|&i| sources[i].is_sink());

    let mut hit_points: Vec<Vec<Point2<f64>>> = vec![Vec::new(); sources.len()];
    let mut lines = Vec::new();

    for index in order {
        let source = &sources[index];
        let reversed = source.is_sink();
        let exclusion = source.radius * SINK_EXCLUSION_RATIO;

        let seeds: Vec<Point2<f64>> = ring_seeds(
            &source.position,
            source.radius * SEED_RADIUS_FACTOR,
            lines_per_source,
            RING_START_ANGLE,
        )
        .into_iter()
        .filter(|seed| {
            !hit_points[index]
                .iter()
                .any(|hit| hit.distance_to(seed) < exclusion)
        })
        .collect();

        debug!(source = index, seeds = seeds.len(), reversed, "tracing source");

        for seed in seeds {
            let mut line = integrator.trace(seed, reversed);
            if let Termination::Absorbed { body } = line.termination {
                if sources.get(body).is_some_and(|s| s.is_sink()) {
                    if let Some(end) = line.last() {
                        hit_points[body].push(*end);
                    }
                }
            }
            if reversed {
                line.reverse();
            }
            lines.push(line);
        }
    }

    lines
}
