use approx::assert_relative_eq;
use nalgebra::Point2;

use crate::integrator::{FieldLine, FieldSample, Termination};
use crate::magnitude::MagnitudeRange;

fn line(magnitudes: &[f64]) -> FieldLine {
    FieldLine {
        samples: magnitudes
            .iter()
            .map(|&magnitude| FieldSample {
                point: Point2::origin(),
                magnitude,
            })
            .collect(),
        termination: Termination::Dangling,
    }
}

#[test]
fn test_range_over_lines() {
    let lines = [line(&[2.0, 5.0]), line(&[1.0, f64::NAN, 9.0])];
    let range = MagnitudeRange::from_lines(&lines).unwrap();

    assert_relative_eq!(range.min, 1.0);
    assert_relative_eq!(range.max, 9.0);
    assert_relative_eq!(range.factor(5.0), 0.5);
    assert_relative_eq!(range.factor(20.0), 1.0);
    assert_relative_eq!(range.factor(f64::NAN), 0.0);
}

#[test]
fn test_flat_range() {
    let range = MagnitudeRange::from_lines(&[line(&[3.0, 3.0])]).unwrap();
    assert_relative_eq!(range.factor(3.0), 0.0);
}

#[test]
fn test_empty_range() {
    assert!(MagnitudeRange::from_lines(&Vec::<FieldLine>::new()).is_none());
    assert!(MagnitudeRange::from_lines(&[line(&[f64::INFINITY])]).is_none());
}
