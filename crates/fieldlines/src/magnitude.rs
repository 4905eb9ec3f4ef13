use crate::integrator::FieldLine;

/// Smallest and largest field magnitude over a set of lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeRange {
    pub min: f64,
    pub max: f64,
}

impl MagnitudeRange {
    /// `None` when the lines carry no finite magnitude at all
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a FieldLine>) -> Option<Self> {
        lines
            .into_iter()
            .flat_map(|line| line.samples.iter())
            .map(|sample| sample.magnitude)
            .filter(|m| m.is_finite())
            .fold(None, |range, m| match range {
                None => Some(Self { min: m, max: m }),
                Some(r) => Some(Self {
                    min: r.min.min(m),
                    max: r.max.max(m),
                }),
            })
    }

    /// Position of `magnitude` within the range, clamped to `[0, 1]`.
    ///
    /// A flat range maps everything to 0.
    pub fn factor(&self, magnitude: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() || !magnitude.is_finite() {
            return 0.0;
        }
        ((magnitude - self.min) / span).clamp(0.0, 1.0)
    }
}
