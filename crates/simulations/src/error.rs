use circuit::CircuitError;
use thiserror::Error;
use viewport::ViewportError;

/// Rejected inputs to a visualization. The model is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("{field} must be a positive finite number (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite non-zero number (got {value})")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("body {0} does not exist")]
    UnknownBody(u32),

    #[error("charge {0} does not exist")]
    UnknownCharge(usize),

    #[error("magnet {0} does not exist")]
    UnknownMagnet(usize),

    #[error("no resistor is waiting for a new value")]
    NoPendingEdit,

    #[error(transparent)]
    Circuit(#[from] CircuitError),

    #[error(transparent)]
    Viewport(#[from] ViewportError),
}

/// Accepts strictly positive finite values
pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::NotPositive { field, value })
    }
}

/// Accepts finite values other than zero, of either sign
pub(crate) fn nonzero(field: &'static str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() && value != 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::InvalidValue { field, value })
    }
}
