use thiserror::Error;

/// Errors raised when constructing or reconfiguring a viewport.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("camera extents and zoom must be positive and finite (width {width}, height {height}, zoom {zoom})")]
    InvalidCamera { width: f64, height: f64, zoom: f64 },

    #[error("device size must be positive and finite (got {width}x{height})")]
    InvalidDeviceSize { width: f64, height: f64 },
}
