use thiserror::Error;

/// Errors raised while creating the rendering surface
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("stdout is not a terminal; atom3d needs an interactive terminal to render into")]
    NotATerminal,

    #[error("unable to query the terminal size")]
    SizeUnavailable,

    #[error("invalid surface dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when building meshes from invalid parameters
#[derive(Error, Debug, PartialEq)]
pub enum GeometryError {
    #[error("sphere needs at least 3 slices, got {0}")]
    TooFewSlices(usize),

    #[error("sphere needs at least 1 stack, got {0}")]
    TooFewStacks(usize),

    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
}
