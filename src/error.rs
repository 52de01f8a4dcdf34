use thiserror::Error;

/// Everything that can go wrong while drawing a spiral.
#[derive(Error, Debug)]
pub enum SpiralError {
    /// A point was requested without a complete polar or cartesian pair.
    #[error("invalid point: a complete (radius, angle) or (x, y) pair is required")]
    InvalidPoint,

    /// The loop would be subdivided into zero steps.
    #[error("degenerate loop: radius {radius} with step distance ratio {ratio} yields no steps")]
    DegenerateLoop { radius: f64, ratio: f64 },

    /// A configuration value is unusable.
    #[error("config error: {0}")]
    InvalidConfig(String),

    /// Decoding the reference or encoding the output failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpiralError>;
