use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("buffer holds {actual} bytes, expected {width}x{height}x{channels} = {expected}")]
    BufferLength {
        width: u32,
        height: u32,
        channels: u32,
        expected: usize,
        actual: usize,
    },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Raised when an internal guarantee of the matcher does not hold.
    #[error("invariant violated: scaled disparity {scaled} at ({x}, {y}) is outside [0, 255] (disparity {disparity}, search distance {search_distance})")]
    InvariantViolation {
        x: u32,
        y: u32,
        disparity: i32,
        search_distance: u32,
        scaled: f64,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
