//! Error types for the crop editor and crop execution.

use thiserror::Error;

/// Errors surfaced by the library.
#[derive(Error, Debug)]
pub enum Error {
    /// A programmatic caller asked for a negative width or height.
    #[error("invalid crop dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// NaN or infinite coordinate.
    #[error("non-finite crop coordinate")]
    NonFinite,

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f64),

    #[error("invalid minimum size: {width}x{height}")]
    InvalidMinimumSize { width: i32, height: i32 },

    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    /// The requested crop does not overlap the media at all.
    #[error("crop region is empty after clamping to {width}x{height} media")]
    EmptyCrop { width: u32, height: u32 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;
