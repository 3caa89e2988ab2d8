//! Error types for rendering.

use thiserror::Error;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    /// Requested canvas has no pixels
    #[error("Cannot render an empty {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },

    /// Canvas dimensions do not fit in `u32`
    #[error("Cross atlas of {cols}x{rows} cells at scale {scale} is too large to render")]
    CanvasTooLarge { cols: usize, rows: usize, scale: u32 },

    /// Embedded font could not be parsed
    #[error("Failed to load the embedded font")]
    Font,

    /// Unknown color map name
    #[error("Unsupported color map: {0}")]
    UnsupportedColorMap(String),

    /// Image encoder failure
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
