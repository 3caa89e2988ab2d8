//! Error types for cube-sphere field processing.

use thiserror::Error;

/// Errors raised by the field assembly and mesh construction stages.
///
/// Every variant names the stage and, where one applies, the tile or
/// resolution that failed.
#[derive(Error, Debug)]
pub enum CubeSphereError {
    /// No vertex grid exists for the requested per-tile edge length.
    #[error("grid atlas: no vertex grid for resolution C{resolution}")]
    ResourceNotFound { resolution: usize },

    /// A tile slice, baseline or vertex grid has an unexpected shape.
    #[error("{stage}: shape mismatch on tile {tile}: expected {expected}, found {found}")]
    ShapeMismatch {
        stage: &'static str,
        tile: usize,
        expected: String,
        found: String,
    },

    /// The averaging size does not evenly divide the tile edge length.
    #[error("block reducer: average {average} does not divide tile edge {edge}")]
    InvalidBlockSize { average: usize, edge: usize },

    /// Contradictory or out-of-range arguments.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A backing data source failed to produce a slice.
    #[error("data source: {0}")]
    Source(String),
}

impl CubeSphereError {
    /// Create a ShapeMismatch error from two `(rows, cols)` shapes.
    pub fn shape_mismatch(
        stage: &'static str,
        tile: usize,
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Self {
        Self::ShapeMismatch {
            stage,
            tile,
            expected: format!("{}x{}", expected.0, expected.1),
            found: format!("{}x{}", found.0, found.1),
        }
    }

    /// Create an InvalidArguments error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a Source error.
    pub fn source_failed(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}

/// Result type for cube-sphere operations.
pub type Result<T> = std::result::Result<T, CubeSphereError>;
