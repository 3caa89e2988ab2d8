//! Error types for NetCDF parsing operations.

use cubesphere::CubeSphereError;
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing required variable, dimension or level
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format or path
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Error reported by libnetcdf
    #[error("NetCDF library error in {path}: {source}")]
    Library {
        path: String,
        #[source]
        source: netcdf::Error,
    },
}

impl NetCdfError {
    /// Wrap a library error with the file it came from.
    pub fn library(path: impl Into<String>, source: netcdf::Error) -> Self {
        Self::Library {
            path: path.into(),
            source,
        }
    }
}

impl From<NetCdfError> for CubeSphereError {
    fn from(err: NetCdfError) -> Self {
        CubeSphereError::Source(err.to_string())
    }
}
