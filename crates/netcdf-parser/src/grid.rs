//! FV3 vertex grid files, one per resolution.

use std::path::{Path, PathBuf};

use cubesphere::{RadianVertices, VertexSource};
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::native;

/// Directory holding `fv3grid_cNNNN.nc4` files with `vlons`/`vlats` in radians.
#[derive(Debug, Clone)]
pub struct Fv3GridDirectory {
    dir: PathBuf,
}

impl Fv3GridDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Grid file path for `resolution` cells per tile edge.
    pub fn grid_path(&self, resolution: usize) -> PathBuf {
        self.dir.join(grid_file_name(resolution))
    }

    /// Read the vertex grid, or `None` when no file exists for `resolution`.
    pub fn read(&self, resolution: usize) -> NetCdfResult<Option<RadianVertices>> {
        let path = self.grid_path(resolution);
        if !path.exists() {
            debug!(path = %path.display(), "No grid file for resolution");
            return Ok(None);
        }

        let file = native::open(&path)?;
        let lons = read_corners(&file, "vlons", resolution, &path)?;
        let lats = read_corners(&file, "vlats", resolution, &path)?;

        Ok(Some(RadianVertices { lons, lats }))
    }
}

impl VertexSource for Fv3GridDirectory {
    fn read_vertices(&self, resolution: usize) -> cubesphere::Result<Option<RadianVertices>> {
        Ok(self.read(resolution)?)
    }
}

/// `fv3grid_c0048.nc4` for resolution 48.
pub fn grid_file_name(resolution: usize) -> String {
    format!("fv3grid_c{:04}.nc4", resolution)
}

fn read_corners(
    file: &netcdf::File,
    name: &str,
    resolution: usize,
    path: &Path,
) -> NetCdfResult<Vec<f64>> {
    let var = native::variable(file, name, path)?;
    let shape = native::shape(&var);
    let side = resolution + 1;
    if shape[..] != [cubesphere::TILE_COUNT, side, side] {
        return Err(NetCdfError::InvalidFormat(format!(
            "'{}' in {} has shape {:?}, expected [{}, {}, {}]",
            name,
            path.display(),
            shape,
            cubesphere::TILE_COUNT,
            side,
            side
        )));
    }

    var.get_values::<f64, _>(..)
        .map_err(|e| NetCdfError::library(path.display().to_string(), e))
}
