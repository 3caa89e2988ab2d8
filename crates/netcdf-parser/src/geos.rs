//! GEOS cube-sphere output: one `.nc4` file with an embedded tile axis.

use std::path::{Path, PathBuf};

use cubesphere::{MultiTileSource, TileSlice};
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::native;

/// A GEOS file whose variables are laid out `[time, lev, tile, y, x]`.
///
/// Static 3D variables laid out `[tile, y, x]` (such as the `lons` and
/// `lats` cell centers) are also readable; the level is ignored for them.
#[derive(Debug, Clone)]
pub struct GeosFile {
    path: PathBuf,
}

impl GeosFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every tile of `variable` at `level_index` (time 0).
    pub fn read(&self, variable: &str, level_index: usize) -> NetCdfResult<Vec<TileSlice>> {
        let file = native::open(&self.path)?;
        let var = native::variable(&file, variable, &self.path)?;
        let shape = native::shape(&var);

        let (raw, tiles, ny, nx) = match shape[..] {
            [_, levels, tiles, ny, nx] => {
                native::check_level(level_index, levels, variable, &self.path)?;
                let raw = var
                    .get_values::<f64, _>((0, level_index, .., .., ..))
                    .map_err(|e| NetCdfError::library(self.path.display().to_string(), e))?;
                (raw, tiles, ny, nx)
            }
            [tiles, ny, nx] => {
                let raw = var
                    .get_values::<f64, _>(..)
                    .map_err(|e| NetCdfError::library(self.path.display().to_string(), e))?;
                (raw, tiles, ny, nx)
            }
            _ => {
                return Err(NetCdfError::InvalidFormat(format!(
                    "'{}' in {} has shape {:?}, expected [time, lev, tile, y, x] or [tile, y, x]",
                    variable,
                    self.path.display(),
                    shape
                )))
            }
        };

        if ny == 0 || nx == 0 || tiles == 0 {
            return Err(NetCdfError::InvalidFormat(format!(
                "'{}' in {} has an empty tile axis: {:?}",
                variable,
                self.path.display(),
                shape
            )));
        }

        let values = native::unpack(&var, raw);
        debug!(
            path = %self.path.display(),
            variable,
            level_index,
            tiles,
            ny,
            nx,
            "Read GEOS variable"
        );

        values
            .chunks_exact(ny * nx)
            .map(|chunk| {
                TileSlice::new(ny, nx, chunk.to_vec())
                    .map_err(|e| NetCdfError::InvalidFormat(e.to_string()))
            })
            .collect()
    }
}

impl MultiTileSource for GeosFile {
    fn read_tiles(&self, variable: &str, level_index: usize) -> cubesphere::Result<Vec<TileSlice>> {
        Ok(self.read(variable, level_index)?)
    }
}
