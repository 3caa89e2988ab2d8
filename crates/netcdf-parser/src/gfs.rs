//! GFS cube-sphere output: one `.nc` file per tile.

use std::path::{Path, PathBuf};

use cubesphere::{TileSlice, TileSource, TILE_COUNT};
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::native;

/// Per-tile file paths for a GFS base path.
///
/// `dynf000.nc` expands to `dynf000.tile1.nc` ... `dynf000.tile6.nc`.
pub fn gfs_tile_paths(path: &Path) -> NetCdfResult<Vec<PathBuf>> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|_| path.extension().and_then(|e| e.to_str()) == Some("nc"))
        .ok_or_else(|| {
            NetCdfError::InvalidFormat(format!(
                "GFS path must end in .nc: {}",
                path.display()
            ))
        })?;

    Ok((1..=TILE_COUNT)
        .map(|tile| path.with_file_name(format!("{}.tile{}.nc", stem, tile)))
        .collect())
}

/// One GFS tile file whose variables are laid out `[time, lev, y, x]`.
#[derive(Debug, Clone)]
pub struct GfsTileFile {
    path: PathBuf,
}

impl GfsTileFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read `variable` at `level_index` (time 0).
    pub fn read(&self, variable: &str, level_index: usize) -> NetCdfResult<TileSlice> {
        let file = native::open(&self.path)?;
        let var = native::variable(&file, variable, &self.path)?;
        let shape = native::shape(&var);

        let [_, levels, ny, nx] = shape[..] else {
            return Err(NetCdfError::InvalidFormat(format!(
                "'{}' in {} has shape {:?}, expected [time, lev, y, x]",
                variable,
                self.path.display(),
                shape
            )));
        };
        native::check_level(level_index, levels, variable, &self.path)?;

        let raw = var
            .get_values::<f64, _>((0, level_index, .., ..))
            .map_err(|e| NetCdfError::library(self.path.display().to_string(), e))?;
        debug!(path = %self.path.display(), variable, level_index, ny, nx, "Read GFS tile");

        TileSlice::new(ny, nx, native::unpack(&var, raw))
            .map_err(|e| NetCdfError::InvalidFormat(e.to_string()))
    }
}

impl TileSource for GfsTileFile {
    fn read_slice(&self, variable: &str, level_index: usize) -> cubesphere::Result<TileSlice> {
        Ok(self.read(variable, level_index)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gfs_tile_paths() {
        let paths = gfs_tile_paths(Path::new("/data/gfs/dynf006.nc")).unwrap();
        assert_eq!(paths.len(), 6);
        assert_eq!(paths[0], PathBuf::from("/data/gfs/dynf006.tile1.nc"));
        assert_eq!(paths[5], PathBuf::from("/data/gfs/dynf006.tile6.nc"));
    }

    #[test]
    fn test_gfs_tile_paths_only_touch_extension() {
        let paths = gfs_tile_paths(Path::new("/data/run.nc.d/sfc.nc")).unwrap();
        assert_eq!(paths[2], PathBuf::from("/data/run.nc.d/sfc.tile3.nc"));
    }

    #[test]
    fn test_gfs_tile_paths_requires_nc() {
        assert!(gfs_tile_paths(Path::new("/data/geos.nc4")).is_err());
        assert!(gfs_tile_paths(Path::new("/data/noext")).is_err());
    }
}
