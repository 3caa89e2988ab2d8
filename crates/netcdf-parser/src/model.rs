//! Input model selection and path validation.

use std::path::Path;

use cubesphere::{FieldInput, TileSource};

use crate::error::{NetCdfError, NetCdfResult};
use crate::geos::GeosFile;
use crate::gfs::{gfs_tile_paths, GfsTileFile};

/// Which model wrote the input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputModel {
    /// Single `.nc4` file with a tile axis
    Geos,
    /// Six `.tileN.nc` files next to a `.nc` base path
    Gfs,
}

impl InputModel {
    /// File extension the model's paths must carry.
    pub fn extension(&self) -> &'static str {
        match self {
            InputModel::Geos => "nc4",
            InputModel::Gfs => "nc",
        }
    }

    /// Check that `path` carries this model's extension.
    pub fn check_path(&self, path: &Path) -> NetCdfResult<()> {
        if path.extension().and_then(|e| e.to_str()) == Some(self.extension()) {
            Ok(())
        } else {
            Err(NetCdfError::InvalidFormat(format!(
                "{:?} input path extension should be .{}: {}",
                self,
                self.extension(),
                path.display()
            )))
        }
    }

    /// Build the assembler input for `path`.
    pub fn open(&self, path: &Path) -> NetCdfResult<FieldInput> {
        self.check_path(path)?;
        match self {
            InputModel::Geos => Ok(FieldInput::Combined(Box::new(GeosFile::new(path)))),
            InputModel::Gfs => {
                let sources = gfs_tile_paths(path)?
                    .into_iter()
                    .map(|tile_path| Box::new(GfsTileFile::new(tile_path)) as Box<dyn TileSource>)
                    .collect();
                FieldInput::per_tile(sources).map_err(|e| NetCdfError::InvalidFormat(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_checks() {
        assert!(InputModel::Geos.check_path(Path::new("a/b.nc4")).is_ok());
        assert!(InputModel::Geos.check_path(Path::new("a/b.nc")).is_err());
        assert!(InputModel::Gfs.check_path(Path::new("a/b.nc")).is_ok());
        assert!(InputModel::Gfs.check_path(Path::new("a/b.nc4")).is_err());
    }

    #[test]
    fn test_open_selects_layout() {
        let geos = InputModel::Geos.open(Path::new("x.nc4")).unwrap();
        assert_eq!(geos.layout_name(), "combined");
        let gfs = InputModel::Gfs.open(Path::new("x.nc")).unwrap();
        assert_eq!(gfs.layout_name(), "per-tile");
    }
}
