//! NetCDF readers for FV3 cube-sphere output and grid files.
//!
//! This crate implements the `cubesphere` source traits on top of the
//! native `netcdf` library:
//!
//! - [`GeosFile`]: GEOS `.nc4` output, variables `[time, lev, tile, y, x]`
//! - [`GfsTileFile`]: GFS per-tile `.tileN.nc` output, variables `[time, lev, y, x]`
//! - [`Fv3GridDirectory`]: `fv3grid_cNNNN.nc4` files with `vlons`/`vlats` in radians
//!
//! # Implementation Notes
//!
//! Every read opens its file, reads a single hyperslab and closes it.
//! Values are read as `f64`; fill values become NaN and CF packing
//! attributes are applied, so the core never sees raw packed data.

pub mod error;
pub mod geos;
pub mod gfs;
pub mod grid;
pub mod model;
pub mod native;

pub use error::{NetCdfError, NetCdfResult};
pub use geos::GeosFile;
pub use gfs::{gfs_tile_paths, GfsTileFile};
pub use grid::{grid_file_name, Fv3GridDirectory};
pub use model::InputModel;
pub use native::silence_hdf5_errors;
