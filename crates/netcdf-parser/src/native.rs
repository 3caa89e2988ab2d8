//! Thin helpers over the native netcdf library.
//!
//! Values are read as `f64` (libnetcdf converts from the stored type) and
//! unpacked the way CF readers do: `_FillValue` / `missing_value` become
//! NaN, then `scale_factor` and `add_offset` are applied.

use std::path::Path;
use std::sync::Once;

use crate::error::{NetCdfError, NetCdfResult};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist).
///
/// Call this early in `main()`, before any HDF5/NetCDF operation. It is safe
/// to call more than once.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Open a NetCDF file for reading.
pub(crate) fn open(path: &Path) -> NetCdfResult<netcdf::File> {
    if !path.exists() {
        return Err(NetCdfError::MissingData(format!(
            "file not found: {}",
            path.display()
        )));
    }
    netcdf::open(path).map_err(|e| NetCdfError::library(path.display().to_string(), e))
}

/// Look up a variable, naming the file when it is absent.
pub(crate) fn variable<'f>(
    file: &'f netcdf::File,
    name: &str,
    path: &Path,
) -> NetCdfResult<netcdf::Variable<'f>> {
    file.variable(name).ok_or_else(|| {
        NetCdfError::MissingData(format!("variable '{}' in {}", name, path.display()))
    })
}

/// Dimension lengths of a variable, outermost first.
pub(crate) fn shape(var: &netcdf::Variable) -> Vec<usize> {
    var.dimensions().iter().map(|dim| dim.len()).collect()
}

/// Check that `level_index` exists on a level axis of length `levels`.
pub(crate) fn check_level(
    level_index: usize,
    levels: usize,
    name: &str,
    path: &Path,
) -> NetCdfResult<()> {
    if level_index >= levels {
        return Err(NetCdfError::MissingData(format!(
            "level {} of '{}' in {} (file has {} levels)",
            level_index + 1,
            name,
            path.display(),
            levels
        )));
    }
    Ok(())
}

/// Apply CF fill masking and packing attributes to raw values.
pub(crate) fn unpack(var: &netcdf::Variable, mut values: Vec<f64>) -> Vec<f64> {
    let fill = get_f64_attr(var, "_FillValue").or_else(|| get_f64_attr(var, "missing_value"));
    let scale = get_f64_attr(var, "scale_factor").unwrap_or(1.0);
    let offset = get_f64_attr(var, "add_offset").unwrap_or(0.0);

    for value in &mut values {
        *value = match fill {
            Some(fill) if *value == fill => f64::NAN,
            _ => *value * scale + offset,
        };
    }
    values
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get an f64 attribute.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}
