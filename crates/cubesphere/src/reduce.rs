//! Square-block averaging of assembled fields.

use tracing::debug;

use crate::error::{CubeSphereError, Result};
use crate::tile::Field;

/// A field reduced over non-overlapping `average x average` blocks.
///
/// The reduced field has `edge / average` cells per tile edge. Cell
/// `(iy, ix)` of the reduced field covers original cells
/// `[iy * average, (iy + 1) * average)` in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedField {
    field: Field,
    average: usize,
}

impl AveragedField {
    /// The reduced values.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Block size used for the reduction.
    pub fn average(&self) -> usize {
        self.average
    }

    /// Cells per tile edge before reduction.
    pub fn source_edge(&self) -> usize {
        self.field.edge() * self.average
    }

    pub fn into_field(self) -> Field {
        self.field
    }
}

/// Average `field` over `average x average` blocks.
///
/// `average == 1` returns the field unchanged. Otherwise `average` must
/// divide the tile edge length.
pub fn reduce(field: Field, average: usize) -> Result<AveragedField> {
    if average == 0 {
        return Err(CubeSphereError::invalid_arguments("average must be >= 1"));
    }
    if average == 1 {
        return Ok(AveragedField { field, average });
    }

    let edge = field.edge();
    if edge % average != 0 {
        return Err(CubeSphereError::InvalidBlockSize { average, edge });
    }

    let reduced_edge = edge / average;
    let norm = 1.0 / (average * average) as f64;
    let reduced = Field::from_fn(reduced_edge, |tile, iy, ix| {
        let mut sum = 0.0;
        for row in iy * average..(iy + 1) * average {
            for col in ix * average..(ix + 1) * average {
                sum += field.get(tile, row, col);
            }
        }
        sum * norm
    });

    debug!(edge, average, reduced_edge, "Block-averaged field");

    Ok(AveragedField {
        field: reduced,
        average,
    })
}
