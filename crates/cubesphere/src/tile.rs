//! Tiles, per-tile slices and assembled cube-sphere fields.

use crate::error::{CubeSphereError, Result};

/// Number of faces on the cube-sphere.
pub const TILE_COUNT: usize = 6;

/// A single 2D slice read from one tile, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSlice {
    /// Number of rows
    pub ny: usize,
    /// Number of columns
    pub nx: usize,
    /// Values in row-major order (`ny * nx` entries)
    pub data: Vec<f64>,
}

impl TileSlice {
    /// Create a slice, checking that `data` holds exactly `ny * nx` values.
    pub fn new(ny: usize, nx: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != ny * nx {
            return Err(CubeSphereError::invalid_arguments(format!(
                "slice of {}x{} needs {} values, got {}",
                ny,
                nx,
                ny * nx,
                data.len()
            )));
        }
        Ok(Self { ny, nx, data })
    }

    /// Build a slice from a function of `(row, col)`.
    pub fn from_fn(ny: usize, nx: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(ny * nx);
        for row in 0..ny {
            for col in 0..nx {
                data.push(f(row, col));
            }
        }
        Self { ny, nx, data }
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Value at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.nx + col]
    }
}

/// A scalar field over all six tiles, indexed `[tile][row][col]`.
///
/// All tiles share the same square shape. Fields are immutable once
/// assembled; later stages build new fields instead of mutating.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    edge: usize,
    data: Vec<f64>,
}

impl Field {
    /// Assemble a field from exactly six square slices of identical shape.
    ///
    /// `stage` is reported in the error when a slice does not match the
    /// first tile.
    pub fn from_tiles(stage: &'static str, tiles: Vec<TileSlice>) -> Result<Self> {
        if tiles.len() != TILE_COUNT {
            return Err(CubeSphereError::invalid_arguments(format!(
                "{}: expected {} tiles, got {}",
                stage,
                TILE_COUNT,
                tiles.len()
            )));
        }

        let reference = tiles[0].shape();
        if reference.0 != reference.1 {
            return Err(CubeSphereError::shape_mismatch(
                stage,
                0,
                (reference.1, reference.1),
                reference,
            ));
        }

        let edge = reference.0;
        let mut data = Vec::with_capacity(TILE_COUNT * edge * edge);
        for (tile, slice) in tiles.into_iter().enumerate() {
            if slice.shape() != reference {
                return Err(CubeSphereError::shape_mismatch(
                    stage,
                    tile,
                    reference,
                    slice.shape(),
                ));
            }
            data.extend(slice.data);
        }

        Ok(Self { edge, data })
    }

    /// Build a field of edge `edge` from a function of `(tile, row, col)`.
    pub fn from_fn(edge: usize, f: impl Fn(usize, usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(TILE_COUNT * edge * edge);
        for tile in 0..TILE_COUNT {
            for row in 0..edge {
                for col in 0..edge {
                    data.push(f(tile, row, col));
                }
            }
        }
        Self { edge, data }
    }

    /// Cells per tile edge (`ny == nx`).
    pub fn edge(&self) -> usize {
        self.edge
    }

    /// Shape as `(tiles, rows, cols)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (TILE_COUNT, self.edge, self.edge)
    }

    /// Value at `(tile, row, col)`.
    #[inline]
    pub fn get(&self, tile: usize, row: usize, col: usize) -> f64 {
        self.data[(tile * self.edge + row) * self.edge + col]
    }

    /// Row-major values of one tile.
    pub fn tile(&self, tile: usize) -> &[f64] {
        let size = self.edge * self.edge;
        &self.data[tile * size..(tile + 1) * size]
    }

    /// All values, tile-major then row-major.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Elementwise `self - baseline`, tile by tile.
    pub fn difference(&self, baseline: &Field) -> Result<Field> {
        if baseline.edge != self.edge {
            return Err(CubeSphereError::shape_mismatch(
                "baseline difference",
                0,
                (self.edge, self.edge),
                (baseline.edge, baseline.edge),
            ));
        }

        let data = self
            .data
            .iter()
            .zip(&baseline.data)
            .map(|(value, base)| value - base)
            .collect();

        Ok(Field {
            edge: self.edge,
            data,
        })
    }
}
