//! Flattened "cross" unfolding of the six tiles into a 3 x 4 block atlas.
//!
//! ```text
//!            col block
//!          0    1    2    3
//!        +----+----+----+----+
//!      0 |    | 5  |    |    |
//!        +----+----+----+----+
//!      1 | 4' | 0  | 1  | 3' |     ' = 90 deg counter-clockwise
//!        +----+----+----+----+
//!      2 |    | 2" |    |    |     " = 270 deg counter-clockwise
//!        +----+----+----+----+
//! ```
//!
//! The table is a fixed convention of the FV3 tile numbering. Edges that
//! touch on the sphere touch in the atlas only with these exact rotations.

use tracing::debug;

use crate::tile::{Field, TILE_COUNT};

/// Value of atlas cells not covered by any tile.
pub const NO_DATA: f64 = f64::INFINITY;

/// Where one tile lands in the cross atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub tile: usize,
    /// Destination block row (multiples of the tile edge)
    pub row_block: usize,
    /// Destination block column (multiples of the tile edge)
    pub col_block: usize,
    /// Counter-clockwise quarter turns applied before placing
    pub quarter_turns: u8,
}

/// Placement of every tile, indexed by tile.
pub const CROSS_LAYOUT: [TilePlacement; TILE_COUNT] = [
    TilePlacement { tile: 0, row_block: 1, col_block: 1, quarter_turns: 0 },
    TilePlacement { tile: 1, row_block: 1, col_block: 2, quarter_turns: 0 },
    TilePlacement { tile: 2, row_block: 2, col_block: 1, quarter_turns: 3 },
    TilePlacement { tile: 3, row_block: 1, col_block: 3, quarter_turns: 1 },
    TilePlacement { tile: 4, row_block: 1, col_block: 0, quarter_turns: 1 },
    TilePlacement { tile: 5, row_block: 0, col_block: 1, quarter_turns: 0 },
];

/// Row blocks in the atlas.
pub const CROSS_ROW_BLOCKS: usize = 3;
/// Column blocks in the atlas.
pub const CROSS_COL_BLOCKS: usize = 4;

/// A `(3 * edge) x (4 * edge)` array holding the unfolded cube.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossAtlas {
    edge: usize,
    data: Vec<f64>,
}

impl CrossAtlas {
    /// Number of rows (`3 * edge`).
    pub fn rows(&self) -> usize {
        CROSS_ROW_BLOCKS * self.edge
    }

    /// Number of columns (`4 * edge`).
    pub fn cols(&self) -> usize {
        CROSS_COL_BLOCKS * self.edge
    }

    /// Edge length of the tiles placed in the atlas.
    pub fn edge(&self) -> usize {
        self.edge
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols() + col]
    }

    /// Row-major values.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn is_no_data(value: f64) -> bool {
        value == NO_DATA
    }
}

/// Source index `(row, col)` in a tile of edge `n` that lands at `(row, col)`
/// after `turns` counter-clockwise quarter turns.
#[inline]
fn rotated_source(row: usize, col: usize, n: usize, turns: u8) -> (usize, usize) {
    match turns % 4 {
        0 => (row, col),
        1 => (col, n - 1 - row),
        2 => (n - 1 - row, n - 1 - col),
        _ => (n - 1 - col, row),
    }
}

/// Unfold the un-averaged `field` into a cross atlas.
pub fn build_cross(field: &Field) -> CrossAtlas {
    let n = field.edge();
    let mut atlas = CrossAtlas {
        edge: n,
        data: vec![NO_DATA; CROSS_ROW_BLOCKS * n * CROSS_COL_BLOCKS * n],
    };
    let cols = atlas.cols();

    for placement in &CROSS_LAYOUT {
        let row0 = placement.row_block * n;
        let col0 = placement.col_block * n;
        for row in 0..n {
            for col in 0..n {
                let (src_row, src_col) = rotated_source(row, col, n, placement.quarter_turns);
                atlas.data[(row0 + row) * cols + col0 + col] =
                    field.get(placement.tile, src_row, src_col);
            }
        }
    }

    debug!(edge = n, rows = atlas.rows(), cols, "Built cross atlas");

    atlas
}
