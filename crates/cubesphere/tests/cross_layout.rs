//! Tests for the cross-atlas unfolding.

use cubesphere::{
    build_cross, CrossAtlas, Field, FieldAssembler, FieldInput, MemoryMultiTileSource, TileSlice,
    CROSS_LAYOUT, NO_DATA, TILE_COUNT,
};
use test_utils::{index_value, indexed_field, BLOCK_2X2, BLOCK_2X2_ROT270, BLOCK_2X2_ROT90};

/// True when `(row, col)` falls inside the block where some tile is placed.
fn is_placed(row: usize, col: usize, n: usize) -> bool {
    CROSS_LAYOUT
        .iter()
        .any(|p| row / n == p.row_block && col / n == p.col_block)
}

fn block(atlas: &CrossAtlas, row_block: usize, col_block: usize) -> [[f64; 2]; 2] {
    let n = atlas.edge();
    let mut out = [[0.0; 2]; 2];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = atlas.get(row_block * n + r, col_block * n + c);
        }
    }
    out
}

#[test]
fn test_cross_shape() {
    for n in [1, 2, 5] {
        let atlas = build_cross(&indexed_field(n));
        assert_eq!(atlas.rows(), 3 * n);
        assert_eq!(atlas.cols(), 4 * n);
        assert_eq!(atlas.values().len(), 12 * n * n);
    }
}

#[test]
fn test_cross_corner_cells() {
    let n = 4;
    let atlas = build_cross(&indexed_field(n));

    // Tile 0 cell (0, 0) lands at (n, n)
    assert_eq!(atlas.get(n, n), index_value(0, 0, 0));
    // Tile 1 cell (n-1, n-1) lands at (2n-1, 3n-1)
    assert_eq!(atlas.get(2 * n - 1, 3 * n - 1), index_value(1, n - 1, n - 1));
    // Tile 5 is unrotated above tile 0
    assert_eq!(atlas.get(0, n), index_value(5, 0, 0));
}

#[test]
fn test_cross_tile2_rotation() {
    let n = 3;
    let atlas = build_cross(&indexed_field(n));
    // Destination (2n, n) holds tile 2 cell (n-1, 0)
    assert_eq!(atlas.get(2 * n, n), index_value(2, n - 1, 0));
}

#[test]
fn test_cross_known_rotations() {
    let tiles: Vec<TileSlice> = (0..TILE_COUNT)
        .map(|_| TileSlice::from_fn(2, 2, |r, c| BLOCK_2X2[r][c]))
        .collect();
    let field = Field::from_tiles("test", tiles).unwrap();
    let atlas = build_cross(&field);

    assert_eq!(block(&atlas, 1, 1), BLOCK_2X2);
    assert_eq!(block(&atlas, 1, 2), BLOCK_2X2);
    assert_eq!(block(&atlas, 0, 1), BLOCK_2X2);
    assert_eq!(block(&atlas, 2, 1), BLOCK_2X2_ROT270);
    assert_eq!(block(&atlas, 1, 3), BLOCK_2X2_ROT90);
    assert_eq!(block(&atlas, 1, 0), BLOCK_2X2_ROT90);
}

#[test]
fn test_cross_unplaced_cells_are_no_data() {
    let n = 3;
    let atlas = build_cross(&indexed_field(n));
    let mut placed = 0;
    for row in 0..atlas.rows() {
        for col in 0..atlas.cols() {
            let value = atlas.get(row, col);
            if is_placed(row, col, n) {
                placed += 1;
                assert!(!CrossAtlas::is_no_data(value));
            } else {
                assert_eq!(value, NO_DATA);
            }
        }
    }
    assert_eq!(placed, TILE_COUNT * n * n);
}

#[test]
fn test_cross_every_source_cell_appears_once() {
    let n = 4;
    let atlas = build_cross(&indexed_field(n));
    let mut seen: Vec<f64> = atlas
        .values()
        .iter()
        .copied()
        .filter(|v| !CrossAtlas::is_no_data(*v))
        .collect();
    seen.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let mut expected: Vec<f64> = indexed_field(n).values().to_vec();
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(seen, expected);
}

#[test]
fn test_cross_from_assembled_field() {
    let source = MemoryMultiTileSource::new().with_level("T", 0, test_utils::indexed_tiles(2));
    let field = FieldAssembler::new(FieldInput::Combined(Box::new(source)))
        .assemble("T", 1)
        .unwrap();
    let atlas = build_cross(&field);
    assert_eq!(atlas.get(2, 2), index_value(0, 0, 0));
}
