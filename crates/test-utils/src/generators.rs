//! Synthetic cube-sphere data for tests.
//!
//! These generators create predictable, verifiable patterns so tests can
//! check exactly which tile and cell a value came from.

use cubesphere::{Field, RadianVertices, TileSlice, TILE_COUNT};
use std::f64::consts::FRAC_PI_4;

/// Value stored at `(tile, row, col)` by [`indexed_tiles`] and [`indexed_field`].
///
/// `tile * 10000 + row * 100 + col`, so the origin of any value can be read
/// off its digits for edges below 100.
pub fn index_value(tile: usize, row: usize, col: usize) -> f64 {
    (tile * 10_000 + row * 100 + col) as f64
}

/// Six square slices whose values encode their own position.
pub fn indexed_tiles(edge: usize) -> Vec<TileSlice> {
    (0..TILE_COUNT)
        .map(|tile| TileSlice::from_fn(edge, edge, |row, col| index_value(tile, row, col)))
        .collect()
}

/// A field whose values encode their own position.
pub fn indexed_field(edge: usize) -> Field {
    Field::from_fn(edge, index_value)
}

/// Six slices filled with `value`.
pub fn constant_tiles(edge: usize, value: f64) -> Vec<TileSlice> {
    (0..TILE_COUNT)
        .map(|_| TileSlice::from_fn(edge, edge, |_, _| value))
        .collect()
}

/// Six slices with a smooth anomaly-like pattern in roughly `[-amplitude, amplitude]`.
pub fn wave_tiles(edge: usize, amplitude: f64) -> Vec<TileSlice> {
    (0..TILE_COUNT)
        .map(|tile| {
            TileSlice::from_fn(edge, edge, |row, col| {
                let phase = (tile as f64 + 1.0) * 0.7;
                let y = row as f64 / edge as f64;
                let x = col as f64 / edge as f64;
                amplitude * ((x * 6.0 + phase).sin() * (y * 4.0 - phase).cos())
            })
        })
        .collect()
}

/// Equiangular gnomonic cube-sphere corners for `edge` cells per tile, in radians.
///
/// Tiles 0-3 wrap the equator eastwards from 0°, tile 4 covers the north
/// pole and tile 5 the south pole. The layout is shaped like the `vlons`
/// and `vlats` variables of an FV3 grid file: `[tile][edge + 1][edge + 1]`.
pub fn gnomonic_vertices(edge: usize) -> RadianVertices {
    let side = edge + 1;
    let mut lons = Vec::with_capacity(TILE_COUNT * side * side);
    let mut lats = Vec::with_capacity(TILE_COUNT * side * side);

    for tile in 0..TILE_COUNT {
        for iy in 0..side {
            for ix in 0..side {
                let a = (-FRAC_PI_4 + ix as f64 * 2.0 * FRAC_PI_4 / edge as f64).tan();
                let b = (-FRAC_PI_4 + iy as f64 * 2.0 * FRAC_PI_4 / edge as f64).tan();
                let (x, y, z) = face_point(tile, a, b);
                let norm = (x * x + y * y + z * z).sqrt();
                lons.push(y.atan2(x));
                lats.push((z / norm).asin());
            }
        }
    }

    RadianVertices { lons, lats }
}

/// Point on the unit cube for face `tile` at gnomonic coordinates `(a, b)`.
fn face_point(tile: usize, a: f64, b: f64) -> (f64, f64, f64) {
    match tile {
        0 => (1.0, a, b),
        1 => (-a, 1.0, b),
        2 => (-1.0, -a, b),
        3 => (a, -1.0, b),
        4 => (-b, a, 1.0),
        _ => (b, a, -1.0),
    }
}
