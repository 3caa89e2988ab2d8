//! Per-cell quadrilateral polygons with geodetic corners.

use tracing::debug;

use crate::atlas::{LonLat, VertexGrid};
use crate::error::{CubeSphereError, Result};
use crate::reduce::AveragedField;
use crate::tile::TILE_COUNT;

/// One renderable cell: its averaged value and four corners in degrees.
///
/// Corners wind `(iy, ix) -> (iy, ix + a) -> (iy + a, ix + a) -> (iy + a, ix)`
/// in original index space, `a` being the averaging size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    pub tile: usize,
    pub value: f64,
    pub corners: [LonLat; 4],
}

/// Build the polygon list for `averaged` over `grid`.
///
/// Cells with `|value| < threshold` are omitted entirely. Output order is
/// tile-major, then row-major, then column-major.
pub fn build_polygons(
    averaged: &AveragedField,
    grid: &VertexGrid,
    threshold: f64,
) -> Result<Vec<Polygon>> {
    let average = averaged.average();
    let source_edge = averaged.source_edge();
    if grid.edge() != source_edge {
        return Err(CubeSphereError::shape_mismatch(
            "mesh builder",
            0,
            (source_edge + 1, source_edge + 1),
            (grid.edge() + 1, grid.edge() + 1),
        ));
    }

    let field = averaged.field();
    let reduced_edge = field.edge();
    let mut polygons = Vec::with_capacity(TILE_COUNT * reduced_edge * reduced_edge);

    for tile in 0..TILE_COUNT {
        for cy in 0..reduced_edge {
            for cx in 0..reduced_edge {
                let value = field.get(tile, cy, cx);
                // NaN fails the comparison and is skipped with the sub-threshold cells.
                if !(value.abs() >= threshold) {
                    continue;
                }

                let (iy, ix) = (cy * average, cx * average);
                polygons.push(Polygon {
                    tile,
                    value,
                    corners: [
                        grid.corner(tile, iy, ix),
                        grid.corner(tile, iy, ix + average),
                        grid.corner(tile, iy + average, ix + average),
                        grid.corner(tile, iy + average, ix),
                    ],
                });
            }
        }
    }

    debug!(
        cells = TILE_COUNT * reduced_edge * reduced_edge,
        polygons = polygons.len(),
        threshold,
        "Built polygon mesh"
    );

    Ok(polygons)
}
