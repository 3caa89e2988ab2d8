//! Per-tile corner vertex coordinates.
//!
//! A vertex grid for resolution `n` holds `(n + 1) x (n + 1)` corners per
//! tile. Adjacent cells share corners: corner `[iy][ix]` belongs to up to
//! four cells. Sources provide radians; the atlas converts to degrees once
//! on load and everything downstream works in degrees.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::error::{CubeSphereError, Result};
use crate::source::VertexSource;
use crate::tile::TILE_COUNT;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Raw corner coordinates in radians as read from a source.
///
/// Both arrays are `[tile][iy][ix]` row-major with `(edge + 1)^2` corners
/// per tile.
#[derive(Debug, Clone, PartialEq)]
pub struct RadianVertices {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
}

/// Corner coordinates in degrees for one cube-sphere resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexGrid {
    edge: usize,
    corners: Vec<LonLat>,
}

impl VertexGrid {
    /// Convert radian vertices for `edge` cells per tile edge into degrees.
    pub fn from_radians(edge: usize, vertices: &RadianVertices) -> Result<Self> {
        let side = edge + 1;
        let expected = TILE_COUNT * side * side;

        for (name, values) in [("vlons", &vertices.lons), ("vlats", &vertices.lats)] {
            if values.len() != expected {
                return Err(CubeSphereError::ShapeMismatch {
                    stage: "grid atlas",
                    tile: 0,
                    expected: format!("{} {}x{}x{}", name, TILE_COUNT, side, side),
                    found: format!("{} values", values.len()),
                });
            }
        }

        let corners = vertices
            .lons
            .iter()
            .zip(&vertices.lats)
            .map(|(lon, lat)| LonLat::new(lon.to_degrees(), lat.to_degrees()))
            .collect();

        Ok(Self { edge, corners })
    }

    /// Build a grid directly in degrees from a function of `(tile, iy, ix)`.
    pub fn from_fn(edge: usize, f: impl Fn(usize, usize, usize) -> LonLat) -> Self {
        let side = edge + 1;
        let mut corners = Vec::with_capacity(TILE_COUNT * side * side);
        for tile in 0..TILE_COUNT {
            for iy in 0..side {
                for ix in 0..side {
                    corners.push(f(tile, iy, ix));
                }
            }
        }
        Self { edge, corners }
    }

    /// Cells per tile edge; each tile has `edge + 1` corners per side.
    pub fn edge(&self) -> usize {
        self.edge
    }

    /// Corner `(iy, ix)` of `tile`, with `iy, ix` in `0..=edge`.
    #[inline]
    pub fn corner(&self, tile: usize, iy: usize, ix: usize) -> LonLat {
        let side = self.edge + 1;
        self.corners[(tile * side + iy) * side + ix]
    }
}

/// Loads vertex grids from a source and keeps them for the rest of the run.
///
/// Grids are immutable once loaded and handed out behind `Arc`, so
/// concurrent renders of different variables can share them.
pub struct GridAtlas<S> {
    source: S,
    grids: RwLock<HashMap<usize, Arc<VertexGrid>>>,
}

impl<S: VertexSource> GridAtlas<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            grids: RwLock::new(HashMap::new()),
        }
    }

    /// Load (or fetch the already loaded) grid for `resolution` cells per tile edge.
    pub fn load(&self, resolution: usize) -> Result<Arc<VertexGrid>> {
        if let Some(grid) = self.cached(resolution) {
            debug!(resolution, "Vertex grid already loaded");
            return Ok(grid);
        }

        let vertices = self
            .source
            .read_vertices(resolution)?
            .ok_or(CubeSphereError::ResourceNotFound { resolution })?;
        let grid = Arc::new(VertexGrid::from_radians(resolution, &vertices)?);

        info!(resolution, corners = grid.corners.len(), "Loaded vertex grid");

        let mut grids = self
            .grids
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(grids.entry(resolution).or_insert(grid).clone())
    }

    fn cached(&self, resolution: usize) -> Option<Arc<VertexGrid>> {
        self.grids
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&resolution)
            .cloned()
    }
}
