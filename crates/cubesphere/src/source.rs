//! Data source abstractions consumed by the assembler and the grid atlas.
//!
//! Sources are keyed by variable name and a 0-based level index. The
//! assembler converts the user-facing 1-based level before calling them.
//! Backends live outside this crate (see `netcdf-parser`); the in-memory
//! sources below serve hosts that already hold arrays, and tests.

use std::collections::HashMap;

use crate::atlas::RadianVertices;
use crate::error::{CubeSphereError, Result};
use crate::tile::{TileSlice, TILE_COUNT};

/// A source holding one tile's data.
pub trait TileSource {
    /// Read the 2D slice of `variable` at `level_index` (0-based).
    fn read_slice(&self, variable: &str, level_index: usize) -> Result<TileSlice>;
}

/// A source with an embedded tile axis, read once for all tiles.
pub trait MultiTileSource {
    /// Read `variable` at `level_index` (0-based) for every tile, in tile order.
    fn read_tiles(&self, variable: &str, level_index: usize) -> Result<Vec<TileSlice>>;
}

/// A source of per-tile vertex coordinates.
pub trait VertexSource {
    /// Corner coordinates in radians for `resolution` cells per tile edge,
    /// or `None` when no grid exists for that resolution.
    fn read_vertices(&self, resolution: usize) -> Result<Option<RadianVertices>>;
}

/// The two supported input layouts.
///
/// Callers of the assembler never observe which one was used.
pub enum FieldInput {
    /// A single source with the tile axis embedded.
    Combined(Box<dyn MultiTileSource>),
    /// One source per tile, in tile order.
    PerTile(Vec<Box<dyn TileSource>>),
}

impl FieldInput {
    /// Per-tile input, checking that exactly six sources were supplied.
    pub fn per_tile(sources: Vec<Box<dyn TileSource>>) -> Result<Self> {
        if sources.len() != TILE_COUNT {
            return Err(CubeSphereError::invalid_arguments(format!(
                "per-tile input needs {} sources, got {}",
                TILE_COUNT,
                sources.len()
            )));
        }
        Ok(Self::PerTile(sources))
    }

    /// Read all tiles of `variable` at `level_index`.
    pub fn read(&self, variable: &str, level_index: usize) -> Result<Vec<TileSlice>> {
        match self {
            FieldInput::Combined(source) => source.read_tiles(variable, level_index),
            FieldInput::PerTile(sources) => sources
                .iter()
                .map(|source| source.read_slice(variable, level_index))
                .collect(),
        }
    }

    /// Short name of the layout for logging.
    pub fn layout_name(&self) -> &'static str {
        match self {
            FieldInput::Combined(_) => "combined",
            FieldInput::PerTile(_) => "per-tile",
        }
    }
}

/// In-memory single-tile source keyed by `(variable, level_index)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryTileSource {
    slices: HashMap<(String, usize), TileSlice>,
}

impl MemoryTileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slice, replacing any previous one for the same key.
    pub fn with_slice(mut self, variable: &str, level_index: usize, slice: TileSlice) -> Self {
        self.slices.insert((variable.to_string(), level_index), slice);
        self
    }
}

impl TileSource for MemoryTileSource {
    fn read_slice(&self, variable: &str, level_index: usize) -> Result<TileSlice> {
        self.slices
            .get(&(variable.to_string(), level_index))
            .cloned()
            .ok_or_else(|| missing(variable, level_index))
    }
}

/// In-memory multi-tile source keyed by `(variable, level_index)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryMultiTileSource {
    levels: HashMap<(String, usize), Vec<TileSlice>>,
}

impl MemoryMultiTileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add all tiles for one level, replacing any previous entry.
    pub fn with_level(mut self, variable: &str, level_index: usize, tiles: Vec<TileSlice>) -> Self {
        self.levels.insert((variable.to_string(), level_index), tiles);
        self
    }
}

impl MultiTileSource for MemoryMultiTileSource {
    fn read_tiles(&self, variable: &str, level_index: usize) -> Result<Vec<TileSlice>> {
        self.levels
            .get(&(variable.to_string(), level_index))
            .cloned()
            .ok_or_else(|| missing(variable, level_index))
    }
}

/// In-memory vertex source keyed by resolution.
#[derive(Debug, Clone, Default)]
pub struct MemoryVertexSource {
    grids: HashMap<usize, RadianVertices>,
}

impl MemoryVertexSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, resolution: usize, vertices: RadianVertices) -> Self {
        self.grids.insert(resolution, vertices);
        self
    }
}

impl VertexSource for MemoryVertexSource {
    fn read_vertices(&self, resolution: usize) -> Result<Option<RadianVertices>> {
        Ok(self.grids.get(&resolution).cloned())
    }
}

fn missing(variable: &str, level_index: usize) -> CubeSphereError {
    CubeSphereError::source_failed(format!(
        "no data for variable '{}' at level index {}",
        variable, level_index
    ))
}
