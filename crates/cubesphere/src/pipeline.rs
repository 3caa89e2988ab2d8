//! End-to-end mesh construction from an assembled field.

use std::time::Instant;

use tracing::info;

use crate::atlas::VertexGrid;
use crate::config::{MeshLayout, RenderConfig};
use crate::cross::{build_cross, CrossAtlas};
use crate::error::{CubeSphereError, Result};
use crate::mesh::{build_polygons, Polygon};
use crate::normalize::Normalizer;
use crate::reduce::reduce;
use crate::tile::Field;

/// Geometry handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Mesh {
    Polygons(Vec<Polygon>),
    Cross(CrossAtlas),
}

/// Mesh plus the normalization that goes with it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMesh {
    pub mesh: Mesh,
    pub normalizer: Normalizer,
    /// Cells per tile edge of the assembled field
    pub edge: usize,
}

/// Reduce, normalize and mesh `field` according to `config`.
///
/// The polygon layout needs the vertex grid for the field's resolution;
/// the cross layout works on the raw field and ignores averaging and
/// threshold.
pub fn build_mesh(
    field: Field,
    grid: Option<&VertexGrid>,
    config: &RenderConfig,
) -> Result<RenderedMesh> {
    config.validate()?;
    let start = Instant::now();
    let edge = field.edge();

    let (mesh, normalizer) = match config.layout {
        MeshLayout::Cross => {
            let normalizer = Normalizer::for_values(field.values(), config.mode);
            (Mesh::Cross(build_cross(&field)), normalizer)
        }
        MeshLayout::Polygons => {
            let grid = grid.ok_or_else(|| {
                CubeSphereError::invalid_arguments("polygon layout requires a vertex grid")
            })?;
            let averaged = reduce(field, config.average)?;
            let normalizer = Normalizer::for_values(averaged.field().values(), config.mode);
            let polygons = build_polygons(&averaged, grid, config.threshold)?;
            (Mesh::Polygons(polygons), normalizer)
        }
    };

    let range = normalizer.range();
    info!(
        layout = ?config.layout,
        edge,
        vmin = range.vmin,
        vmax = range.vmax,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Mesh built"
    );

    Ok(RenderedMesh {
        mesh,
        normalizer,
        edge,
    })
}
