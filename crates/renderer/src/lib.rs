//! Image rendering for cube-sphere meshes.
//!
//! Implements the two plot styles produced by `cubesphere::build_mesh`:
//! - Cross atlas: one block of pixels per cell, row 0 at the bottom
//! - Polygons: filled quadrilaterals on a plate carrée canvas
//!
//! Both share [`ColorMap`] sampling, a labelled colorbar strip, a title
//! strip and PNG/JPEG encoding.

pub mod colormap;
pub mod encode;
pub mod error;
pub mod gradient;
pub mod polygons;
pub mod text;

pub use colormap::{Color, ColorMap, ColorMapName};
pub use encode::{encode, ImageFormat};
pub use error::{RenderError, Result};
pub use gradient::{append_colorbar, render_cross};
pub use polygons::render_polygons;
pub use text::{add_title, format_label};

use cubesphere::{Mesh, RenderedMesh};
use image::RgbaImage;

/// Canvas sizing for [`render_mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    /// Pixels per cell for the cross layout
    pub cross_scale: u32,
    /// Image width for the polygon layout
    pub polygon_width: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            cross_scale: 2,
            polygon_width: 1600,
        }
    }
}

/// Render whichever mesh `build_mesh` produced.
pub fn render_mesh(rendered: &RenderedMesh, cmap: &ColorMap, canvas: Canvas) -> Result<RgbaImage> {
    match &rendered.mesh {
        Mesh::Cross(atlas) => render_cross(atlas, &rendered.normalizer, cmap, canvas.cross_scale),
        Mesh::Polygons(polygons) => {
            render_polygons(polygons, &rendered.normalizer, cmap, canvas.polygon_width)
        }
    }
}
