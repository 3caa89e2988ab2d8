//! One plot run: assemble, mesh, render, write.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use cubesphere::{build_mesh, FieldAssembler, GridAtlas, MeshLayout};
use netcdf_parser::Fv3GridDirectory;
use renderer::{add_title, append_colorbar, encode, render_mesh, ColorMap};
use tracing::{debug, info};

use crate::config::PlotConfig;

/// Smallest colorbar strip, in pixels; leaves room for readable labels
const MIN_COLORBAR_HEIGHT: u32 = 32;

/// Smallest title strip, in pixels
const MIN_TITLE_HEIGHT: u32 = 20;

/// Produce the plot described by `config` and return the written path.
pub fn run(config: &PlotConfig) -> Result<PathBuf> {
    let start = Instant::now();

    let mut assembler = FieldAssembler::new(
        config
            .model
            .open(&config.filepath)
            .with_context(|| format!("opening {}", config.filepath.display()))?,
    );
    if let Some(base) = &config.basefilepath {
        let baseline = config
            .model
            .open(base)
            .with_context(|| format!("opening baseline {}", base.display()))?;
        assembler = assembler.with_baseline(baseline);
    }

    let field = assembler
        .assemble(&config.variable, config.level)
        .with_context(|| format!("reading '{}' at level {}", config.variable, config.level))?;
    let edge = field.edge();
    debug!(edge, baseline = assembler.has_baseline(), "Field ready");

    let grid = match config.render.layout {
        MeshLayout::Polygons => {
            let atlas = GridAtlas::new(Fv3GridDirectory::new(&config.grid_dir));
            Some(
                atlas
                    .load(edge)
                    .with_context(|| format!("loading grid from {}", config.grid_dir.display()))?,
            )
        }
        MeshLayout::Cross => None,
    };

    let rendered = build_mesh(field, grid.as_deref(), &config.render)?;

    let range = rendered.normalizer.range();
    let title = config.title(edge);
    let cmap = ColorMap::new(config.colormap);
    let image = render_mesh(&rendered, &cmap, config.canvas)?;
    let colorbar_height = (image.height() / 8).max(MIN_COLORBAR_HEIGHT);
    let image = append_colorbar(&image, &cmap, range, colorbar_height)?;
    let title_height = (image.width() / 32).max(MIN_TITLE_HEIGHT);
    let image = add_title(&image, &title, title_height)?;

    let bytes = encode(&image, config.format)?;
    std::fs::write(&config.output, &bytes)
        .with_context(|| format!("writing {}", config.output.display()))?;

    info!(
        title = %title,
        colormap = %config.colormap,
        vmin = range.vmin,
        vmax = range.vmax,
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        path = %config.output.display(),
        "Plot produced"
    );

    Ok(config.output.clone())
}
