//! Per-cell gradient rasters: the cross atlas and the colorbar strip.

use cubesphere::{CrossAtlas, Normalizer, ValueRange};
use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use tracing::debug;

use crate::colormap::{Color, ColorMap};
use crate::error::{RenderError, Result};
use crate::text::{draw_label, format_label, load_font, Anchor};

/// Label glyph size relative to the colorbar strip
const LABEL_FONT_RATIO: f32 = 0.35;

/// Color of one value: gray when it is not finite (cross gaps included).
#[inline]
pub fn value_color(value: f64, normalizer: &Normalizer, cmap: &ColorMap) -> Color {
    if value.is_finite() {
        cmap.sample(normalizer.normalize(value))
    } else {
        Color::GRAY
    }
}

/// Rasterize a cross atlas, `scale` pixels per cell.
///
/// Atlas row 0 is drawn at the bottom of the image.
pub fn render_cross(
    atlas: &CrossAtlas,
    normalizer: &Normalizer,
    cmap: &ColorMap,
    scale: u32,
) -> Result<RgbaImage> {
    let (width, height) = match (scaled(atlas.cols(), scale), scaled(atlas.rows(), scale)) {
        (Some(width), Some(height)) => (width, height),
        _ => {
            return Err(RenderError::CanvasTooLarge {
                cols: atlas.cols(),
                rows: atlas.rows(),
                scale,
            })
        }
    };
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyCanvas { width, height });
    }

    let rows = atlas.rows();
    let row_bytes = width as usize * 4;
    let mut pixels = vec![0u8; row_bytes * height as usize];

    pixels
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(py, line)| {
            let row = rows - 1 - py / scale as usize;
            for (px, pixel) in line.chunks_exact_mut(4).enumerate() {
                let col = px / scale as usize;
                let color = value_color(atlas.get(row, col), normalizer, cmap);
                pixel.copy_from_slice(&color.to_rgba());
            }
        });

    debug!(width, height, scale, "Rendered cross atlas");

    RgbaImage::from_raw(width, height, pixels).ok_or(RenderError::EmptyCanvas { width, height })
}

/// Pixels along one side of the cross, if they fit in a `u32` canvas.
fn scaled(cells: usize, scale: u32) -> Option<u32> {
    u32::try_from(cells).ok()?.checked_mul(scale)
}

/// Append a horizontal colorbar strip of `height` pixels below `image`.
///
/// The bar spans the middle 80% of the width, left to right from the
/// bottom to the top of the color map, over the top half of the strip.
/// `vmin`, the midpoint and `vmax` of `range` are labelled underneath.
pub fn append_colorbar(
    image: &RgbaImage,
    cmap: &ColorMap,
    range: ValueRange,
    height: u32,
) -> Result<RgbaImage> {
    let width = image.width();
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyCanvas { width, height });
    }

    let white = Rgba(Color::WHITE.to_rgba());
    let mut out = RgbaImage::from_pixel(width, image.height() + height, white);
    for (x, y, pixel) in image.enumerate_pixels() {
        out.put_pixel(x, y, *pixel);
    }

    let bar_left = width / 10;
    let bar_width = (width - 2 * bar_left).max(1);
    let bar_top = image.height() + height / 8;
    let bar_bottom = image.height() + height / 2;

    for x in bar_left..bar_left + bar_width {
        let t = if bar_width > 1 {
            (x - bar_left) as f64 / (bar_width - 1) as f64
        } else {
            0.5
        };
        let color = Rgba(cmap.sample(t).to_rgba());
        for y in bar_top..bar_bottom.max(bar_top + 1) {
            out.put_pixel(x, y, color);
        }
    }

    let font = load_font()?;
    let size = height as f32 * LABEL_FONT_RATIO;
    let label_top = (bar_bottom + height / 16) as i32;
    let ticks = [
        (range.vmin, bar_left, Anchor::Start),
        ((range.vmin + range.vmax) / 2.0, width / 2, Anchor::Center),
        (range.vmax, bar_left + bar_width, Anchor::End),
    ];
    for (value, x, anchor) in ticks {
        draw_label(&mut out, &font, &format_label(value), x as i32, label_top, size, anchor);
    }

    Ok(out)
}
