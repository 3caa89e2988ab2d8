//! Text drawing for the plot title and colorbar labels.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};

use crate::colormap::Color;
use crate::error::{RenderError, Result};

/// Embedded font data - DejaVu Sans Mono
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Glyph size relative to the strip holding a line of text
const TITLE_FONT_RATIO: f32 = 0.6;

pub fn load_font() -> Result<Font<'static>> {
    Font::try_from_bytes(FONT_DATA).ok_or(RenderError::Font)
}

/// Horizontal placement of a label relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Center,
    End,
}

/// Draw `text` with its top at `y`, kept inside the image horizontally.
pub fn draw_label(
    image: &mut RgbaImage,
    font: &Font,
    text: &str,
    x: i32,
    y: i32,
    size: f32,
    anchor: Anchor,
) {
    let scale = Scale::uniform(size);
    let (text_width, _) = text_size(scale, font, text);
    let left = match anchor {
        Anchor::Start => x,
        Anchor::Center => x - text_width / 2,
        Anchor::End => x - text_width,
    };
    let left = left.clamp(0, (image.width() as i32 - text_width).max(0));
    draw_text_mut(image, TEXT_COLOR, left, y, scale, font, text);
}

/// Prepend a white strip of `height` pixels with `title` centered in it.
pub fn add_title(image: &RgbaImage, title: &str, height: u32) -> Result<RgbaImage> {
    let width = image.width();
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyCanvas { width, height });
    }

    let font = load_font()?;
    let mut out = RgbaImage::from_pixel(width, image.height() + height, Rgba(Color::WHITE.to_rgba()));
    for (x, y, pixel) in image.enumerate_pixels() {
        out.put_pixel(x, y + height, *pixel);
    }

    let size = height as f32 * TITLE_FONT_RATIO;
    let top = ((height as f32 - size) / 2.0) as i32;
    draw_label(&mut out, &font, title, width as i32 / 2, top, size, Anchor::Center);

    Ok(out)
}

/// Short label for a colorbar tick.
///
/// Fixed point with trailing zeros dropped; scientific notation for very
/// large or very small magnitudes.
pub fn format_label(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-3..1e5).contains(&magnitude) {
        return format!("{value:.2e}");
    }
    let fixed = format!("{value:.3}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
