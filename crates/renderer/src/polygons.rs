//! Polygon rasterization in equirectangular lon/lat space.

use cubesphere::{LonLat, Normalizer, Polygon};
use image::RgbaImage;
use rayon::prelude::*;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Transform};
use tracing::debug;

use crate::colormap::{Color, ColorMap};
use crate::error::{RenderError, Result};
use crate::gradient::value_color;

/// Wrap a longitude into `[-180, 180)`.
#[inline]
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Corner longitudes made continuous around the first corner.
///
/// The first corner is wrapped into `[-180, 180)`; the others are moved by
/// whole turns so no edge spans more than 180 degrees. A cell crossing the
/// antimeridian therefore extends past +/-180.
pub fn unwrap_corners(corners: &[LonLat; 4]) -> [LonLat; 4] {
    let anchor = wrap_longitude(corners[0].lon);
    corners.map(|corner| LonLat {
        lon: anchor + wrap_longitude(corner.lon - corners[0].lon),
        lat: corner.lat,
    })
}

/// Corners within this many degrees of +/-90 sit on a pole.
const POLE_TOLERANCE: f64 = 1e-6;

fn on_pole(corner: &LonLat) -> bool {
    corner.lat.abs() >= 90.0 - POLE_TOLERANCE
}

fn pole_latitude(lat: f64) -> f64 {
    90.0_f64.copysign(lat)
}

/// Net longitude swept walking the corners once around.
///
/// About +/-360 when the cell contains a pole, near zero otherwise.
fn longitude_winding(corners: &[LonLat; 4]) -> f64 {
    (0..4)
        .map(|i| wrap_longitude(corners[(i + 1) % 4].lon - corners[i].lon))
        .sum()
}

/// Plate carrée outline of a cell.
///
/// Ordinary cells are their unwrapped corners. A corner sitting on a pole
/// becomes a segment of the pole line between its neighbours' longitudes,
/// and a cell that contains a pole is closed along the pole line across a
/// full turn of longitude.
pub fn outline(corners: &[LonLat; 4]) -> Vec<LonLat> {
    let Some(start) = corners.iter().position(|c| !on_pole(c)) else {
        return Vec::new();
    };

    if corners.iter().any(on_pole) {
        return touching_pole(corners, start);
    }

    let winding = longitude_winding(corners);
    if winding.abs() < 180.0 {
        return unwrap_corners(corners).to_vec();
    }

    let mut points = Vec::with_capacity(7);
    let mut lon = wrap_longitude(corners[0].lon);
    points.push(LonLat::new(lon, corners[0].lat));
    for i in 1..4 {
        lon += wrap_longitude(corners[i].lon - corners[i - 1].lon);
        points.push(LonLat::new(lon, corners[i].lat));
    }
    let first = points[0];
    let closing = first.lon + winding;
    let pole = pole_latitude(corners.iter().map(|c| c.lat).sum());
    points.push(LonLat::new(closing, first.lat));
    points.push(LonLat::new(closing, pole));
    points.push(LonLat::new(first.lon, pole));
    points
}

fn touching_pole(corners: &[LonLat; 4], start: usize) -> Vec<LonLat> {
    let mut points = Vec::with_capacity(6);
    // Last non-pole corner: raw and unwrapped longitude
    let mut raw = corners[start].lon;
    let mut lon = wrap_longitude(raw);

    for k in 0..4 {
        let corner = corners[(start + k) % 4];
        if on_pole(&corner) {
            let pole = pole_latitude(corner.lat);
            points.push(LonLat::new(lon, pole));
            let next = (1..4)
                .map(|j| corners[(start + k + j) % 4])
                .find(|c| !on_pole(c))
                .unwrap_or(corners[start]);
            points.push(LonLat::new(lon + wrap_longitude(next.lon - raw), pole));
        } else {
            lon += wrap_longitude(corner.lon - raw);
            raw = corner.lon;
            points.push(LonLat::new(lon, corner.lat));
        }
    }
    points
}

/// Horizontal shifts (degrees) at which an outline must be drawn.
fn shifts(points: &[LonLat]) -> Vec<f64> {
    let min = points.iter().map(|c| c.lon).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|c| c.lon).fold(f64::NEG_INFINITY, f64::max);

    let mut shifts = vec![0.0];
    if max > 180.0 {
        shifts.push(-360.0);
    }
    if min < -180.0 {
        shifts.push(360.0);
    }
    shifts
}

fn to_pixel(corner: &LonLat, shift: f64, width: f32, height: f32) -> (f32, f32) {
    let x = ((corner.lon + shift + 180.0) / 360.0) as f32 * width;
    let y = ((90.0 - corner.lat) / 180.0) as f32 * height;
    (x, y)
}

fn build_path(points: &[LonLat], shift: f64, width: f32, height: f32) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    let (x, y) = to_pixel(first, shift, width, height);
    pb.move_to(x, y);
    for point in rest {
        let (x, y) = to_pixel(point, shift, width, height);
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

/// Fill every polygon on a white `width x width/2` plate carrée canvas.
pub fn render_polygons(
    polygons: &[Polygon],
    normalizer: &Normalizer,
    cmap: &ColorMap,
    width: u32,
) -> Result<RgbaImage> {
    let height = width / 2;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::EmptyCanvas { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let (w, h) = (width as f32, height as f32);
    let fills: Vec<(Path, Color)> = polygons
        .par_iter()
        .flat_map_iter(|polygon| {
            let points = outline(&polygon.corners);
            let color = value_color(polygon.value, normalizer, cmap);
            shifts(&points)
                .into_iter()
                .filter_map(move |shift| build_path(&points, shift, w, h))
                .map(move |path| (path, color))
        })
        .collect();

    let mut paint = Paint::default();
    // Anti-aliasing leaves hairline seams between adjacent cells
    paint.anti_alias = false;
    for (path, color) in &fills {
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        pixmap.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    debug!(
        width,
        height,
        polygons = polygons.len(),
        paths = fills.len(),
        "Rendered polygons"
    );

    // Every fill is opaque, so premultiplied data equals straight RGBA
    RgbaImage::from_raw(width, height, pixmap.take()).ok_or(RenderError::EmptyCanvas { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ll(lon: f64, lat: f64) -> LonLat {
        LonLat { lon, lat }
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(180.0), -180.0);
        assert_eq!(wrap_longitude(45.0), 45.0);
    }

    #[test]
    fn test_unwrap_across_antimeridian() {
        let corners = [ll(178.0, 0.0), ll(-178.0, 0.0), ll(-178.0, 2.0), ll(178.0, 2.0)];
        let unwrapped = unwrap_corners(&corners);
        assert_eq!(unwrapped[0].lon, 178.0);
        assert_eq!(unwrapped[1].lon, 182.0);
        assert_eq!(unwrapped[3].lon, 178.0);
        assert_eq!(shifts(&unwrapped), vec![0.0, -360.0]);
    }

    #[test]
    fn test_unwrap_from_zero_to_360_grid() {
        let corners = [ll(350.0, 10.0), ll(355.0, 10.0), ll(355.0, 15.0), ll(350.0, 15.0)];
        let unwrapped = unwrap_corners(&corners);
        assert_eq!(unwrapped[0].lon, -10.0);
        assert_eq!(unwrapped[1].lon, -5.0);
        assert_eq!(shifts(&unwrapped), vec![0.0]);
    }

    #[test]
    fn test_unwrap_west_of_dateline() {
        let corners = [ll(-179.0, 0.0), ll(179.0, 0.0), ll(179.0, 1.0), ll(-179.0, 1.0)];
        let unwrapped = unwrap_corners(&corners);
        assert_eq!(unwrapped[1].lon, -181.0);
        assert_eq!(shifts(&unwrapped), vec![0.0, 360.0]);
    }

    #[test]
    fn test_outline_of_ordinary_cell() {
        let corners = [ll(10.0, 0.0), ll(20.0, 0.0), ll(20.0, 10.0), ll(10.0, 10.0)];
        assert_eq!(outline(&corners), corners.to_vec());
    }

    #[test]
    fn test_outline_with_corner_on_pole() {
        let corners = [ll(0.0, 90.0), ll(0.0, 80.0), ll(45.0, 75.0), ll(90.0, 80.0)];
        let points = outline(&corners);
        assert_eq!(
            points,
            vec![
                ll(0.0, 80.0),
                ll(45.0, 75.0),
                ll(90.0, 80.0),
                ll(90.0, 90.0),
                ll(0.0, 90.0),
            ]
        );
    }

    #[test]
    fn test_outline_of_cell_containing_south_pole() {
        let corners = [ll(45.0, -80.0), ll(-45.0, -80.0), ll(-135.0, -80.0), ll(135.0, -80.0)];
        assert!((longitude_winding(&corners) + 360.0).abs() < 1e-9);

        let points = outline(&corners);
        assert_eq!(points.len(), 7);
        assert_eq!(points[3], ll(-225.0, -80.0));
        assert_eq!(points[4], ll(-315.0, -80.0));
        assert_eq!(points[5], ll(-315.0, -90.0));
        assert_eq!(points[6], ll(45.0, -90.0));
        assert_eq!(shifts(&points), vec![0.0, 360.0]);
    }

    #[test]
    fn test_outline_all_on_pole_is_empty() {
        let corners = [ll(0.0, 90.0), ll(90.0, 90.0), ll(180.0, 90.0), ll(-90.0, 90.0)];
        assert!(outline(&corners).is_empty());
    }
}
