//! Color maps sampled on normalized values in `[0, 1]`.

use std::fmt;
use std::str::FromStr;

use cubesphere::NormalizationMode;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Masked cells and cross-atlas gaps
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// Built-in color map names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMapName {
    Jet,
    Coolwarm,
    Viridis,
}

impl ColorMapName {
    /// Diverging map for centered data, rainbow otherwise.
    pub fn default_for(mode: NormalizationMode) -> Self {
        match mode {
            NormalizationMode::Centered => ColorMapName::Coolwarm,
            NormalizationMode::MinMax => ColorMapName::Jet,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMapName::Jet => "jet",
            ColorMapName::Coolwarm => "coolwarm",
            ColorMapName::Viridis => "viridis",
        }
    }
}

impl fmt::Display for ColorMapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMapName {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jet" => Ok(ColorMapName::Jet),
            "coolwarm" => Ok(ColorMapName::Coolwarm),
            "viridis" => Ok(ColorMapName::Viridis),
            _ => Err(RenderError::UnsupportedColorMap(s.to_string())),
        }
    }
}

const JET: [Color; 9] = [
    Color::rgb(0, 0, 128),
    Color::rgb(0, 0, 255),
    Color::rgb(0, 128, 255),
    Color::rgb(0, 255, 255),
    Color::rgb(128, 255, 128),
    Color::rgb(255, 255, 0),
    Color::rgb(255, 128, 0),
    Color::rgb(255, 0, 0),
    Color::rgb(128, 0, 0),
];

const COOLWARM: [Color; 9] = [
    Color::rgb(59, 76, 192),
    Color::rgb(98, 130, 234),
    Color::rgb(141, 176, 254),
    Color::rgb(184, 208, 249),
    Color::rgb(221, 221, 221),
    Color::rgb(245, 196, 173),
    Color::rgb(244, 154, 123),
    Color::rgb(222, 96, 77),
    Color::rgb(180, 4, 38),
];

const VIRIDIS: [Color; 9] = [
    Color::rgb(68, 1, 84),
    Color::rgb(71, 45, 123),
    Color::rgb(59, 82, 139),
    Color::rgb(44, 114, 142),
    Color::rgb(33, 145, 140),
    Color::rgb(39, 173, 129),
    Color::rgb(92, 200, 99),
    Color::rgb(170, 220, 50),
    Color::rgb(253, 231, 37),
];

/// A color map defined by evenly spaced stops.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    name: ColorMapName,
    stops: &'static [Color],
}

impl ColorMap {
    pub fn new(name: ColorMapName) -> Self {
        let stops: &'static [Color] = match name {
            ColorMapName::Jet => &JET,
            ColorMapName::Coolwarm => &COOLWARM,
            ColorMapName::Viridis => &VIRIDIS,
        };
        Self { name, stops }
    }

    /// Look up a built-in map by name.
    pub fn from_name(name: &str) -> Result<Self, RenderError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn name(&self) -> ColorMapName {
        self.name
    }

    /// Color at normalized position `t`. Values outside `[0, 1]` clamp;
    /// NaN maps to [`Color::GRAY`].
    pub fn sample(&self, t: f64) -> Color {
        if t.is_nan() {
            return Color::GRAY;
        }

        let last = self.stops.len() - 1;
        let pos = t.clamp(0.0, 1.0) * last as f64;
        let lower = (pos.floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        interpolate_color(self.stops[lower], self.stops[upper], pos - lower as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_hit_first_and_last_stop() {
        let jet = ColorMap::new(ColorMapName::Jet);
        assert_eq!(jet.sample(0.0), JET[0]);
        assert_eq!(jet.sample(1.0), JET[8]);
        assert_eq!(jet.sample(-3.0), JET[0]);
        assert_eq!(jet.sample(7.0), JET[8]);
    }

    #[test]
    fn test_midpoint_interpolates() {
        let cmap = ColorMap::new(ColorMapName::Coolwarm);
        // 9 stops: 0.5 lands exactly on the neutral stop
        assert_eq!(cmap.sample(0.5), Color::rgb(221, 221, 221));

        let between = cmap.sample(1.0 / 16.0);
        assert_eq!(between, interpolate_color(COOLWARM[0], COOLWARM[1], 0.5));
    }

    #[test]
    fn test_nan_is_gray() {
        assert_eq!(ColorMap::new(ColorMapName::Viridis).sample(f64::NAN), Color::GRAY);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(ColorMap::from_name("CoolWarm").unwrap().name(), ColorMapName::Coolwarm);
        assert!(matches!(
            ColorMap::from_name("rainbow"),
            Err(RenderError::UnsupportedColorMap(name)) if name == "rainbow"
        ));
    }

    #[test]
    fn test_default_follows_mode() {
        assert_eq!(
            ColorMapName::default_for(NormalizationMode::Centered),
            ColorMapName::Coolwarm
        );
        assert_eq!(ColorMapName::default_for(NormalizationMode::MinMax), ColorMapName::Jet);
    }
}
