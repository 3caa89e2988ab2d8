//! Render configuration passed explicitly into the pipeline.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CubeSphereError, Result};
use crate::normalize::NormalizationMode;

/// Which geometry the mesh builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeshLayout {
    /// Geodetic quadrilaterals, one per (averaged) cell
    #[default]
    Polygons,
    /// Flattened 3 x 4 tile atlas of the raw field
    Cross,
}

/// Options controlling reduction, thresholding and geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Block size for averaging (1 = no averaging)
    pub average: usize,
    /// Cells with `|value| < threshold` are not drawn
    pub threshold: f64,
    /// Normalization domain
    pub mode: NormalizationMode,
    /// Output geometry
    pub layout: MeshLayout,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            average: 1,
            threshold: 0.0,
            mode: NormalizationMode::MinMax,
            layout: MeshLayout::Polygons,
        }
    }
}

impl RenderConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.average == 0 {
            return Err(CubeSphereError::invalid_arguments("average must be >= 1"));
        }

        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(CubeSphereError::invalid_arguments(format!(
                "threshold must be a finite value >= 0, got {}",
                self.threshold
            )));
        }

        if self.layout == MeshLayout::Cross && (self.average != 1 || self.threshold != 0.0) {
            warn!(
                average = self.average,
                threshold = self.threshold,
                "Average and threshold are ignored in cross layout"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_average() {
        let config = RenderConfig {
            average: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        for threshold in [-0.5, f64::NAN, f64::INFINITY] {
            let config = RenderConfig {
                threshold,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "threshold {threshold} accepted");
        }
    }

    #[test]
    fn test_cross_with_average_is_accepted() {
        let config = RenderConfig {
            average: 4,
            layout: MeshLayout::Cross,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serde_names() {
        let config = RenderConfig {
            mode: NormalizationMode::Centered,
            layout: MeshLayout::Cross,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"centered\""));
        assert!(json.contains("\"cross\""));
    }
}
