//! Value ranges and the value -> [0, 1] mapping used for color lookup.

use serde::{Deserialize, Serialize};

/// How the normalization domain is derived from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    /// `(min, max)` of the field
    #[default]
    MinMax,
    /// `(-m, m)` with `m = max(|field|)`, for differences and anomalies
    Centered,
}

/// The normalization domain `(vmin, vmax)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueRange {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Compute the range of `values`, skipping non-finite entries.
    ///
    /// Yields `(0, 0)` when no finite value exists.
    pub fn compute(values: &[f64], mode: NormalizationMode) -> Self {
        let mut finite = values.iter().copied().filter(|v| v.is_finite()).peekable();
        if finite.peek().is_none() {
            return Self::new(0.0, 0.0);
        }

        match mode {
            NormalizationMode::Centered => {
                let m = finite.fold(0.0_f64, |acc, v| acc.max(v.abs()));
                Self::new(-m, m)
            }
            NormalizationMode::MinMax => {
                let (vmin, vmax) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
                Self::new(vmin, vmax)
            }
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.vmin == self.vmax
    }
}

/// Linear mapping of values onto `[0, 1]`, clipped to the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    range: ValueRange,
}

impl Normalizer {
    pub fn new(range: ValueRange) -> Self {
        Self { range }
    }

    /// Normalizer over the range of `values` in `mode`.
    pub fn for_values(values: &[f64], mode: NormalizationMode) -> Self {
        Self::new(ValueRange::compute(values, mode))
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Map `value` into `[0, 1]`.
    ///
    /// A degenerate range maps everything to 0.5. NaN stays NaN.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        let ValueRange { vmin, vmax } = self.range;
        if vmin == vmax {
            return 0.5;
        }
        ((value - vmin) / (vmax - vmin)).clamp(0.0, 1.0)
    }
}
