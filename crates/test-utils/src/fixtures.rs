//! Common fixtures for cube-sphere tests.

/// A 2x2 block and its mean.
pub const BLOCK_2X2: [[f64; 2]; 2] = [[1.0, 2.0], [3.0, 4.0]];
pub const BLOCK_2X2_MEAN: f64 = 2.5;

/// `BLOCK_2X2` after three counter-clockwise quarter turns.
pub const BLOCK_2X2_ROT270: [[f64; 2]; 2] = [[3.0, 1.0], [4.0, 2.0]];

/// `BLOCK_2X2` after one counter-clockwise quarter turn.
pub const BLOCK_2X2_ROT90: [[f64; 2]; 2] = [[2.0, 4.0], [1.0, 3.0]];

/// Values with mixed signs: centered range `(-5, 5)`, min/max `(-3, 5)`.
pub const MIXED_SIGNS: [f64; 3] = [-3.0, 5.0, -1.0];
