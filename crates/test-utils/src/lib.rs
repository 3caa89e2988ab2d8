//! Shared test utilities for the fv3-plot workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic cube-sphere fields and per-tile slices
//! - Gnomonic vertex grids in radians, shaped like FV3 grid files
//! - Small fixtures with hand-checked expected values
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true }
//! ```
//!
//! Then import in your integration tests:
//!
//! ```ignore
//! use test_utils::{gnomonic_vertices, indexed_tiles};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Assert that two floats differ by less than `eps` (default `1e-9`).
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        $crate::assert_close!($left, $right, 1e-9)
    };
    ($left:expr, $right:expr, $eps:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < $eps,
            "assertion failed: {} is not within {} of {}",
            left,
            $eps,
            right
        );
    }};
}
