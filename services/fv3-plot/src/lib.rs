//! Plotting driver for FV3 cube-sphere output.
//!
//! Parses arguments into a [`PlotConfig`] and runs the
//! assemble -> mesh -> render -> encode pipeline with [`run`].

pub mod config;
pub mod plot;

pub use config::{Args, CoordinateTest, PlotConfig};
pub use plot::run;
