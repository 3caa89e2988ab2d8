//! fv3-plot
//!
//! Plots one level of a variable from GEOS or GFS cube-sphere output,
//! either as geodetic polygons or as an unfolded cross.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use fv3_plot::{run, Args, PlotConfig};

fn main() -> Result<()> {
    let start = Instant::now();

    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    if args.log_json {
        fmt().with_env_filter(filter).with_target(true).json().init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }

    netcdf_parser::silence_hdf5_errors();

    let config = PlotConfig::from_args(args)?;
    info!(
        model = ?config.model,
        filepath = %config.filepath.display(),
        variable = %config.variable,
        level = config.level,
        grid_dir = %config.grid_dir.display(),
        render = %serde_json::to_string(&config.render)?,
        "Parameters"
    );

    let path = run(&config)?;

    info!(
        path = %path.display(),
        elapsed_secs = start.elapsed().as_secs_f64(),
        "fv3-plot finished"
    );

    Ok(())
}
