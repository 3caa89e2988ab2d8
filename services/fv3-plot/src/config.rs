//! Command-line arguments and the validated plot configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cubesphere::{CubeSphereError, MeshLayout, NormalizationMode, RenderConfig};
use netcdf_parser::InputModel;
use renderer::{Canvas, ColorMapName, ImageFormat};

/// Plot a variable from FV3 cube-sphere output
#[derive(Parser, Debug, Clone)]
#[command(name = "fv3-plot")]
#[command(about = "Plot a field from GEOS or GFS cube-sphere output")]
pub struct Args {
    /// GEOS input (single .nc4 file)
    #[arg(long)]
    pub geos: bool,

    /// GFS input (.nc base path of the six .tileN.nc files)
    #[arg(long)]
    pub gfs: bool,

    /// Input file path
    #[arg(short = 'f', long)]
    pub filepath: PathBuf,

    /// Baseline file path; the plot shows `field - baseline`
    #[arg(long)]
    pub basefilepath: Option<PathBuf>,

    /// Variable name
    #[arg(short = 'v', long)]
    pub variable: Option<String>,

    /// Level (1-based)
    #[arg(short = 'l', long, default_value_t = 1)]
    pub level: usize,

    /// Averaging block size
    #[arg(short = 'a', long, default_value_t = 1)]
    pub average: usize,

    /// Cells with |value| below this are not drawn
    #[arg(long, default_value_t = 0.0)]
    pub threshold: f64,

    /// Color map (default: coolwarm when centered, jet otherwise)
    #[arg(long)]
    pub colormap: Option<String>,

    /// Symmetric color range around zero
    #[arg(long)]
    pub centered: bool,

    /// Unfolded cross representation instead of polygons
    #[arg(long)]
    pub cross: bool,

    /// Output file path (.png or .jpg; anything else gets .png appended)
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Directory holding fv3grid_cNNNN.nc4 vertex grids
    #[arg(long, env = "FV3_GRID_DIR", default_value = "./fv3grid")]
    pub grid_dir: PathBuf,

    /// Plot the cell-center longitudes or latitudes instead of a variable (GEOS only)
    #[arg(long, value_enum)]
    pub coordinate_test: Option<CoordinateTest>,

    /// Pixels per cell in cross layout
    #[arg(long, default_value_t = 2)]
    pub cross_scale: u32,

    /// Image width in polygon layout
    #[arg(long, default_value_t = 1600)]
    pub width: u32,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CoordinateTest {
    Lon,
    Lat,
}

impl CoordinateTest {
    /// Cell-center coordinate variable in GEOS files.
    pub fn variable(&self) -> &'static str {
        match self {
            CoordinateTest::Lon => "lons",
            CoordinateTest::Lat => "lats",
        }
    }
}

/// Everything a plot run needs, checked once up front.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub model: InputModel,
    pub filepath: PathBuf,
    pub basefilepath: Option<PathBuf>,
    pub variable: String,
    pub level: usize,
    pub render: RenderConfig,
    pub colormap: ColorMapName,
    pub canvas: Canvas,
    pub output: PathBuf,
    pub format: ImageFormat,
    pub grid_dir: PathBuf,
}

impl PlotConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let model = match (args.geos, args.gfs) {
            (true, false) => InputModel::Geos,
            (false, true) => InputModel::Gfs,
            _ => {
                return Err(CubeSphereError::invalid_arguments(
                    "exactly one of --geos or --gfs is required",
                )
                .into())
            }
        };

        model.check_path(&args.filepath)?;
        if let Some(base) = &args.basefilepath {
            model.check_path(base).context("checking --basefilepath")?;
        }

        let variable = match (args.coordinate_test, args.variable) {
            (Some(_), _) if model == InputModel::Gfs => {
                return Err(CubeSphereError::invalid_arguments(
                    "--coordinate-test is only available with --geos",
                )
                .into())
            }
            (Some(_), _) if args.basefilepath.is_some() => {
                return Err(CubeSphereError::invalid_arguments(
                    "--coordinate-test cannot be combined with --basefilepath",
                )
                .into())
            }
            (Some(test), _) => test.variable().to_string(),
            (None, Some(variable)) => variable,
            (None, None) => {
                return Err(CubeSphereError::invalid_arguments("--variable is required").into())
            }
        };

        let mode = if args.centered {
            NormalizationMode::Centered
        } else {
            NormalizationMode::MinMax
        };
        let render = RenderConfig {
            average: args.average,
            threshold: args.threshold,
            mode,
            layout: if args.cross {
                MeshLayout::Cross
            } else {
                MeshLayout::Polygons
            },
        };
        render.validate()?;

        let colormap = match &args.colormap {
            Some(name) => name.parse()?,
            None => ColorMapName::default_for(mode),
        };

        let (format, output) = ImageFormat::resolve_output(args.output);

        Ok(Self {
            model,
            filepath: args.filepath,
            basefilepath: args.basefilepath,
            variable,
            level: args.level,
            render,
            colormap,
            canvas: Canvas {
                cross_scale: args.cross_scale,
                polygon_width: args.width,
            },
            output,
            format,
            grid_dir: args.grid_dir,
        })
    }

    /// Plot title for a field with `edge` cells per tile edge.
    pub fn title(&self, edge: usize) -> String {
        let mut title = format!("{} at level {} - C{}", self.variable, self.level, edge);
        if self.render.average > 1 {
            title.push_str(&format!(" - Avg. {}", self.render.average));
        }
        title
    }
}
