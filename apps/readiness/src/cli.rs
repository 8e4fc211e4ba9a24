//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Road readiness for autonomous-vehicle deployment: look up a location,
/// assess a route corridor, or summarise a segment dataset.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Segment dataset (JSON array of scored segments).
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Engine configuration (JSON).  Missing keys use defaults.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Candidate search strategy.
    #[arg(long, global = true, value_enum, default_value_t = LocatorKind::Indexed)]
    pub locator: LocatorKind,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LocatorKind {
    /// Check every segment.
    Linear,
    /// R-tree candidates.
    Indexed,
    /// Every segment, across all cores.
    Parallel,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Readiness of the road segment nearest a coordinate.
    Location(LocationArgs),
    /// Readiness along the straight corridor between two coordinates.
    Route(RouteArgs),
    /// Summary statistics for the whole dataset.
    Stats,
}

#[derive(Args, Debug)]
pub struct LocationArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Search radius; overrides the configured default.
    #[arg(long)]
    pub radius_km: Option<f64>,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub start_lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub start_lon: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub end_lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub end_lon: f64,

    /// Corridor half-width; overrides the configured default.
    #[arg(long)]
    pub corridor_width_km: Option<f64>,

    /// Cap on segments listed in the report; overrides the configured default.
    #[arg(long)]
    pub max_samples: Option<usize>,

    /// Measure corridor distance on the sphere instead of in scaled degrees.
    #[arg(long)]
    pub geodesic: bool,

    /// Echoed in the report.
    #[arg(long)]
    pub vehicle_type: Option<String>,

    /// List every matched segment in the report, not just the sample.
    #[arg(long)]
    pub all_segments: bool,

    /// Also write every matched segment to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}
