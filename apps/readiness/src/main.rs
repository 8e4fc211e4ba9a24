//! readiness — command-line boundary for the road-readiness engine.
//!
//! Loads a scored segment dataset once, answers one query, prints a JSON
//! report on stdout and exits.  Logs go to stderr (`RUST_LOG`, default
//! `info`).
//!
//! | Exit status | Meaning                                     |
//! |-------------|---------------------------------------------|
//! | 0           | report printed                              |
//! | 1           | bad input, unreadable data, or other error  |
//! | 2           | query was valid but matched no segments     |

mod cli;
mod report;

#[cfg(test)]
mod tests;

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rr_assess::{AssessError, Assessor, EngineConfig, RouteRequest};
use rr_core::GeoPoint;
use rr_output::{SegmentCsvWriter, SegmentRow, SegmentWriter};
use rr_spatial::{
    load_json, CorridorMode, IndexedScan, LinearScan, ParallelScan, SegmentLocator, SegmentStore,
};

use cli::{Cli, Command, LocationArgs, LocatorKind, RouteArgs};
use report::{LocationReport, NotFound, RouteReport, StatsReport};

// ── Exit codes ────────────────────────────────────────────────────────────────

const EXIT_FAILURE:   u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<AssessError>() {
            Some(e) if e.is_not_found() => {
                if let Err(print_err) = print_json(&NotFound::new(e)) {
                    error!("{print_err:#}");
                }
                ExitCode::from(EXIT_NOT_FOUND)
            }
            _ => {
                error!("{err:#}");
                ExitCode::from(EXIT_FAILURE)
            }
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let data = cli.data.as_deref().context("--data <PATH> is required")?;
    let store = load_json(data).with_context(|| format!("loading segments from {}", data.display()))?;
    info!(segments = store.len(), path = %data.display(), "dataset ready");

    match cli.locator {
        LocatorKind::Linear   => dispatch(&cli.command, &store, LinearScan, config),
        LocatorKind::Indexed  => dispatch(&cli.command, &store, IndexedScan, config),
        LocatorKind::Parallel => dispatch(&cli.command, &store, ParallelScan, config),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    info!(path = %path.display(), "configuration loaded");
    Ok(config)
}

fn dispatch<L: SegmentLocator>(
    command: &Command,
    store:   &SegmentStore,
    locator: L,
    config:  EngineConfig,
) -> Result<()> {
    let assessor = Assessor::with_locator(store, locator, config);
    match command {
        Command::Location(args) => location(&assessor, args),
        Command::Route(args)    => route(&assessor, args),
        Command::Stats          => print_json(&StatsReport::from(&assessor.dataset_stats())),
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn location<L: SegmentLocator>(assessor: &Assessor<'_, L>, args: &LocationArgs) -> Result<()> {
    let readiness = assessor.location_readiness(GeoPoint::new(args.lat, args.lon), args.radius_km)?;
    print_json(&LocationReport::from(&readiness))
}

fn route<L: SegmentLocator>(assessor: &Assessor<'_, L>, args: &RouteArgs) -> Result<()> {
    let request = route_request(args);
    let assessment = assessor.assess_route(&request)?;

    if let Some(path) = &args.csv {
        let rows = SegmentRow::from_segments(assessment.segments.iter().copied(), &assessor.config().thresholds);
        let mut writer = SegmentCsvWriter::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_segments(&rows)?;
        writer.finish()?;
        info!(rows = rows.len(), path = %path.display(), "matched segments exported");
    }

    let report = RouteReport::from(&assessment);
    if args.all_segments {
        print_json(&report.with_matched_segments(&assessment))
    } else {
        print_json(&report)
    }
}

/// Translate route arguments into a request; unset options stay `None` so
/// configured defaults apply.
fn route_request(args: &RouteArgs) -> RouteRequest {
    RouteRequest {
        start:             GeoPoint::new(args.start_lat, args.start_lon),
        end:               GeoPoint::new(args.end_lat, args.end_lon),
        corridor_width_km: args.corridor_width_km,
        max_sample_count:  args.max_samples,
        corridor_mode:     args.geodesic.then_some(CorridorMode::Geodesic),
        vehicle_type:      args.vehicle_type.clone(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
