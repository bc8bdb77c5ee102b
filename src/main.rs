//! Evacuation simulation of a building described in a JSON file.
//!
//! Usage: building-evac -f <building.json> [-c <scenario.json>] [-o <output.csv>] [-v]

use anyhow::{Context, Result, anyhow};
use building_evac::io::{CsvSink, ShortCsvSink, read_building, read_scenario};
use building_evac::{Simulation, SimulationConfig};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

struct Args {
    building: PathBuf,
    scenario: Option<PathBuf>,
    output: PathBuf,
    verbose: bool,
}

fn parse_args() -> Result<Args> {
    let mut building: Option<PathBuf> = None;
    let mut scenario: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut verbose = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-f" => building = args.next().map(PathBuf::from),
            "-c" => scenario = args.next().map(PathBuf::from),
            "-o" => output = args.next().map(PathBuf::from),
            "-v" => verbose = true,
            other => return Err(anyhow!("Unknown argument: {other}")),
        }
    }

    let building = building.ok_or_else(|| {
        anyhow!("Usage: building-evac -f <building.json> [-c <scenario.json>] [-o <output.csv>] [-v]")
    })?;
    let output = output.unwrap_or_else(|| default_output(&building));

    Ok(Args {
        building,
        scenario,
        output,
        verbose,
    })
}

/// `dir/name.json` -> `dir/name_detailed.csv`
fn default_output(building: &Path) -> PathBuf {
    let stem = building
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "building".to_string());
    building.with_file_name(format!("{stem}_detailed.csv"))
}

/// `dir/name_detailed.csv` -> `dir/name_short.csv`
fn short_output(detailed: &Path) -> PathBuf {
    let stem = detailed
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "building".to_string());
    let stem = stem.strip_suffix("_detailed").unwrap_or(&stem);
    detailed.with_file_name(format!("{stem}_short.csv"))
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut building = read_building(&args.building)?;
    let mut config = SimulationConfig::new();
    if let Some(path) = args.scenario.as_deref() {
        let scenario = read_scenario(path)?;
        scenario
            .apply(&mut building, &mut config)
            .with_context(|| format!("Cannot apply scenario {}", path.display()))?;
    }

    let short = short_output(&args.output);
    let mut sinks = (
        CsvSink::create(&args.output, &building)?,
        ShortCsvSink::create(&short, &building)?,
    );
    let mut sim = Simulation::new(building, config)?;
    let summary = sim.run(&mut sinks)?;
    let (detailed, compact) = sinks;
    detailed.into_inner()?;
    compact.into_inner()?;

    info!("Detailed output written to {}", args.output.display());
    info!("Short output written to {}", short.display());
    info!(
        "People inside: {:.2}, outside: {:.2}",
        summary.remaining, summary.evacuated
    );
    info!(
        "Evacuation time: {:.2} s, {:.2} min",
        summary.time_s, summary.time_min
    );

    Ok(())
}
