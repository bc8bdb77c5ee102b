//! JSON building description I/O.
//!
//! The file holds the building name and address, then a list of levels,
//! each with its rooms, staircases and openings drawn as floor outlines.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

use crate::{Building, BuildingDescription};

/// Reads a building description from a JSON file.
pub fn read_building_description(path: &Path) -> Result<BuildingDescription> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let desc: BuildingDescription = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse building file: {}", path.display()))?;
    info!(
        "Read building \"{}\" with {} levels from {}",
        desc.name,
        desc.levels.len(),
        path.display()
    );

    Ok(desc)
}

/// Parses a building description from a JSON string.
pub fn parse_building_description(json: &str) -> Result<BuildingDescription> {
    serde_json::from_str(json).context("Failed to parse building description")
}

/// Writes a building description to a JSON file.
pub fn write_building_description(path: &Path, desc: &BuildingDescription) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, desc)
        .with_context(|| format!("Failed to write building file: {}", path.display()))?;

    Ok(())
}

/// Reads a JSON building file and builds the building model.
pub fn read_building(path: &Path) -> Result<Building> {
    let desc = read_building_description(path)?;
    Building::from_description(&desc)
        .with_context(|| format!("Invalid building in {}", path.display()))
}
