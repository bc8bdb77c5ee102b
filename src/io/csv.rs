//! Time series output, one row per record.
//!
//! [`CsvSink`] writes the detailed `;`-separated file. Two header rows: zone names
//! with areas and transit names with widths, then the field names. Every record
//! row starts with the time in seconds, followed by
//! `blocked;visited;people;potential` for each zone and `blocked;visited;people`
//! for each transit.
//!
//! [`ShortCsvSink`] writes the compact `,`-separated file: one header row with the
//! names, then the time in seconds, the people in each zone and the people who
//! crossed each transit.

use anyhow::{Context, Result, ensure};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Building;
use crate::sim::evac::recorder::{TickRecord, TickSink};

pub struct CsvSink<W: Write> {
    writer: W,
    num_zones: usize,
    num_transits: usize,
}

impl CsvSink<BufWriter<File>> {
    /// Creates the output file and writes the header.
    pub fn create(path: &Path, building: &Building) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
        Self::new(BufWriter::new(file), building)
    }
}

impl<W: Write> CsvSink<W> {
    /// Writes the header to `writer`.
    pub fn new(mut writer: W, building: &Building) -> Result<Self> {
        write!(writer, "t;")?;
        for zone in building.zones() {
            write!(writer, "{};{:.2};;;", zone.name, zone.area)?;
        }
        for transit in building.transits() {
            write!(writer, "{};{:.2};;", transit.name, transit.width)?;
        }
        writeln!(writer)?;

        write!(writer, ";")?;
        for _ in building.zones() {
            write!(writer, "is_blocked;is_visited;num_of_people;potential;")?;
        }
        for _ in building.transits() {
            write!(writer, "is_blocked;is_visited;num_of_people;")?;
        }
        writeln!(writer)?;

        Ok(Self {
            writer,
            num_zones: building.zones().len(),
            num_transits: building.transits().len(),
        })
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> TickSink for CsvSink<W> {
    fn record(&mut self, record: &TickRecord) -> Result<()> {
        ensure!(
            record.zones.len() == self.num_zones && record.transits.len() == self.num_transits,
            "Record has {} zones and {} transits, header has {} and {}",
            record.zones.len(),
            record.transits.len(),
            self.num_zones,
            self.num_transits
        );

        let w = &mut self.writer;
        write!(w, "{:.2};", record.time_min * 60.0)?;
        for z in record.zones.iter() {
            write!(
                w,
                "{};{};{:.2};{:.2};",
                z.blocked as u8, z.visited as u8, z.occupants, z.potential
            )?;
        }
        for t in record.transits.iter() {
            write!(w, "{};{};{:.2};", t.blocked as u8, t.visited as u8, t.people_crossed)?;
        }
        writeln!(w)?;
        Ok(())
    }
}

/// Compact output: people per zone and per transit only.
pub struct ShortCsvSink<W: Write> {
    writer: W,
    num_zones: usize,
    num_transits: usize,
}

impl ShortCsvSink<BufWriter<File>> {
    pub fn create(path: &Path, building: &Building) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
        Self::new(BufWriter::new(file), building)
    }
}

impl<W: Write> ShortCsvSink<W> {
    pub fn new(mut writer: W, building: &Building) -> Result<Self> {
        write!(writer, "t,")?;
        for zone in building.zones() {
            write!(writer, "{},", zone.name)?;
        }
        for transit in building.transits() {
            write!(writer, "{},", transit.name)?;
        }
        writeln!(writer)?;

        Ok(Self {
            writer,
            num_zones: building.zones().len(),
            num_transits: building.transits().len(),
        })
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> TickSink for ShortCsvSink<W> {
    fn record(&mut self, record: &TickRecord) -> Result<()> {
        ensure!(
            record.zones.len() == self.num_zones && record.transits.len() == self.num_transits,
            "Record has {} zones and {} transits, header has {} and {}",
            record.zones.len(),
            record.transits.len(),
            self.num_zones,
            self.num_transits
        );

        let w = &mut self.writer;
        write!(w, "{:.2},", record.time_min * 60.0)?;
        for z in record.zones.iter() {
            write!(w, "{:.2},", z.occupants)?;
        }
        for t in record.transits.iter() {
            write!(w, "{:.2},", t.people_crossed)?;
        }
        writeln!(w)?;
        Ok(())
    }
}
