//! Per-tick snapshots of the building state and the sinks receiving them.

use crate::Building;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneState {
    pub blocked: bool,
    pub visited: bool,
    pub occupants: f64,
    pub potential: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitState {
    pub blocked: bool,
    pub visited: bool,
    pub people_crossed: f64,
}

/// State of all zones and transits at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct TickRecord {
    /// Simulated time (min)
    pub time_min: f64,
    /// Same order as the building's zones
    pub zones: Vec<ZoneState>,
    /// Same order as the building's transits
    pub transits: Vec<TransitState>,
}

impl TickRecord {
    pub fn capture(building: &Building, time_min: f64) -> Self {
        let zones = building
            .zones()
            .iter()
            .map(|z| ZoneState {
                blocked: z.blocked,
                visited: z.visited,
                occupants: z.occupants,
                potential: z.potential,
            })
            .collect();
        let transits = building
            .transits()
            .iter()
            .map(|t| TransitState {
                blocked: t.blocked,
                visited: t.visited,
                people_crossed: t.people_crossed,
            })
            .collect();
        Self {
            time_min,
            zones,
            transits,
        }
    }

    /// Number of people in all zones, the outside included.
    pub fn total_people(&self) -> f64 {
        self.zones.iter().map(|z| z.occupants).sum()
    }
}

/// Receives the initial state and the state after every tick.
pub trait TickSink {
    fn record(&mut self, record: &TickRecord) -> Result<()>;
}

/// Keeps all records in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    pub records: Vec<TickRecord>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSink for Recorder {
    fn record(&mut self, record: &TickRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

impl<S: TickSink + ?Sized> TickSink for &mut S {
    fn record(&mut self, record: &TickRecord) -> Result<()> {
        (**self).record(record)
    }
}

/// Feeds every record to both sinks, in order.
impl<A: TickSink, B: TickSink> TickSink for (A, B) {
    fn record(&mut self, record: &TickRecord) -> Result<()> {
        self.0.record(record)?;
        self.1.record(record)
    }
}
