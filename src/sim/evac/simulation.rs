use anyhow::{Result, ensure};
use tracing::{debug, info, warn};

use crate::sim::evac::clock::SimulationClock;
use crate::sim::evac::propagation::moving_step;
use crate::sim::evac::recorder::{TickRecord, TickSink};
use crate::{Building, Graph};

use super::config::SimulationConfig;

/// Outcome of a complete run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSummary {
    /// Number of ticks performed
    pub ticks: usize,
    /// Simulated evacuation time (min)
    pub time_min: f64,
    /// Simulated evacuation time (s)
    pub time_s: f64,
    /// People who reached the outside
    pub evacuated: f64,
    /// People left inside the building
    pub remaining: f64,
}

pub struct Simulation {
    building: Building,
    graph: Graph,
    config: SimulationConfig,
    clock: SimulationClock,
    ticks: usize,
}

impl Simulation {
    /// Prepares a simulation. A modeling step of 0 is derived from the building.
    pub fn new(building: Building, mut config: SimulationConfig) -> Result<Self> {
        let graph = Graph::new(building.zones(), building.transits())?;
        debug!("Adjacency graph:\n{graph}");

        config.modeling_step = config.resolve_modeling_step(&building);
        ensure!(
            config.modeling_step.is_finite() && config.modeling_step > 0.0,
            "Modeling step must be positive, got {}",
            config.modeling_step
        );
        let clock = SimulationClock::new(config.modeling_step);

        Ok(Self {
            building,
            graph,
            config,
            clock,
            ticks: 0,
        })
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Performs one tick and advances the clock.
    pub fn step(&mut self) -> Result<()> {
        let (zones, transits) = self.building.parts_mut();
        moving_step(&self.graph, zones, transits, &self.config, self.clock.step())?;
        self.clock.advance();
        self.ticks += 1;
        Ok(())
    }

    /// Number of people in the zones reached by the last tick, the outside excluded.
    pub fn people_in_visited_zones(&self) -> f64 {
        self.building
            .zones()
            .iter()
            .filter(|z| z.visited && !z.is_outside())
            .map(|z| z.occupants)
            .sum()
    }

    /// Snapshot of the current state.
    pub fn record(&self) -> TickRecord {
        TickRecord::capture(&self.building, self.clock.minutes())
    }

    /// Runs ticks until nobody is left in the reachable zones.
    ///
    /// The sink receives the initial state and the state after every tick.
    /// People in zones cut off from the outside are never reached and stay
    /// inside; they are reported as `remaining`.
    pub fn run<S: TickSink>(&mut self, sink: &mut S) -> Result<SimulationSummary> {
        info!(
            "Starting simulation: {:.0} people, step {:.4} min",
            self.building.num_of_people(),
            self.clock.step()
        );
        sink.record(&self.record())?;

        loop {
            self.step()?;
            sink.record(&self.record())?;

            let left = self.people_in_visited_zones();
            debug!(
                "t = {:.2} s, {:.2} people moving, {:.2} outside",
                self.clock.seconds(),
                left,
                self.building.outside().occupants
            );
            if left <= self.config.remainder {
                break;
            }
            if let Some(max_ticks) = self.config.max_ticks
                && self.ticks >= max_ticks
            {
                warn!("Stopping after {max_ticks} ticks with {left:.2} people still moving");
                break;
            }
        }

        let summary = self.summary();
        info!(
            "Evacuation time: {:.2} s ({:.2} min), {} ticks, {:.0} evacuated, {:.0} remaining",
            summary.time_s, summary.time_min, summary.ticks, summary.evacuated, summary.remaining
        );
        Ok(summary)
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            ticks: self.ticks,
            time_min: self.clock.minutes(),
            time_s: self.clock.seconds(),
            evacuated: self.building.outside().occupants,
            remaining: self.building.num_of_people(),
        }
    }
}
