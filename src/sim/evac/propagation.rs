//! One tick of the flow model.
//!
//! The tick spreads from the outside into the building. The zone being expanded
//! (the receiver) pulls people from each neighbor (the giver) through every
//! transit not used yet in this tick. Givers are queued and expanded in order
//! of ascending potential.

use crate::Graph;
use crate::Transit;
use crate::Zone;
use anyhow::{Result, ensure};
use tracing::trace;

use super::config::SimulationConfig;
use super::speed::exit_speed;

/// Clears the per-tick state of zones and transits.
pub fn reset(zones: &mut [Zone], transits: &mut [Transit]) {
    for zone in zones.iter_mut() {
        zone.visited = false;
        zone.potential = if zone.is_outside() { 0.0 } else { f64::INFINITY };
    }
    for transit in transits.iter_mut() {
        transit.visited = false;
        transit.people_crossed = 0.0;
    }
}

/// Relative tolerance of the minimum density test, absorbs rounding of zone areas.
const DENSITY_MIN_TOLERANCE: f64 = 1e-9;

/// Number of people moving from `giver` to `receiver` within one step.
///
/// A zone at or below the minimum density empties at once. The result never
/// exceeds what the receiver can still hold or what the giver has.
pub fn part_people_flow(
    config: &SimulationConfig,
    receiver: &Zone,
    giver: &Zone,
    width: f64,
    speed: f64,
    step: f64,
) -> f64 {
    let density = giver.density();
    let density_min = if config.density_min > 0.0 {
        config.density_min
    } else {
        0.5 / giver.area
    };

    let flow = if density > density_min * (1.0 + DENSITY_MIN_TOLERANCE) {
        density * speed * width * step
    } else {
        giver.occupants
    };

    let capacity = if receiver.is_outside() {
        f64::INFINITY
    } else {
        (config.density_max * receiver.area - receiver.occupants).max(0.0)
    };

    flow.min(capacity).min(giver.occupants).max(0.0)
}

/// Moves people for one modeling step of `step` minutes.
pub fn moving_step(
    graph: &Graph,
    zones: &mut [Zone],
    transits: &mut [Transit],
    config: &SimulationConfig,
    step: f64,
) -> Result<()> {
    ensure!(step > 0.0, "Modeling step must be positive, got {step}");
    ensure!(
        zones.len() == graph.node_count(),
        "Graph has {} nodes but there are {} zones",
        graph.node_count(),
        zones.len()
    );
    ensure!(
        transits.len() == graph.transit_count(),
        "Graph has {} transits but {} were given",
        graph.transit_count(),
        transits.len()
    );

    reset(zones, transits);

    let outside = graph.outside();
    let mut pending: Vec<usize> = Vec::with_capacity(zones.len());
    let mut receiver = outside;

    for _ in 0..=zones.len() {
        for edge in graph.edges(receiver) {
            let transit = &transits[edge.transit];
            if transit.visited || transit.blocked {
                continue;
            }
            let giver = edge.dest;
            if giver == outside {
                continue;
            }

            let width = transit.width;
            let (moved, potential) = {
                let r = &zones[receiver];
                let g = &zones[giver];
                let speed = exit_speed(config, r, g, width)?;
                let potential = g.area.sqrt() / speed;
                let moved = part_people_flow(config, r, g, width, speed, step);
                (moved, potential)
            };

            let r = &mut zones[receiver];
            r.potential = if r.potential.is_finite() {
                r.potential + potential
            } else {
                potential
            };
            r.occupants += moved;
            zones[giver].occupants -= moved;
            zones[giver].visited = true;

            let transit = &mut transits[edge.transit];
            transit.people_crossed = moved;
            transit.visited = true;
            trace!("{moved:.3} people: zone {giver} -> zone {receiver} via transit {}", edge.transit);

            if graph.degree(giver) > 1 && !zones[giver].blocked && !pending.contains(&giver) {
                pending.push(giver);
            }
        }

        pending.sort_by(|&a, &b| zones[a].potential.total_cmp(&zones[b].potential));
        if pending.is_empty() {
            break;
        }
        receiver = pending.remove(0);
    }

    Ok(())
}
