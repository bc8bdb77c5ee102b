//! Adjacency graph of zones.
//!
//! One node per zone (same index as in the building's zone vector), two directed
//! edges per transit. Edges of a node keep the order in which transits were added.

use crate::EvacError;
use crate::Transit;
use crate::Zone;
use anyhow::Result;
use std::fmt;

/// Directed edge leaving a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    /// Index of the zone on the other side
    pub dest: usize,
    /// Index of the transit joining both zones
    pub transit: usize,
}

#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<GraphEdge>>,
    num_transits: usize,
}

impl Graph {
    /// Builds the graph from zones and transits.
    ///
    /// Each transit joins the first two zones listing it in their outputs.
    pub fn new(zones: &[Zone], transits: &[Transit]) -> Result<Self> {
        if zones.is_empty() || transits.is_empty() {
            return Err(EvacError::topology(format!(
                "Cannot build a graph of {} zones and {} transits",
                zones.len(),
                transits.len()
            )));
        }

        let mut adjacency: Vec<Vec<GraphEdge>> = vec![Vec::new(); zones.len()];

        for (ti, transit) in transits.iter().enumerate() {
            let ends: Vec<usize> = zones
                .iter()
                .enumerate()
                .filter(|(_, z)| z.has_output(&transit.uid))
                .map(|(zi, _)| zi)
                .take(2)
                .collect();

            let [src, dst] = ends[..] else {
                return Err(EvacError::topology(format!(
                    "Transit {} ({}) is listed by {} zones, expected 2",
                    transit.name,
                    transit.uid,
                    ends.len()
                )));
            };

            adjacency[src].push(GraphEdge {
                dest: dst,
                transit: ti,
            });
            adjacency[dst].push(GraphEdge {
                dest: src,
                transit: ti,
            });
        }

        Ok(Self {
            adjacency,
            num_transits: transits.len(),
        })
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of transits the graph was built from.
    pub fn transit_count(&self) -> usize {
        self.num_transits
    }

    /// Node of the outside zone (always the last one).
    pub fn outside(&self) -> usize {
        self.adjacency.len() - 1
    }

    pub fn edges(&self, node: usize) -> &[GraphEdge] {
        &self.adjacency[node]
    }

    /// Number of transits incident to `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, edges) in self.adjacency.iter().enumerate() {
            write!(f, "{node}:")?;
            for e in edges.iter() {
                write!(f, " {} —({})-> {}", node, e.transit, e.dest)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
