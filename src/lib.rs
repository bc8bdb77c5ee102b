pub mod building;
pub mod error;
pub mod geom;
pub mod io;
pub mod sim;
mod sortbyid;
mod uid;

// Prelude
pub use building::Building;
pub use building::description::{
    BuildingDescription, ElementDescription, ElementSign, LevelDescription,
};
pub use building::graph::{Graph, GraphEdge};
pub use building::transit::{Transit, TransitKind};
pub use building::zone::{Zone, ZoneKind};
pub use error::EvacError;
pub use geom::point::Point;
pub use geom::polygon::Polygon;
pub use geom::segment::Segment;
pub use sim::evac::config::SimulationConfig;
pub use sim::evac::recorder::{Recorder, TickRecord, TickSink};
pub use sim::evac::scenario::Scenario;
pub use sim::evac::simulation::{Simulation, SimulationSummary};
pub use sortbyid::{HasId, SortById};
pub use uid::UID;
