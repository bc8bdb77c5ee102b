//! Flow-based evacuation: people move between zones as a continuous quantity,
//! driven by a wavefront spreading from the outside into the building.

pub mod clock;
pub mod config;
pub mod propagation;
pub mod recorder;
pub mod scenario;
pub mod simulation;
pub mod speed;
