//! Error kinds raised by the geometry engine, building construction and the flow engine.
//!
//! Functions return `anyhow::Result`; the kinds below are wrapped into `anyhow::Error`
//! so callers can tell them apart with `downcast_ref::<EvacError>()`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvacError {
    /// Degenerate polygons, unresolvable opening geometry.
    #[error("geometry error: {0}")]
    Geometry(String),
    /// Dangling references between zones and transits, empty levels.
    #[error("topology error: {0}")]
    Topology(String),
    /// Values that would break the flow equations (non-positive speed or step).
    #[error("numeric error: {0}")]
    Numeric(String),
}

impl EvacError {
    pub fn geometry(msg: impl Into<String>) -> anyhow::Error {
        anyhow::Error::new(Self::Geometry(msg.into()))
    }

    pub fn topology(msg: impl Into<String>) -> anyhow::Error {
        anyhow::Error::new(Self::Topology(msg.into()))
    }

    pub fn numeric(msg: impl Into<String>) -> anyhow::Error {
        anyhow::Error::new(Self::Numeric(msg.into()))
    }
}
