//! 2D geometry used to derive zone areas and opening widths from floor plans.

pub mod opening;
pub mod point;
pub mod polygon;
pub mod segment;
pub mod triangles;

/// Geometric precision (meters, or square meters for cross products)
pub const EPS: f64 = 1e-9;
