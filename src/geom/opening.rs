//! Effective width of an opening (transit) between two adjacent spaces.
//!
//! A transit is drawn as a small polygon straddling the wall between two zones.
//! Its vertices split into two pairs, one inside each zone, and every pair forms
//! a short "facing" edge running along the wall.

use crate::EvacError;
use crate::Point;
use crate::Polygon;
use crate::geom::segment::{Segment, nearest_point_on_segment, segments_intersect};
use anyhow::Result;

/// Elevation difference below which two spaces are on the same level (m).
pub const LEVEL_EPS: f64 = 1e-3;

/// How the width of an opening is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningKind {
    /// Door with a leaf: the facing edges are the door jambs' span.
    Door,
    /// Virtual opening without a leaf: the width is measured on the walls
    /// the opening cuts through, which do not have to be flush.
    Doorway,
}

/// One of the two spaces joined by an opening.
#[derive(Debug, Clone, Copy)]
pub struct OpeningSide<'a> {
    /// Floor polygon, `None` for the outside.
    pub polygon: Option<&'a Polygon>,
    pub area: f64,
    pub z_level: f64,
    pub staircase: bool,
}

/// Infers the width of the opening `transit` joining sides `a` and `b`.
///
/// - Two staircases on different levels have no facing edge, the width is
///   `sqrt((area_a + area_b) / 2)`.
/// - [`OpeningKind::Door`]: mean length of the two facing edges.
/// - [`OpeningKind::Doorway`]: mean of the widths measured on the wall of each
///   side (see [`wall_width`]).
///
/// Geometry that does not resolve into two facing edges, or a doorway that does not
/// cut through exactly one wall of a zone, is an error.
pub fn infer_transit_width(
    a: &OpeningSide,
    b: &OpeningSide,
    transit: &Polygon,
    kind: OpeningKind,
) -> Result<f64> {
    if a.staircase && b.staircase && (a.z_level - b.z_level).abs() > LEVEL_EPS {
        return Ok(((a.area + b.area) / 2.).sqrt());
    }

    let poly_a = a
        .polygon
        .ok_or_else(|| EvacError::geometry("First side of an opening has no polygon"))?;
    let (facing_a, facing_b) = facing_edges(poly_a, b.polygon, transit)?;

    let width = match kind {
        OpeningKind::Door => (facing_a.length() + facing_b.length()) / 2.,
        OpeningKind::Doorway => {
            let width_a = wall_width(poly_a, &facing_a, &facing_b)?;
            let width_b = match b.polygon {
                Some(poly_b) => wall_width(poly_b, &facing_b, &facing_a)?,
                None => facing_b.length(),
            };
            (width_a + width_b) / 2.
        }
    };

    Ok(width)
}

/// Splits the transit vertices into the edge lying in `poly_a` and the one lying
/// in `poly_b` (or anywhere outside `poly_a` when `poly_b` is `None`).
fn facing_edges(
    poly_a: &Polygon,
    poly_b: Option<&Polygon>,
    transit: &Polygon,
) -> Result<(Segment, Segment)> {
    let mut group_a: Vec<Point> = Vec::new();
    let mut group_b: Vec<Point> = Vec::new();

    for &pt in transit.points() {
        if poly_a.contains(pt) {
            group_a.push(pt);
        } else if poly_b.is_none_or(|poly| poly.contains(pt)) {
            group_b.push(pt);
        } else {
            return Err(EvacError::geometry(format!(
                "Opening vertex {pt} lies in neither adjacent zone"
            )));
        }
    }

    if group_a.len() != 2 || group_b.len() != 2 {
        return Err(EvacError::geometry(format!(
            "Opening vertices split {}/{} between adjacent zones, expected 2/2",
            group_a.len(),
            group_b.len()
        )));
    }

    Ok((
        Segment::new(group_a[0], group_a[1]),
        Segment::new(group_b[0], group_b[1]),
    ))
}

/// Width of the opening measured on the wall of `zone` it cuts through.
///
/// The crossing sides join each end of `own` with the nearest end of `other`.
/// Exactly one edge of `zone` must intersect both crossing sides; the ends of
/// `own` are projected onto that edge and the distance between the projections
/// is the width.
fn wall_width(zone: &Polygon, own: &Segment, other: &Segment) -> Result<f64> {
    let (q1, q2) = if own.p1.distance(&other.p1) <= own.p1.distance(&other.p2) {
        (other.p1, other.p2)
    } else {
        (other.p2, other.p1)
    };
    let side1 = Segment::new(own.p1, q1);
    let side2 = Segment::new(own.p2, q2);

    let walls: Vec<Segment> = zone
        .edges()
        .filter(|edge| segments_intersect(edge, &side1) && segments_intersect(edge, &side2))
        .collect();
    if walls.len() != 1 {
        return Err(EvacError::geometry(format!(
            "Expected one wall crossed by the opening, found {}",
            walls.len()
        )));
    }

    let n1 = nearest_point_on_segment(own.p1, &walls[0]);
    let n2 = nearest_point_on_segment(own.p2, &walls[0]);
    Ok(n1.distance(&n2))
}
