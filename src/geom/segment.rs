//! Line segment operations on the floor plane.

use crate::Point;
use crate::geom::point::signed_area;

/// Segments shorter than this are treated as points.
const MIN_SEGMENT_LENGTH: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }
}

/// Checks whether the closed intervals `[a, b]` and `[c, d]` overlap.
fn ranges_overlap(a: f64, b: f64, c: f64, d: f64) -> bool {
    a.min(b).max(c.min(d)) <= a.max(b).min(c.max(d))
}

/// Checks if two segments intersect (touching counts as intersecting).
///
/// Both tests must pass:
/// - the bounding boxes overlap along x and y,
/// - the endpoints of each segment are not strictly on the same side
///   of the other segment (orientation test).
///
/// Collinear segments that do not overlap fail the bounding box test.
pub fn segments_intersect(s1: &Segment, s2: &Segment) -> bool {
    let (p1, p2, p3, p4) = (s1.p1, s1.p2, s2.p1, s2.p2);
    ranges_overlap(p1.x, p2.x, p3.x, p4.x)
        && ranges_overlap(p1.y, p2.y, p3.y, p4.y)
        && signed_area(p1, p2, p3) * signed_area(p1, p2, p4) <= 0.
        && signed_area(p3, p4, p1) * signed_area(p3, p4, p2) <= 0.
}

/// Returns the point of `seg` closest to `pt`.
///
/// The projection of `pt` onto the supporting line is clamped to the segment.
/// A segment shorter than 1e-9 m returns its first endpoint.
pub fn nearest_point_on_segment(pt: Point, seg: &Segment) -> Point {
    if seg.length() < MIN_SEGMENT_LENGTH {
        return seg.p1;
    }

    let dx = seg.p2.x - seg.p1.x;
    let dy = seg.p2.y - seg.p1.y;
    let len_sq = dx * dx + dy * dy;
    let t = ((pt.x - seg.p1.x) * dx + (pt.y - seg.p1.y) * dy) / len_sq;
    let t = t.clamp(0., 1.);

    Point::new(seg.p1.x + t * dx, seg.p1.y + t * dy)
}
