use crate::Point;
use crate::geom::segment::Segment;
use crate::geom::triangles::{
    TriangleIndex, is_point_inside_triangle, triangle_area, triangulate,
};
use anyhow::Result;
use std::fmt;

/// Closed polygon ring on the floor plane.
///
/// The triangulation is computed once on construction and reused by
/// `area()` and `contains()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pts: Vec<Point>,
    tri: Vec<TriangleIndex>,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    ///
    /// A trailing point equal to the first one (explicitly closed ring) is dropped.
    /// Fails if fewer than 3 vertices remain or the ring has zero area.
    pub fn new(mut pts: Vec<Point>) -> Result<Self> {
        if pts.len() > 3
            && let (Some(first), Some(last)) = (pts.first(), pts.last())
            && first.is_close(last)
        {
            pts.pop();
        }
        let tri = triangulate(&pts)?;
        Ok(Self { pts, tri })
    }

    pub fn points(&self) -> &[Point] {
        &self.pts
    }

    /// Boundary edges, the last one closes the ring.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.pts.len();
        (0..n).map(move |i| Segment::new(self.pts[i], self.pts[(i + 1) % n]))
    }

    /// Area as the sum of the triangle areas.
    pub fn area(&self) -> f64 {
        self.tri
            .iter()
            .map(|t| triangle_area(self.pts[t.0], self.pts[t.1], self.pts[t.2]))
            .sum()
    }

    /// Checks if a point lies inside the polygon or on its boundary.
    pub fn contains(&self, ptest: Point) -> bool {
        self.tri.iter().any(|t| {
            is_point_inside_triangle(ptest, self.pts[t.0], self.pts[t.1], self.pts[t.2])
        })
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon(")?;
        for (i, p) in self.pts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt::Display::fmt(p, f)?;
        }
        write!(f, ")")
    }
}
