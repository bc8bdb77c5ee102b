use crate::EvacError;
use crate::Point;
use crate::geom::EPS;
use crate::geom::point::signed_area;
use anyhow::Result;

/// Type for holding vertex indices for a triangle.
///
/// Vertices are always ordered counter-clockwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangleIndex(pub usize, pub usize, pub usize);

/// Triangulates a simple polygon with the ear-clipping algorithm.
///
/// The polygon may be given clockwise or counter-clockwise, the returned
/// triangles are counter-clockwise. Collinear vertices are dropped
/// (they would only produce zero-area triangles).
pub fn triangulate(pts: &[Point]) -> Result<Vec<TriangleIndex>> {
    let n = pts.len();
    if n < 3 {
        return Err(EvacError::geometry(format!(
            "Polygon needs at least 3 points, got {n}"
        )));
    }

    let doubled_area = ring_signed_area(pts);
    if doubled_area.abs() < EPS {
        return Err(EvacError::geometry("Polygon has zero area"));
    }

    // Walk the ring counter-clockwise
    let mut ring: Vec<usize> = if doubled_area > 0. {
        (0..n).collect()
    } else {
        (0..n).rev().collect()
    };
    let mut triangles: Vec<TriangleIndex> = Vec::with_capacity(n - 2);
    let mut pos: usize = 0;
    let mut num_fail: usize = 0;

    while ring.len() > 3 {
        let m = ring.len();
        if num_fail >= m {
            // A full pass without an ear, only a collinear vertex can unblock it
            let collinear = (0..m).find(|&k| {
                let (prev, curr, next) = corner(&ring, k);
                signed_area(pts[prev], pts[curr], pts[next]).abs() < EPS
            });
            match collinear {
                Some(k) => {
                    ring.remove(k);
                    num_fail = 0;
                    continue;
                }
                None => return Err(EvacError::geometry("Ear-clipping algorithm failed")),
            }
        }

        pos %= m;
        let (prev, curr, next) = corner(&ring, pos);
        if is_ear(pts, &ring, prev, curr, next) {
            triangles.push(TriangleIndex(prev, curr, next));
            ring.remove(pos);
            num_fail = 0;
        } else {
            pos += 1;
            num_fail += 1;
        }
    }

    let (a, b, c) = (ring[0], ring[1], ring[2]);
    if signed_area(pts[a], pts[b], pts[c]) > EPS {
        triangles.push(TriangleIndex(a, b, c));
    }

    Ok(triangles)
}

/// Area of a triangle from its side lengths (Heron's formula).
pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    let ab = a.distance(&b);
    let bc = b.distance(&c);
    let ca = c.distance(&a);
    let p = (ab + bc + ca) * 0.5;
    // Rounding can push the product slightly below zero for slivers
    (p * (p - ab) * (p - bc) * (p - ca)).max(0.).sqrt()
}

/// Tests if point `ptest` is inside the counter-clockwise triangle `(p1, p2, p3)`.
///
/// The point is inside if it is not to the right of any of the three
/// oriented edges. Points on the edges are inside.
pub fn is_point_inside_triangle(ptest: Point, p1: Point, p2: Point, p3: Point) -> bool {
    where_point(p1, p2, ptest) >= 0
        && where_point(p2, p3, ptest) >= 0
        && where_point(p3, p1, ptest) >= 0
}

/// 1 if `p` is left of `a->b`, -1 if right, 0 if on the line.
fn where_point(a: Point, b: Point, p: Point) -> i8 {
    let s = signed_area(a, b, p);
    if s > EPS {
        1
    } else if s < -EPS {
        -1
    } else {
        0
    }
}

/// Twice the signed area of a polygon ring (shoelace formula).
fn ring_signed_area(pts: &[Point]) -> f64 {
    let n = pts.len();
    (0..n)
        .map(|i| {
            let (a, b) = (pts[i], pts[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

fn corner(ring: &[usize], pos: usize) -> (usize, usize, usize) {
    let m = ring.len();
    (ring[(pos + m - 1) % m], ring[pos], ring[(pos + 1) % m])
}

fn is_ear(pts: &[Point], ring: &[usize], prev: usize, curr: usize, next: usize) -> bool {
    if signed_area(pts[prev], pts[curr], pts[next]) <= EPS {
        return false; // Reflex or collinear corner
    }
    // No other vertex may lie within the candidate ear (needed for non-convex polygons)
    ring.iter()
        .filter(|&&i| i != prev && i != curr && i != next)
        .map(|&i| pts[i])
        .filter(|p| !p.is_close(&pts[prev]) && !p.is_close(&pts[curr]) && !p.is_close(&pts[next]))
        .all(|p| !is_point_inside_triangle(p, pts[prev], pts[curr], pts[next]))
}
