//! Line, segment and triangle predicates.
//!
//! All predicates are built on the sign of [orientation]. They are exact as long
//! as the coordinates are integer valued and their differences stay below
//! 2^26, which is what [crate::precision::PrecisionAdjuster] guarantees for
//! the engines; for arbitrary input they are ordinary floating point tests.

use super::{BoundingBox2D, Point2D};

/// Turn direction of three points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Twice the signed area of triangle `abc`; positive when `abc` is counter-clockwise
#[inline(always)]
pub fn orientation(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    (b - a).cross(c - a)
}

#[inline]
pub fn orient(a: Point2D, b: Point2D, c: Point2D) -> Orientation {
    let o = orientation(a, b, c);
    if o > 0.0 {
        Orientation::CounterClockwise
    } else if o < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Is `p`, already known to be collinear with `ab`, within the segment's bounds?
#[inline]
fn within_bounds(p: Point2D, a: Point2D, b: Point2D) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Does `p` lie on the closed segment `ab`?
pub fn on_segment(p: Point2D, a: Point2D, b: Point2D) -> bool {
    orientation(a, b, p) == 0.0 && within_bounds(p, a, b)
}

/// Do the closed segments `ab` and `cd` share at least one point (touching counts)?
pub fn segments_intersect(a: Point2D, b: Point2D, c: Point2D, d: Point2D) -> bool {
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);

    if o1 != o2 && o3 != o4 && o1 != Orientation::Collinear && o2 != Orientation::Collinear
        && o3 != Orientation::Collinear && o4 != Orientation::Collinear {
        return true;
    }

    (o1 == Orientation::Collinear && within_bounds(c, a, b))
        || (o2 == Orientation::Collinear && within_bounds(d, a, b))
        || (o3 == Orientation::Collinear && within_bounds(a, c, d))
        || (o4 == Orientation::Collinear && within_bounds(b, c, d))
}

/// Do the interiors of `ab` and `cd` cross in exactly one point, with no endpoint touching the other segment?
pub fn segments_cross(a: Point2D, b: Point2D, c: Point2D, d: Point2D) -> bool {
    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);
    ((o1 > 0.0 && o2 < 0.0) || (o1 < 0.0 && o2 > 0.0))
        && ((o3 > 0.0 && o4 < 0.0) || (o3 < 0.0 && o4 > 0.0))
}

/// Are `ab` and `cd` collinear and overlapping along a stretch of positive length?
pub fn segments_overlap(a: Point2D, b: Point2D, c: Point2D, d: Point2D) -> bool {
    if orientation(a, b, c) != 0.0 || orientation(a, b, d) != 0.0 {
        return false;
    }
    // Project onto the dominant axis of ab
    let axis = if (b.x - a.x).abs() >= (b.y - a.y).abs() { 0 } else { 1 };
    let (a0, a1) = minmax(a.axis(axis), b.axis(axis));
    let (c0, c1) = minmax(c.axis(axis), d.axis(axis));
    a0.max(c0) < a1.min(c1)
}

#[inline]
fn minmax(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Separating axis test between the closed segment `ab` and a box.
///
/// The candidate axes are the two box axes and the segment normal; the
/// segment is projected as its half extents around its midpoint.
pub fn segment_overlaps_box(a: Point2D, b: Point2D, bbox: &BoundingBox2D) -> bool {
    if bbox.is_empty() {
        return false;
    }
    let c = bbox.center();
    let h = Point2D::new(bbox.width() * 0.5, bbox.height() * 0.5);
    let m = (a + b) * 0.5;
    let d = (b - a) * 0.5;
    let t = m - c;

    if t.x.abs() > h.x + d.x.abs() {
        return false;
    }
    if t.y.abs() > h.y + d.y.abs() {
        return false;
    }
    // Normal axis (-d.y, d.x)
    d.cross(t).abs() <= h.x * d.y.abs() + h.y * d.x.abs()
}

/// Inclusive point-in-triangle test; works for either winding of `abc`
pub fn point_in_triangle(p: Point2D, a: Point2D, b: Point2D, c: Point2D) -> bool {
    let o1 = orientation(a, b, p);
    let o2 = orientation(b, c, p);
    let o3 = orientation(c, a, p);
    let has_neg = o1 < 0.0 || o2 < 0.0 || o3 < 0.0;
    let has_pos = o1 > 0.0 || o2 > 0.0 || o3 > 0.0;
    !(has_neg && has_pos)
}

/// Squared distance from `p` to the closed segment `ab`
pub fn point_segment_distance_squared(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

/// Is direction `d` strictly inside the interior wedge at vertex `p` of a ring,
/// where `prev -> p -> next` is the ring order and the interior lies on the left?
///
/// Directions along either ring edge are not inside.
pub fn in_interior_wedge(prev: Point2D, p: Point2D, next: Point2D, d: Point2D) -> bool {
    let incoming = p - prev;
    let outgoing = next - p;
    let left_of_in = incoming.cross(d) > 0.0;
    let left_of_out = outgoing.cross(d) > 0.0;
    let turn = incoming.cross(outgoing);
    if turn > 0.0 {
        left_of_in && left_of_out
    } else if turn < 0.0 {
        left_of_in || left_of_out
    } else if incoming.dot(outgoing) > 0.0 {
        // Straight through
        left_of_out
    } else {
        // Spike: the ring doubles back on itself, there is no interior here
        false
    }
}
