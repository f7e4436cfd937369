use crate::{Point2D, Ring, primitives::signed_area};

/// Where an output vertex came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexSource {
    /// 0 for the outer ring, `i + 1` for inner ring `i`
    pub ring: usize,
    /// Index of the vertex within that input ring
    pub index: usize,
}

/// A hole-free, counter-clockwise polygon produced by decomposition.
///
/// Points are in the caller's original coordinates. A vertex where a bridge
/// meets a ring can occur twice, once for each side of the bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePolygon {
    points: Vec<Point2D>,
    sources: Vec<VertexSource>,
}

impl SimplePolygon {
    pub(crate) fn new(points: Vec<Point2D>, sources: Vec<VertexSource>) -> Self {
        debug_assert_eq!(points.len(), sources.len());
        Self { points, sources }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// The input vertex each point was taken from, parallel to [SimplePolygon::points]
    pub fn sources(&self) -> &[VertexSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Positive shoelace area
    pub fn area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// The edges `(a, b)` of the ring, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item=(Point2D, Point2D)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

impl Ring for SimplePolygon {
    type Vertex = Point2D;

    fn vertices(&self) -> &[Point2D] {
        &self.points
    }
}
