use crate::{Point2D, TriangleMesh, Vertex, errors::TriangulationError};

/// A closed polygon boundary.
///
/// The closing edge from the last vertex back to the first is implicit; a
/// repeated first vertex at the end is tolerated and ignored. Rings may be
/// wound in either direction.
pub trait Ring {
    /// The type of the ring's vertices
    type Vertex: Vertex;

    /// The vertices in boundary order
    fn vertices(&self) -> &[Self::Vertex];

    /// Triangulate this ring by ear clipping with default [Settings](crate::Settings)
    fn triangulate(&self) -> Result<TriangleMesh, TriangulationError> {
        crate::triangulate(self)
    }
}

impl<V: Vertex> Ring for [V] {
    type Vertex = V;

    fn vertices(&self) -> &[V] {
        self
    }
}

impl<V: Vertex> Ring for Vec<V> {
    type Vertex = V;

    fn vertices(&self) -> &[V] {
        self.as_slice()
    }
}

impl<V: Vertex, const N: usize> Ring for [V; N] {
    type Vertex = V;

    fn vertices(&self) -> &[V] {
        &self[..]
    }
}

/// The ring's points with the closing duplicate and consecutive exact duplicates removed,
/// along with the input index of every kept point
pub(crate) fn ring_points<R: Ring + ?Sized>(ring: &R) -> (Vec<Point2D>, Vec<usize>) {
    let vertices = ring.vertices();
    let mut points: Vec<Point2D> = Vec::with_capacity(vertices.len());
    let mut indices = Vec::with_capacity(vertices.len());
    for (i, v) in vertices.iter().enumerate() {
        let p = v.to_point();
        if points.last().map_or(true, |last| !last.exact_eq(&p)) {
            points.push(p);
            indices.push(i);
        }
    }
    while points.len() > 1 && points[0].exact_eq(&points[points.len() - 1]) {
        points.pop();
        indices.pop();
    }
    (points, indices)
}
