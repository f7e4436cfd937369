//! Decomposition of a polygon with holes into hole-free polygons.
//!
//! Holes are connected to the outer ring (and to each other) by bridges, straight
//! segments between ring vertices that stay inside the polygon and touch no other
//! edge. The faces of the resulting planar graph are the output polygons.

mod basic;
mod crossing;
mod delaunay;
mod graph;
mod state;
mod topology;

#[cfg(test)]
pub(crate) use delaunay::{convex_hull, delaunay_edges};
#[cfg(test)]
pub(crate) use state::DecompositionState;
#[cfg(test)]
pub(crate) use topology::Topology;

use std::ops::Range;

use crate::{BoundingBox2D, Point2D, Ring, Settings, SimplePolygon, VertexSource, errors::{DecompositionError, InternalError}, inputs::ring_points, precision::PrecisionAdjuster, primitives::signed_area};

#[cfg(not(test))]
use state::DecompositionState;
#[cfg(not(test))]
use topology::Topology;

/// How holes are bridged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One chain of bridges per hole, found by scanning outward from the hole.
    /// Produces few, large polygons.
    ///
    /// Each hole gets a single bridge, so its polygon runs through the bridge twice
    /// (keyhole). The same input can therefore yield a different number of
    /// polygons, and different vertex sequences, than [Strategy::Delaunay]. Nothing
    /// reports where the two strategies disagree.
    Basic,
    /// Bridges along the Delaunay graph of the hole centroids, deduplicated and
    /// refined. Produces more, compact polygons.
    Delaunay,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Delaunay
    }
}

/// Configurable entry point of the decomposition engine
#[derive(Debug, Clone, Default)]
pub struct Decomposer {
    strategy: Strategy,
    coord_shift: f64,
    settings: Settings,
}

impl Decomposer {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            coord_shift: 0.0,
            settings: Settings::default(),
        }
    }

    /// Rounding quantum of the input coordinates. Zero or negative picks the grid automatically.
    pub fn coord_shift(mut self, coord_shift: f64) -> Self {
        self.coord_shift = coord_shift;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Decompose the polygon bounded by `outer` with holes `inner` into hole-free polygons.
    ///
    /// The output polygons are counter-clockwise, in input coordinates, and their
    /// areas sum to the outer area minus the hole areas. Holes must lie strictly
    /// inside the outer ring and must not overlap each other.
    pub fn decompose<R: Ring + ?Sized, H: Ring>(&self, outer: &R, inner: &[H]) -> Result<Vec<SimplePolygon>, DecompositionError> {
        let mut rings = Vec::with_capacity(inner.len() + 1);
        rings.push(PreparedRing::new(outer, 0)?);
        for (i, hole) in inner.iter().enumerate() {
            rings.push(PreparedRing::new(hole, i + 1)?);
        }

        let mut bbox = BoundingBox2D::empty();
        for ring in &rings {
            for p in &ring.points {
                bbox.append(*p);
            }
        }
        let adjuster = PrecisionAdjuster::new(&bbox, self.settings.significant_digits, self.coord_shift);

        let mut adjusted = Vec::new();
        let mut originals = Vec::new();
        let mut sources = Vec::new();
        let mut ranges: Vec<Range<usize>> = Vec::with_capacity(rings.len());
        for ring in &rings {
            let start = adjusted.len();
            for (i, p) in ring.points.iter().enumerate() {
                let q = adjuster.adjust(*p);
                if adjusted.len() > start && q.exact_eq(&adjusted[adjusted.len() - 1]) {
                    continue;
                }
                adjusted.try_reserve(1)?;
                adjusted.push(q);
                originals.push(*p);
                sources.push(VertexSource { ring: ring.id, index: ring.indices[i] });
            }
            while adjusted.len() > start + 1 && adjusted[start].exact_eq(&adjusted[adjusted.len() - 1]) {
                adjusted.pop();
                originals.pop();
                sources.pop();
            }

            let count = adjusted.len() - start;
            if count < 3 {
                return Err(DecompositionError::NotEnoughVertices { ring: ring.id, vertices: count });
            }
            let area = signed_area(&adjusted[start..]);
            let expected_ccw = ring.id == 0;
            if area == 0.0 || (area > 0.0) != expected_ccw {
                return Err(DecompositionError::DegenerateRing { ring: ring.id });
            }
            ranges.push(start..adjusted.len());
        }

        let net_area = rings[0].area.abs() - rings[1..].iter().map(|r| r.area.abs()).sum::<f64>();

        let topo = Topology::new(&adjusted, &ranges, self.settings.leaf_size)?;
        let mut state = DecompositionState::new(topo, &self.settings);

        #[cfg(feature = "debugging")]
        state.advance_step();

        match self.strategy {
            Strategy::Basic => state.decompose_basic()?,
            Strategy::Delaunay => state.decompose_delaunay()?,
        }
        state.check_cancel()?;

        let faces = graph::trace_faces(&state.topo, &state.splits)?;

        #[cfg(feature = "debugging")]
        state.output_faces(&faces);

        let mut polygons = Vec::with_capacity(faces.len());
        let mut total = 0.0;
        for face in faces {
            let points: Vec<Point2D> = face.iter().map(|&p| originals[p]).collect();
            let face_sources = face.iter().map(|&p| sources[p]).collect();
            let polygon = SimplePolygon::new(points, face_sources);
            total += polygon.area();
            polygons.push(polygon);
        }

        if (total - net_area).abs() > self.settings.area_tolerance * net_area.abs().max(1.0) {
            return Err(DecompositionError::AreaMismatch { expected: net_area, actual: total });
        }
        if polygons.is_empty() {
            return Err(InternalError::new("Decomposition produced no polygons").into());
        }

        Ok(polygons)
    }
}

/// Decompose a polygon with holes with default [Settings].
///
/// See [Decomposer::decompose].
pub fn decompose_polygon<R: Ring + ?Sized, H: Ring>(outer: &R, inner: &[H], strategy: Strategy, coord_shift: f64) -> Result<Vec<SimplePolygon>, DecompositionError> {
    Decomposer::new(strategy).coord_shift(coord_shift).decompose(outer, inner)
}

/// An input ring with its closing vertex removed, oriented with the polygon interior on its left
struct PreparedRing {
    id: usize,
    points: Vec<Point2D>,
    /// Input index of every point
    indices: Vec<usize>,
    area: f64,
}

impl PreparedRing {
    fn new<R: Ring + ?Sized>(ring: &R, id: usize) -> Result<Self, DecompositionError> {
        let (mut points, mut indices) = ring_points(ring);
        if points.iter().any(|p| !p.is_finite()) {
            return Err(DecompositionError::DegenerateRing { ring: id });
        }
        if points.len() < 3 {
            return Err(DecompositionError::NotEnoughVertices { ring: id, vertices: points.len() });
        }

        let area = signed_area(&points);
        if area == 0.0 {
            return Err(DecompositionError::DegenerateRing { ring: id });
        }
        // Outer ring counter-clockwise, holes clockwise
        if (area > 0.0) != (id == 0) {
            points.reverse();
            indices.reverse();
        }

        Ok(Self { id, points, indices, area })
    }
}
