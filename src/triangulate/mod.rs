//! Ear clipping triangulation of simple polygons

mod ear;

use crate::{BoundingBox2D, Ring, Settings, TriangleMesh, errors::{InternalError, TriangulationError}, inputs::ring_points, precision::PrecisionAdjuster, primitives::signed_area};

use ear::EarClipper;

/// Configurable entry point of the triangulation engine
#[derive(Debug, Clone, Default)]
pub struct Triangulator {
    settings: Settings,
}

impl Triangulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Triangulate a simple polygon.
    ///
    /// The mesh's points are the ring's vertices in input order, without the
    /// closing duplicate and without consecutive repeats; for a clean ring that
    /// is exactly the input. Faces are counter-clockwise whatever the input winding.
    pub fn triangulate<R: Ring + ?Sized>(&self, ring: &R) -> Result<TriangleMesh, TriangulationError> {
        let (points, _) = ring_points(ring);
        if points.iter().any(|p| !p.is_finite()) {
            return Err(TriangulationError::DegenerateRing);
        }
        if points.len() < 3 {
            return Err(TriangulationError::NotEnoughVertices(points.len()));
        }

        let adjuster = PrecisionAdjuster::new(&BoundingBox2D::from_points(points.iter().copied()), self.settings.significant_digits, 0.0);
        let mut adjusted = Vec::new();
        adjusted.try_reserve_exact(points.len())?;
        adjusted.extend(points.iter().map(|p| adjuster.adjust(*p)));

        let area = signed_area(&adjusted);
        if area == 0.0 {
            return Err(TriangulationError::DegenerateRing);
        }

        let faces = EarClipper::new(&adjusted, area > 0.0, &self.settings)?.run(&self.settings)?;

        let mut mesh = TriangleMesh::new(points);
        if !mesh.init_faces(faces) {
            return Err(InternalError::new("Ear clipping left vertices unreferenced").into());
        }
        Ok(mesh)
    }
}

/// Triangulate a simple polygon with default [Settings].
///
/// See [Triangulator::triangulate].
pub fn triangulate<R: Ring + ?Sized>(ring: &R) -> Result<TriangleMesh, TriangulationError> {
    Triangulator::new().triangulate(ring)
}
