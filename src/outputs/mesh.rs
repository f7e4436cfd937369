use std::fmt;

use crate::{Fan, Fans, Point2D, primitives::triangle_area};

/// A triangle mesh: a point buffer plus faces of three point indices each.
///
/// Faces produced by the triangulation engine are counter-clockwise.
#[derive(Clone, Default)]
pub struct TriangleMesh {
    points: Vec<Point2D>,
    faces: Vec<[usize; 3]>,
    valid: bool,
}

impl fmt::Debug for TriangleMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriangleMesh")
            .field("points", &self.points.len())
            .field("faces", &self.faces)
            .field("valid", &self.valid)
            .finish()
    }
}

impl TriangleMesh {
    /// A mesh over `points` without any faces yet. It is not valid until [TriangleMesh::init_faces] succeeds.
    pub fn new(points: Vec<Point2D>) -> Self {
        Self {
            points,
            faces: Vec::new(),
            valid: false,
        }
    }

    /// Replace the faces of the mesh.
    ///
    /// The mesh is marked valid only if every face index is in range and every
    /// point is referenced by at least one face. Returns the new validity.
    pub fn init_faces(&mut self, faces: Vec<[usize; 3]>) -> bool {
        let mut referenced = vec![false; self.points.len()];
        let mut in_range = true;
        for face in &faces {
            for &i in face {
                match referenced.get_mut(i) {
                    Some(r) => *r = true,
                    None => in_range = false,
                }
            }
        }
        self.faces = faces;
        self.valid = in_range && !self.faces.is_empty() && referenced.iter().all(|r| *r);
        self.valid
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// The number of faces
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The corner points of every face. Only meaningful for a valid mesh.
    pub fn triangles(&self) -> impl Iterator<Item=[Point2D; 3]> + '_ {
        self.faces.iter().map(move |[a, b, c]| [self.points[*a], self.points[*b], self.points[*c]])
    }

    /// Sum of the (unsigned) face areas
    pub fn area(&self) -> f64 {
        self.triangles().map(|[a, b, c]| triangle_area(a, b, c).abs()).sum()
    }

    /// Emit the faces as triangle fans of point indices.
    ///
    /// A face `[a, c, d]` following a face `[a, b, c]` extends that fan instead of
    /// starting a new one. Nothing is written for an invalid mesh; returns whether anything was.
    pub fn write_fans<FS: Fans>(&self, mut fans: FS) -> bool
    where FS::Fan: Fan<usize> {
        if !self.valid {
            return false;
        }

        let mut current: Option<(FS::Fan, usize, usize)> = None;
        for &[a, b, c] in &self.faces {
            current = match current.take() {
                Some((mut fan, apex, last)) if apex == a && last == b => {
                    fan.push(c);
                    Some((fan, apex, c))
                }
                Some((fan, _, _)) => {
                    fans.push(fan);
                    Some((FS::Fan::new(a, b, c), a, c))
                }
                None => Some((FS::Fan::new(a, b, c), a, c)),
            };
        }
        if let Some((fan, _, _)) = current {
            fans.push(fan);
        }
        true
    }
}
