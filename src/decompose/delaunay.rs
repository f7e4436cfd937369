use std::collections::{BTreeMap, BTreeSet};

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use zot::Zot;

use crate::{BoundingBox2D, Point2D, errors::DecompositionError, math::approx_eq, primitives::orientation};

use super::state::DecompositionState;

/// Fixed seed of the insertion order shuffle, so results are reproducible
const INSERTION_SEED: u64 = 0x5eed_0f_de1a_0a1e;

impl<'a> DecompositionState<'a> {
    /// Bridge holes along the Delaunay graph of their centroids.
    ///
    /// Candidate ring pairs are the Delaunay edges between holes plus every hull
    /// hole paired with the outer ring; each gets the shortest valid bridge between
    /// the two rings, nearest pairs first. A connectivity pass then pins bridges
    /// for any hole still disconnected, and the result is deduplicated and refined.
    pub fn decompose_delaunay(&mut self) -> Result<(), DecompositionError> {
        let holes: Vec<usize> = (1..self.topo.polygons.len()).collect();
        if holes.is_empty() {
            return Ok(());
        }

        let centroids: Vec<Point2D> = holes.iter().map(|&h| self.topo.polygons[h].centroid).collect();
        let mut pairs: Vec<(usize, usize, f64)> = Vec::new();
        for (i, j) in delaunay_edges(&centroids) {
            pairs.push((holes[i], holes[j], centroids[i].distance(centroids[j])));
        }
        for i in convex_hull(&centroids) {
            pairs.push((holes[i], 0, self.outer_distance(centroids[i])));
        }
        pairs.sort_by(|a, b| a.2.total_cmp(&b.2).then(a.0.cmp(&b.0)).then(a.1.cmp(&b.1)));

        for (a, b, _) in pairs {
            self.check_cancel()?;
            if let Some((p, q, _)) = self.nearest_pair(a, b) {
                self.add_bridge(p, q, false)?;
            }
        }

        #[cfg(feature = "debugging")]
        self.advance_step();

        for hole in self.topo.holes_by_leftmost() {
            if !self.topo.is_connected(hole) {
                self.connect_ring(hole, true)?;
            }
        }

        #[cfg(feature = "debugging")]
        self.advance_step();

        self.dedupe_bridges()?;
        self.refine_bridges()?;

        #[cfg(feature = "debugging")]
        {
            self.output_svg(crate::debug::svg::SvgDecompositionStyle::active_only(), crate::debug::svg::SvgOutputLevel::MajorSteps);
            self.advance_step();
        }

        Ok(())
    }

    /// Distance from `p` to the closest outer ring edge
    fn outer_distance(&self, p: Point2D) -> f64 {
        let topo = &self.topo;
        topo.polygons[0].edges_tree
            .nearest_segment(p, f64::INFINITY, |e| Some((topo.points[e], topo.points[topo.next(e)])))
            .map_or(f64::INFINITY, |n| n.distance)
    }

    /// Per ring pair keep the shortest bridge and a second one only if it is equally long.
    /// Pinned bridges are always kept.
    pub(crate) fn dedupe_bridges(&mut self) -> Result<(), DecompositionError> {
        let mut by_pair: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
        for (id, e) in self.splits.active() {
            by_pair.entry(e.ring_pair()).or_default().push(id);
        }

        let mut excluded = Vec::new();
        for ids in by_pair.values_mut() {
            let splits = &self.splits;
            ids.sort_by(|&a, &b| splits.get(a).length.total_cmp(&splits.get(b).length).then(a.cmp(&b)));

            let mut kept = Zot::Zero;
            for &id in ids.iter() {
                let e = splits.get(id);
                kept = match kept {
                    Zot::Zero => Zot::One(id),
                    Zot::One(first) if approx_eq(e.length, splits.get(first).length) => Zot::Two(first, id),
                    other => {
                        if !e.pinned {
                            excluded.push(id);
                        }
                        other
                    }
                };
            }
        }

        for id in excluded {
            self.exclude_bridge(id)?;
        }
        Ok(())
    }

    /// Re-search every unpinned bridge with itself disabled and keep a strictly shorter replacement
    pub(crate) fn refine_bridges(&mut self) -> Result<(), DecompositionError> {
        let candidates: Vec<usize> = self.splits.active().filter(|(_, e)| !e.pinned).map(|(id, _)| id).collect();
        for id in candidates {
            self.check_cancel()?;
            let edge = *self.splits.get(id);
            if edge.excluded {
                continue;
            }
            let (p, q) = (edge.from.point_id, edge.to.point_id);

            self.exclude_bridge(id)?;
            self.topo.release_used(p, q);

            match self.nearest_pair(edge.from.polygon_id, edge.to.polygon_id) {
                Some((np, nq, length)) if length < edge.length && !approx_eq(length, edge.length) => {
                    self.add_bridge(np, nq, false)?;
                }
                _ => {
                    self.include_bridge(id)?;
                    self.topo.mark_used(p, q);
                }
            }
        }
        Ok(())
    }
}

struct Circumcircle {
    triangle: [usize; 3],
    center: Point2D,
    radius_squared: f64,
}

impl Circumcircle {
    fn new(points: &[Point2D], triangle: [usize; 3]) -> Self {
        let a = points[triangle[0]];
        let b = points[triangle[1]] - a;
        let c = points[triangle[2]] - a;
        let d = 2.0 * b.cross(c);
        if d == 0.0 {
            // Collinear: contains everything, so the next insertion replaces it
            return Self { triangle, center: a, radius_squared: f64::INFINITY };
        }
        let (bl, cl) = (b.length_squared(), c.length_squared());
        let offset = Point2D::new((c.y * bl - b.y * cl) / d, (b.x * cl - c.x * bl) / d);
        Self {
            triangle,
            center: a + offset,
            radius_squared: offset.length_squared(),
        }
    }

    #[inline]
    fn contains(&self, p: Point2D) -> bool {
        self.center.distance_squared(p) < self.radius_squared
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.triangle;
        [(a, b), (b, c), (c, a)]
    }
}

/// Edges `(i, j)`, `i < j`, of the Delaunay triangulation of `points` (Bowyer-Watson).
///
/// Exactly coincident points are joined to their first occurrence instead of being inserted.
pub(crate) fn delaunay_edges(points: &[Point2D]) -> Vec<(usize, usize)> {
    let mut edges = BTreeSet::new();

    let mut unique: Vec<usize> = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        match unique.iter().find(|&&u| points[u].exact_eq(p)) {
            Some(&u) => {
                edges.insert((u, i));
            }
            None => unique.push(i),
        }
    }

    if unique.len() >= 2 {
        let n = points.len();
        let bbox = BoundingBox2D::from_points(unique.iter().map(|&i| points[i]));
        let size = bbox.width().max(bbox.height()).max(1.0);
        let c = bbox.center();

        let mut vertices = points.to_vec();
        vertices.push(c + Point2D::new(-20.0 * size, -size));
        vertices.push(c + Point2D::new(0.0, 20.0 * size));
        vertices.push(c + Point2D::new(20.0 * size, -size));

        let mut triangles = vec![Circumcircle::new(&vertices, [n, n + 1, n + 2])];
        let mut order = unique;
        order.shuffle(&mut StdRng::seed_from_u64(INSERTION_SEED));

        for i in order {
            let p = vertices[i];
            let mut boundary: Vec<(usize, usize)> = Vec::new();
            triangles.retain(|t| {
                if !t.contains(p) {
                    return true;
                }
                for (a, b) in t.edges() {
                    match boundary.iter().position(|&(x, y)| (x == b && y == a) || (x == a && y == b)) {
                        Some(pos) => {
                            boundary.swap_remove(pos);
                        }
                        None => boundary.push((a, b)),
                    }
                }
                false
            });
            for (a, b) in boundary {
                triangles.push(Circumcircle::new(&vertices, [a, b, i]));
            }
        }

        for t in &triangles {
            for (a, b) in t.edges() {
                if a < n && b < n {
                    edges.insert(if a < b { (a, b) } else { (b, a) });
                }
            }
        }
    }

    edges.into_iter().collect()
}

/// Indices of the convex hull of `points` (monotone chain), counter-clockwise, without collinear points
pub(crate) fn convex_hull(points: &[Point2D]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[a].x.total_cmp(&points[b].x).then(points[a].y.total_cmp(&points[b].y)).then(a.cmp(&b)));
    order.dedup_by(|a, b| points[*a].exact_eq(&points[*b]));
    if order.len() < 3 {
        return order;
    }

    let mut hull: Vec<usize> = Vec::with_capacity(order.len() * 2);
    for pass in 0..2 {
        let start = hull.len();
        let iter: Box<dyn Iterator<Item=&usize>> = if pass == 0 { Box::new(order.iter()) } else { Box::new(order.iter().rev()) };
        for &i in iter {
            while hull.len() >= start + 2 && orientation(points[hull[hull.len() - 2]], points[hull[hull.len() - 1]], points[i]) <= 0.0 {
                hull.pop();
            }
            hull.push(i);
        }
        // The last point of each chain starts the other one
        hull.pop();
    }
    hull
}
