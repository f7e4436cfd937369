use crate::{BvhTree, Point2D, errors::TreeBuildError, primitives::{in_interior_wedge, segment_overlaps_box, segments_intersect, segments_overlap}};

use super::topology::{SplitEdge, Topology};

/// The split edges of one request plus a lazily rebuilt spatial index over them.
///
/// The index covers the edges that were active at the last rebuild. Edges added
/// or re-enabled since then are kept in `pending` and scanned linearly; edges
/// excluded since then stay in the index and are filtered at query time. Once
/// `pending` plus the stale index entries exceed the threshold the index is rebuilt.
pub(crate) struct SplitEdges {
    edges: Vec<SplitEdge>,
    index: BvhTree,
    in_index: Vec<bool>,
    pending: Vec<usize>,
    stale: usize,
    threshold: usize,
    rebuilds: usize,
}

impl SplitEdges {
    pub fn new(leaf_size: usize, threshold: usize) -> Self {
        Self {
            edges: Vec::new(),
            index: BvhTree::with_leaf_size(leaf_size),
            in_index: Vec::new(),
            pending: Vec::new(),
            stale: 0,
            threshold,
            rebuilds: 0,
        }
    }

    pub fn edges(&self) -> &[SplitEdge] {
        &self.edges
    }

    #[inline]
    pub fn get(&self, id: usize) -> &SplitEdge {
        &self.edges[id]
    }

    /// Ids and edges not excluded
    pub fn active(&self) -> impl Iterator<Item=(usize, &SplitEdge)> + '_ {
        self.edges.iter().enumerate().filter(|(_, e)| !e.excluded)
    }

    /// How often the index was rebuilt
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    #[cfg(feature = "debugging")]
    pub(crate) fn index(&self) -> &BvhTree {
        &self.index
    }

    pub fn push(&mut self, points: &[Point2D], edge: SplitEdge) -> Result<usize, TreeBuildError> {
        self.edges.try_reserve(1)?;
        self.in_index.try_reserve(1)?;
        self.pending.try_reserve(1)?;
        let id = self.edges.len();
        self.edges.push(edge);
        self.in_index.push(false);
        if !edge.excluded {
            self.pending.push(id);
        }
        self.maybe_rebuild(points)?;
        Ok(id)
    }

    pub fn exclude(&mut self, points: &[Point2D], id: usize) -> Result<(), TreeBuildError> {
        if self.edges[id].excluded {
            return Ok(());
        }
        self.edges[id].excluded = true;
        if self.in_index[id] {
            self.stale += 1;
        } else {
            self.pending.retain(|&pi| pi != id);
        }
        self.maybe_rebuild(points)
    }

    pub fn include(&mut self, points: &[Point2D], id: usize) -> Result<(), TreeBuildError> {
        if !self.edges[id].excluded {
            return Ok(());
        }
        self.edges[id].excluded = false;
        if self.in_index[id] {
            self.stale -= 1;
        } else {
            self.pending.try_reserve(1)?;
            self.pending.push(id);
        }
        self.maybe_rebuild(points)
    }

    fn maybe_rebuild(&mut self, points: &[Point2D]) -> Result<(), TreeBuildError> {
        if self.pending.len() + self.stale <= self.threshold {
            return Ok(());
        }

        self.in_index.iter_mut().for_each(|i| *i = false);
        self.pending.clear();
        self.stale = 0;
        self.rebuilds += 1;

        if self.edges.iter().all(|e| e.excluded) {
            self.index.clear();
            return Ok(());
        }
        let edges = &self.edges;
        self.index.build_segments(edges.iter().enumerate()
            .filter(|(_, e)| !e.excluded)
            .map(|(id, e)| (id, points[e.from.point_id], points[e.to.point_id])))?;
        for (id, e) in self.edges.iter().enumerate() {
            if !e.excluded {
                self.in_index[id] = true;
            }
        }
        Ok(())
    }

    /// Does the segment between points `p` and `q` conflict with any active split edge?
    pub fn conflicts_with(&self, points: &[Point2D], p: usize, q: usize) -> bool {
        let (a, b) = (points[p], points[q]);
        let conflict = |id: usize| {
            let e = &self.edges[id];
            !e.excluded && conflicts(points, p, q, e.from.point_id, e.to.point_id)
        };
        self.index.crosses_any(a, b, conflict) || self.pending.iter().any(|&id| conflict(id))
    }
}

/// Does the segment `pq` conflict with the segment `cd` (all point ids)?
///
/// Segments sharing an endpoint id conflict only when they overlap collinearly;
/// any other contact is a conflict.
fn conflicts(points: &[Point2D], p: usize, q: usize, c: usize, d: usize) -> bool {
    let (a, b, pc, pd) = (points[p], points[q], points[c], points[d]);
    if c == p || c == q || d == p || d == q {
        segments_overlap(a, b, pc, pd)
    } else {
        segments_intersect(a, b, pc, pd)
    }
}

/// Is the segment between points `p` and `q` a valid bridge: leaving both
/// endpoints into the interior and touching neither ring edges nor active split edges?
pub(crate) fn is_valid_bridge(topo: &Topology<'_>, splits: &SplitEdges, p: usize, q: usize) -> bool {
    let points = topo.points;
    if p == q {
        return false;
    }
    let (a, b) = (points[p], points[q]);
    if a.exact_eq(&b) {
        return false;
    }

    if !in_interior_wedge(points[topo.prev(p)], a, points[topo.next(p)], b - a)
        || !in_interior_wedge(points[topo.prev(q)], b, points[topo.next(q)], a - b) {
        return false;
    }

    for polygon in &topo.polygons {
        if !segment_overlaps_box(a, b, &polygon.bbox) {
            continue;
        }
        let crossed = polygon.edges_tree.crosses_any(a, b, |e| {
            let edge = &topo.edges[e];
            conflicts(points, p, q, edge.from.point_id, edge.to.point_id)
        });
        if crossed {
            return false;
        }
    }

    !splits.conflicts_with(points, p, q)
}
