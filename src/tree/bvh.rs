use std::fmt;

use crate::{BoundingBox2D, Point2D, errors::TreeBuildError, idx::Idx, primitives::{point_segment_distance_squared, segment_overlaps_box}};

use super::{Nearest, Node, DEFAULT_LEAF_SIZE};

/// A bounding volume hierarchy over arbitrary geometries identified by their boxes.
///
/// Items are `(id, bbox)` pairs; the exact geometry stays with the caller and is
/// consulted through closures during queries. Construction uses the same cost
/// heuristic as [BspTree](super::BspTree), with item box centers as split keys.
#[derive(Clone)]
pub struct BvhTree {
    nodes: Vec<Node>,
    items: Vec<(usize, BoundingBox2D)>,
    leaf_size: usize,
}

impl Default for BvhTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BvhTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BvhTree")
            .field("nodes", &self.nodes.len())
            .field("items", &self.items.len())
            .field("leaf_size", &self.leaf_size)
            .finish()
    }
}

impl BvhTree {
    pub fn new() -> Self {
        Self::with_leaf_size(DEFAULT_LEAF_SIZE)
    }

    pub fn with_leaf_size(leaf_size: usize) -> Self {
        Self {
            nodes: Vec::new(),
            items: Vec::new(),
            leaf_size: leaf_size.max(1),
        }
    }

    /// (Re)builds the tree over `(id, bbox)` items. On failure the tree is left empty.
    pub fn build<I: IntoIterator<Item=(usize, BoundingBox2D)>>(&mut self, items: I) -> Result<(), TreeBuildError> {
        self.clear();
        let result = self.build_inner(items);
        if result.is_err() {
            self.clear();
        }
        result
    }

    /// (Re)builds the tree over `(id, a, b)` line segments
    pub fn build_segments<I: IntoIterator<Item=(usize, Point2D, Point2D)>>(&mut self, segments: I) -> Result<(), TreeBuildError> {
        self.build(segments.into_iter().map(|(id, a, b)| (id, BoundingBox2D::new(a, b))))
    }

    fn build_inner<I: IntoIterator<Item=(usize, BoundingBox2D)>>(&mut self, items: I) -> Result<(), TreeBuildError> {
        let items: Vec<(usize, BoundingBox2D)> = items.into_iter().collect();
        let mut boxes = Vec::new();
        boxes.try_reserve_exact(items.len())?;
        boxes.extend(items.iter().map(|(_, b)| *b));
        let mut centers = Vec::new();
        centers.try_reserve_exact(items.len())?;
        centers.extend(items.iter().map(|(_, b)| b.center()));

        let hierarchy = super::build(&boxes, &centers, self.leaf_size)?;
        self.items.try_reserve_exact(items.len())?;
        self.items.extend(hierarchy.order.iter().map(|&pos| items[pos]));
        self.nodes = hierarchy.nodes;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn bbox(&self) -> BoundingBox2D {
        self.nodes.first().map(|n| *n.bbox()).unwrap_or_default()
    }

    /// Indexed ids in leaf order
    pub fn ids(&self) -> impl Iterator<Item=usize> + '_ {
        self.items.iter().map(|(id, _)| *id)
    }

    /// Does the segment `ab` conflict with any indexed geometry?
    ///
    /// Descends every node whose box overlaps the segment (separating axis
    /// test) and calls `conflict(id)` for each leaf item whose box does too.
    /// Stops at the first item for which `conflict` returns `true`.
    pub fn crosses_any<F: FnMut(usize) -> bool>(&self, a: Point2D, b: Point2D, mut conflict: F) -> bool {
        if self.is_empty() {
            return false;
        }
        let mut stack = vec![Idx::<Node>::new(0)];
        while let Some(ni) = stack.pop() {
            let node = &self.nodes[ni];
            if !segment_overlaps_box(a, b, node.bbox()) {
                continue;
            }
            match node {
                Node::Internal { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
                Node::Leaf { refs, .. } => {
                    for (id, bbox) in &self.items[refs.clone()] {
                        if segment_overlaps_box(a, b, bbox) && conflict(*id) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// Visits every item whose box intersects `query`; stops early when `visit` returns `false`
    pub fn query_box<F: FnMut(usize) -> bool>(&self, query: &BoundingBox2D, mut visit: F) {
        if self.is_empty() {
            return;
        }
        let mut stack = vec![Idx::<Node>::new(0)];
        while let Some(ni) = stack.pop() {
            let node = &self.nodes[ni];
            if !node.bbox().intersects(query) {
                continue;
            }
            match node {
                Node::Internal { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
                Node::Leaf { refs, .. } => {
                    for (id, bbox) in &self.items[refs.clone()] {
                        if bbox.intersects(query) && !visit(*id) {
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Is `id` indexed with a box overlapping `bbox`?
    pub fn contains(&self, id: usize, bbox: &BoundingBox2D) -> bool {
        let mut found = false;
        self.query_box(bbox, |other| {
            found = other == id;
            !found
        });
        found
    }

    /// Branch-and-bound nearest geometry search.
    ///
    /// `distance(id)` returns the exact distance from `query` to the item, or
    /// `None` to skip it. Only items within `length` are considered.
    pub fn nearest<F: FnMut(usize) -> Option<f64>>(&self, query: Point2D, length: f64, mut distance: F) -> Option<Nearest> {
        if self.is_empty() {
            return None;
        }
        let mut best_sq = length * length;
        let mut best: Option<usize> = None;

        let mut stack = vec![Idx::<Node>::new(0)];
        while let Some(ni) = stack.pop() {
            let node = &self.nodes[ni];
            if node.bbox().distance_squared(query) > best_sq {
                continue;
            }
            match node {
                Node::Internal { left, right, .. } => {
                    let dl = self.nodes[*left].bbox().distance_squared(query);
                    let dr = self.nodes[*right].bbox().distance_squared(query);
                    if dl <= dr {
                        stack.push(*right);
                        stack.push(*left);
                    } else {
                        stack.push(*left);
                        stack.push(*right);
                    }
                }
                Node::Leaf { refs, .. } => {
                    for (id, bbox) in &self.items[refs.clone()] {
                        if bbox.distance_squared(query) > best_sq {
                            continue;
                        }
                        if let Some(d) = distance(*id) {
                            let d_sq = d * d;
                            if d_sq < best_sq || (d_sq == best_sq && best.map_or(true, |b| *id < b)) {
                                best_sq = d_sq;
                                best = Some(*id);
                            }
                        }
                    }
                }
            }
        }

        best.map(|id| Nearest { id, distance: best_sq.sqrt() })
    }

    /// Nearest segment to `query` for a tree built with [BvhTree::build_segments]; `segment(id)` yields its endpoints
    pub fn nearest_segment<F: FnMut(usize) -> Option<(Point2D, Point2D)>>(&self, query: Point2D, length: f64, mut segment: F) -> Option<Nearest> {
        self.nearest(query, length, |id| segment(id).map(|(a, b)| point_segment_distance_squared(query, a, b).sqrt()))
    }

    #[cfg(feature = "debugging")]
    pub(crate) fn as_text_tree(&self) -> Option<text_trees::TreeNode<String>> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(super::as_text_tree(&self.nodes, Idx::new(0)))
        }
    }
}
