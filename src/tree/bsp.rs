use std::fmt;

use crate::{BoundingBox2D, Point2D, errors::TreeBuildError, idx::Idx};

use super::{Nearest, Node, DEFAULT_LEAF_SIZE};

/// A binary space partition over a set of points.
///
/// The tree indexes point ids of a borrowed, immutable point buffer and never
/// copies the points. It answers branch-and-bound nearest-neighbor queries
/// with a caller supplied acceptance filter, and exposes its leaves as a
/// single in-order sequence.
pub struct BspTree<'a> {
    points: &'a [Point2D],
    nodes: Vec<Node>,
    refs: Vec<usize>,
    leaf_size: usize,
}

impl<'a> fmt::Debug for BspTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BspTree")
            .field("nodes", &self.nodes.len())
            .field("refs", &self.refs.len())
            .field("leaf_size", &self.leaf_size)
            .finish()
    }
}

impl<'a> BspTree<'a> {
    /// Creates an empty tree over `points`
    pub fn new(points: &'a [Point2D]) -> Self {
        Self::with_leaf_size(points, DEFAULT_LEAF_SIZE)
    }

    pub fn with_leaf_size(points: &'a [Point2D], leaf_size: usize) -> Self {
        Self {
            points,
            nodes: Vec::new(),
            refs: Vec::new(),
            leaf_size: leaf_size.max(1),
        }
    }

    /// (Re)builds the tree over the given point ids. On failure the tree is left empty.
    pub fn build<I: IntoIterator<Item=usize>>(&mut self, ids: I) -> Result<(), TreeBuildError> {
        self.clear();
        let result = self.build_inner(ids);
        if result.is_err() {
            self.clear();
        }
        result
    }

    fn build_inner<I: IntoIterator<Item=usize>>(&mut self, ids: I) -> Result<(), TreeBuildError> {
        let ids: Vec<usize> = ids.into_iter().collect();
        let mut boxes = Vec::new();
        boxes.try_reserve_exact(ids.len())?;
        let mut centers = Vec::new();
        centers.try_reserve_exact(ids.len())?;
        for &id in &ids {
            let p = self.points[id];
            boxes.push(BoundingBox2D::from_point(p));
            centers.push(p);
        }

        let hierarchy = super::build(&boxes, &centers, self.leaf_size)?;
        self.refs.try_reserve_exact(ids.len())?;
        self.refs.extend(hierarchy.order.iter().map(|&pos| ids[pos]));
        self.nodes = hierarchy.nodes;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.refs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Bounding box of all indexed points
    pub fn bbox(&self) -> BoundingBox2D {
        self.nodes.first().map(|n| *n.bbox()).unwrap_or_default()
    }

    /// The indexed point ids in leaf order
    pub fn in_order(&self) -> &[usize] {
        &self.refs
    }

    pub fn points(&self) -> &'a [Point2D] {
        self.points
    }

    /// Is point `id` indexed by this tree?
    pub fn contains(&self, id: usize) -> bool {
        if self.is_empty() || id >= self.points.len() {
            return false;
        }
        let p = self.points[id];
        let mut stack = vec![Idx::<Node>::new(0)];
        while let Some(ni) = stack.pop() {
            let node = &self.nodes[ni];
            if !node.bbox().contains(p) {
                continue;
            }
            match node {
                Node::Internal { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
                Node::Leaf { refs, .. } => {
                    if self.refs[refs.clone()].contains(&id) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// The closest indexed point to `query`, ignoring its acceptance filter
    pub fn nearest_point(&self, query: Point2D) -> Option<Nearest> {
        self.nearest(query, f64::INFINITY, |_, _| true)
    }

    /// Branch-and-bound nearest-neighbor search.
    ///
    /// Only points within `length` of `query` are considered. `accept(id, distance)`
    /// is consulted for each candidate that would improve the current best
    /// result; rejected candidates are skipped. The bound shrinks to the best
    /// accepted distance as the search proceeds, and subtrees whose box is
    /// farther away are pruned. Ties are resolved towards the smaller id.
    pub fn nearest<F: FnMut(usize, f64) -> bool>(&self, query: Point2D, length: f64, mut accept: F) -> Option<Nearest> {
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
                    // Closer child is popped first
                    if dl <= dr {
                        if dr <= best_sq { stack.push(*right); }
                        if dl <= best_sq { stack.push(*left); }
                    } else {
                        if dl <= best_sq { stack.push(*left); }
                        if dr <= best_sq { stack.push(*right); }
                    }
                }
                Node::Leaf { refs, .. } => {
                    for &id in &self.refs[refs.clone()] {
                        let d_sq = self.points[id].distance_squared(query);
                        let improves = d_sq < best_sq || (d_sq == best_sq && best.map_or(true, |b| id < b));
                        if improves && accept(id, d_sq.sqrt()) {
                            best_sq = d_sq;
                            best = Some(id);
                        }
                    }
                }
            }
        }

        best.map(|id| Nearest { id, distance: best_sq.sqrt() })
    }

    /// Visits every indexed point within `radius` of `query`
    pub fn for_each_within<F: FnMut(usize, f64)>(&self, query: Point2D, radius: f64, mut visit: F) {
        if self.is_empty() {
            return;
        }
        let r_sq = radius * radius;
        let mut stack = vec![Idx::<Node>::new(0)];
        while let Some(ni) = stack.pop() {
            let node = &self.nodes[ni];
            if node.bbox().distance_squared(query) > r_sq {
                continue;
            }
            match node {
                Node::Internal { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
                Node::Leaf { refs, .. } => {
                    for &id in &self.refs[refs.clone()] {
                        let d_sq = self.points[id].distance_squared(query);
                        if d_sq <= r_sq {
                            visit(id, d_sq.sqrt());
                        }
                    }
                }
            }
        }
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
