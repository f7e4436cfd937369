use std::{fmt, ops::Range};

use crate::{BoundingBox2D, Point2D, errors::TreeBuildError, idx::{Idx, VecExt}};

const KD_LEAF_SIZE: usize = 8;

#[derive(Debug, Clone)]
enum KdNode {
    /// Points in `left` have `coord(axis) <= value`, points in `right` have `coord(axis) >= value`
    Split { axis: usize, value: f64, left: Idx<KdNode>, right: Idx<KdNode> },
    Leaf { refs: Range<usize> },
}

/// A classic 2D kd-tree answering inclusive axis-aligned range queries.
///
/// Like [BspTree](super::BspTree) it indexes ids of a borrowed point buffer.
/// Points can be marked removed, after which queries skip them without
/// rebuilding the tree.
pub struct KdTree<'a> {
    points: &'a [Point2D],
    nodes: Vec<KdNode>,
    refs: Vec<usize>,
    removed: Vec<bool>,
    live: usize,
}

impl<'a> fmt::Debug for KdTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("nodes", &self.nodes.len())
            .field("refs", &self.refs.len())
            .field("live", &self.live)
            .finish()
    }
}

impl<'a> KdTree<'a> {
    pub fn new(points: &'a [Point2D]) -> Self {
        Self {
            points,
            nodes: Vec::new(),
            refs: Vec::new(),
            removed: Vec::new(),
            live: 0,
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
        let ids = ids.into_iter();
        self.refs.try_reserve(ids.size_hint().0)?;
        self.refs.extend(ids);
        if self.refs.is_empty() {
            return Err(TreeBuildError::Empty);
        }
        self.removed.try_reserve_exact(self.points.len())?;
        self.removed.resize(self.points.len(), true);
        for &id in &self.refs {
            self.removed[id] = false;
        }
        self.nodes.try_reserve(2 * (self.refs.len() / KD_LEAF_SIZE + 1))?;
        self.live = self.refs.len();

        let points = self.points;
        self.nodes.push(KdNode::Leaf { refs: 0..0 });
        let mut stack = vec![(Idx::<KdNode>::new(0), 0usize, self.refs.len(), 0usize)];
        while let Some((ni, lo, hi, depth)) = stack.pop() {
            if hi - lo <= KD_LEAF_SIZE {
                self.nodes[ni] = KdNode::Leaf { refs: lo..hi };
                continue;
            }

            let axis = depth % 2;
            let mid = lo + (hi - lo) / 2;
            self.refs[lo..hi].select_nth_unstable_by(mid - lo, |&a, &b| points[a].axis(axis).total_cmp(&points[b].axis(axis)));
            let value = points[self.refs[mid]].axis(axis);

            self.nodes.try_reserve(2)?;
            let left = self.nodes.push_get_index(KdNode::Leaf { refs: 0..0 });
            let right = self.nodes.push_get_index(KdNode::Leaf { refs: 0..0 });
            self.nodes[ni] = KdNode::Split { axis, value, left, right };

            stack.push((right, mid, hi, depth + 1));
            stack.push((left, lo, mid, depth + 1));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.refs.clear();
        self.removed.clear();
        self.live = 0;
    }

    /// Number of indexed points not marked removed
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Excludes point `id` from future queries. Returns `false` if it was not live.
    pub fn mark_removed(&mut self, id: usize) -> bool {
        match self.removed.get_mut(id) {
            Some(removed) if !*removed => {
                *removed = true;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_removed(&self, id: usize) -> bool {
        self.removed.get(id).copied().unwrap_or(true)
    }

    /// Every live point `p` with `bbox.min <= p <= bbox.max` component-wise
    pub fn points_in_bbox(&self, bbox: &BoundingBox2D) -> Vec<usize> {
        let mut result = Vec::new();
        self.for_each_in_bbox(bbox, |id| {
            result.push(id);
            true
        });
        result
    }

    /// Visits every live point inside `bbox` (inclusive); stops early when `visit` returns `false`
    pub fn for_each_in_bbox<F: FnMut(usize) -> bool>(&self, bbox: &BoundingBox2D, mut visit: F) {
        if self.nodes.is_empty() || bbox.is_empty() {
            return;
        }
        let mut stack = vec![Idx::<KdNode>::new(0)];
        while let Some(ni) = stack.pop() {
            match &self.nodes[ni] {
                KdNode::Split { axis, value, left, right } => {
                    if bbox.max.axis(*axis) >= *value {
                        stack.push(*right);
                    }
                    if bbox.min.axis(*axis) <= *value {
                        stack.push(*left);
                    }
                }
                KdNode::Leaf { refs } => {
                    for &id in &self.refs[refs.clone()] {
                        if !self.removed[id] && bbox.contains(self.points[id]) && !visit(id) {
                            return;
                        }
                    }
                }
            }
        }
    }
}
