//! Spatial index trees.
//!
//! [BspTree] and [BvhTree] share one construction: a cost-based top-down split
//! over item bounding boxes (see [build]). [KdTree] is a plain median split.

use std::{fmt, ops::Range};

use crate::{BoundingBox2D, Point2D, errors::TreeBuildError, idx::{Idx, IdxDisplay, VecExt}, math::count_weight};

mod bsp;
pub use bsp::BspTree;
mod bvh;
pub use bvh::BvhTree;
mod kd;
pub use kd::KdTree;

/// Default maximum number of references stored in one leaf
pub const DEFAULT_LEAF_SIZE: usize = 8;

/// The result of a nearest-reference search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// The id of the found point or geometry
    pub id: usize,
    /// Its distance from the query point
    pub distance: f64,
}

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Internal { bbox: BoundingBox2D, left: Idx<Node>, right: Idx<Node> },
    /// `refs` is the leaf's slice of the tree's in-order reference array
    Leaf { bbox: BoundingBox2D, refs: Range<usize> },
}

impl Node {
    #[inline(always)]
    pub fn bbox(&self) -> &BoundingBox2D {
        match self {
            Node::Internal { bbox, .. } | Node::Leaf { bbox, .. } => bbox,
        }
    }
}

impl IdxDisplay for Node {
    fn fmt(f: &mut fmt::Formatter<'_>, idx: usize) -> fmt::Result {
        write!(f, "node{}", idx)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Internal { bbox, .. } => write!(f, "{:?}", bbox),
            Node::Leaf { bbox, refs } => write!(f, "{:?} refs {}..{}", bbox, refs.start, refs.end),
        }
    }
}

#[cfg(feature = "debugging")]
pub(crate) fn as_text_tree(nodes: &[Node], ni: Idx<Node>) -> text_trees::TreeNode<String> {
    let node = &nodes[ni];
    let label = format!("[{}] {}", ni, node);
    match node {
        Node::Internal { left, right, .. } => text_trees::TreeNode::with_child_nodes(label, vec![as_text_tree(nodes, *left), as_text_tree(nodes, *right)].into_iter()),
        Node::Leaf { .. } => label.into(),
    }
}

/// Node arena plus the in-order permutation of item positions
pub(crate) struct Hierarchy {
    pub nodes: Vec<Node>,
    pub order: Vec<usize>,
}

/// Build a hierarchy over items given by their bounding boxes and representative centers.
///
/// Item positions are sorted once along each axis. Every range is split on the
/// longest axis of its box at the position `k` minimizing
/// `area(L) * (|L| + ln |L|) + area(R) * (|R| + ln |R|)`; when no split beats
/// keeping the range whole, the midpoint is used. The sorted array of the other
/// axis is stably partitioned so both stay sorted inside each child.
pub(crate) fn build(boxes: &[BoundingBox2D], centers: &[Point2D], leaf_size: usize) -> Result<Hierarchy, TreeBuildError> {
    debug_assert_eq!(boxes.len(), centers.len());
    let n = boxes.len();
    if n == 0 {
        return Err(TreeBuildError::Empty);
    }
    let leaf_size = leaf_size.max(1);

    let mut sorted: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    for (axis, s) in sorted.iter_mut().enumerate() {
        s.try_reserve_exact(n)?;
        s.extend(0..n);
        s.sort_by(|&a, &b| centers[a].axis(axis).total_cmp(&centers[b].axis(axis)).then(a.cmp(&b)));
    }

    let mut nodes: Vec<Node> = Vec::new();
    nodes.try_reserve(2 * (n / leaf_size + 1))?;
    let mut prefix: Vec<BoundingBox2D> = Vec::new();
    prefix.try_reserve_exact(n)?;
    let mut suffix: Vec<BoundingBox2D> = Vec::new();
    suffix.try_reserve_exact(n)?;
    let mut is_left = Vec::new();
    is_left.try_reserve_exact(n)?;
    is_left.resize(n, false);
    let mut scratch: Vec<usize> = Vec::new();
    scratch.try_reserve_exact(n)?;

    nodes.push(Node::Leaf { bbox: BoundingBox2D::empty(), refs: 0..0 });
    let mut stack = vec![(Idx::<Node>::new(0), 0usize, n)];

    while let Some((ni, lo, hi)) = stack.pop() {
        let mut bbox = BoundingBox2D::empty();
        for &pos in &sorted[0][lo..hi] {
            bbox.append_box(&boxes[pos]);
        }

        let count = hi - lo;
        if count <= leaf_size {
            nodes[ni] = Node::Leaf { bbox, refs: lo..hi };
            continue;
        }

        let axis = bbox.longest_axis();
        let k = best_split(&sorted[axis][lo..hi], boxes, &bbox, &mut prefix, &mut suffix);

        for &pos in &sorted[axis][lo..lo + k] {
            is_left[pos] = true;
        }
        let other = &mut sorted[1 - axis][lo..hi];
        scratch.clear();
        scratch.extend(other.iter().copied().filter(|&pos| is_left[pos]));
        scratch.extend(other.iter().copied().filter(|&pos| !is_left[pos]));
        other.copy_from_slice(&scratch);
        for &pos in &sorted[axis][lo..lo + k] {
            is_left[pos] = false;
        }

        nodes.try_reserve(2)?;
        let left = nodes.push_get_index(Node::Leaf { bbox: BoundingBox2D::empty(), refs: 0..0 });
        let right = nodes.push_get_index(Node::Leaf { bbox: BoundingBox2D::empty(), refs: 0..0 });
        nodes[ni] = Node::Internal { bbox, left, right };

        stack.push((right, lo + k, hi));
        stack.push((left, lo, lo + k));
    }

    // Every leaf range is a contiguous slice of the x-sorted array, which is now the in-order sequence
    let [order, _] = sorted;
    Ok(Hierarchy { nodes, order })
}

/// Number of items (counted from the front of `range`) that go to the left child
fn best_split(range: &[usize], boxes: &[BoundingBox2D], bbox: &BoundingBox2D, prefix: &mut Vec<BoundingBox2D>, suffix: &mut Vec<BoundingBox2D>) -> usize {
    let n = range.len();
    let mid = n / 2;

    prefix.clear();
    let mut acc = BoundingBox2D::empty();
    for &pos in range {
        acc.append_box(&boxes[pos]);
        prefix.push(acc);
    }
    suffix.clear();
    suffix.resize(n, BoundingBox2D::empty());
    let mut acc = BoundingBox2D::empty();
    for (i, &pos) in range.iter().enumerate().rev() {
        acc.append_box(&boxes[pos]);
        suffix[i] = acc;
    }

    let mut best_cost = bbox.area() * count_weight(n);
    let mut best_k = None;
    for k in 1..n {
        let cost = prefix[k - 1].area() * count_weight(k) + suffix[k].area() * count_weight(n - k);
        let better = match best_k {
            None => cost < best_cost,
            Some(bk) => cost < best_cost || (cost == best_cost && mid_distance(k, mid) < mid_distance(bk, mid)),
        };
        if better {
            best_cost = cost;
            best_k = Some(k);
        }
    }

    best_k.unwrap_or(mid)
}

#[inline]
fn mid_distance(k: usize, mid: usize) -> usize {
    if k > mid { k - mid } else { mid - k }
}
