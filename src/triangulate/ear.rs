use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use crate::{BoundingBox2D, KdTree, Point2D, Settings, errors::TriangulationError, math::normalize_angle, primitives::{orientation, point_in_triangle}};

/// Ear clipping over a ring of precision adjusted points.
///
/// Every vertex is linked to its neighbors in counter-clockwise order. Convex
/// vertices are kept in an angle ordered set and the sharpest one that forms
/// an ear is clipped first.
pub(crate) struct EarClipper<'a> {
    points: &'a [Point2D],
    prev: Vec<usize>,
    next: Vec<usize>,
    /// Current key of every vertex in `candidates`
    keys: Vec<Option<OrderedFloat<f64>>>,
    candidates: BTreeSet<(OrderedFloat<f64>, usize)>,
    kd_tree: Option<KdTree<'a>>,
    remaining: usize,
    head: usize,
}

impl<'a> EarClipper<'a> {
    /// `points` must contain at least 3 points and wind counter-clockwise when `ccw` is set, clockwise otherwise
    pub fn new(points: &'a [Point2D], ccw: bool, settings: &Settings) -> Result<Self, TriangulationError> {
        let n = points.len();
        let mut prev = Vec::new();
        prev.try_reserve_exact(n)?;
        let mut next = Vec::new();
        next.try_reserve_exact(n)?;
        for i in 0..n {
            let (before, after) = ((i + n - 1) % n, (i + 1) % n);
            if ccw {
                prev.push(before);
                next.push(after);
            } else {
                prev.push(after);
                next.push(before);
            }
        }

        let kd_tree = if n >= settings.kd_tree_threshold {
            let mut tree = KdTree::new(points);
            tree.build(0..n)?;
            Some(tree)
        } else {
            None
        };

        let mut clipper = Self {
            points,
            prev,
            next,
            keys: vec![None; n],
            candidates: BTreeSet::new(),
            kd_tree,
            remaining: n,
            head: 0,
        };
        for i in 0..n {
            clipper.update(i);
        }
        Ok(clipper)
    }

    /// The candidate key of `v`: its interior angle if it is strictly convex,
    /// zero if it coincides with a neighbor, `None` if it cannot be an ear tip
    fn key(&self, v: usize) -> Option<OrderedFloat<f64>> {
        let (a, b, c) = (self.points[self.prev[v]], self.points[v], self.points[self.next[v]]);
        if b.exact_eq(&a) || b.exact_eq(&c) {
            return Some(OrderedFloat(0.0));
        }
        if orientation(a, b, c) <= 0.0 {
            return None;
        }
        Some(OrderedFloat(normalize_angle((a - b).angle() - (c - b).angle())))
    }

    fn update(&mut self, v: usize) {
        if let Some(old) = self.keys[v].take() {
            self.candidates.remove(&(old, v));
        }
        let key = self.key(v);
        if let Some(key) = key {
            self.candidates.insert((key, v));
        }
        self.keys[v] = key;
    }

    /// Is the triangle at `v` free of other remaining vertices?
    fn is_ear(&self, v: usize) -> bool {
        let (ia, ic) = (self.prev[v], self.next[v]);
        let (a, b, c) = (self.points[ia], self.points[v], self.points[ic]);
        let blocks = |r: usize| {
            if r == ia || r == v || r == ic {
                return false;
            }
            let p = self.points[r];
            if p.exact_eq(&a) || p.exact_eq(&b) || p.exact_eq(&c) {
                return false;
            }
            point_in_triangle(p, a, b, c)
        };

        let bbox = BoundingBox2D::from_points([a, b, c]);
        match &self.kd_tree {
            Some(tree) => {
                let mut blocked = false;
                tree.for_each_in_bbox(&bbox, |r| {
                    blocked = blocks(r);
                    !blocked
                });
                !blocked
            }
            None => {
                let mut r = self.next[ic];
                while r != ia {
                    if bbox.contains(self.points[r]) && blocks(r) {
                        return false;
                    }
                    r = self.next[r];
                }
                true
            }
        }
    }

    fn clip(&mut self, v: usize) -> [usize; 3] {
        let (a, c) = (self.prev[v], self.next[v]);
        self.next[a] = c;
        self.prev[c] = a;
        if let Some(old) = self.keys[v].take() {
            self.candidates.remove(&(old, v));
        }
        if let Some(tree) = &mut self.kd_tree {
            tree.mark_removed(v);
        }
        self.remaining -= 1;
        if self.head == v {
            self.head = c;
        }
        self.update(a);
        self.update(c);
        [a, v, c]
    }

    /// Clip ears until a single triangle remains; produces `n - 2` counter-clockwise faces
    pub fn run(mut self, settings: &Settings) -> Result<Vec<[usize; 3]>, TriangulationError> {
        let mut faces = Vec::new();
        faces.try_reserve_exact(self.remaining - 2)?;

        while self.remaining > 3 {
            if settings.is_cancelled() {
                return Err(TriangulationError::Cancelled);
            }
            let ear = self.candidates.iter().map(|(_, v)| *v).find(|&v| self.is_ear(v));
            match ear {
                Some(v) => faces.push(self.clip(v)),
                None => return Err(TriangulationError::NoEar { remaining: self.remaining }),
            }
        }

        let v = self.head;
        faces.push([self.prev[v], v, self.next[v]]);
        Ok(faces)
    }
}
