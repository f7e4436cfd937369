use std::{collections::HashSet, fmt, ops::Range};

use crate::{BoundingBox2D, BspTree, BvhTree, Point2D, errors::TreeBuildError, primitives::centroid};

/// A point of the shared buffer together with the ring it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct RefPoint {
    /// 0 for the outer ring, `i + 1` for inner ring `i`
    pub polygon_id: usize,
    /// Global index into the point buffer
    pub point_id: usize,
}

impl fmt::Display for RefPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}:p{}", self.polygon_id, self.point_id)
    }
}

/// One edge of an input ring, directed with the ring's interior on its left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TopoEdge {
    pub from: RefPoint,
    pub to: RefPoint,
}

/// A bridge between two rings
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SplitEdge {
    pub from: RefPoint,
    pub to: RefPoint,
    pub length: f64,
    /// Soft deleted; ignored by crossing tests and graph reconstruction
    pub excluded: bool,
    /// Found by the connectivity pass; never excluded
    pub pinned: bool,
}

impl SplitEdge {
    /// The rings joined by this edge, smaller id first
    pub fn ring_pair(&self) -> (usize, usize) {
        let (a, b) = (self.from.polygon_id, self.to.polygon_id);
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl fmt::Display for SplitEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.from, self.to, self.length)?;
        if self.pinned {
            write!(f, " pinned")?;
        }
        if self.excluded {
            write!(f, " excluded")?;
        }
        Ok(())
    }
}

/// Per-ring bookkeeping of a decomposition request
pub(crate) struct TopoPolygon<'a> {
    /// Global point ids of the ring, in boundary order
    pub range: Range<usize>,
    pub bbox: BoundingBox2D,
    pub centroid: Point2D,
    /// Point id with the smallest x
    pub leftmost: usize,
    /// Point id with the largest x
    pub rightmost: usize,
    pub points_tree: BspTree<'a>,
    /// Indexes this ring's [TopoEdge]s by id
    pub edges_tree: BvhTree,
    /// Component id; rings joined by bridges share it
    pub group: usize,
    /// `(point id, target ring)` pairs already bridged from this ring
    pub used: HashSet<(usize, usize)>,
}

impl<'a> TopoPolygon<'a> {
    pub fn len(&self) -> usize {
        self.range.len()
    }
}

/// Rings, edges and spatial indexes over the shared (precision adjusted) point buffer
pub(crate) struct Topology<'a> {
    pub points: &'a [Point2D],
    pub ring_of: Vec<usize>,
    pub polygons: Vec<TopoPolygon<'a>>,
    /// Edge `i` starts at point `i`
    pub edges: Vec<TopoEdge>,
    /// All points of all rings
    pub all_points: BspTree<'a>,
}

impl<'a> Topology<'a> {
    /// `ranges` are the consecutive point id ranges of the rings, outer ring first
    pub fn new(points: &'a [Point2D], ranges: &[Range<usize>], leaf_size: usize) -> Result<Self, TreeBuildError> {
        let mut ring_of = Vec::new();
        ring_of.try_reserve_exact(points.len())?;
        let mut edges = Vec::new();
        edges.try_reserve_exact(points.len())?;
        for (ring, range) in ranges.iter().enumerate() {
            for i in range.clone() {
                let next = if i + 1 < range.end { i + 1 } else { range.start };
                ring_of.push(ring);
                edges.push(TopoEdge {
                    from: RefPoint { polygon_id: ring, point_id: i },
                    to: RefPoint { polygon_id: ring, point_id: next },
                });
            }
        }

        let mut polygons = Vec::with_capacity(ranges.len());
        for (ring, range) in ranges.iter().enumerate() {
            let ring_points = &points[range.clone()];
            let mut leftmost = range.start;
            let mut rightmost = range.start;
            for i in range.clone() {
                let p = points[i];
                if p.x < points[leftmost].x || (p.x == points[leftmost].x && p.y < points[leftmost].y) {
                    leftmost = i;
                }
                if p.x > points[rightmost].x || (p.x == points[rightmost].x && p.y > points[rightmost].y) {
                    rightmost = i;
                }
            }

            let mut points_tree = BspTree::with_leaf_size(points, leaf_size);
            points_tree.build(range.clone())?;
            let mut edges_tree = BvhTree::with_leaf_size(leaf_size);
            edges_tree.build_segments(range.clone().map(|i| (i, points[i], points[edges[i].to.point_id])))?;

            polygons.push(TopoPolygon {
                range: range.clone(),
                bbox: BoundingBox2D::from_points(ring_points.iter().copied()),
                centroid: centroid(ring_points),
                leftmost,
                rightmost,
                points_tree,
                edges_tree,
                group: ring,
                used: HashSet::new(),
            });
        }

        let mut all_points = BspTree::with_leaf_size(points, leaf_size);
        all_points.build(0..points.len())?;

        Ok(Self {
            points,
            ring_of,
            polygons,
            edges,
            all_points,
        })
    }

    #[inline]
    pub fn next(&self, p: usize) -> usize {
        self.edges[p].to.point_id
    }

    #[inline]
    pub fn prev(&self, p: usize) -> usize {
        let range = &self.polygons[self.ring_of[p]].range;
        if p == range.start { range.end - 1 } else { p - 1 }
    }

    #[inline]
    pub fn ref_point(&self, p: usize) -> RefPoint {
        RefPoint { polygon_id: self.ring_of[p], point_id: p }
    }

    #[inline]
    pub fn group_of(&self, ring: usize) -> usize {
        self.polygons[ring].group
    }

    /// Is `ring` in the outer ring's component?
    #[inline]
    pub fn is_connected(&self, ring: usize) -> bool {
        self.group_of(ring) == self.group_of(0)
    }

    /// Merge the components of two rings, keeping the smaller label
    pub fn union(&mut self, a: usize, b: usize) {
        let (ga, gb) = (self.group_of(a), self.group_of(b));
        if ga == gb {
            return;
        }
        let (keep, replace) = if ga < gb { (ga, gb) } else { (gb, ga) };
        for polygon in &mut self.polygons {
            if polygon.group == replace {
                polygon.group = keep;
            }
        }
    }

    /// Rings sharing the component of `ring`, in id order
    pub fn group_members(&self, ring: usize) -> impl Iterator<Item=usize> + '_ {
        let group = self.group_of(ring);
        self.polygons.iter().enumerate().filter(move |(_, p)| p.group == group).map(|(i, _)| i)
    }

    pub fn is_used(&self, p: usize, ring: usize) -> bool {
        self.polygons[self.ring_of[p]].used.contains(&(p, ring))
    }

    pub fn mark_used(&mut self, p: usize, q: usize) {
        let (rp, rq) = (self.ring_of[p], self.ring_of[q]);
        self.polygons[rp].used.insert((p, rq));
        self.polygons[rq].used.insert((q, rp));
    }

    pub fn release_used(&mut self, p: usize, q: usize) {
        let (rp, rq) = (self.ring_of[p], self.ring_of[q]);
        self.polygons[rp].used.remove(&(p, rq));
        self.polygons[rq].used.remove(&(q, rp));
    }

    /// Hole ids ordered by the x coordinate of their leftmost point
    pub fn holes_by_leftmost(&self) -> Vec<usize> {
        let mut holes: Vec<usize> = (1..self.polygons.len()).collect();
        holes.sort_by(|&a, &b| {
            let (pa, pb) = (self.points[self.polygons[a].leftmost], self.points[self.polygons[b].leftmost]);
            pa.x.total_cmp(&pb.x).then(a.cmp(&b))
        });
        holes
    }
}
