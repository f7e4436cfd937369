use std::f64::consts::PI;

use smallvec::SmallVec;

use crate::{errors::InternalError, math::normalize_angle, primitives::signed_area};

use super::{crossing::SplitEdges, topology::Topology};

/// Directed edges of the decomposition graph: every ring edge once, every active bridge both ways
struct Graph {
    edges: Vec<(usize, usize)>,
    outgoing: Vec<SmallVec<[usize; 4]>>,
    junction: Vec<bool>,
}

impl Graph {
    fn new(topo: &Topology<'_>, splits: &SplitEdges) -> Self {
        let n = topo.points.len();
        let mut edges = Vec::with_capacity(n + 2 * splits.edges().len());
        let mut outgoing: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); n];
        let mut junction = vec![false; n];

        for e in &topo.edges {
            outgoing[e.from.point_id].push(edges.len());
            edges.push((e.from.point_id, e.to.point_id));
        }
        for (_, e) in splits.active() {
            let (p, q) = (e.from.point_id, e.to.point_id);
            outgoing[p].push(edges.len());
            edges.push((p, q));
            outgoing[q].push(edges.len());
            edges.push((q, p));
            junction[p] = true;
            junction[q] = true;
        }

        Self { edges, outgoing, junction }
    }

    /// The edge leaving the head of `ei` with the smallest clockwise angle from the reversed incoming direction
    fn next_edge(&self, topo: &Topology<'_>, ei: usize) -> Option<usize> {
        let (from, v) = self.edges[ei];
        let points = topo.points;
        let back = (points[from] - points[v]).angle();

        let mut best: Option<(f64, usize)> = None;
        for &candidate in &self.outgoing[v] {
            let (_, to) = self.edges[candidate];
            if to == from {
                continue;
            }
            let mut cw = normalize_angle(back - (points[to] - points[v]).angle());
            if cw <= 0.0 {
                cw = 2.0 * PI;
            }
            if best.map_or(true, |(best_cw, _)| cw < best_cw) {
                best = Some((cw, candidate));
            }
        }
        best.map(|(_, candidate)| candidate)
    }
}

/// Walk every face of the decomposition graph. Each face is a counter-clockwise
/// ring of point ids; a point only repeats within a face where a bridge is attached.
pub(crate) fn trace_faces(topo: &Topology<'_>, splits: &SplitEdges) -> Result<Vec<Vec<usize>>, InternalError> {
    let graph = Graph::new(topo, splits);
    let edge_count = graph.edges.len();
    let mut visited = vec![false; edge_count];
    let mut faces = Vec::new();
    let mut seen = vec![0usize; topo.points.len()];

    for start in 0..edge_count {
        if visited[start] {
            continue;
        }

        let mut face = Vec::new();
        let mut ei = start;
        loop {
            if visited[ei] {
                return Err(InternalError::new(format!("Edge {:?} is part of two faces", graph.edges[ei])));
            }
            visited[ei] = true;
            face.push(graph.edges[ei].0);
            if face.len() > edge_count {
                return Err(InternalError::new("Face walk does not close"));
            }

            ei = graph.next_edge(topo, ei)
                .ok_or_else(|| InternalError::new(format!("Dead end at point {}", graph.edges[ei].1)))?;
            if ei == start {
                break;
            }
        }

        let mut distinct = 0;
        for &p in &face {
            seen[p] += 1;
            if seen[p] == 1 {
                distinct += 1;
            } else if !graph.junction[p] {
                return Err(InternalError::new(format!("Point {} visited twice by one face", p)));
            }
        }
        for &p in &face {
            seen[p] = 0;
        }
        if distinct < 3 {
            return Err(InternalError::new(format!("Face with only {} distinct points", distinct)));
        }

        let ring: Vec<_> = face.iter().map(|&p| topo.points[p]).collect();
        if signed_area(&ring) <= 0.0 {
            return Err(InternalError::new("Face is not counter-clockwise"));
        }

        faces.push(face);
    }

    Ok(faces)
}
