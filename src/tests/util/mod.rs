mod vtest;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Point2D, SimplePolygon, primitives::segments_cross};

pub use vtest::VTest;

/// Axis aligned square with its lower left corner at `(x, y)`, counter-clockwise
pub fn square(x: f64, y: f64, size: f64) -> Vec<[f64; 2]> {
    vec![[x, y], [x + size, y], [x + size, y + size], [x, y + size]]
}

/// Regular polygon with `n` vertices on a circle around the origin, counter-clockwise
pub fn regular_polygon(n: usize, radius: f64) -> Vec<[f64; 2]> {
    (0..n).map(|i| {
        let theta = std::f64::consts::PI * 2. * (i as f64) / (n as f64);
        let (y, x) = theta.sin_cos();
        [x * radius, y * radius]
    }).collect()
}

/// Star with `2 * spikes` vertices alternating between the two radii, counter-clockwise
pub fn star(spikes: usize, outer: f64, inner: f64) -> Vec<[f64; 2]> {
    let n = spikes * 2;
    (0..n).map(|i| {
        let theta = std::f64::consts::PI * 2. * (i as f64) / (n as f64);
        let r = if i % 2 == 0 { outer } else { inner };
        let (y, x) = theta.sin_cos();
        [x * r, y * r]
    }).collect()
}

/// A comb: `teeth` rectangular teeth of width 1 and height `height` standing on a bar, counter-clockwise
pub fn comb(teeth: usize, height: f64) -> Vec<[f64; 2]> {
    let width = (teeth * 2 - 1) as f64;
    let mut ring = vec![[0., 0.], [width, 0.]];
    for t in (0..teeth).rev() {
        let x = (t * 2) as f64;
        ring.push([x + 1., 1. + height]);
        ring.push([x, 1. + height]);
        if t > 0 {
            ring.push([x, 1.]);
            ring.push([x - 1., 1.]);
        }
    }
    ring
}

/// An outer square of `cells x cells` cells of size 10, each with a small square hole.
/// Hole offsets vary a little per cell so no four hole centers are cocircular.
pub fn grid_of_holes(cells: usize) -> (Vec<[f64; 2]>, Vec<Vec<[f64; 2]>>) {
    let outer = square(0., 0., cells as f64 * 10.);
    let mut holes = Vec::with_capacity(cells * cells);
    for i in 0..cells {
        for j in 0..cells {
            let jitter = ((i * 7 + j * 3) % 5) as f64 * 0.3;
            let mut hole = square(i as f64 * 10. + 3. + jitter, j as f64 * 10. + 3. + 0.5 * jitter, 2. + 0.2 * jitter);
            // Holes are accepted in either winding
            if (i + j) % 2 == 0 {
                hole.reverse();
            }
            holes.push(hole);
        }
    }
    (outer, holes)
}

/// `n` pseudo-random points in `[0, extent)^2`
pub fn random_points(n: usize, extent: f64, seed: u64) -> Vec<Point2D> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| Point2D::new(rng.gen_range(0.0..extent), rng.gen_range(0.0..extent))).collect()
}

/// Shoelace area of an input ring, always positive
pub fn ring_area(ring: &[[f64; 2]]) -> f64 {
    let points: Vec<Point2D> = ring.iter().map(|&p| p.into()).collect();
    crate::primitives::signed_area(&points).abs()
}

/// Number of edge pairs, over all polygons, whose interiors properly cross
pub fn crossing_edges(polygons: &[SimplePolygon]) -> usize {
    let edges: Vec<(Point2D, Point2D)> = polygons.iter().flat_map(|p| p.edges()).collect();
    let mut count = 0;
    for i in 0..edges.len() {
        for j in i + 1..edges.len() {
            let ((a, b), (c, d)) = (edges[i], edges[j]);
            if segments_cross(a, b, c, d) {
                count += 1;
            }
        }
    }
    count
}

/// Is `face` a rotation of `expected`?
pub fn is_rotation(face: [usize; 3], expected: [usize; 3]) -> bool {
    (0..3).any(|r| (0..3).all(|i| face[(i + r) % 3] == expected[i]))
}
