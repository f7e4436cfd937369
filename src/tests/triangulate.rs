use std::sync::{Arc, atomic::AtomicBool};

use approx::assert_relative_eq;

use crate::{Point2D, Ring, Settings, TriangleMesh, TriangulationError, Triangulator, primitives::{orientation, triangle_area}, triangulate};

use super::util;

/// Checks face count, winding and coverage of a triangulation of `ring`
fn check(ring: &[[f64; 2]], mesh: &TriangleMesh) {
    assert!(mesh.is_valid());
    assert_eq!(mesh.points().len(), ring.len());
    assert_eq!(mesh.len(), ring.len() - 2);
    for [a, b, c] in mesh.triangles() {
        assert!(orientation(a, b, c) >= 0., "face is clockwise");
    }
    assert_relative_eq!(mesh.area(), util::ring_area(ring), max_relative = 1e-9);
}

#[test]
fn triangle() {
    let ring = [[0., 0.], [1., 0.], [0., 1.]];
    let mesh = triangulate(&ring).expect("Triangulation failed");
    assert_eq!(mesh.len(), 1);
    assert!(util::is_rotation(mesh.faces()[0], [0, 1, 2]));
    assert_eq!(mesh.points(), &[Point2D::new(0., 0.), Point2D::new(1., 0.), Point2D::new(0., 1.)]);
}

#[test]
fn clockwise_triangle() {
    let ring = vec![[0., 0.], [0., 1.], [1., 0.]];
    let mesh = ring.triangulate().expect("Triangulation failed");
    assert_eq!(mesh.len(), 1);
    assert!(util::is_rotation(mesh.faces()[0], [0, 2, 1]));
}

#[test]
fn hexagon() {
    let side = 3.;
    let ring = util::regular_polygon(6, side);
    let mesh = triangulate(&ring).expect("Triangulation failed");
    assert_eq!(mesh.len(), 4);
    assert_relative_eq!(mesh.area(), 3. * 3f64.sqrt() / 2. * side * side, max_relative = 1e-12);
}

#[test]
fn closing_vertex_is_dropped() {
    let mut ring = util::square(0., 0., 2.);
    ring.push(ring[0]);
    let mesh = triangulate(&ring).expect("Triangulation failed");
    assert_eq!(mesh.points().len(), 4);
    assert_eq!(mesh.len(), 2);
}

#[test]
fn regular_polygons() {
    for n in 3..=200 {
        let ring = util::regular_polygon(n, 100.);
        let mesh = triangulate(&ring).expect("Triangulation failed");
        check(&ring, &mesh);

        let mut reversed = ring.clone();
        reversed.reverse();
        let mesh = triangulate(&reversed).expect("Triangulation failed");
        check(&reversed, &mesh);
    }
}

#[test]
fn stars() {
    for spikes in [3, 5, 16, 40, 100] {
        let ring = util::star(spikes, 100., 40.);
        let mesh = triangulate(&ring).expect("Triangulation failed");
        check(&ring, &mesh);
    }
}

#[test]
fn combs() {
    for teeth in [2, 10, 30] {
        let ring = util::comb(teeth, 20.);
        let mesh = triangulate(&ring).expect("Triangulation failed");
        check(&ring, &mesh);
        assert_relative_eq!(mesh.area(), (2 * teeth - 1) as f64 + teeth as f64 * 20.);
    }
}

#[test]
fn kd_tree_and_linear_scan_agree() {
    let ring = util::star(12, 10., 3.);
    let linear = Triangulator::new().settings(Settings { kd_tree_threshold: usize::MAX, ..Settings::default() })
        .triangulate(&ring).expect("Triangulation failed");
    let indexed = Triangulator::new().settings(Settings { kd_tree_threshold: 3, ..Settings::default() })
        .triangulate(&ring).expect("Triangulation failed");
    check(&ring, &linear);
    check(&ring, &indexed);
    assert_eq!(linear.faces(), indexed.faces());
}

#[test]
fn collinear_vertices() {
    let ring = vec![[0., 0.], [1., 0.], [2., 0.], [2., 1.], [2., 2.], [1., 2.], [0., 2.], [0., 1.]];
    let mesh = triangulate(&ring).expect("Triangulation failed");
    assert_eq!(mesh.len(), 6);
    assert_relative_eq!(mesh.area(), 4.);
    assert!(mesh.triangles().all(|[a, b, c]| triangle_area(a, b, c).abs() > 0.));
}

#[test]
fn single_precision_vertices() {
    let ring: Vec<util::VTest> = vec![(0., 0.).into(), (4., 0.).into(), (4., 3.).into(), (2., 1.).into(), (0., 3.).into()];
    let mesh = ring.triangulate().expect("Triangulation failed");
    assert_eq!(mesh.len(), 3);
    assert_relative_eq!(mesh.area(), 8.);
}

#[test]
fn fans() {
    let ring = util::regular_polygon(8, 1.);
    let mesh = triangulate(&ring).expect("Triangulation failed");

    let mut fans: Vec<Vec<usize>> = Vec::new();
    assert!(mesh.write_fans(&mut fans));
    let triangles: usize = fans.iter().map(|f| f.len() - 2).sum();
    assert_eq!(triangles, mesh.len());
    for fan in &fans {
        assert!(fan.len() >= 3);
        assert!(fan.iter().all(|&v| v < ring.len()));
    }

    let mut unused: Vec<Vec<usize>> = Vec::new();
    assert!(!TriangleMesh::new(vec![Point2D::zero(); 3]).write_fans(&mut unused));
    assert!(unused.is_empty());
}

#[test]
fn cancelled() {
    let ring = util::regular_polygon(100, 1.);
    let settings = Settings::default().with_cancel(Arc::new(AtomicBool::new(true)));
    match Triangulator::new().settings(settings).triangulate(&ring) {
        Err(TriangulationError::Cancelled) => {}
        other => panic!("Unexpected result {:?}", other),
    }
}
