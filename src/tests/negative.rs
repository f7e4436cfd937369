use crate::{DecompositionError, Ring, Strategy, TriangulationError, decompose_polygon, triangulate};

use super::util::{self, VTest};

#[test]
#[should_panic]
fn incomplete_polygon() {
    let polygon: Vec<VTest> = vec![(0., 0.).into(), (1., 1.).into()];
    polygon.triangulate().unwrap();
}

#[test]
fn not_enough_vertices() {
    // Repeated vertices do not count
    let polygon = vec![[0., 0.], [1., 1.], [1., 1.], [0., 0.]];
    match triangulate(&polygon) {
        Err(TriangulationError::NotEnoughVertices(2)) => {}
        other => panic!("Unexpected result {:?}", other),
    }
}

#[test]
fn zero_area() {
    let polygon = vec![[0., 0.], [1., 1.], [2., 2.]];
    match triangulate(&polygon) {
        Err(TriangulationError::DegenerateRing) => {}
        other => panic!("Unexpected result {:?}", other),
    }
}

#[test]
fn non_finite_coordinates() {
    let polygon = vec![[0., 0.], [f64::NAN, 1.], [1., 1.]];
    match triangulate(&polygon) {
        Err(TriangulationError::DegenerateRing) => {}
        other => panic!("Unexpected result {:?}", other),
    }

    let outer = vec![[0., 0.], [10., 0.], [10., f64::INFINITY]];
    let holes: Vec<Vec<[f64; 2]>> = Vec::new();
    match decompose_polygon(&outer, &holes, Strategy::Basic, 0.) {
        Err(DecompositionError::DegenerateRing { ring: 0 }) => {}
        other => panic!("Unexpected result {:?}", other),
    }
}

#[test]
fn hole_with_too_few_vertices() {
    let outer = util::square(0., 0., 10.);
    let holes = vec![util::square(2., 2., 2.), vec![[5., 5.], [6., 6.]]];
    for strategy in [Strategy::Basic, Strategy::Delaunay] {
        match decompose_polygon(&outer, &holes, strategy, 0.) {
            Err(DecompositionError::NotEnoughVertices { ring: 2, vertices: 2 }) => {}
            other => panic!("Unexpected result {:?}", other),
        }
    }
}

#[test]
fn hole_collapsed_by_rounding() {
    let outer = util::square(0., 0., 10.);
    // Far below the grid of a coordinate shift of 0.5
    let holes = vec![util::square(4., 4., 0.01)];
    match decompose_polygon(&outer, &holes, Strategy::Basic, 0.5) {
        Err(DecompositionError::NotEnoughVertices { ring: 1, .. }) => {}
        other => panic!("Unexpected result {:?}", other),
    }
}

#[test]
fn hole_outside_outer_ring() {
    let outer = util::square(0., 0., 10.);
    let holes = vec![util::square(20., 20., 2.)];
    // Every segment from the hole to a corner it can see leaves the outer square
    match decompose_polygon(&outer, &holes, Strategy::Basic, 0.) {
        Err(DecompositionError::NoBridge { ring: 1 }) => {}
        other => panic!("Unexpected result {:?}", other),
    }
}
