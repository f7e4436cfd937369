use std::sync::{Arc, atomic::AtomicBool};

use approx::assert_relative_eq;

use crate::{DecompositionError, Decomposer, Point2D, Settings, SimplePolygon, Strategy, decompose_polygon};

use super::util;

const STRATEGIES: [Strategy; 2] = [Strategy::Basic, Strategy::Delaunay];

/// Checks the properties every decomposition must have and returns the polygons
pub(super) fn check(outer: &[[f64; 2]], holes: &[Vec<[f64; 2]>], strategy: Strategy) -> Vec<SimplePolygon> {
    let polygons = decompose_polygon(outer, holes, strategy, 0.).expect("Decomposition failed");
    assert!(!polygons.is_empty());

    let expected = util::ring_area(outer) - holes.iter().map(|h| util::ring_area(h)).sum::<f64>();
    let total: f64 = polygons.iter().map(|p| p.area()).sum();
    assert_relative_eq!(total, expected, max_relative = 1e-9);

    for polygon in &polygons {
        assert!(polygon.len() >= 3);
        assert!(polygon.area() > 0., "polygon is not counter-clockwise: {:?}", polygon);
        for (p, source) in polygon.points().iter().zip(polygon.sources()) {
            let ring = if source.ring == 0 { outer } else { &holes[source.ring - 1][..] };
            assert_eq!(*p, Point2D::from(ring[source.index]));
        }
    }
    assert_eq!(util::crossing_edges(&polygons), 0);

    // Every hole is reached by some bridge
    for ring in 1..=holes.len() {
        assert!(polygons.iter().any(|p| p.sources().iter().any(|s| s.ring == ring)), "hole {} is not connected", ring);
    }

    polygons
}

#[test]
fn square_with_square_hole() {
    let outer = util::square(0., 0., 10.);
    let hole = vec![[4., 4.], [4., 6.], [6., 6.], [6., 4.]];
    let polygons = check(&outer, &[hole], Strategy::Basic);
    assert_eq!(polygons.len(), 1);
    assert_relative_eq!(polygons[0].area(), 96.);
    // Four outer points, four hole points and both bridge ends twice
    assert_eq!(polygons[0].len(), 10);
}

#[test]
fn square_with_square_hole_delaunay() {
    let outer = util::square(0., 0., 10.);
    let hole = util::square(4., 4., 2.);
    let polygons = check(&outer, &[hole], Strategy::Delaunay);
    assert_eq!(polygons.len(), 1);
}

#[test]
fn no_holes() {
    let outer = util::regular_polygon(12, 5.);
    for strategy in STRATEGIES {
        let polygons = check(&outer, &[], strategy);
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].len(), 12);
    }
}

#[test]
fn clockwise_outer_and_closed_rings() {
    let mut outer = util::square(0., 0., 10.);
    outer.reverse();
    outer.push(outer[0]);
    let mut hole = util::square(2., 3., 3.);
    hole.push(hole[0]);
    for strategy in STRATEGIES {
        check(&outer, &[hole.clone()], strategy);
    }
}

#[test]
fn two_distant_holes() {
    let outer = util::square(0., 0., 20.);
    let holes = vec![util::square(3., 3., 2.), util::square(15., 15., 2.)];
    for strategy in STRATEGIES {
        let polygons = check(&outer, &holes, strategy);
        let total: f64 = polygons.iter().map(|p| p.area()).sum();
        assert_relative_eq!(total, 392., max_relative = 1e-9);
    }
}

#[test]
fn two_distant_holes_drop_either() {
    let outer = util::square(0., 0., 20.);
    let holes = vec![util::square(3., 3., 2.), util::square(15., 15., 2.)];
    for strategy in STRATEGIES {
        for dropped in 0..holes.len() {
            let remaining: Vec<Vec<[f64; 2]>> = holes.iter().enumerate()
                .filter(|(i, _)| *i != dropped)
                .map(|(_, h)| h.clone())
                .collect();
            let polygons = check(&outer, &remaining, strategy);
            let total: f64 = polygons.iter().map(|p| p.area()).sum();
            assert_relative_eq!(total, 396., max_relative = 1e-9);
        }
    }
}

#[test]
fn grid_of_holes() {
    for cells in 2..=4 {
        let (outer, holes) = util::grid_of_holes(cells);
        for strategy in STRATEGIES {
            check(&outer, &holes, strategy);
        }
    }
}

#[test]
fn holes_in_a_row() {
    // Bridges between neighboring holes run along the holes' bottom edges
    let outer = util::square(0., 0., 40.);
    let holes: Vec<Vec<[f64; 2]>> = (0..4).map(|i| util::square(5. + 8. * i as f64, 19., 2.)).collect();
    for strategy in STRATEGIES {
        check(&outer, &holes, strategy);
    }
}

#[test]
fn concave_outer() {
    // U shape with a hole in each arm
    let outer = vec![[0., 0.], [30., 0.], [30., 30.], [20., 30.], [20., 10.], [10., 10.], [10., 30.], [0., 30.]];
    let holes = vec![util::square(3., 15., 4.), util::square(23., 15., 4.)];
    for strategy in STRATEGIES {
        check(&outer, &holes, strategy);
    }
}

#[test]
fn large_coordinates() {
    // Projected coordinates far from the origin
    let (x, y) = (500_000., 5_400_000.);
    let outer = util::square(x, y, 1000.);
    let holes = vec![util::square(x + 100., y + 100., 50.), util::square(x + 700., y + 600., 80.)];
    for strategy in STRATEGIES {
        check(&outer, &holes, strategy);
    }
}

#[test]
fn generic_vertices() {
    let outer = vec![util::VTest::new(0., 0.), (10., 0.).into(), (10., 10.).into(), (0., 10.).into()];
    let hole = vec![(4f32, 4f32), (6., 4.), (6., 6.), (4., 6.)];
    let polygons = Decomposer::new(Strategy::Basic).decompose(&outer, &[hole]).expect("Decomposition failed");
    assert_relative_eq!(polygons.iter().map(|p| p.area()).sum::<f64>(), 96.);
}

#[test]
fn coord_shift_coarsens_grid() {
    let outer = util::square(0., 0., 10.);
    let hole = util::square(4.001, 4.001, 2.);
    let polygons = Decomposer::new(Strategy::Basic).coord_shift(0.01).decompose(&outer, &[hole]).expect("Decomposition failed");
    // Output keeps the input coordinates
    assert!(polygons[0].points().iter().any(|p| p.x == 4.001));
}

#[test]
fn settings_are_honored() {
    let (outer, holes) = util::grid_of_holes(3);
    let settings = Settings {
        leaf_size: 1,
        split_rebuild_threshold: 0,
        ..Settings::default()
    };
    for strategy in STRATEGIES {
        let polygons = Decomposer::new(strategy).settings(settings.clone()).decompose(&outer, &holes).expect("Decomposition failed");
        assert_eq!(util::crossing_edges(&polygons), 0);
    }
}

#[test]
fn cancelled() {
    let outer = util::square(0., 0., 10.);
    let hole = util::square(4., 4., 2.);
    let settings = Settings::default().with_cancel(Arc::new(AtomicBool::new(true)));
    for strategy in STRATEGIES {
        match Decomposer::new(strategy).settings(settings.clone()).decompose(&outer, &[hole.clone()]) {
            Err(DecompositionError::Cancelled) => {}
            other => panic!("Unexpected result {:?}", other),
        }
    }
}

#[test]
fn keyhole_polygons_triangulate() {
    let outer = util::square(0., 0., 10.);
    let hole = util::square(4., 4., 2.);
    let polygons = decompose_polygon(&outer, &[hole], Strategy::Basic, 0.).expect("Decomposition failed");
    let mesh = crate::triangulate(&polygons[0]).expect("Triangulation failed");
    assert_eq!(mesh.len(), polygons[0].len() - 2);
    assert_relative_eq!(mesh.area(), 96.);
}
