use crate::{Strategy, triangulate};

use super::{decompose::check, util};

#[test]
// Long thin sliver of a coastline; the short edges at both ends are nearly parallel to the long ones
fn france_sliver() {
    let polygon = vec![
        [-1.189062499999949, 45.16147460937498],
        [-0.691113281249926, 45.09345703124998],
        // [-0.633984374999926, 45.04711914062497],
        // [-0.548486328124994, 45.00058593749998],
        [6.724707031250006, 44.97299804687506],
        // [6.73818359375008, 44.92138671875003],
        // [6.801074218750017, 44.883154296875034],
        // [6.88935546875004, 44.86030273437501],
        // [6.939843750000023, 44.858740234375034],
        // [6.972851562500011, 44.84501953124999],
        [6.992675781250057, 44.82729492187502],
        [-1.15288085937496, 44.764013671875006],
        // [-1.200390624999955, 44.726464843749994],
        // [-1.2203125, 44.68662109374998],
        [-1.24521484374992, 44.66669921875001],
    ];
    let mesh = triangulate(&polygon).expect("Triangulation failed");
    assert_eq!(mesh.len(), polygon.len() - 2);
}

#[test]
// Bridges along the diagonal pass exactly through the corners of the other hole
fn bridge_through_vertices() {
    let outer = util::square(0., 0., 12.);
    let holes = vec![util::square(3., 3., 2.), util::square(7., 7., 2.)];
    for strategy in [Strategy::Basic, Strategy::Delaunay] {
        check(&outer, &holes, strategy);
    }
}

#[test]
// The hole nearest to the wall shadows the one behind it, so the second chain has to run through the first
fn shadowed_hole() {
    let outer = util::square(0., 0., 20.);
    let holes = vec![
        vec![[1., 4.], [3., 4.], [3., 16.], [1., 16.]],
        util::square(5., 9., 2.),
    ];
    for strategy in [Strategy::Basic, Strategy::Delaunay] {
        check(&outer, &holes, strategy);
    }
}
