use std::cmp::Ordering;

use crate::{BoundingBox2D, Point2D, primitives::{in_interior_wedge, point_in_triangle, segment_overlaps_box, segments_cross, segments_intersect, segments_overlap}};

fn p(x: f64, y: f64) -> Point2D {
    Point2D::new(x, y)
}

#[test]
fn point_equality_is_tolerant() {
    assert_eq!(p(1., 2.), p(1. + 1e-12, 2.));
    assert!(!p(1., 2.).exact_eq(&p(1. + 1e-12, 2.)));
    // Absolute floor around zero
    assert_eq!(p(0., 0.), p(1e-13, -1e-13));
    // Relative to magnitude
    assert_eq!(p(1e9, 0.), p(1e9 + 0.5, 0.));
    assert_ne!(p(1., 2.), p(1.0001, 2.));
    assert_ne!(p(0., 0.), p(1e-6, 0.));
}

#[test]
fn point_ordering_is_lexicographic_and_tolerant() {
    assert!(p(1., 5.) < p(2., 0.));
    assert!(p(1., 1.) < p(1., 2.));
    // Equal x within tolerance falls through to y
    assert!(p(1., 1.) > p(1. + 1e-12, 0.));
    assert_eq!(p(1., 1.).partial_cmp(&p(1. + 1e-12, 1.)), Some(Ordering::Equal));
}

#[test]
fn empty_bbox() {
    let bbox = BoundingBox2D::empty();
    assert!(bbox.is_empty());
    assert_eq!(bbox.width(), 0.);
    assert_eq!(bbox.area(), 0.);
    assert!(!bbox.contains(p(0., 0.)));
    assert!(!bbox.intersects(&BoundingBox2D::new(p(-1., -1.), p(1., 1.))));
    assert_eq!(bbox.distance_squared(p(0., 0.)), f64::INFINITY);
    assert!(bbox.extent(1.).is_empty());

    let mut unit = BoundingBox2D::new(p(0., 0.), p(1., 1.));
    unit.append_box(&bbox);
    assert_eq!(unit.min, p(0., 0.));
    assert_eq!(unit.max, p(1., 1.));
}

#[test]
fn bbox_append_and_extent() {
    let mut bbox = BoundingBox2D::default();
    bbox.append(p(1., 2.));
    assert!(!bbox.is_empty());
    assert_eq!(bbox.area(), 0.);

    bbox.append(p(3., -1.));
    assert!(bbox.min.x <= bbox.max.x && bbox.min.y <= bbox.max.y);
    assert_eq!(bbox.min, p(1., -1.));
    assert_eq!(bbox.max, p(3., 2.));
    assert_eq!(bbox.area(), 6.);
    assert_eq!(bbox.longest_axis(), 1);
    assert_eq!(bbox.center(), p(2., 0.5));

    let grown = bbox.extent(1.);
    assert_eq!(grown.min, p(0., -2.));
    assert_eq!(grown.max, p(4., 3.));
    assert_eq!(grown.area(), 20.);
}

#[test]
fn bbox_queries_are_inclusive() {
    let bbox = BoundingBox2D::new(p(3., 2.), p(1., -1.));
    assert!(bbox.contains(p(3., 2.)));
    assert!(bbox.contains(p(1., 0.)));
    assert!(!bbox.contains(p(3.0001, 2.)));

    // Touching at a corner
    assert!(bbox.intersects(&BoundingBox2D::new(p(3., 2.), p(5., 5.))));
    assert!(!bbox.intersects(&BoundingBox2D::new(p(3.5, 2.), p(5., 5.))));

    assert_eq!(bbox.distance_squared(p(2., 0.)), 0.);
    assert_eq!(bbox.distance_squared(p(6., 2.)), 9.);
    assert_eq!(bbox.distance_squared(p(6., 6.)), 25.);
}

#[test]
fn segment_box_overlap() {
    let bbox = BoundingBox2D::new(p(0., 0.), p(10., 10.));
    assert!(segment_overlaps_box(p(-5., 5.), p(15., 5.), &bbox));
    assert!(segment_overlaps_box(p(2., 2.), p(3., 3.), &bbox));
    assert!(segment_overlaps_box(p(5., 5.), p(5., 5.), &bbox));
    assert!(!segment_overlaps_box(p(11., 0.), p(20., 0.), &bbox));

    // Bounding boxes overlap, but the diagonal passes the corner: only the normal axis separates
    assert!(!segment_overlaps_box(p(8., 13.), p(13., 8.), &bbox));
    // Touching the corner counts
    assert!(segment_overlaps_box(p(8., 12.), p(12., 8.), &bbox));

    assert!(!segment_overlaps_box(p(0., 0.), p(1., 1.), &BoundingBox2D::empty()));
}

#[test]
fn collinear_overlap() {
    assert!(segments_overlap(p(0., 0.), p(4., 0.), p(2., 0.), p(6., 0.)));
    assert!(segments_overlap(p(0., 0.), p(0., 4.), p(0., 3.), p(0., 1.)));
    // Sharing a single endpoint is not an overlap
    assert!(!segments_overlap(p(0., 0.), p(2., 0.), p(2., 0.), p(4., 0.)));
    assert!(!segments_overlap(p(0., 1.), p(4., 1.), p(0., 0.), p(4., 0.)));
    assert!(!segments_overlap(p(0., 0.), p(4., 4.), p(0., 4.), p(4., 0.)));
}

#[test]
fn touching_intersects_but_does_not_cross() {
    let (a, b) = (p(0., 0.), p(4., 0.));
    assert!(segments_intersect(a, b, p(2., 0.), p(2., 3.)));
    assert!(!segments_cross(a, b, p(2., 0.), p(2., 3.)));
    assert!(segments_intersect(a, b, p(2., -1.), p(2., 3.)));
    assert!(segments_cross(a, b, p(2., -1.), p(2., 3.)));
    assert!(!segments_intersect(a, b, p(5., -1.), p(5., 3.)));
}

#[test]
fn triangle_boundary_is_inside() {
    let (a, b, c) = (p(0., 0.), p(4., 0.), p(0., 4.));
    assert!(point_in_triangle(p(1., 1.), a, b, c));
    assert!(point_in_triangle(p(2., 0.), a, b, c));
    assert!(point_in_triangle(p(2., 2.), a, b, c));
    assert!(point_in_triangle(a, a, b, c));
    assert!(!point_in_triangle(p(3., 3.), a, b, c));
    assert!(!point_in_triangle(p(-0.1, 1.), a, b, c));
    // Either winding
    assert!(point_in_triangle(p(1., 1.), a, c, b));
    assert!(!point_in_triangle(p(3., 3.), a, c, b));
}

#[test]
fn interior_wedge_convex() {
    // Lower left corner of a counter-clockwise square
    let (prev, v, next) = (p(0., 1.), p(0., 0.), p(1., 0.));
    assert!(in_interior_wedge(prev, v, next, p(1., 1.)));
    assert!(!in_interior_wedge(prev, v, next, p(-1., 1.)));
    assert!(!in_interior_wedge(prev, v, next, p(-1., -1.)));
    // Along either edge
    assert!(!in_interior_wedge(prev, v, next, p(1., 0.)));
    assert!(!in_interior_wedge(prev, v, next, p(0., 1.)));
}

#[test]
fn interior_wedge_reflex() {
    // Corner of a clockwise hole; the interior is the 270 degrees outside it
    let (prev, v, next) = (p(1., 0.), p(0., 0.), p(0., 1.));
    assert!(in_interior_wedge(prev, v, next, p(-1., -1.)));
    assert!(in_interior_wedge(prev, v, next, p(-1., 1.)));
    assert!(in_interior_wedge(prev, v, next, p(1., -1.)));
    assert!(!in_interior_wedge(prev, v, next, p(1., 1.)));
}

#[test]
fn interior_wedge_straight_and_spike() {
    let (prev, v, next) = (p(-1., 0.), p(0., 0.), p(1., 0.));
    assert!(in_interior_wedge(prev, v, next, p(0., 1.)));
    assert!(in_interior_wedge(prev, v, next, p(-1., 1.)));
    assert!(!in_interior_wedge(prev, v, next, p(0., -1.)));
    assert!(!in_interior_wedge(prev, v, next, p(1., 0.)));

    // The ring doubles back on itself
    let (prev, v, next) = (p(1., 0.), p(0., 0.), p(1., 0.));
    for d in [p(0., 1.), p(0., -1.), p(-1., 0.), p(1., 0.)] {
        assert!(!in_interior_wedge(prev, v, next, d));
    }
}
