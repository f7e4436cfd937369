//! Value types and predicates shared by the trees and the engines

mod point;
pub use point::Point2D;
mod bbox;
pub use bbox::BoundingBox2D;
mod line;
pub use line::{Orientation, orientation, orient, on_segment, segments_intersect, segments_cross, segments_overlap, segment_overlaps_box, point_in_triangle, point_segment_distance_squared, in_interior_wedge};
mod shape;
pub use shape::{signed_area, centroid, triangle_area};
