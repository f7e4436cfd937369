use super::Point2D;

/// Shoelace signed area of a closed-implicit ring; positive for counter-clockwise rings
pub fn signed_area(points: &[Point2D]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    // Relative to the first vertex to keep the products small for large coordinates
    let origin = points[0];
    let mut sum = 0.0;
    for i in 1..points.len() - 1 {
        sum += (points[i] - origin).cross(points[i + 1] - origin);
    }
    sum * 0.5
}

/// Area centroid of a ring; the vertex average for degenerate rings
pub fn centroid(points: &[Point2D]) -> Point2D {
    if points.is_empty() {
        return Point2D::zero();
    }
    let origin = points[0];
    let mut area2 = 0.0;
    let mut acc = Point2D::zero();
    for i in 1..points.len().saturating_sub(1) {
        let a = points[i] - origin;
        let b = points[i + 1] - origin;
        let cross = a.cross(b);
        area2 += cross;
        acc += (a + b) * cross;
    }
    if area2 == 0.0 {
        let mut sum = Point2D::zero();
        for p in points {
            sum += *p - origin;
        }
        origin + sum / points.len() as f64
    } else {
        origin + acc / (3.0 * area2)
    }
}

/// Area of triangle `abc`, signed by its winding
pub fn triangle_area(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    (b - a).cross(c - a) * 0.5
}
