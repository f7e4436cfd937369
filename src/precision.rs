use crate::{BoundingBox2D, Point2D, math::decimal_exponent};

/// Maps input coordinates onto an integer grid where orientation tests are exact.
///
/// Points are re-centered on the center of the input bounding box and scaled by a
/// power of ten so the largest extent keeps `significant_digits` digits, then
/// rounded. All cross products of coordinate differences on that grid stay
/// below 2^53.
///
/// Predicates are exact on the grid, not on the input. A vertex closer to a bridge
/// than one grid step (`1 / scale` input units) can be rounded onto the other
/// side of it, so output edges may graze or cross each other by less than that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecisionAdjuster {
    center: Point2D,
    scale: f64,
}

impl PrecisionAdjuster {
    /// `coord_shift`, when positive, is the rounding quantum in input units.
    /// It can only make the grid coarser than the automatic one.
    pub fn new(bbox: &BoundingBox2D, significant_digits: u32, coord_shift: f64) -> Self {
        if bbox.is_empty() {
            return Self { center: Point2D::zero(), scale: 1.0 };
        }

        let center = bbox.center();
        let extent = bbox.width().max(bbox.height());
        let mut scale = if extent > 0.0 && extent.is_finite() {
            10f64.powi(decimal_exponent(extent, significant_digits.clamp(1, 15)))
        } else {
            1.0
        };
        if coord_shift > 0.0 && coord_shift.is_finite() {
            scale = scale.min(1.0 / coord_shift);
        }

        Self { center, scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn center(&self) -> Point2D {
        self.center
    }

    /// Input coordinates to grid coordinates
    #[inline]
    pub fn adjust(&self, p: Point2D) -> Point2D {
        let q = (p - self.center) * self.scale;
        Point2D::new(q.x.round(), q.y.round())
    }

    /// Grid coordinates back to (approximate) input coordinates
    #[inline]
    pub fn restore(&self, p: Point2D) -> Point2D {
        p / self.scale + self.center
    }
}
