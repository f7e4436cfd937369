use std::fmt;

use super::Point2D;

/// An axis-aligned bounding box.
///
/// A freshly created box is empty (`min` is `+∞`, `max` is `-∞`); once a point
/// has been appended, `min.x <= max.x && min.y <= max.y` holds.
#[derive(Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    /// Lower-left corner
    pub min: Point2D,
    /// Upper-right corner
    pub max: Point2D,
}

impl Default for BoundingBox2D {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for BoundingBox2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "BoundingBox2D(empty)")
        } else {
            write!(f, "BoundingBox2D[{} - {}]", self.min, self.max)
        }
    }
}

impl BoundingBox2D {
    pub const fn empty() -> Self {
        Self {
            min: Point2D::new(f64::INFINITY, f64::INFINITY),
            max: Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Box spanned by two arbitrary corners
    pub fn new(a: Point2D, b: Point2D) -> Self {
        Self {
            min: Point2D::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2D::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_point(p: Point2D) -> Self {
        Self { min: p, max: p }
    }

    pub fn from_points<I: IntoIterator<Item=Point2D>>(points: I) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.append(p);
        }
        bbox
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    #[inline]
    pub fn append(&mut self, p: Point2D) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    #[inline]
    pub fn append_box(&mut self, other: &Self) {
        if !other.is_empty() {
            self.append(other.min);
            self.append(other.max);
        }
    }

    /// Union of two boxes
    pub fn union(&self, other: &Self) -> Self {
        let mut result = *self;
        result.append_box(other);
        result
    }

    #[inline]
    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.x - self.min.x }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.y - self.min.y }
    }

    /// Area of the box, zero for empty and degenerate boxes
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point2D {
        Point2D::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    /// The box grown by `margin` on every side
    pub fn extent(&self, margin: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            min: Point2D::new(self.min.x - margin, self.min.y - margin),
            max: Point2D::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// 0 if the box is at least as wide as tall, 1 otherwise
    pub fn longest_axis(&self) -> usize {
        if self.width() >= self.height() { 0 } else { 1 }
    }

    /// Longest side length
    pub fn size(&self) -> f64 {
        self.width().max(self.height())
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Inclusive overlap test; boxes touching along an edge intersect
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty()
            && self.min.x <= other.max.x && other.min.x <= self.max.x
            && self.min.y <= other.max.y && other.min.y <= self.max.y
    }

    /// Squared distance from `p` to the closest point of the box; zero inside
    #[inline]
    pub fn distance_squared(&self, p: Point2D) -> f64 {
        if self.is_empty() {
            return f64::INFINITY;
        }
        let dx = (self.min.x - p.x).max(0.0).max(p.x - self.max.x);
        let dy = (self.min.y - p.y).max(0.0).max(p.y - self.max.y);
        dx * dx + dy * dy
    }

    /// Distance from `p` to the closest point of the box; zero inside
    pub fn distance(&self, p: Point2D) -> f64 {
        self.distance_squared(p).sqrt()
    }
}
