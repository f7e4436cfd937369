use std::{cmp, fmt, ops};

use crate::math::{approx_cmp, approx_eq};

/// A two-dimensional point or vector.
///
/// Comparisons are epsilon-tolerant (see [crate::math::approx_eq]): two points
/// are equal when both coordinates agree within the relative tolerance, and
/// ordering is lexicographic by `x`, then `y`.
#[derive(Default, Clone, Copy)]
pub struct Point2D {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point2D {
    /// Creates a point from its coordinates
    #[inline(always)]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin
    #[inline(always)]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Coordinate along `axis` (0 = x, 1 = y)
    #[inline(always)]
    pub fn axis(&self, axis: usize) -> f64 {
        if axis == 0 { self.x } else { self.y }
    }

    #[inline(always)]
    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product; positive when `other` is counter-clockwise from `self`
    #[inline(always)]
    pub fn cross(&self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline(always)]
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    #[inline(always)]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline(always)]
    pub fn distance_squared(&self, other: Self) -> f64 {
        (*self - other).length_squared()
    }

    #[inline(always)]
    pub fn distance(&self, other: Self) -> f64 {
        (*self - other).length()
    }

    /// Direction of the vector in radians, in `(-π, π]`
    #[inline(always)]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Exact (bitwise) coordinate equality, as opposed to the tolerant [PartialEq]
    #[inline(always)]
    pub fn exact_eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Debug for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl PartialEq for Point2D {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl PartialOrd for Point2D {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(approx_cmp(self.x, other.x).then_with(|| approx_cmp(self.y, other.y)))
    }
}

impl ops::Add for Point2D {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::Sub for Point2D {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl ops::Mul<f64> for Point2D {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl ops::Div<f64> for Point2D {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl ops::Neg for Point2D {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl ops::AddAssign for Point2D {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(c: [f64; 2]) -> Self {
        Self::new(c[0], c[1])
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}
