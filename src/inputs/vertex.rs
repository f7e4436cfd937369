use std::fmt::Debug;

use num_traits::{ToPrimitive, real::Real};

use crate::Point2D;

/// A two-dimensional point.
///
/// The coordinate type must implement [num_traits::real::Real], reexported as [crate::Real].
pub trait Vertex {
    /// The type of the individual `x` and `y` coordinates
    type Coordinate: Real;

    /// The x [Vertex::Coordinate] value
    fn x(&self) -> Self::Coordinate;
    /// The y [Vertex::Coordinate] value
    fn y(&self) -> Self::Coordinate;

    /// The vertex as an `f64` point. Coordinates which cannot be represented become NaN.
    fn to_point(&self) -> Point2D {
        Point2D::new(self.x().to_f64().unwrap_or(f64::NAN), self.y().to_f64().unwrap_or(f64::NAN))
    }
}

impl<C: Debug + Real> Vertex for [C; 2] {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self[0]
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self[1]
    }
}

impl<C: Debug + Real> Vertex for (C, C) {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self.0
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self.1
    }
}

impl Vertex for Point2D {
    type Coordinate = f64;

    #[inline(always)]
    fn x(&self) -> f64 {
        self.x
    }

    #[inline(always)]
    fn y(&self) -> f64 {
        self.y
    }

    #[inline(always)]
    fn to_point(&self) -> Point2D {
        *self
    }
}

impl<V: Vertex> Vertex for &V {
    type Coordinate = V::Coordinate;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        (**self).x()
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        (**self).y()
    }
}
