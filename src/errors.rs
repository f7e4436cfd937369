use std::{collections::TryReserveError, error, fmt};

use backtrace::Backtrace;

/// A broken internal invariant (or a precondition the input silently violated,
/// such as self-intersecting rings), with the location it was detected at.
#[derive(Debug)]
pub struct InternalError {
    pub msg: String,
    pub backtrace: Backtrace,
}

impl InternalError {
    #[cold]
    #[inline(always)]
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            backtrace: Backtrace::new_unresolved(),
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{:?}", self.msg, self.backtrace)
    }
}

impl error::Error for InternalError { }

/// Describes why a spatial tree could not be built. The tree is left empty.
#[derive(Debug)]
#[non_exhaustive]
pub enum TreeBuildError {
    /// No items were provided
    Empty,
    /// Node or index storage could not be reserved
    Allocation(TryReserveError),
}

impl error::Error for TreeBuildError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Allocation(error) => Some(error),
            Self::Empty => None,
        }
    }
}

impl fmt::Display for TreeBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Tree input contains no items"),
            Self::Allocation(error) => write!(f, "Tree allocation failed: {}", error),
        }
    }
}

impl From<TryReserveError> for TreeBuildError {
    fn from(e: TryReserveError) -> Self {
        Self::Allocation(e)
    }
}

/// Describes an error which occurred during polygon decomposition
#[derive(Debug)]
#[non_exhaustive]
pub enum DecompositionError {
    /// A ring has fewer than 3 distinct vertices. `ring` is 0 for the outer ring, `i + 1` for inner ring `i`.
    NotEnoughVertices { ring: usize, vertices: usize },
    /// A ring has zero area, or non-finite coordinates
    DegenerateRing { ring: usize },
    /// Internal buffers could not be sized
    Allocation(TryReserveError),
    /// No valid non-crossing bridge could be found to connect the ring
    NoBridge { ring: usize },
    /// The output rings do not cover the input area
    AreaMismatch { expected: f64, actual: f64 },
    /// The caller's cancellation flag was raised
    Cancelled,
    /// A decomposition invariant was violated, most likely caused by self-intersecting or overlapping rings
    InternalError(InternalError),
}

impl error::Error for DecompositionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Allocation(error) => Some(error),
            Self::InternalError(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for DecompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughVertices { ring, vertices } => write!(f, "Ring {} only contains {} distinct vertices", ring, vertices),
            Self::DegenerateRing { ring } => write!(f, "Ring {} is degenerate", ring),
            Self::Allocation(error) => write!(f, "Allocation failed: {}", error),
            Self::NoBridge { ring } => write!(f, "No valid bridge found for ring {}", ring),
            Self::AreaMismatch { expected, actual } => write!(f, "Decomposed area {} does not match the polygon area {}", actual, expected),
            Self::Cancelled => write!(f, "Decomposition cancelled"),
            Self::InternalError(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl From<InternalError> for DecompositionError {
    fn from(e: InternalError) -> Self {
        Self::InternalError(e)
    }
}

impl From<TryReserveError> for DecompositionError {
    fn from(e: TryReserveError) -> Self {
        Self::Allocation(e)
    }
}

impl From<TreeBuildError> for DecompositionError {
    fn from(e: TreeBuildError) -> Self {
        match e {
            TreeBuildError::Allocation(error) => Self::Allocation(error),
            TreeBuildError::Empty => Self::InternalError(InternalError::new("Attempted to index an empty ring")),
        }
    }
}

/// Describes an error which occurred during triangulation
#[derive(Debug)]
#[non_exhaustive]
pub enum TriangulationError {
    /// The polygon has fewer than 3 distinct vertices
    NotEnoughVertices(usize),
    /// The polygon has zero area, or non-finite coordinates
    DegenerateRing,
    /// Internal buffers could not be sized
    Allocation(TryReserveError),
    /// No ear could be clipped with `remaining` vertices left; the polygon is self-intersecting or degenerate
    NoEar { remaining: usize },
    /// The caller's cancellation flag was raised
    Cancelled,
    /// A triangulation invariant was violated
    InternalError(InternalError),
}

impl error::Error for TriangulationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Allocation(error) => Some(error),
            Self::InternalError(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughVertices(vertices) => write!(f, "Polygon only contains {} distinct vertices", vertices),
            Self::DegenerateRing => write!(f, "Polygon is degenerate"),
            Self::Allocation(error) => write!(f, "Allocation failed: {}", error),
            Self::NoEar { remaining } => write!(f, "No ear found with {} vertices remaining", remaining),
            Self::Cancelled => write!(f, "Triangulation cancelled"),
            Self::InternalError(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl From<InternalError> for TriangulationError {
    fn from(e: InternalError) -> Self {
        Self::InternalError(e)
    }
}

impl From<TryReserveError> for TriangulationError {
    fn from(e: TryReserveError) -> Self {
        Self::Allocation(e)
    }
}

impl From<TreeBuildError> for TriangulationError {
    fn from(e: TreeBuildError) -> Self {
        match e {
            TreeBuildError::Allocation(error) => Self::Allocation(error),
            TreeBuildError::Empty => Self::NotEnoughVertices(0),
        }
    }
}
