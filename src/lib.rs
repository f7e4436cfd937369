//! A 2D computational geometry kernel for route planning.
//!
//! Three spatial index trees ([BspTree], [BvhTree], [KdTree]) over a shared set of
//! primitives, and two engines built on them: [decompose_polygon], which splits a
//! polygon with holes into hole-free polygons, and [triangulate], which ear-clips
//! a simple polygon into a [TriangleMesh].

mod idx;
mod math;
mod precision;
mod settings;
mod primitives;
mod tree;
mod inputs;
mod outputs;
mod decompose;
mod triangulate;
mod errors;

#[cfg(feature = "debugging")]
pub(crate) mod debug;

#[cfg(any(test, feature = "benchmarking"))]
pub mod tests;

pub use errors::{DecompositionError, InternalError, TreeBuildError, TriangulationError};
pub use precision::PrecisionAdjuster;
pub use settings::Settings;
pub use primitives::*;
pub use tree::{BspTree, BvhTree, KdTree, Nearest, DEFAULT_LEAF_SIZE};
pub use inputs::*;
pub use outputs::*;
pub use decompose::{Decomposer, Strategy, decompose_polygon};
pub use triangulate::{Triangulator, triangulate};

pub use num_traits::real::Real;
