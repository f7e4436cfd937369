//! SVG snapshots and state dumps of a running decomposition.
//!
//! Output is configured through environment variables:
//! `ROUTE_GEOMETRY_SVG_OUTPUT_PATH` (target directory, required),
//! `ROUTE_GEOMETRY_SVG_OUTPUT_LEVEL` (0 none, 1 result only, 2 major steps, 3 every bridge)
//! and `ROUTE_GEOMETRY_SVG_HIDE_LABELS`.

pub(crate) mod env;
pub(crate) mod svg;
