use std::sync::{Arc, atomic::{AtomicBool, Ordering}};

use crate::tree::DEFAULT_LEAF_SIZE;

/// Tuning knobs shared by the decomposition and triangulation engines
#[derive(Debug, Clone)]
pub struct Settings {
    /// Maximum number of references per tree leaf
    pub leaf_size: usize,
    /// Number of split edges added or removed since the last rebuild of the split edge index before it is rebuilt
    pub split_rebuild_threshold: usize,
    /// Polygons with at least this many vertices use a [KdTree](crate::KdTree) for ear validation
    pub kd_tree_threshold: usize,
    /// Significant decimal digits kept by the coordinate precision adjustment
    pub significant_digits: u32,
    /// Relative tolerance of the final area check
    pub area_tolerance: f64,
    /// Cooperative cancellation flag, polled during the long running loops
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            leaf_size: DEFAULT_LEAF_SIZE,
            split_rebuild_threshold: 32,
            kd_tree_threshold: 64,
            significant_digits: 7,
            area_tolerance: 1e-6,
            cancel: None,
        }
    }
}

impl Settings {
    /// Attach a cancellation flag; raising it makes the running operation return `Cancelled`
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map_or(false, |c| c.load(Ordering::Relaxed))
    }
}
