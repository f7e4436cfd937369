use crate::errors::DecompositionError;

use super::state::DecompositionState;

impl<'a> DecompositionState<'a> {
    /// Connect every hole to the outer ring with the fewest bridges the outward scan finds.
    ///
    /// Holes are visited by the x coordinate of their leftmost point; a hole already
    /// reached through an earlier chain is skipped.
    pub fn decompose_basic(&mut self) -> Result<(), DecompositionError> {
        for hole in self.topo.holes_by_leftmost() {
            self.connect_ring(hole, false)?;
        }

        #[cfg(feature = "debugging")]
        self.advance_step();

        Ok(())
    }
}
