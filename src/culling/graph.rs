//! Result of one visibility trace

use crate::culling::position_set::SectionPositionSet;
use crate::world::position::SectionPosition;

/// Immutable snapshot of the sections reached from `origin`
#[derive(Clone, Debug)]
pub struct OcclusionGraph {
    origin: SectionPosition,
    visible: SectionPositionSet,
}

impl OcclusionGraph {
    pub fn new(origin: SectionPosition, visible: SectionPositionSet) -> Self {
        Self { origin, visible }
    }

    pub fn origin(&self) -> SectionPosition {
        self.origin
    }

    pub fn visible(&self) -> &SectionPositionSet {
        &self.visible
    }

    pub fn is_visible(&self, position: SectionPosition) -> bool {
        self.visible.contains(position)
    }

    /// Anything the trace did not reach counts as occluded
    pub fn is_occluded(&self, position: SectionPosition) -> bool {
        !self.is_visible(position)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }
}
