//! One 16x16x16 slice of a chunk column

use crate::world::block::{BlockSectionData, BlockState};
use crate::world::direction::Direction;
use crate::world::occlusion::SectionOcclusion;
use crate::world::position::{InSectionPosition, SectionHeight, SectionPosition};

#[derive(Clone, Debug)]
pub struct ChunkSection {
    pub height: SectionHeight,
    pub blocks: BlockSectionData,
    pub occlusion: SectionOcclusion,
    /// Loaded neighbour sections in [`Direction`] order
    pub neighbours: [Option<SectionPosition>; Direction::COUNT],
}

impl ChunkSection {
    pub fn new(height: SectionHeight) -> Self {
        Self::with_blocks(height, BlockSectionData::new())
    }

    pub fn with_blocks(height: SectionHeight, blocks: BlockSectionData) -> Self {
        let occlusion = SectionOcclusion::compute(&blocks);
        Self {
            height,
            blocks,
            occlusion,
            neighbours: [None; Direction::COUNT],
        }
    }

    pub fn block(&self, position: InSectionPosition) -> Option<BlockState> {
        self.blocks.get(position)
    }

    pub fn neighbour(&self, direction: Direction) -> Option<SectionPosition> {
        self.neighbours[direction.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
