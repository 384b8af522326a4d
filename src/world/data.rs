//! Decoded chunk payload handed to the manager

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::world::biome::BiomeSource;
use crate::world::block::{BlockSectionData, BlockState};
use crate::world::position::{InChunkPosition, SectionHeight};

/// Blocks and biomes received for one column.
///
/// Only supplied sections are merged; heights missing from `sections` are
/// left untouched unless the update replaces the whole chunk.
#[derive(Clone, Debug, Default)]
pub struct ChunkData {
    pub biome_source: Option<Arc<dyn BiomeSource>>,
    pub sections: BTreeMap<SectionHeight, BlockSectionData>,
}

impl ChunkData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_biome_source(mut self, source: Arc<dyn BiomeSource>) -> Self {
        self.biome_source = Some(source);
        self
    }

    pub fn with_section(mut self, height: SectionHeight, blocks: BlockSectionData) -> Self {
        self.sections.insert(height, blocks);
        self
    }

    /// Store one block, creating the section container if needed
    pub fn set_block(&mut self, position: InChunkPosition, state: Option<BlockState>) {
        self.sections
            .entry(position.section_height())
            .or_default()
            .set(position.in_section_position(), state);
    }

    pub fn is_empty(&self) -> bool {
        self.biome_source.is_none() && self.sections.is_empty()
    }
}
