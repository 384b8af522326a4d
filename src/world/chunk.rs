//! A loaded chunk column

use std::sync::Arc;

use crate::world::biome::{BiomeId, BiomeSource};
use crate::world::block::BlockState;
use crate::world::direction::Direction;
use crate::world::neighbours::{ChunkId, ChunkNeighbours};
use crate::world::position::{ChunkPosition, InChunkPosition, SectionHeight, SectionPosition};
use crate::world::section::ChunkSection;

#[derive(Debug)]
pub struct Chunk {
    pub position: ChunkPosition,
    pub(crate) id: ChunkId,
    /// Indexed by `height - min_section`; `None` means nothing loaded there
    pub(crate) sections: Vec<Option<ChunkSection>>,
    pub(crate) min_section: SectionHeight,
    pub biome_source: Option<Arc<dyn BiomeSource>>,
    pub(crate) neighbours: ChunkNeighbours,
}

impl Chunk {
    pub(crate) fn new(position: ChunkPosition, id: ChunkId, min_section: SectionHeight, sections: usize) -> Self {
        Self {
            position,
            id,
            sections: (0..sections).map(|_| None).collect(),
            min_section,
            biome_source: None,
            neighbours: ChunkNeighbours::default(),
        }
    }

    pub fn id(&self) -> ChunkId {
        self.id
    }

    pub fn neighbours(&self) -> &ChunkNeighbours {
        &self.neighbours
    }

    pub fn neighbour(&self, direction: Direction) -> Option<ChunkId> {
        self.neighbours.get_direction(direction)
    }

    pub fn min_section(&self) -> SectionHeight {
        self.min_section
    }

    pub fn max_section(&self) -> SectionHeight {
        self.min_section + self.sections.len() as i32 - 1
    }

    pub(crate) fn section_index(&self, height: SectionHeight) -> Option<usize> {
        let index = usize::try_from(height - self.min_section).ok()?;
        (index < self.sections.len()).then_some(index)
    }

    pub fn section(&self, height: SectionHeight) -> Option<&ChunkSection> {
        self.section_index(height).and_then(|index| self.sections[index].as_ref())
    }

    pub(crate) fn section_mut(&mut self, height: SectionHeight) -> Option<&mut ChunkSection> {
        let index = self.section_index(height)?;
        self.sections[index].as_mut()
    }

    pub fn section_position(&self, height: SectionHeight) -> SectionPosition {
        SectionPosition::of(self.position, height)
    }

    /// Existing sections from bottom to top
    pub fn sections(&self) -> impl Iterator<Item = &ChunkSection> {
        self.sections.iter().flatten()
    }

    pub fn block(&self, position: InChunkPosition) -> Option<BlockState> {
        self.section(position.section_height())?
            .block(position.in_section_position())
    }

    pub fn biome(&self, x: u8, y: i32, z: u8) -> Option<BiomeId> {
        self.biome_source.as_ref()?.biome(x, y, z)
    }
}
