//! Chunk table with incremental neighbour maintenance

use std::collections::BTreeSet;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::world::block::BlockState;
use crate::world::chunk::Chunk;
use crate::world::data::ChunkData;
use crate::world::dimension::DimensionProperties;
use crate::world::direction::Direction;
use crate::world::events::{EventBus, EventReceiver};
use crate::world::neighbours::{ChunkId, ChunkNeighbours};
use crate::world::occlusion::SectionOcclusion;
use crate::world::position::{BlockPosition, ChunkPosition, InChunkPosition, SectionHeight, SectionPosition};
use crate::world::section::ChunkSection;
use crate::world::size::WorldSize;
use crate::world::update::WorldUpdate;

/// Largest accepted chunk coordinate on either axis (30 million blocks)
pub const MAX_CHUNK_COORDINATE: i32 = 1_875_000;

/// Owns every loaded chunk column.
///
/// Chunks live in a slot table addressed by [`ChunkId`]. Neighbour links are
/// ids into that table and are always written in pairs, so a loaded chunk
/// never points at a freed slot.
#[derive(Debug)]
pub struct ChunkManager {
    dimension: DimensionProperties,
    slots: Vec<Option<Chunk>>,
    free: Vec<u32>,
    positions: FxHashMap<ChunkPosition, ChunkId>,
    size: WorldSize,
    revision: u64,
    occlusion_revision: u64,
    events: EventBus<WorldUpdate>,
}

impl ChunkManager {
    /// Manager for a dimension that already passed
    /// [`DimensionProperties::validate`]; see [`ChunkManager::try_new`].
    pub fn new(dimension: DimensionProperties) -> Self {
        debug_assert!(dimension.validate().is_ok(), "invalid dimension {:?}", dimension);
        Self {
            dimension,
            slots: Vec::new(),
            free: Vec::new(),
            positions: FxHashMap::default(),
            size: WorldSize::new(),
            revision: 0,
            occlusion_revision: 0,
            events: EventBus::new(),
        }
    }

    pub fn try_new(dimension: DimensionProperties) -> Result<Self> {
        dimension.validate()?;
        Ok(Self::new(dimension))
    }

    pub fn dimension(&self) -> &DimensionProperties {
        &self.dimension
    }

    pub fn subscribe(&mut self) -> EventReceiver<WorldUpdate> {
        self.events.subscribe()
    }

    /// Bumped on every create, unload, data update and clear
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bumped whenever any section occlusion mask changes
    pub fn occlusion_revision(&self) -> u64 {
        self.occlusion_revision
    }

    pub fn size(&self) -> &WorldSize {
        &self.size
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, position: ChunkPosition) -> Option<&Chunk> {
        let id = *self.positions.get(&position)?;
        self.get_by_id(id)
    }

    pub fn get_by_id(&self, id: ChunkId) -> Option<&Chunk> {
        self.slots.get(id.index())?.as_ref()
    }

    pub fn contains(&self, position: ChunkPosition) -> bool {
        self.positions.contains_key(&position)
    }

    /// Loaded chunk next to `chunk` in a horizontal direction
    pub fn neighbour(&self, chunk: &Chunk, direction: Direction) -> Option<&Chunk> {
        self.get_by_id(chunk.neighbour(direction)?)
    }

    pub fn section(&self, position: SectionPosition) -> Option<&ChunkSection> {
        self.get(position.chunk_position())?.section(position.y)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.slots.iter().flatten()
    }

    pub fn block(&self, position: BlockPosition) -> Option<BlockState> {
        self.get(position.chunk_position())?
            .block(position.in_chunk_position())
    }

    /// Merge decoded data into a column, creating it when absent.
    ///
    /// With `replace` every loaded section missing from `data` is cleared.
    /// A [`WorldUpdate::ChunkData`] naming the changed heights is sent when
    /// any section actually changed.
    pub fn update(&mut self, position: ChunkPosition, data: ChunkData, replace: bool) -> Result<&Chunk> {
        check_position(position)?;
        let id = match self.positions.get(&position) {
            Some(&id) => id,
            None => self.create(position),
        };

        let ChunkData { biome_source, sections } = data;
        let mut changed = BTreeSet::new();

        if let Some(chunk) = self.chunk_mut(id) {
            if let Some(source) = biome_source {
                chunk.biome_source = Some(source);
            }
            if replace {
                for section in chunk.sections.iter_mut().flatten() {
                    if !section.is_empty() && !sections.contains_key(&section.height) {
                        section.blocks.clear();
                        changed.insert(section.height);
                    }
                }
            }
        }

        for (height, blocks) in sections {
            if !self.dimension.is_valid_height(height) {
                log::warn!("Ignoring section {} of chunk {}, outside of the dimension", height, position);
                continue;
            }
            let exists = self.section_at(id, height).is_some();
            if !exists {
                if blocks.is_empty() {
                    continue;
                }
                self.put_section(id, height);
            }
            let Some(section) = self.section_at_mut(id, height) else {
                continue;
            };
            if section.blocks == blocks {
                continue;
            }
            section.blocks = blocks;
            changed.insert(height);
        }

        if !changed.is_empty() {
            self.recalculate_occlusion(id, &changed);
            self.revision += 1;
            self.events.send(WorldUpdate::ChunkData { position, sections: changed });
        }

        self.get_by_id(id).ok_or(Error::InvalidChunkPosition(position))
    }

    /// `Some` merges without replacing, `None` unloads
    pub fn set(&mut self, position: ChunkPosition, data: Option<ChunkData>) -> Result<()> {
        match data {
            Some(data) => {
                self.update(position, data, false)?;
            }
            None => {
                self.unload(position);
            }
        }
        Ok(())
    }

    /// Remove a column and unlink it from its neighbours. Returns false when it was not loaded.
    pub fn unload(&mut self, position: ChunkPosition) -> bool {
        let Some(id) = self.positions.remove(&position) else {
            return false;
        };
        let Some(chunk) = self.slots[id.index()].take() else {
            return false;
        };
        self.free.push(id.0);
        self.size.remove(position);

        for section in chunk.sections() {
            for direction in Direction::SIDES {
                let Some(neighbour) = section.neighbour(direction) else {
                    continue;
                };
                if let Some(other) = self.section_mut(neighbour) {
                    other.neighbours[direction.inverted().index()] = None;
                }
            }
        }

        let mut former = Vec::with_capacity(ChunkNeighbours::COUNT);
        for (index, neighbour) in chunk.neighbours.iter() {
            if let Some(other) = self.chunk_mut(neighbour) {
                other.neighbours.set(ChunkNeighbours::opposite(index), None);
                former.push(other.position);
            }
        }

        self.revision += 1;
        log::debug!("Unloaded chunk {} ({} neighbours affected)", position, former.len());

        self.events.send(WorldUpdate::ChunkUnload { position });
        for neighbour in former {
            self.events.send(WorldUpdate::NeighbourSet { position: neighbour });
        }
        true
    }

    /// Drop every chunk without per-chunk events
    pub fn clear(&mut self) {
        let count = self.positions.len();
        self.slots.clear();
        self.free.clear();
        self.positions.clear();
        self.size.clear();
        self.revision += 1;
        self.occlusion_revision += 1;
        log::debug!("Cleared {} chunks", count);
    }

    /// Write one block. Unloaded columns and heights outside the dimension
    /// are ignored. Returns whether the stored state changed.
    pub fn set_block(&mut self, chunk: ChunkPosition, position: InChunkPosition, state: Option<BlockState>) -> bool {
        let Some(&id) = self.positions.get(&chunk) else {
            return false;
        };
        let height = position.section_height();
        if !self.dimension.is_valid_height(height) {
            return false;
        }
        if self.section_at(id, height).is_none() {
            if state.is_none() {
                return false;
            }
            self.put_section(id, height);
        }

        let Some(section) = self.section_at_mut(id, height) else {
            return false;
        };
        let local = position.in_section_position();
        let previous = section.blocks.set(local, state);
        if previous == state {
            return false;
        }
        let occlusion_changed = SectionOcclusion::is_affected_by(previous, state)
            && section.occlusion.recalculate(&section.blocks);

        if occlusion_changed {
            self.occlusion_revision += 1;
        }
        self.events.send(WorldUpdate::Block {
            position: position.to_block_position(chunk),
            state,
        });
        true
    }

    fn create(&mut self, position: ChunkPosition) -> ChunkId {
        let id = match self.free.pop() {
            Some(index) => ChunkId(index),
            None => {
                self.slots.push(None);
                ChunkId((self.slots.len() - 1) as u32)
            }
        };
        let mut chunk = Chunk::new(
            position,
            id,
            self.dimension.min_section(),
            self.dimension.sections() as usize,
        );

        let mut linked = Vec::with_capacity(ChunkNeighbours::COUNT);
        for (index, offset) in ChunkNeighbours::OFFSETS.iter().enumerate() {
            let Some(&other) = self.positions.get(&(position + *offset)) else {
                continue;
            };
            chunk.neighbours.set(index, Some(other));
            if let Some(neighbour) = self.chunk_mut(other) {
                neighbour.neighbours.set(ChunkNeighbours::opposite(index), Some(id));
                linked.push(neighbour.position);
            }
        }

        self.slots[id.index()] = Some(chunk);
        self.positions.insert(position, id);
        self.size.add(position);
        self.revision += 1;
        log::debug!("Created chunk {} with {} neighbours", position, linked.len());

        if !linked.is_empty() {
            self.events.send(WorldUpdate::NeighbourSet { position });
            for neighbour in linked {
                self.events.send(WorldUpdate::NeighbourSet { position: neighbour });
            }
        }
        id
    }

    fn chunk_mut(&mut self, id: ChunkId) -> Option<&mut Chunk> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    fn section_at(&self, id: ChunkId, height: SectionHeight) -> Option<&ChunkSection> {
        self.get_by_id(id)?.section(height)
    }

    fn section_at_mut(&mut self, id: ChunkId, height: SectionHeight) -> Option<&mut ChunkSection> {
        self.chunk_mut(id)?.section_mut(height)
    }

    fn section_mut(&mut self, position: SectionPosition) -> Option<&mut ChunkSection> {
        let id = *self.positions.get(&position.chunk_position())?;
        self.section_at_mut(id, position.y)
    }

    /// Chunk and height of the section next to (`id`, `height`)
    fn adjacent(&self, id: ChunkId, height: SectionHeight, direction: Direction) -> Option<(ChunkId, SectionHeight)> {
        match direction {
            Direction::Down => Some((id, height - 1)),
            Direction::Up => Some((id, height + 1)),
            _ => Some((self.get_by_id(id)?.neighbour(direction)?, height)),
        }
    }

    /// Create an empty section and link it with the loaded sections around it
    fn put_section(&mut self, id: ChunkId, height: SectionHeight) {
        let Some(chunk) = self.chunk_mut(id) else {
            return;
        };
        let Some(index) = chunk.section_index(height) else {
            return;
        };
        if chunk.sections[index].is_some() {
            return;
        }
        let position = chunk.section_position(height);
        let mut section = ChunkSection::new(height);

        for direction in Direction::ALL {
            let Some((other, other_height)) = self.adjacent(id, height, direction) else {
                continue;
            };
            let Some(neighbour) = self.section_at_mut(other, other_height) else {
                continue;
            };
            neighbour.neighbours[direction.inverted().index()] = Some(position);
            section.neighbours[direction.index()] = Some(position.offset(direction));
        }

        if let Some(chunk) = self.chunk_mut(id) {
            chunk.sections[index] = Some(section);
        }
    }

    fn recalculate_occlusion(&mut self, id: ChunkId, heights: &BTreeSet<SectionHeight>) {
        let Some(chunk) = self.chunk_mut(id) else {
            return;
        };
        let changed = chunk
            .sections
            .par_iter_mut()
            .filter_map(Option::as_mut)
            .filter(|section| heights.contains(&section.height))
            .map(|section| section.occlusion.recalculate(&section.blocks))
            .filter(|&changed| changed)
            .count();

        if changed > 0 {
            self.occlusion_revision += 1;
        }
    }
}

fn check_position(position: ChunkPosition) -> Result<()> {
    if position.x.abs() > MAX_CHUNK_COORDINATE || position.z.abs() > MAX_CHUNK_COORDINATE {
        return Err(Error::InvalidChunkPosition(position));
    }
    Ok(())
}
