//! Block states and the per-section block container

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::world::position::{InSectionPosition, BLOCKS_PER_SECTION};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct BlockFlags: u8 {
        /// Fills its whole cell and blocks sight through it
        const FULL_OPAQUE = 0b0000_0001;
        const FLUID       = 0b0000_0010;
    }
}

/// Decoded block state. Air is represented as `None` by the containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    pub id: u16,
    pub flags: BlockFlags,
}

impl BlockState {
    pub const fn new(id: u16, flags: BlockFlags) -> Self {
        Self { id, flags }
    }

    /// Solid cube, e.g. stone
    pub const fn opaque(id: u16) -> Self {
        Self::new(id, BlockFlags::FULL_OPAQUE)
    }

    /// Block that lets sight through, e.g. glass or leaves
    pub const fn translucent(id: u16) -> Self {
        Self::new(id, BlockFlags::empty())
    }

    pub fn is_full_opaque(&self) -> bool {
        self.flags.contains(BlockFlags::FULL_OPAQUE)
    }
}

/// 16x16x16 block storage of one section
#[derive(Clone, PartialEq, Eq)]
pub struct BlockSectionData {
    states: Box<[Option<BlockState>]>,
    count: u16,
}

impl BlockSectionData {
    pub fn new() -> Self {
        Self {
            states: vec![None; BLOCKS_PER_SECTION].into_boxed_slice(),
            count: 0,
        }
    }

    /// Section with every cell set to `state`
    pub fn filled(state: BlockState) -> Self {
        Self {
            states: vec![Some(state); BLOCKS_PER_SECTION].into_boxed_slice(),
            count: BLOCKS_PER_SECTION as u16,
        }
    }

    pub fn get(&self, position: InSectionPosition) -> Option<BlockState> {
        self.states[position.index()]
    }

    pub fn get_index(&self, index: usize) -> Option<BlockState> {
        self.states[index]
    }

    /// Store a state and return the previous one
    pub fn set(&mut self, position: InSectionPosition, state: Option<BlockState>) -> Option<BlockState> {
        let slot = &mut self.states[position.index()];
        let previous = std::mem::replace(slot, state);
        match (previous.is_some(), state.is_some()) {
            (false, true) => self.count += 1,
            (true, false) => self.count -= 1,
            _ => {}
        }
        previous
    }

    /// Fill an inclusive box of cells
    pub fn fill(&mut self, min: InSectionPosition, max: InSectionPosition, state: Option<BlockState>) {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.set(InSectionPosition::new(x, y, z), state);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.states.fill(None);
        self.count = 0;
    }

    /// Number of non-air cells
    pub fn count(&self) -> usize {
        usize::from(self.count)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full_opaque(&self, index: usize) -> bool {
        self.states[index].is_some_and(|state| state.is_full_opaque())
    }
}

impl Default for BlockSectionData {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlockSectionData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockSectionData")
            .field("count", &self.count)
            .finish()
    }
}
