//! Events emitted by the chunk manager

use std::collections::BTreeSet;

use crate::world::block::BlockState;
use crate::world::position::{BlockPosition, ChunkPosition, SectionHeight};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldUpdate {
    /// Block data of a column changed; `sections` names every changed height
    ChunkData {
        position: ChunkPosition,
        sections: BTreeSet<SectionHeight>,
    },
    ChunkUnload {
        position: ChunkPosition,
    },
    /// A neighbour of the column was loaded or unloaded
    NeighbourSet {
        position: ChunkPosition,
    },
    Block {
        position: BlockPosition,
        state: Option<BlockState>,
    },
}

impl WorldUpdate {
    /// Column the update refers to
    pub fn chunk_position(&self) -> ChunkPosition {
        match self {
            WorldUpdate::ChunkData { position, .. }
            | WorldUpdate::ChunkUnload { position }
            | WorldUpdate::NeighbourSet { position } => *position,
            WorldUpdate::Block { position, .. } => position.chunk_position(),
        }
    }

    /// Whether the neighbour graph changed, which invalidates visibility
    pub fn is_structural(&self) -> bool {
        matches!(self, WorldUpdate::ChunkUnload { .. } | WorldUpdate::NeighbourSet { .. })
    }
}
