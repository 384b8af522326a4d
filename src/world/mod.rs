//! Chunk columns, sections and the manager that owns them

pub mod position;
pub mod direction;
pub mod block;
pub mod biome;
pub mod occlusion;
pub mod section;
pub mod neighbours;
pub mod chunk;
pub mod data;
pub mod size;
pub mod update;
pub mod events;
pub mod manager;
pub mod dimension;

pub use position::{
    BlockPosition, ChunkPosition, InChunkPosition, InSectionPosition, SectionHeight, SectionPosition, SECTION_SIZE,
};
pub use direction::{Axis, Direction};
pub use block::{BlockFlags, BlockSectionData, BlockState};
pub use biome::{BiomeId, BiomeSource, UniformBiomeSource};
pub use occlusion::SectionOcclusion;
pub use section::ChunkSection;
pub use neighbours::{ChunkId, ChunkNeighbours};
pub use chunk::Chunk;
pub use data::ChunkData;
pub use size::WorldSize;
pub use update::WorldUpdate;
pub use events::{EventBus, EventReceiver};
pub use manager::ChunkManager;
pub use dimension::DimensionProperties;

use crate::core::config::{OcclusionConfig, WorldConfig};
use crate::core::types::Result;
use crate::culling::manager::WorldOcclusionManager;
use crate::math::frustum::SectionFrustum;

/// A dimension with its loaded chunks and the visibility state over them
#[derive(Debug)]
pub struct World {
    pub chunks: ChunkManager,
    pub occlusion: WorldOcclusionManager,
}

impl World {
    pub fn new(dimension: DimensionProperties, occlusion: OcclusionConfig) -> Result<Self> {
        occlusion.validate()?;
        let mut chunks = ChunkManager::try_new(dimension)?;
        let occlusion = WorldOcclusionManager::new(&mut chunks, occlusion);
        Ok(Self { chunks, occlusion })
    }

    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        Self::new(config.dimension, config.occlusion)
    }

    pub fn dimension(&self) -> &DimensionProperties {
        self.chunks.dimension()
    }

    pub fn view_distance(&self) -> i32 {
        self.occlusion.config().view_distance
    }

    /// Changing the distance invalidates the current visibility graph
    pub fn set_view_distance(&mut self, view_distance: i32) -> Result<()> {
        let config = OcclusionConfig {
            view_distance,
            ..*self.occlusion.config()
        };
        config.validate()?;
        self.occlusion.set_config(config);
        Ok(())
    }

    /// Re-trace visibility from `camera` if anything changed since the last call
    pub fn draw(&mut self, camera: SectionPosition, frustum: &dyn SectionFrustum) -> bool {
        self.occlusion.draw(&self.chunks, camera, frustum)
    }

    pub fn block(&self, position: BlockPosition) -> Option<BlockState> {
        self.chunks.block(position)
    }

    /// Unloaded columns and heights outside the dimension are silently ignored
    pub fn set_block(&mut self, position: BlockPosition, state: Option<BlockState>) -> bool {
        self.chunks
            .set_block(position.chunk_position(), position.in_chunk_position(), state)
    }

    pub fn is_valid_position(&self, position: BlockPosition) -> bool {
        self.dimension().is_valid_block_y(position.y)
            && position.x.abs() <= manager::MAX_CHUNK_COORDINATE * position::SECTION_SIZE
            && position.z.abs() <= manager::MAX_CHUNK_COORDINATE * position::SECTION_SIZE
    }
}
