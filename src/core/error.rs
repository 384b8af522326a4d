//! Error types for terracull

use thiserror::Error;

use crate::world::position::{ChunkPosition, SectionPosition};

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("View distance {0} is outside 0..=64")]
    InvalidViewDistance(i32),

    #[error("Chunk position {0} is outside the world border")]
    InvalidChunkPosition(ChunkPosition),

    #[error("Section {position} is outside of the set bounds (offset {offset}, size {size})")]
    SectionOutOfBounds {
        position: SectionPosition,
        offset: SectionPosition,
        size: glam::IVec3,
    },
}
