//! Terracull - chunk column management and section occlusion culling

pub mod core;
pub mod math;
pub mod world;
pub mod culling;
