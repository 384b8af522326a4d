//! Bounding box over loaded chunk columns

use std::collections::BTreeMap;

use glam::IVec2;

use crate::world::position::ChunkPosition;

/// Extent of every loaded column, updated on each add and remove.
///
/// An empty world reports `size == (0, 0)` with `min` at `i32::MAX` and
/// `max` at `i32::MIN` on both axes.
#[derive(Clone, Debug, Default)]
pub struct WorldSize {
    x: BTreeMap<i32, usize>,
    z: BTreeMap<i32, usize>,
}

impl WorldSize {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, position: ChunkPosition) {
        *self.x.entry(position.x).or_default() += 1;
        *self.z.entry(position.z).or_default() += 1;
    }

    pub fn remove(&mut self, position: ChunkPosition) {
        decrement(&mut self.x, position.x);
        decrement(&mut self.z, position.z);
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.z.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn min(&self) -> IVec2 {
        IVec2::new(
            self.x.keys().next().copied().unwrap_or(i32::MAX),
            self.z.keys().next().copied().unwrap_or(i32::MAX),
        )
    }

    pub fn max(&self) -> IVec2 {
        IVec2::new(
            self.x.keys().next_back().copied().unwrap_or(i32::MIN),
            self.z.keys().next_back().copied().unwrap_or(i32::MIN),
        )
    }

    /// Number of columns spanned on each axis
    pub fn size(&self) -> IVec2 {
        if self.is_empty() {
            return IVec2::ZERO;
        }
        self.max() - self.min() + IVec2::ONE
    }
}

fn decrement(counts: &mut BTreeMap<i32, usize>, key: i32) {
    if let Some(count) = counts.get_mut(&key) {
        *count -= 1;
        if *count == 0 {
            counts.remove(&key);
        }
    }
}
