//! The eight horizontal neighbours of a chunk column

use glam::IVec2;

use crate::world::direction::Direction;

/// Handle of a chunk in the [`ChunkManager`](crate::world::manager::ChunkManager) table.
///
/// Only valid while the chunk stays loaded; slots are reused after unload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub(crate) u32);

impl ChunkId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkNeighbours {
    slots: [Option<ChunkId>; ChunkNeighbours::COUNT],
}

impl ChunkNeighbours {
    pub const COUNT: usize = 8;

    /// (x, z) offset of every slot
    pub const OFFSETS: [IVec2; Self::COUNT] = [
        IVec2::new(-1, -1),
        IVec2::new(-1, 0),
        IVec2::new(-1, 1),
        IVec2::new(0, -1),
        IVec2::new(0, 1),
        IVec2::new(1, -1),
        IVec2::new(1, 0),
        IVec2::new(1, 1),
    ];

    pub const WEST: usize = 1;
    pub const NORTH: usize = 3;
    pub const SOUTH: usize = 4;
    pub const EAST: usize = 6;

    /// Slot index for a horizontal direction
    pub const fn slot(direction: Direction) -> Option<usize> {
        match direction {
            Direction::North => Some(Self::NORTH),
            Direction::South => Some(Self::SOUTH),
            Direction::West => Some(Self::WEST),
            Direction::East => Some(Self::EAST),
            Direction::Down | Direction::Up => None,
        }
    }

    /// Slot that points back from the neighbour in slot `index`
    pub const fn opposite(index: usize) -> usize {
        Self::COUNT - 1 - index
    }

    pub fn offset_index(offset: IVec2) -> Option<usize> {
        Self::OFFSETS.iter().position(|&candidate| candidate == offset)
    }

    pub fn get(&self, index: usize) -> Option<ChunkId> {
        self.slots[index]
    }

    pub fn get_direction(&self, direction: Direction) -> Option<ChunkId> {
        Self::slot(direction).and_then(|index| self.slots[index])
    }

    pub(crate) fn set(&mut self, index: usize, id: Option<ChunkId>) {
        self.slots[index] = id;
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, ChunkId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, id)| id.map(|id| (index, id)))
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// All eight neighbours are loaded
    pub fn complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_slots_match_offsets() {
        for direction in Direction::SIDES {
            let index = ChunkNeighbours::slot(direction).unwrap();
            let vector = direction.vector();
            assert_eq!(ChunkNeighbours::OFFSETS[index], IVec2::new(vector.x, vector.z));
        }
        assert_eq!(ChunkNeighbours::slot(Direction::Up), None);
    }

    #[test]
    fn test_opposite_slot() {
        for index in 0..ChunkNeighbours::COUNT {
            let opposite = ChunkNeighbours::opposite(index);
            assert_eq!(ChunkNeighbours::OFFSETS[index] + ChunkNeighbours::OFFSETS[opposite], IVec2::ZERO);
        }
        assert_eq!(ChunkNeighbours::offset_index(IVec2::new(1, 0)), Some(ChunkNeighbours::EAST));
        assert_eq!(ChunkNeighbours::offset_index(IVec2::ZERO), None);
    }

    #[test]
    fn test_complete() {
        let mut neighbours = ChunkNeighbours::default();
        assert!(neighbours.is_empty());
        for index in 0..ChunkNeighbours::COUNT {
            assert!(!neighbours.complete());
            neighbours.set(index, Some(ChunkId(index as u32)));
        }
        assert!(neighbours.complete());
        assert_eq!(neighbours.count(), 8);
        assert_eq!(neighbours.get_direction(Direction::East), Some(ChunkId(6)));
    }
}
