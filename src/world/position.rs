//! Integer positions at block, section and chunk-column granularity

use std::fmt;
use std::ops::{Add, Sub};

use glam::{IVec2, IVec3, Vec3};

use crate::world::direction::Direction;

/// Width, height and depth of a section in blocks
pub const SECTION_SIZE: i32 = 16;
/// Blocks stored in one section
pub const BLOCKS_PER_SECTION: usize = (SECTION_SIZE * SECTION_SIZE * SECTION_SIZE) as usize;
pub const SECTION_MAX: i32 = SECTION_SIZE - 1;

/// Absolute section index along the y axis
pub type SectionHeight = i32;

/// Column coordinate (x, z) of a chunk
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPosition {
    pub x: i32,
    pub z: i32,
}

impl ChunkPosition {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chebyshev distance check used for view distance culling
    pub fn is_in_view_distance(self, view_distance: i32, center: ChunkPosition) -> bool {
        (self.x - center.x).abs() <= view_distance && (self.z - center.z).abs() <= view_distance
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.z)
    }

    /// Neighbouring column in a horizontal direction, `None` for UP/DOWN
    pub fn offset(self, direction: Direction) -> Option<ChunkPosition> {
        let vector = direction.vector();
        if vector.y != 0 {
            return None;
        }
        Some(Self::new(self.x + vector.x, self.z + vector.z))
    }
}

impl Add<IVec2> for ChunkPosition {
    type Output = ChunkPosition;

    fn add(self, rhs: IVec2) -> Self::Output {
        ChunkPosition::new(self.x + rhs.x, self.z + rhs.y)
    }
}

impl Sub for ChunkPosition {
    type Output = IVec2;

    fn sub(self, rhs: Self) -> Self::Output {
        IVec2::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl fmt::Display for ChunkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// One 16x16x16 section in section coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionPosition {
    pub x: i32,
    pub y: SectionHeight,
    pub z: i32,
}

impl SectionPosition {
    pub const fn new(x: i32, y: SectionHeight, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn of(chunk: ChunkPosition, height: SectionHeight) -> Self {
        Self { x: chunk.x, y: height, z: chunk.z }
    }

    pub fn chunk_position(self) -> ChunkPosition {
        ChunkPosition::new(self.x, self.z)
    }

    /// Minimum block corner of this section
    pub fn block_origin(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z) * SECTION_SIZE
    }

    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    pub fn from_ivec3(vector: IVec3) -> Self {
        Self::new(vector.x, vector.y, vector.z)
    }

    pub fn offset(self, direction: Direction) -> SectionPosition {
        self + direction.vector()
    }
}

impl Add<IVec3> for SectionPosition {
    type Output = SectionPosition;

    fn add(self, rhs: IVec3) -> Self::Output {
        SectionPosition::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for SectionPosition {
    type Output = IVec3;

    fn sub(self, rhs: Self) -> Self::Output {
        self.as_ivec3() - rhs.as_ivec3()
    }
}

impl fmt::Display for SectionPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Absolute block coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block containing a point (floors every component)
    pub fn from_vec3(point: Vec3) -> Self {
        let floored = point.floor();
        Self::new(floored.x as i32, floored.y as i32, floored.z as i32)
    }

    pub fn chunk_position(self) -> ChunkPosition {
        ChunkPosition::new(self.x >> 4, self.z >> 4)
    }

    pub fn section_height(self) -> SectionHeight {
        self.y >> 4
    }

    pub fn section_position(self) -> SectionPosition {
        SectionPosition::new(self.x >> 4, self.y >> 4, self.z >> 4)
    }

    pub fn in_chunk_position(self) -> InChunkPosition {
        InChunkPosition::new((self.x & SECTION_MAX) as u8, self.y, (self.z & SECTION_MAX) as u8)
    }
}

impl fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Block position relative to its chunk column; `y` stays absolute
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InChunkPosition {
    pub x: u8,
    pub y: i32,
    pub z: u8,
}

impl InChunkPosition {
    pub const fn new(x: u8, y: i32, z: u8) -> Self {
        Self { x, y, z }
    }

    pub fn section_height(self) -> SectionHeight {
        self.y >> 4
    }

    pub fn in_section_position(self) -> InSectionPosition {
        InSectionPosition::new(self.x, (self.y & SECTION_MAX) as u8, self.z)
    }

    pub fn to_block_position(self, chunk: ChunkPosition) -> BlockPosition {
        BlockPosition::new(
            chunk.x * SECTION_SIZE + i32::from(self.x),
            self.y,
            chunk.z * SECTION_SIZE + i32::from(self.z),
        )
    }
}

/// Block position inside one section, each component in 0..16
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InSectionPosition {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl InSectionPosition {
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!(x < 16 && y < 16 && z < 16);
        Self { x, y, z }
    }

    /// Storage index, y-major then z then x
    pub const fn index(self) -> usize {
        ((self.y as usize) << 8) | ((self.z as usize) << 4) | self.x as usize
    }

    pub const fn from_index(index: usize) -> Self {
        Self {
            x: (index & 0x0F) as u8,
            y: ((index >> 8) & 0x0F) as u8,
            z: ((index >> 4) & 0x0F) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_to_chunk_negative() {
        let block = BlockPosition::new(-1, -1, -17);
        assert_eq!(block.chunk_position(), ChunkPosition::new(-1, -2));
        assert_eq!(block.section_height(), -1);

        let local = block.in_chunk_position();
        assert_eq!(local, InChunkPosition::new(15, -1, 15));
        assert_eq!(local.in_section_position(), InSectionPosition::new(15, 15, 15));
        assert_eq!(local.to_block_position(block.chunk_position()), block);
    }

    #[test]
    fn test_in_section_index() {
        let position = InSectionPosition::new(3, 7, 11);
        assert_eq!(position.index(), 7 * 256 + 11 * 16 + 3);
        assert_eq!(InSectionPosition::from_index(position.index()), position);
        assert_eq!(InSectionPosition::new(15, 15, 15).index(), BLOCKS_PER_SECTION - 1);
    }

    #[test]
    fn test_view_distance() {
        let center = ChunkPosition::new(0, 0);
        assert!(ChunkPosition::new(2, -2).is_in_view_distance(2, center));
        assert!(!ChunkPosition::new(3, 0).is_in_view_distance(2, center));
    }

    #[test]
    fn test_chunk_offset() {
        let position = ChunkPosition::new(4, 1);
        assert_eq!(position.offset(Direction::South), Some(ChunkPosition::new(4, 2)));
        assert_eq!(position.offset(Direction::West), Some(ChunkPosition::new(3, 1)));
        assert_eq!(position.offset(Direction::Up), None);
    }

    #[test]
    fn test_section_of_chunk() {
        let section = SectionPosition::of(ChunkPosition::new(2, -3), 5);
        assert_eq!(section, SectionPosition::new(2, 5, -3));
        assert_eq!(section.chunk_position(), ChunkPosition::new(2, -3));
        assert_eq!(section.block_origin(), IVec3::new(32, 80, -48));
    }
}
