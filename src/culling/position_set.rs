//! Dense bitset over a bounded box of section positions

use bitvec::prelude::*;
use glam::IVec3;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::world::position::{ChunkPosition, SectionHeight, SectionPosition};

/// Presence set over a `(2r+1) x sections x (2r+1)` box of sections.
///
/// Reads outside the box report absent. Writes outside the box are a caller
/// bug and panic; [`SectionPositionSet::try_set`] reports them instead.
#[derive(Clone, PartialEq, Eq)]
pub struct SectionPositionSet {
    bits: BitVec,
    offset: SectionPosition,
    size: IVec3,
}

impl SectionPositionSet {
    pub fn new(center: ChunkPosition, radius: i32, min_section: SectionHeight, sections: i32) -> Self {
        let offset = SectionPosition::new(center.x - radius, min_section, center.z - radius);
        let size = IVec3::new(2 * radius + 1, sections, 2 * radius + 1);
        Self::with_bounds(offset, size)
    }

    /// Box starting at `offset` spanning `size` sections on each axis
    ///
    /// # Panics
    ///
    /// If the box holds more than `i32::MAX` sections.
    pub fn with_bounds(offset: SectionPosition, size: IVec3) -> Self {
        let size = size.max(IVec3::ZERO);
        let len = (size.x as usize)
            .checked_mul(size.y as usize)
            .and_then(|len| len.checked_mul(size.z as usize))
            .filter(|&len| len <= i32::MAX as usize)
            .unwrap_or_else(|| panic!("section box {} is too large", size));
        Self {
            bits: bitvec![0; len],
            offset,
            size,
        }
    }

    pub fn offset(&self) -> SectionPosition {
        self.offset
    }

    pub fn size(&self) -> IVec3 {
        self.size
    }

    fn index(&self, position: SectionPosition) -> Option<usize> {
        let relative = position - self.offset;
        if relative.cmplt(IVec3::ZERO).any() || relative.cmpge(self.size).any() {
            return None;
        }
        let (x, y, z) = (relative.x as usize, relative.y as usize, relative.z as usize);
        let (width, depth) = (self.size.x as usize, self.size.z as usize);
        Some((y * depth + z) * width + x)
    }

    fn position(&self, index: usize) -> SectionPosition {
        let index = index as i32;
        let plane = self.size.x * self.size.z;
        let y = index / plane;
        let z = (index % plane) / self.size.x;
        let x = index % self.size.x;
        self.offset + IVec3::new(x, y, z)
    }

    /// Whether `position` lies inside the box
    pub fn in_bounds(&self, position: SectionPosition) -> bool {
        self.index(position).is_some()
    }

    pub fn contains(&self, position: SectionPosition) -> bool {
        self.index(position).is_some_and(|index| self.bits[index])
    }

    pub fn try_set(&mut self, position: SectionPosition, value: bool) -> Result<()> {
        let index = self.index(position).ok_or(Error::SectionOutOfBounds {
            position,
            offset: self.offset,
            size: self.size,
        })?;
        self.bits.set(index, value);
        Ok(())
    }

    /// # Panics
    ///
    /// If `position` is outside the box.
    pub fn set(&mut self, position: SectionPosition, value: bool) {
        let Some(index) = self.index(position) else {
            panic!(
                "index out of bounds: section {} outside of {} + {}",
                position, self.offset, self.size
            );
        };
        self.bits.set(index, value);
    }

    pub fn insert(&mut self, position: SectionPosition) {
        self.set(position, true);
    }

    pub fn remove(&mut self, position: SectionPosition) {
        self.set(position, false);
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    pub fn iter(&self) -> impl Iterator<Item = SectionPosition> + '_ {
        self.bits.iter_ones().map(|index| self.position(index))
    }
}

impl std::fmt::Debug for SectionPositionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionPositionSet")
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> SectionPositionSet {
        SectionPositionSet::new(ChunkPosition::new(0, 0), 1, -1, 3)
    }

    #[test]
    fn test_bounds() {
        let set = set();
        assert_eq!(set.offset(), SectionPosition::new(-1, -1, -1));
        assert_eq!(set.size(), IVec3::new(3, 3, 3));
        assert!(set.is_empty());
    }

    #[test]
    fn test_insert_remove() {
        let mut set = set();
        for x in -1..=1 {
            for z in -1..=1 {
                set.insert(SectionPosition::new(x, 0, z));
            }
        }
        assert_eq!(set.len(), 9);
        assert!(set.contains(SectionPosition::new(1, 0, -1)));
        assert!(!set.contains(SectionPosition::new(1, 1, -1)));

        set.remove(SectionPosition::new(1, 0, -1));
        assert!(!set.contains(SectionPosition::new(1, 0, -1)));
        assert_eq!(set.len(), 8);
    }

    #[test]
    fn test_contains_out_of_bounds() {
        let set = set();
        assert!(!set.contains(SectionPosition::new(5, 0, 0)));
        assert!(!set.contains(SectionPosition::new(0, 2, 0)));
        assert!(!set.contains(SectionPosition::new(0, -2, 0)));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_set_out_of_bounds_panics() {
        let mut set = set();
        set.set(SectionPosition::new(5, 0, 0), true);
    }

    #[test]
    fn test_try_set_out_of_bounds() {
        let mut set = set();
        let result = set.try_set(SectionPosition::new(5, 0, 0), true);
        assert!(matches!(result, Err(Error::SectionOutOfBounds { .. })));
        assert!(set.try_set(SectionPosition::new(1, 1, 1), true).is_ok());
        assert!(set.contains(SectionPosition::new(1, 1, 1)));
    }

    #[test]
    fn test_index_layout() {
        let set = set();
        // y major, then z, then x
        assert_eq!(set.index(SectionPosition::new(-1, -1, -1)), Some(0));
        assert_eq!(set.index(SectionPosition::new(0, -1, -1)), Some(1));
        assert_eq!(set.index(SectionPosition::new(-1, -1, 0)), Some(3));
        assert_eq!(set.index(SectionPosition::new(-1, 0, -1)), Some(9));
        assert_eq!(set.index(SectionPosition::new(1, 1, 1)), Some(26));
    }

    #[test]
    #[should_panic(expected = "too large")]
    fn test_oversized_box_panics() {
        SectionPositionSet::with_bounds(SectionPosition::new(0, 0, 0), IVec3::new(40_001, 26, 40_001));
    }

    #[test]
    fn test_large_box_indexes_without_overflow() {
        // 257 x 256 x 257 sections, past i16 but well inside i32
        let mut set = SectionPositionSet::new(ChunkPosition::new(0, 0), 128, -128, 256);
        let corner = SectionPosition::new(128, 127, 128);
        set.insert(corner);
        assert!(set.contains(corner));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![corner]);
    }

    #[test]
    fn test_iter() {
        let mut set = SectionPositionSet::new(ChunkPosition::new(10, -4), 2, 3, 4);
        let positions = [SectionPosition::new(8, 3, -6), SectionPosition::new(12, 6, -2), SectionPosition::new(10, 4, -4)];
        for position in positions {
            set.insert(position);
        }
        let mut found: Vec<_> = set.iter().collect();
        found.sort();
        let mut expected = positions.to_vec();
        expected.sort();
        assert_eq!(found, expected);
    }
}
