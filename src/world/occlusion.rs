//! Per-section face connectivity used to prune the visibility trace.
//!
//! Non-opaque cells of a section are flood-filled into connected regions.
//! Two faces of the section see each other when at least one region touches
//! both of them. The result is packed into 15 bits, one per unordered pair of
//! distinct faces.

use bitvec::prelude::*;

use crate::world::block::{BlockSectionData, BlockState};
use crate::world::direction::Direction;
use crate::world::position::{InSectionPosition, BLOCKS_PER_SECTION, SECTION_MAX, SECTION_SIZE};

/// Number of unordered pairs of distinct faces
pub const FACE_PAIRS: usize = Direction::COUNT * (Direction::COUNT - 1) / 2;

const ALL_OCCLUDED: u16 = (1 << FACE_PAIRS) - 1;

/// Index of the unordered face pair `{a, b}`, `a != b`
pub const fn pair_index(a: Direction, b: Direction) -> usize {
    let (low, high) = if a.index() < b.index() {
        (a.index(), b.index())
    } else {
        (b.index(), a.index())
    };
    let offset = low * (2 * Direction::COUNT - low - 1) / 2;
    offset + high - low - 1
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SectionOcclusion {
    occluded: u16,
}

impl SectionOcclusion {
    /// Nothing occluded, sight passes through freely
    pub const EMPTY: SectionOcclusion = SectionOcclusion { occluded: 0 };
    /// Every face pair blocked, e.g. a section of solid stone
    pub const FULL: SectionOcclusion = SectionOcclusion { occluded: ALL_OCCLUDED };

    /// Compute the mask for a block container
    pub fn compute(blocks: &BlockSectionData) -> Self {
        if blocks.is_empty() {
            return Self::EMPTY;
        }
        let (regions, count) = flood_fill(blocks);
        let sides = side_regions(&regions, count);

        let mut occluded = 0u16;
        for (index, a) in Direction::ALL.iter().enumerate() {
            for b in &Direction::ALL[index + 1..] {
                if !shares_region(&sides[a.index()], &sides[b.index()]) {
                    occluded |= 1 << pair_index(*a, *b);
                }
            }
        }
        Self { occluded }
    }

    /// Whether replacing `previous` with `next` in one cell can change the
    /// mask. Only full opacity takes part in the flood fill.
    pub fn is_affected_by(previous: Option<BlockState>, next: Option<BlockState>) -> bool {
        let opaque = |state: Option<BlockState>| state.is_some_and(|state| state.is_full_opaque());
        opaque(previous) != opaque(next)
    }

    /// Recompute from `blocks`, returns whether the mask changed
    pub fn recalculate(&mut self, blocks: &BlockSectionData) -> bool {
        self.replace(Self::compute(blocks))
    }

    /// Store `other`, returns whether the mask changed
    pub fn replace(&mut self, other: SectionOcclusion) -> bool {
        if *self == other {
            return false;
        }
        *self = other;
        true
    }

    /// Whether sight entering through `from` can **not** leave through `to`
    pub fn is_occluded(&self, from: Direction, to: Direction) -> bool {
        if from == to {
            return false;
        }
        self.occluded & (1 << pair_index(from, to)) != 0
    }

    pub fn bits(&self) -> u16 {
        self.occluded
    }
}

/// Label every non-opaque cell with a region id starting at 1; opaque cells stay 0
fn flood_fill(blocks: &BlockSectionData) -> (Vec<u16>, usize) {
    let mut regions = vec![0u16; BLOCKS_PER_SECTION];
    let mut stack = Vec::with_capacity(BLOCKS_PER_SECTION);
    let mut next = 0u16;

    for start in 0..BLOCKS_PER_SECTION {
        if regions[start] != 0 || blocks.is_full_opaque(start) {
            continue;
        }
        next += 1;
        regions[start] = next;
        stack.push(start);

        while let Some(index) = stack.pop() {
            let position = InSectionPosition::from_index(index);
            for direction in Direction::ALL {
                let Some(neighbour) = step(position, direction) else {
                    continue;
                };
                let neighbour = neighbour.index();
                if regions[neighbour] != 0 || blocks.is_full_opaque(neighbour) {
                    continue;
                }
                regions[neighbour] = next;
                stack.push(neighbour);
            }
        }
    }

    (regions, usize::from(next))
}

fn step(position: InSectionPosition, direction: Direction) -> Option<InSectionPosition> {
    let vector = direction.vector();
    let x = i32::from(position.x) + vector.x;
    let y = i32::from(position.y) + vector.y;
    let z = i32::from(position.z) + vector.z;
    let range = 0..SECTION_SIZE;
    if !range.contains(&x) || !range.contains(&y) || !range.contains(&z) {
        return None;
    }
    Some(InSectionPosition::new(x as u8, y as u8, z as u8))
}

/// For each face, the set of regions touching it
fn side_regions(regions: &[u16], count: usize) -> [BitVec; Direction::COUNT] {
    let mut sides: [BitVec; Direction::COUNT] = std::array::from_fn(|_| bitvec![0; count + 1]);
    let max = SECTION_MAX as u8;

    for a in 0..SECTION_SIZE as u8 {
        for b in 0..SECTION_SIZE as u8 {
            let faces = [
                (Direction::Down, InSectionPosition::new(a, 0, b)),
                (Direction::Up, InSectionPosition::new(a, max, b)),
                (Direction::North, InSectionPosition::new(a, b, 0)),
                (Direction::South, InSectionPosition::new(a, b, max)),
                (Direction::West, InSectionPosition::new(0, a, b)),
                (Direction::East, InSectionPosition::new(max, a, b)),
            ];
            for (direction, position) in faces {
                let region = usize::from(regions[position.index()]);
                if region > 0 {
                    sides[direction.index()].set(region, true);
                }
            }
        }
    }
    sides
}

fn shares_region(a: &BitVec, b: &BitVec) -> bool {
    a.iter_ones().any(|region| b[region])
}

#[cfg(test)]
mod tests {
    use super::*;

    const STONE: BlockState = BlockState::opaque(1);
    const GLASS: BlockState = BlockState::translucent(2);

    fn slab(min_y: u8, max_y: u8) -> BlockSectionData {
        let mut data = BlockSectionData::new();
        data.fill(InSectionPosition::new(0, min_y, 0), InSectionPosition::new(15, max_y, 15), Some(STONE));
        data
    }

    #[test]
    fn test_pair_indices_are_unique() {
        let mut seen = [false; FACE_PAIRS];
        for a in Direction::ALL {
            for b in Direction::ALL {
                if a == b {
                    continue;
                }
                assert_eq!(pair_index(a, b), pair_index(b, a));
                seen[pair_index(a, b)] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_empty_section_is_transparent() {
        let occlusion = SectionOcclusion::compute(&BlockSectionData::new());
        assert_eq!(occlusion, SectionOcclusion::EMPTY);
        assert!(!occlusion.is_occluded(Direction::Down, Direction::Up));
    }

    #[test]
    fn test_full_opaque_blocks_everything() {
        let occlusion = SectionOcclusion::compute(&BlockSectionData::filled(STONE));
        assert_eq!(occlusion, SectionOcclusion::FULL);
        for a in Direction::ALL {
            for b in Direction::ALL {
                assert_eq!(occlusion.is_occluded(a, b), a != b);
            }
        }
    }

    #[test]
    fn test_translucent_blocks_are_see_through() {
        let occlusion = SectionOcclusion::compute(&BlockSectionData::filled(GLASS));
        assert_eq!(occlusion, SectionOcclusion::EMPTY);
    }

    #[test]
    fn test_bottom_slab_separates_down() {
        let occlusion = SectionOcclusion::compute(&slab(0, 1));

        // Nothing reaches the bottom face
        for direction in [Direction::Up, Direction::North, Direction::South, Direction::West, Direction::East] {
            assert!(occlusion.is_occluded(Direction::Down, direction));
        }
        // The air above the slab connects the other faces
        assert!(!occlusion.is_occluded(Direction::Up, Direction::North));
        assert!(!occlusion.is_occluded(Direction::West, Direction::East));
    }

    #[test]
    fn test_wall_splits_section() {
        // Opaque plane at z = 8 splits north from south
        let mut data = BlockSectionData::new();
        data.fill(InSectionPosition::new(0, 0, 8), InSectionPosition::new(15, 15, 8), Some(STONE));
        let occlusion = SectionOcclusion::compute(&data);

        assert!(occlusion.is_occluded(Direction::North, Direction::South));
        assert!(!occlusion.is_occluded(Direction::North, Direction::Up));
        assert!(!occlusion.is_occluded(Direction::South, Direction::Down));
        assert!(!occlusion.is_occluded(Direction::West, Direction::East));
    }

    #[test]
    fn test_only_opacity_changes_affect_mask() {
        let granite = BlockState::opaque(3);
        assert!(SectionOcclusion::is_affected_by(None, Some(STONE)));
        assert!(SectionOcclusion::is_affected_by(Some(STONE), Some(GLASS)));
        assert!(!SectionOcclusion::is_affected_by(None, Some(GLASS)));
        assert!(!SectionOcclusion::is_affected_by(Some(STONE), Some(granite)));
        assert!(!SectionOcclusion::is_affected_by(Some(GLASS), None));
    }

    #[test]
    fn test_recalculate_reports_change() {
        let mut occlusion = SectionOcclusion::EMPTY;
        assert!(occlusion.recalculate(&BlockSectionData::filled(STONE)));
        assert!(!occlusion.recalculate(&BlockSectionData::filled(STONE)));
        assert!(occlusion.recalculate(&BlockSectionData::new()));
    }
}
