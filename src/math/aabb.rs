//! Axis-aligned bounding box

use crate::core::types::Vec3;
use crate::world::position::{BlockPosition, SectionPosition, SECTION_SIZE};

/// Axis-aligned bounding box defined by min and max corners, in block units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The 16x16x16 box covered by a section
    pub fn of_section(position: SectionPosition) -> Self {
        let min = position.block_origin().as_vec3();
        Self::new(min, min + Vec3::splat(SECTION_SIZE as f32))
    }

    /// Unit box of one block
    pub fn of_block(position: BlockPosition) -> Self {
        let min = Vec3::new(position.x as f32, position.y as f32, position.z as f32);
        Self::new(min, min + Vec3::ONE)
    }

    /// Inclusive range of sections the box overlaps.
    ///
    /// The max corner is exclusive, so a box ending on a section boundary
    /// does not reach into the next section.
    pub fn section_range(&self) -> (SectionPosition, SectionPosition) {
        let min = BlockPosition::from_vec3(self.min);
        let last = BlockPosition::from_vec3(self.max.ceil() - Vec3::ONE);
        let last = BlockPosition::new(last.x.max(min.x), last.y.max(min.y), last.z.max(min.z));
        (min.section_position(), last.section_position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_section() {
        let aabb = Aabb::of_section(SectionPosition::new(1, -1, 2));
        assert_eq!(aabb.min, Vec3::new(16.0, -16.0, 32.0));
        assert_eq!(aabb.max, Vec3::new(32.0, 0.0, 48.0));
    }

    #[test]
    fn test_of_block() {
        let aabb = Aabb::of_block(BlockPosition::new(-1, 5, 3));
        assert_eq!(aabb.min, Vec3::new(-1.0, 5.0, 3.0));
        assert_eq!(aabb.section_range().0, SectionPosition::new(-1, 0, 0));
    }

    #[test]
    fn test_section_range_negative() {
        let aabb = Aabb::new(Vec3::new(-0.5, 3.0, 15.9), Vec3::new(17.0, 40.0, 16.0));
        let (min, max) = aabb.section_range();
        assert_eq!(min, SectionPosition::new(-1, 0, 0));
        assert_eq!(max, SectionPosition::new(1, 2, 0));
    }

    #[test]
    fn test_section_range_stops_at_boundary() {
        let section = SectionPosition::new(1, 3, -2);
        assert_eq!(Aabb::of_section(section).section_range(), (section, section));

        let block = BlockPosition::new(31, 50, -17);
        let expected = SectionPosition::new(1, 3, -2);
        assert_eq!(Aabb::of_block(block).section_range(), (expected, expected));
    }

    #[test]
    fn test_section_range_of_flat_box() {
        let aabb = Aabb::new(Vec3::new(16.0, 32.0, 0.0), Vec3::new(16.0, 32.0, 0.0));
        let expected = SectionPosition::new(1, 2, 0);
        assert_eq!(aabb.section_range(), (expected, expected));
    }
}
