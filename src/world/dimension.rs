//! Vertical extent of a world

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::world::position::{SectionHeight, SECTION_SIZE};

/// Tallest supported column in blocks
pub const MAX_HEIGHT: i32 = 4064;
/// Lowest supported `min_y`
pub const MIN_Y: i32 = -2032;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionProperties {
    /// Lowest block y, multiple of 16
    pub min_y: i32,
    /// Column height in blocks, multiple of 16
    pub height: i32,
}

impl Default for DimensionProperties {
    fn default() -> Self {
        Self { min_y: -64, height: 384 }
    }
}

impl DimensionProperties {
    pub fn min_section(&self) -> SectionHeight {
        self.min_y >> 4
    }

    pub fn max_section(&self) -> SectionHeight {
        self.min_section() + self.sections() - 1
    }

    /// Number of sections per column
    pub fn sections(&self) -> i32 {
        self.height / SECTION_SIZE
    }

    pub fn max_y(&self) -> i32 {
        self.min_y + self.height - 1
    }

    pub fn is_valid_height(&self, height: SectionHeight) -> bool {
        (self.min_section()..=self.max_section()).contains(&height)
    }

    pub fn is_valid_block_y(&self, y: i32) -> bool {
        (self.min_y..=self.max_y()).contains(&y)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_y % SECTION_SIZE != 0 {
            return Err(Error::InvalidDimension(format!("min_y {} is not a multiple of 16", self.min_y)));
        }
        if self.height <= 0 || self.height % SECTION_SIZE != 0 {
            return Err(Error::InvalidDimension(format!(
                "height {} must be a positive multiple of 16",
                self.height
            )));
        }
        if self.height > MAX_HEIGHT || self.min_y < MIN_Y || self.max_y() > MIN_Y + MAX_HEIGHT - 1 {
            return Err(Error::InvalidDimension(format!(
                "{}..{} exceeds the supported range",
                self.min_y,
                self.max_y()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overworld_sections() {
        let dimension = DimensionProperties::default();
        assert_eq!(dimension.min_section(), -4);
        assert_eq!(dimension.sections(), 24);
        assert_eq!(dimension.max_section(), 19);
        assert_eq!(dimension.max_y(), 319);
        assert!(dimension.validate().is_ok());
    }

    #[test]
    fn test_valid_height() {
        let dimension = DimensionProperties { min_y: 0, height: 256 };
        assert!(dimension.is_valid_height(0));
        assert!(dimension.is_valid_height(15));
        assert!(!dimension.is_valid_height(16));
        assert!(!dimension.is_valid_height(-1));
        assert!(dimension.is_valid_block_y(255));
        assert!(!dimension.is_valid_block_y(256));
    }

    #[test]
    fn test_validate() {
        assert!(DimensionProperties { min_y: 8, height: 256 }.validate().is_err());
        assert!(DimensionProperties { min_y: 0, height: 0 }.validate().is_err());
        assert!(DimensionProperties { min_y: 0, height: 100 }.validate().is_err());
        assert!(DimensionProperties { min_y: 0, height: 8192 }.validate().is_err());
        assert!(DimensionProperties { min_y: -2032, height: 4064 }.validate().is_ok());
    }
}
