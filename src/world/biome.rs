//! Biome lookup for a chunk column

use std::fmt;

/// Registry id of a biome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BiomeId(pub u16);

/// Supplies biomes for one chunk column.
///
/// `x` and `z` are in-chunk coordinates (0..16), `y` is absolute.
pub trait BiomeSource: Send + Sync {
    fn biome(&self, x: u8, y: i32, z: u8) -> Option<BiomeId>;
}

/// The same biome everywhere in the column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformBiomeSource(pub Option<BiomeId>);

impl BiomeSource for UniformBiomeSource {
    fn biome(&self, _x: u8, _y: i32, _z: u8) -> Option<BiomeId> {
        self.0
    }
}

impl fmt::Debug for dyn BiomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BiomeSource")
    }
}
