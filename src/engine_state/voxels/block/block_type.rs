//! # Block Type Module
//!
//! This module defines the closed set of block types in the voxel world and
//! their conversion from the compact integer IDs stored in sub-chunks.

use num_derive::FromPrimitive;

use super::{BlockSide, BlockTextures, BlockTypeSize};

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant of each variant is the block ID written into sub-chunk
/// buffers and persisted chunk records, so variants must never be reordered.
/// The `FromPrimitive` derive allows conversion back from those IDs.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space. Never meshed and never occludes a neighbour.
    AIR = 0,

    /// Solid rock, the bulk of every generated column.
    STONE = 1,

    /// A dirt block, found in the band beneath the surface.
    DIRT = 2,

    /// A grass block with different textures on top, sides and bottom.
    GRASS = 3,

    /// The unbreakable floor of the world at Y = 0.
    BEDROCK = 4,

    /// A cobblestone block, typically placed by players.
    COBBLESTONE = 5,
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Returns
    /// `None` if the ID does not name a known block type.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// The compact ID stored in block buffers.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether this block hides the faces of its neighbours.
    ///
    /// Air is the only transparent block; there is no partial transparency.
    pub fn is_opaque(self) -> bool {
        self != BlockType::AIR
    }

    /// The texture names of each face of this block, or `None` for air.
    pub fn textures(self) -> Option<BlockTextures> {
        match self {
            BlockType::AIR => None,
            BlockType::STONE => Some(BlockTextures::Uniform("stone")),
            BlockType::DIRT => Some(BlockTextures::Uniform("dirt")),
            // [TOP, BOTTOM, LEFT, RIGHT, FRONT, BACK]
            BlockType::GRASS => Some(BlockTextures::PerFace([
                "grass_top",
                "dirt",
                "grass_side",
                "grass_side",
                "grass_side",
                "grass_side",
            ])),
            BlockType::BEDROCK => Some(BlockTextures::Uniform("bedrock")),
            BlockType::COBBLESTONE => Some(BlockTextures::Uniform("cobblestone")),
        }
    }

    /// The texture name used on a single face of this block.
    pub fn texture_name(self, side: BlockSide) -> Option<&'static str> {
        self.textures().map(|textures| textures.for_side(side))
    }
}
