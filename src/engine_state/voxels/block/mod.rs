//! # Block Module
//!
//! This module provides the block-related definitions for the voxel world:
//! block type IDs, the opacity predicate used by face culling, block faces,
//! and the per-face texture naming consumed by the texture atlas.

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is the unit stored in sub-chunk buffers and in persisted chunk records.
pub type BlockTypeSize = u8;

/// The ID of air, the only transparent block.
pub const AIR: BlockTypeSize = BlockType::AIR as BlockTypeSize;

/// Texture names of a block's faces.
///
/// Most blocks look the same from every side; a few (grass) carry a
/// separate texture per face, indexed by `BlockSide as usize`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockTextures {
    /// One texture on all six faces.
    Uniform(&'static str),
    /// One texture per face, in `BlockSide` order.
    PerFace([&'static str; 6]),
}

impl BlockTextures {
    /// Resolves the texture name for one face.
    pub fn for_side(&self, side: BlockSide) -> &'static str {
        match self {
            BlockTextures::Uniform(name) => name,
            BlockTextures::PerFace(names) => names[side as usize],
        }
    }
}

/// Whether a raw block ID occludes its neighbours.
///
/// Any non-zero ID counts as opaque, including IDs that do not name a known
/// [`BlockType`]; only air lets faces through.
#[inline]
pub fn is_opaque(block: BlockTypeSize) -> bool {
    block != AIR
}

/// The texture name of one face of a raw block ID, if it has one.
pub fn texture_name(block: BlockTypeSize, side: BlockSide) -> Option<&'static str> {
    BlockType::from_int(block).and_then(|block_type| block_type.texture_name(side))
}
