//! # Sub-Chunk Module
//!
//! A sub-chunk is a dense 16x16x16 cube of block IDs, the leaf storage unit of
//! the world. Sixteen of them stacked vertically make up a [`super::chunk::Chunk`].
//!
//! Each sub-chunk caches its own mesh together with a dirty flag. The flag is
//! set by every write and cleared only by [`SubChunk::rebuild_mesh`], so a
//! clean sub-chunk's mesh always reflects its current blocks.
//!
//! A sub-chunk does not know where it is in the world; callers supply its
//! position when they need world-space geometry.

use crate::engine_state::rendering::{
    meshing::{self, Mesh, MeshMode},
    texture::FaceTextureLookup,
};
use crate::error::programmer_error;

use super::block::{is_opaque, BlockTypeSize, AIR};

/// The dimension (width, height, depth) of a sub-chunk in blocks.
pub const SUB_CHUNK_DIMENSION: usize = 16;
/// The number of blocks in a single 2D plane of a sub-chunk.
pub const SUB_CHUNK_PLANE_SIZE: usize = SUB_CHUNK_DIMENSION * SUB_CHUNK_DIMENSION;
/// The total number of blocks in a sub-chunk.
pub const SUB_CHUNK_SIZE: usize = SUB_CHUNK_PLANE_SIZE * SUB_CHUNK_DIMENSION;

/// A dense 16x16x16 block buffer with a cached mesh.
#[derive(Clone, Debug)]
pub struct SubChunk {
    /// Block IDs stored x-fastest, then y, then z.
    blocks: Box<[BlockTypeSize; SUB_CHUNK_SIZE]>,
    /// Set whenever `mesh` may not reflect `blocks`.
    dirty: bool,
    mesh: Option<Mesh>,
}

impl Default for SubChunk {
    fn default() -> Self {
        Self::new()
    }
}

impl SubChunk {
    /// Creates a sub-chunk filled with air.
    ///
    /// A new sub-chunk has no mesh yet and therefore starts out dirty.
    pub fn new() -> Self {
        SubChunk {
            blocks: Box::new([AIR; SUB_CHUNK_SIZE]),
            dirty: true,
            mesh: None,
        }
    }

    /// Restores a sub-chunk from its persisted byte buffer.
    ///
    /// # Returns
    /// `None` if `bytes` is not exactly [`SUB_CHUNK_SIZE`] long.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let blocks: [BlockTypeSize; SUB_CHUNK_SIZE] = bytes.try_into().ok()?;
        Some(SubChunk {
            blocks: Box::new(blocks),
            dirty: true,
            mesh: None,
        })
    }

    /// The raw block buffer, in the layout used by persisted records.
    pub fn as_bytes(&self) -> &[u8] {
        &self.blocks[..]
    }

    fn index(x: usize, y: usize, z: usize) -> Option<usize> {
        if x < SUB_CHUNK_DIMENSION && y < SUB_CHUNK_DIMENSION && z < SUB_CHUNK_DIMENSION {
            Some(x + SUB_CHUNK_DIMENSION * y + SUB_CHUNK_PLANE_SIZE * z)
        } else {
            None
        }
    }

    /// Gets the block at the given local coordinates.
    ///
    /// All coordinates must be in `0..16`; anything else is a caller bug.
    pub fn get_block(&self, x: usize, y: usize, z: usize) -> BlockTypeSize {
        match Self::index(x, y, z) {
            Some(index) => self.blocks[index],
            None => {
                programmer_error!("Sub-chunk read out of range: ({}, {}, {})", x, y, z);
                AIR
            }
        }
    }

    /// Sets the block at the given local coordinates and marks the sub-chunk dirty.
    ///
    /// All coordinates must be in `0..16`; anything else is a caller bug.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, block: BlockTypeSize) {
        match Self::index(x, y, z) {
            Some(index) => {
                self.blocks[index] = block;
                self.dirty = true;
            }
            None => {
                programmer_error!("Sub-chunk write out of range: ({}, {}, {})", x, y, z);
            }
        }
    }

    /// Whether a non-air block occupies the given local coordinates.
    ///
    /// Unlike [`SubChunk::get_block`], out-of-range coordinates are expected
    /// here and simply report `false`, which lets the mesher treat the
    /// sub-chunk's edges like any other empty neighbour.
    pub fn has_block_at(&self, x: i32, y: i32, z: i32) -> bool {
        if x < 0 || y < 0 || z < 0 {
            return false;
        }
        match Self::index(x as usize, y as usize, z as usize) {
            Some(index) => is_opaque(self.blocks[index]),
            None => false,
        }
    }

    /// Whether every cell is air.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|block| *block == AIR)
    }

    /// Whether the blocks changed since the mesh was last built.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forces the next [`SubChunk::rebuild_mesh`] to regenerate the mesh.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The cached mesh, if one has been built.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Regenerates the cached mesh if the sub-chunk is dirty.
    ///
    /// # Returns
    /// `true` if a new mesh was built, `false` if the cached one was still current.
    pub fn rebuild_mesh(&mut self, textures: &dyn FaceTextureLookup, mode: MeshMode) -> bool {
        if !self.dirty {
            return false;
        }

        self.mesh = Some(meshing::culled(self, textures, mode));
        self.dirty = false;
        true
    }
}
