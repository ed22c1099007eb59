use cgmath::Point3;

use crate::engine_state::{
    rendering::texture::FaceTextureLookup,
    voxels::block::{block_side::BlockSide, BlockTypeSize},
};

/// Represents a single visible quad face of a voxel cell.
///
/// A face is identified by the cell it belongs to and the side of that cell.
/// Its geometry follows from the fixed corner pattern of the side; no two
/// faces are ever merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Minimum corner of the owning cell in sub-chunk coordinates
    pub cell: Point3<usize>,
    /// The block type as an integer, keys the texture lookup in [`Face::uvs`]
    pub block_type_int: BlockTypeSize,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a new face for a voxel at the given coordinates.
    ///
    /// # Arguments
    /// * `i`, `j`, `k` - The coordinates of the voxel in sub-chunk space
    /// * `block_type_int` - The type of the block, used for texture mapping
    /// * `block_side` - Which side of the block this face represents
    pub fn new(
        i: usize,
        j: usize,
        k: usize,
        block_type_int: BlockTypeSize,
        block_side: BlockSide,
    ) -> Self {
        Face {
            cell: Point3::new(i, j, k),
            block_type_int,
            block_side,
        }
    }

    /// The four corner positions of this face in sub-chunk space.
    ///
    /// Corners are counter-clockwise seen from outside the cell, starting at the
    /// bottom-left of the texture.
    pub fn positions(&self) -> [[f32; 3]; 4] {
        self.block_side.corners().map(|corner| {
            [
                (self.cell.x + corner[0] as usize) as f32,
                (self.cell.y + corner[1] as usize) as f32,
                (self.cell.z + corner[2] as usize) as f32,
            ]
        })
    }

    /// Looks up this face's texture rectangle and maps it onto the four
    /// corners returned by [`Face::positions`].
    pub fn uvs(&self, textures: &dyn FaceTextureLookup) -> [[f32; 2]; 4] {
        textures
            .texture_rect_for(self.block_type_int, self.block_side)
            .corner_uvs()
    }
}
