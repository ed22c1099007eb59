//! Naive face-culling mesher.
//!
//! Every non-air cell contributes one quad per side whose neighbour cell is
//! empty. Adjacent coplanar faces are never merged.

use crate::engine_state::{
    rendering::texture::FaceTextureLookup,
    voxels::{
        block::{block_side::BlockSide, AIR},
        sub_chunk::{SubChunk, SUB_CHUNK_DIMENSION},
    },
};

use super::{face::Face, mesh::Mesh, MeshMode};

/// Generates the mesh of a sub-chunk by emitting every unoccluded face.
///
/// Cells are visited x-major, then y, then z, and each cell's faces in
/// [`BlockSide::all`] order, so the output is fully determined by the block
/// buffer and the texture lookup.
///
/// Occlusion is tested with [`SubChunk::has_block_at`], which treats every
/// coordinate outside the sub-chunk as empty. Faces on the sub-chunk boundary
/// are therefore always emitted, even when the adjacent sub-chunk or chunk
/// has a solid block right behind them.
// TODO: cull boundary faces against the neighbouring sub-chunk once meshing
// has access to the owning chunk and its horizontal neighbours.
pub fn culled(sub_chunk: &SubChunk, textures: &dyn FaceTextureLookup, mode: MeshMode) -> Mesh {
    let mut mesh = Mesh::new(mode);

    for i in 0..SUB_CHUNK_DIMENSION {
        for j in 0..SUB_CHUNK_DIMENSION {
            for k in 0..SUB_CHUNK_DIMENSION {
                let block = sub_chunk.get_block(i, j, k);
                if block == AIR {
                    continue;
                }

                for side in BlockSide::all() {
                    let offset = side.offset();
                    if sub_chunk.has_block_at(
                        i as i32 + offset.x,
                        j as i32 + offset.y,
                        k as i32 + offset.z,
                    ) {
                        continue;
                    }

                    mesh.add_face(&Face::new(i, j, k, block, side), textures);
                }
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        rendering::texture::TextureAtlas,
        voxels::block::block_type::BlockType,
    };

    fn mesh_of(sub_chunk: &SubChunk) -> Mesh {
        culled(sub_chunk, &TextureAtlas::grid(4, 2), MeshMode::Triangles)
    }

    #[test]
    fn empty_sub_chunk_has_no_faces() {
        assert!(mesh_of(&SubChunk::new()).is_empty());
    }

    #[test]
    fn isolated_block_has_six_faces() {
        let mut sub_chunk = SubChunk::new();
        sub_chunk.set_block(7, 7, 7, BlockType::STONE.id());

        let mesh = mesh_of(&sub_chunk);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn touching_blocks_hide_shared_faces() {
        let mut sub_chunk = SubChunk::new();
        sub_chunk.set_block(3, 3, 3, BlockType::STONE.id());
        sub_chunk.set_block(4, 3, 3, BlockType::DIRT.id());

        assert_eq!(mesh_of(&sub_chunk).face_count(), 10);
    }

    #[test]
    fn boundary_faces_are_never_culled() {
        let mut sub_chunk = SubChunk::new();
        for i in 0..SUB_CHUNK_DIMENSION {
            for j in 0..SUB_CHUNK_DIMENSION {
                for k in 0..SUB_CHUNK_DIMENSION {
                    sub_chunk.set_block(i, j, k, BlockType::STONE.id());
                }
            }
        }

        // Only the outer shell: 6 sides of 16x16 faces.
        assert_eq!(mesh_of(&sub_chunk).face_count(), 6 * 16 * 16);
    }

    #[test]
    fn faces_carry_the_block_texture() {
        let atlas = TextureAtlas::grid(4, 2);
        let mut sub_chunk = SubChunk::new();
        sub_chunk.set_block(0, 0, 0, BlockType::GRASS.id());

        let mesh = culled(&sub_chunk, &atlas, MeshMode::Triangles);
        // TOP is the first face emitted for a cell.
        let top = atlas.get("grass_top").unwrap();
        assert_eq!(mesh.uvs[0], [top.left, top.bottom]);
        assert_eq!(mesh.uvs[2], [top.right, top.top]);
    }

    #[test]
    fn identical_buffers_mesh_identically() {
        let mut a = SubChunk::new();
        let mut b = SubChunk::new();
        for (x, y, z) in [(1, 2, 3), (1, 3, 3), (9, 0, 15)] {
            a.set_block(x, y, z, BlockType::COBBLESTONE.id());
            b.set_block(x, y, z, BlockType::COBBLESTONE.id());
        }
        assert_eq!(mesh_of(&a), mesh_of(&b));
    }
}
