//! Mesh data structures for voxel rendering.
//!
//! A [`Mesh`] holds the separate vertex-attribute buffers the rendering backend
//! uploads for one sub-chunk: positions, normals, UVs and indices.

use super::face::Face;
use crate::engine_state::rendering::texture::FaceTextureLookup;

/// How the faces of a mesh are turned into primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MeshMode {
    /// Two triangles per face.
    #[default]
    Triangles,
    /// Four line segments per face outlining the quad (debug view).
    Wireframe,
}

/// Index pattern for the two triangles of a face.
const TRIANGLE_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Index pattern for the four edges of a face.
const LINE_INDICES: [u32; 8] = [0, 1, 1, 2, 2, 3, 3, 0];

/// Geometry for one sub-chunk, in sub-chunk local space.
///
/// Every face contributes exactly four vertices; the index buffer holds either
/// triangles or line pairs depending on [`MeshMode`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex face normals
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex atlas coordinates
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list or line list, depending on `mode`
    pub indices: Vec<u32>,
    /// The primitive type of `indices`
    pub mode: MeshMode,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new(mode: MeshMode) -> Self {
        Mesh {
            mode,
            ..Default::default()
        }
    }

    /// Appends the four vertices and the indices of one face, textured
    /// through `textures`.
    pub fn add_face(&mut self, face: &Face, textures: &dyn FaceTextureLookup) {
        let base = self.positions.len() as u32;
        let normal = face.block_side.normal();

        self.positions.extend_from_slice(&face.positions());
        self.uvs.extend_from_slice(&face.uvs(textures));
        self.normals.extend_from_slice(&[normal; 4]);

        let pattern: &[u32] = match self.mode {
            MeshMode::Triangles => &TRIANGLE_INDICES,
            MeshMode::Wireframe => &LINE_INDICES,
        };
        self.indices.extend(pattern.iter().map(|index| base + index));
    }

    /// Number of vertices, four per face.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of emitted faces.
    pub fn face_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Number of triangles in the index buffer; zero for wireframe meshes.
    pub fn triangle_count(&self) -> usize {
        match self.mode {
            MeshMode::Triangles => self.indices.len() / 3,
            MeshMode::Wireframe => 0,
        }
    }

    /// Whether no face was emitted.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Raw bytes of the position buffer, ready for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the normal buffer, ready for upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Raw bytes of the UV buffer, ready for upload.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Raw bytes of the index buffer, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::texture::TextureAtlas;
    use crate::engine_state::voxels::block::block_side::BlockSide;

    #[test]
    fn triangle_faces_share_their_four_vertices() {
        let mut mesh = Mesh::new(MeshMode::Triangles);
        mesh.add_face(&Face::new(0, 0, 0, 1, BlockSide::TOP), &TextureAtlas::new());
        mesh.add_face(&Face::new(0, 0, 0, 1, BlockSide::BOTTOM), &TextureAtlas::new());

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(mesh.normals[5], [0.0, -1.0, 0.0]);
    }

    #[test]
    fn wireframe_faces_emit_line_pairs() {
        let mut mesh = Mesh::new(MeshMode::Wireframe);
        mesh.add_face(&Face::new(1, 1, 1, 1, BlockSide::LEFT), &TextureAtlas::new());

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 1, 2, 2, 3, 3, 0]);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn byte_views_cover_each_buffer() {
        let mut mesh = Mesh::new(MeshMode::Triangles);
        mesh.add_face(&Face::new(0, 0, 0, 1, BlockSide::FRONT), &TextureAtlas::new());

        assert_eq!(mesh.position_bytes().len(), 4 * 12);
        assert_eq!(mesh.normal_bytes().len(), 4 * 12);
        assert_eq!(mesh.uv_bytes().len(), 4 * 8);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }
}
