//! Hand-off point between the mesher and the rendering backend.
//!
//! The backend owns all GPU resources. It receives each rebuilt sub-chunk mesh
//! through [`MeshSink::upload`] and is told through [`MeshSink::release`] when a
//! sub-chunk goes away so it can free whatever it allocated for it.

use cgmath::Point3;

use crate::engine_state::voxels::chunk::SubChunkKey;

use super::Mesh;

/// The rendering backend as seen by the world.
pub trait MeshSink {
    /// Replaces the geometry drawn for `key`.
    ///
    /// `origin` is the world-space position of the sub-chunk's minimum corner;
    /// mesh positions are relative to it.
    fn upload(&mut self, key: SubChunkKey, origin: Point3<i32>, mesh: &Mesh);

    /// Frees every backend resource held for `key`.
    fn release(&mut self, key: SubChunkKey);
}

/// A backend that draws nothing. Used for headless worlds.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMeshSink;

impl MeshSink for NullMeshSink {
    fn upload(&mut self, _key: SubChunkKey, _origin: Point3<i32>, _mesh: &Mesh) {}

    fn release(&mut self, _key: SubChunkKey) {}
}
