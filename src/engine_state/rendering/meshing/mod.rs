//! Mesh generation and hand-off for voxel rendering.
//!
//! This module turns sub-chunk block data into vertex and index buffers and
//! passes them to the rendering backend.
//!
//! # Architecture
//! - `mesh/`: The face-culling mesher and the [`Mesh`] buffers it produces
//! - [`MeshSink`]: The backend collaborator that uploads and frees meshes
//!
//! Meshes are cached per sub-chunk and rebuilt only when the sub-chunk is
//! dirty; see `World::rebuild_meshes`.

/// Core mesh generation algorithms and data structures.
mod mesh;
mod renderer;

pub use mesh::*;
pub use renderer::*;
