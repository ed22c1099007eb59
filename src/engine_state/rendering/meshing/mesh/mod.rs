//! Mesh generation for voxel rendering.
//!
//! This module converts sub-chunk block buffers into GPU-friendly vertex and
//! index buffers.
//!
//! # Architecture
//! - [`Mesh`]: The separate position, normal, UV and index buffers of one sub-chunk
//! - [`Face`]: A single visible face of a voxel cell
//! - [`culled`]: The naive face-culling mesher
//!
//! # Usage
//! ```no_run
//! use voxel_world::{culled, MeshMode, SubChunk, TextureAtlas};
//!
//! let sub_chunk = SubChunk::new();
//! let mesh = culled(&sub_chunk, &TextureAtlas::grid(4, 2), MeshMode::Triangles);
//! assert!(mesh.is_empty());
//! ```

mod culled;
mod face;
mod mesh;

pub use culled::culled;
pub use face::Face;
pub use mesh::*;
