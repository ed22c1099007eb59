//! Rendering-side data for the voxel world.
//!
//! Nothing in here talks to a GPU. This module produces the per-sub-chunk
//! geometry a rendering backend uploads, and defines the two collaborators the
//! mesher relies on: the texture lookup and the mesh sink.

pub mod meshing;
pub mod texture;
