//! # Voxel Engine Core
//!
//! Representation and streaming of the block world.
//!
//! ## Architecture
//!
//! * **Block**: voxel ids, their opacity and per-face textures
//! * **SubChunk**: a dense 16x16x16 block buffer with a cached mesh
//! * **Chunk**: a column of sixteen lazily allocated sub-chunks, plus terrain
//!   generation and the persisted record format
//! * **Storage**: where chunks go when they leave memory
//! * **World**: the loaded chunks around the viewer, block access, streaming
//!   and ray picking
//!
//! ## Data Flow
//!
//! 1. The viewer position is reported to the world
//! 2. Server ticks load missing chunks near the viewer and persist far ones
//! 3. Block edits mark sub-chunks dirty
//! 4. A rebuild pass remeshes dirty sub-chunks and hands them to the renderer

pub mod block;
pub mod chunk;
pub mod storage;
pub mod sub_chunk;
pub mod world;
