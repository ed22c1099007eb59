//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 16x256x16 column of the world,
//! addressed by a 2D chunk coordinate and stored as a vertical stack of sixteen
//! [`SubChunk`] slots.
//!
//! ## Memory Optimization
//!
//! Sub-chunk slots start out empty and are allocated on the first write into
//! their vertical band. Reads from an empty slot return air. Slots are never
//! compacted back to `None`, even if every block in them is later cleared.
//!
//! ## Coordinates
//!
//! Chunk methods take chunk-local coordinates: `x` and `z` in `0..16`, `y` in
//! `0..256`. The world origin of chunk `(cx, cz)` is `(cx * 16, 0, cz * 16)`.

use cgmath::{Point2, Point3};

use super::block::{BlockTypeSize, AIR};
use super::sub_chunk::{SubChunk, SUB_CHUNK_DIMENSION};
use crate::error::programmer_error;

pub mod chunk_generation;
pub mod chunk_record;

/// The horizontal dimension of a chunk in blocks.
pub const CHUNK_DIMENSION: usize = SUB_CHUNK_DIMENSION;
/// The number of sub-chunks stacked in one chunk.
pub const SUB_CHUNKS_PER_CHUNK: usize = 16;
/// The height of a chunk in blocks.
pub const CHUNK_HEIGHT: usize = SUB_CHUNKS_PER_CHUNK * SUB_CHUNK_DIMENSION;

/// The position of a chunk in chunk coordinates (x, z).
pub type ChunkPos = Point2<i32>;

/// Identifies one sub-chunk of one chunk, e.g. to the rendering backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubChunkKey {
    /// Column the sub-chunk belongs to.
    pub chunk: ChunkPos,
    /// Slot index, 0 at the bottom of the column.
    pub index: usize,
}

impl SubChunkKey {
    /// Key of slot `index` in the column at `chunk`.
    pub fn new(chunk: ChunkPos, index: usize) -> Self {
        SubChunkKey { chunk, index }
    }

    /// World-space position of the sub-chunk's minimum corner.
    pub fn origin(&self) -> Point3<i32> {
        Point3::new(
            self.chunk.x * CHUNK_DIMENSION as i32,
            (self.index * SUB_CHUNK_DIMENSION) as i32,
            self.chunk.y * CHUNK_DIMENSION as i32,
        )
    }
}

/// A 16x256x16 column of blocks made of lazily allocated sub-chunks.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkPos,

    /// Sub-chunk slots indexed from the bottom. Slot `i` covers Y in `16*i..16*i+16`.
    sub_chunks: [Option<SubChunk>; SUB_CHUNKS_PER_CHUNK],
}

impl Chunk {
    /// Creates a new chunk with every sub-chunk slot unallocated (all air).
    pub fn empty(position: ChunkPos) -> Self {
        Chunk {
            position,
            sub_chunks: Default::default(),
        }
    }

    /// Creates a chunk from already built sub-chunk slots.
    pub fn from_sub_chunks(
        position: ChunkPos,
        sub_chunks: [Option<SubChunk>; SUB_CHUNKS_PER_CHUNK],
    ) -> Self {
        Chunk {
            position,
            sub_chunks,
        }
    }

    /// World-space position of the chunk's minimum corner.
    pub fn origin(&self) -> Point3<i32> {
        SubChunkKey::new(self.position, 0).origin()
    }

    fn in_bounds(x: usize, y: usize, z: usize) -> bool {
        x < CHUNK_DIMENSION && y < CHUNK_HEIGHT && z < CHUNK_DIMENSION
    }

    /// Gets the block at the given chunk-local coordinates.
    ///
    /// Returns air if the containing sub-chunk has not been allocated.
    pub fn get_block(&self, x: usize, y: usize, z: usize) -> BlockTypeSize {
        if !Self::in_bounds(x, y, z) {
            programmer_error!("Chunk read out of range: ({}, {}, {})", x, y, z);
            return AIR;
        }

        let index = y / SUB_CHUNK_DIMENSION;
        match &self.sub_chunks[index] {
            Some(sub_chunk) => sub_chunk.get_block(x, y - index * SUB_CHUNK_DIMENSION, z),
            None => AIR,
        }
    }

    /// Sets the block at the given chunk-local coordinates.
    ///
    /// Allocates the containing sub-chunk (filled with air) if needed.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, block: BlockTypeSize) {
        if !Self::in_bounds(x, y, z) {
            programmer_error!("Chunk write out of range: ({}, {}, {})", x, y, z);
            return;
        }

        let index = y / SUB_CHUNK_DIMENSION;
        self.sub_chunks[index]
            .get_or_insert_with(SubChunk::new)
            .set_block(x, y - index * SUB_CHUNK_DIMENSION, z, block);
    }

    /// Fills the box between `min` and `max` (both inclusive) with `block`.
    ///
    /// Both corners must lie inside the chunk; this never spans chunk borders.
    pub fn fill_area(&mut self, min: Point3<usize>, max: Point3<usize>, block: BlockTypeSize) {
        if !Self::in_bounds(min.x, min.y, min.z) || !Self::in_bounds(max.x, max.y, max.z) {
            programmer_error!("Chunk fill out of range: {:?} to {:?}", min, max);
            return;
        }

        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.set_block(x, y, z, block);
                }
            }
        }
    }

    /// The sub-chunk in slot `index`, if allocated.
    pub fn sub_chunk(&self, index: usize) -> Option<&SubChunk> {
        self.sub_chunks.get(index).and_then(Option::as_ref)
    }

    /// Iterates over the allocated sub-chunks together with their slot index.
    pub fn sub_chunks(&self) -> impl Iterator<Item = (usize, &SubChunk)> {
        self.sub_chunks
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|sub_chunk| (index, sub_chunk)))
    }

    /// Mutable variant of [`Chunk::sub_chunks`].
    pub fn sub_chunks_mut(&mut self) -> impl Iterator<Item = (usize, &mut SubChunk)> {
        self.sub_chunks
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|sub_chunk| (index, sub_chunk)))
    }

    /// Number of allocated sub-chunk slots.
    pub fn allocated_sub_chunks(&self) -> usize {
        self.sub_chunks.iter().filter(|slot| slot.is_some()).count()
    }
}
