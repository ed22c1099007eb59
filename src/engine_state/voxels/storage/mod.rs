//! # Chunk Storage Module
//!
//! Chunks outlive their time in memory through a [`ChunkStore`]: an async
//! key-value map from chunk coordinate to [`ChunkRecord`]. The world performs
//! one `get` or `put` per call and never keeps anything open between them.
//!
//! Two stores are provided:
//! - [`MemoryChunkStore`]: keeps records in a hash map, for tests and
//!   throwaway worlds
//! - [`DirectoryChunkStore`]: one JSON file per chunk inside a world directory

use super::chunk::{chunk_record::ChunkRecord, ChunkPos};
use crate::error::StoreError;

mod directory_store;
mod memory_store;

pub use directory_store::DirectoryChunkStore;
pub use memory_store::MemoryChunkStore;

/// Persistent storage for chunk records, keyed by chunk position.
#[allow(async_fn_in_trait)]
pub trait ChunkStore {
    /// Fetches the record stored for `position`, or `None` if there is none.
    async fn get(&mut self, position: ChunkPos) -> Result<Option<ChunkRecord>, StoreError>;

    /// Stores `record` under its own position, replacing any previous record.
    async fn put(&mut self, record: &ChunkRecord) -> Result<(), StoreError>;
}
