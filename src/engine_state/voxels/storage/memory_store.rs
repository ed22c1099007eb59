//! In-memory chunk store, for tests and worlds that are never saved.

use std::collections::HashMap;

use super::ChunkStore;
use crate::engine_state::voxels::chunk::{chunk_record::ChunkRecord, ChunkPos};
use crate::error::StoreError;

/// A chunk store that lives entirely in memory.
///
/// It counts the requests it serves, and can be told to reject reads or
/// writes so callers' failure paths can be exercised.
#[derive(Debug, Default)]
pub struct MemoryChunkStore {
    records: HashMap<ChunkPos, ChunkRecord>,
    gets: usize,
    puts: usize,
    fail_gets: bool,
    fail_puts: bool,
}

impl MemoryChunkStore {
    /// An empty store that accepts every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record is stored at `position`.
    pub fn contains(&self, position: ChunkPos) -> bool {
        self.records.contains_key(&position)
    }

    /// The record stored at `position`, without counting a `get`.
    pub fn record(&self, position: ChunkPos) -> Option<&ChunkRecord> {
        self.records.get(&position)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of `get` requests served so far, failed ones included.
    pub fn get_count(&self) -> usize {
        self.gets
    }

    /// Number of `put` requests served so far, failed ones included.
    pub fn put_count(&self) -> usize {
        self.puts
    }

    /// Makes every following `get` fail until reset.
    pub fn set_fail_gets(&mut self, fail: bool) {
        self.fail_gets = fail;
    }

    /// Makes every following `put` fail until reset.
    pub fn set_fail_puts(&mut self, fail: bool) {
        self.fail_puts = fail;
    }
}

impl ChunkStore for MemoryChunkStore {
    async fn get(&mut self, position: ChunkPos) -> Result<Option<ChunkRecord>, StoreError> {
        self.gets += 1;
        if self.fail_gets {
            return Err(StoreError::Unavailable("reads disabled".to_owned()));
        }
        Ok(self.records.get(&position).cloned())
    }

    async fn put(&mut self, record: &ChunkRecord) -> Result<(), StoreError> {
        self.puts += 1;
        if self.fail_puts {
            return Err(StoreError::Unavailable("writes disabled".to_owned()));
        }
        self.records.insert(record.position(), record.clone());
        Ok(())
    }
}
