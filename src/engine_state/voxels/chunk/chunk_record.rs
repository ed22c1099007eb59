//! Persisted form of a chunk.
//!
//! A [`ChunkRecord`] is what the chunk store holds for each chunk coordinate:
//! the position and the sixteen sub-chunk slots as raw byte buffers, with
//! unallocated slots stored as `null`.

use cgmath::Point2;
use serde::{Deserialize, Serialize};

use super::{Chunk, ChunkPos, SUB_CHUNKS_PER_CHUNK};
use crate::engine_state::voxels::sub_chunk::{SubChunk, SUB_CHUNK_SIZE};
use crate::error::StoreError;

/// The serialized shape of a chunk.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChunkRecord {
    /// Chunk coordinates as an `(x, z)` pair.
    pub chunk_pos: (i32, i32),
    /// One slot per sub-chunk, bottom first: the raw block bytes, or `None`
    /// when the slot was never allocated.
    pub sub_chunks: Vec<Option<Vec<u8>>>,
}

impl ChunkRecord {
    /// `chunk_pos` as a [`ChunkPos`].
    pub fn position(&self) -> ChunkPos {
        Point2::new(self.chunk_pos.0, self.chunk_pos.1)
    }
}

impl Chunk {
    /// Captures the chunk's blocks for persistence.
    pub fn to_record(&self) -> ChunkRecord {
        let mut sub_chunks = vec![None; SUB_CHUNKS_PER_CHUNK];
        for (index, sub_chunk) in self.sub_chunks() {
            sub_chunks[index] = Some(sub_chunk.as_bytes().to_vec());
        }

        ChunkRecord {
            chunk_pos: (self.position.x, self.position.y),
            sub_chunks,
        }
    }

    /// Rebuilds a chunk from its persisted record.
    ///
    /// Every restored sub-chunk starts dirty, with no mesh.
    ///
    /// # Errors
    /// [`StoreError::CorruptRecord`] if the record does not hold exactly sixteen
    /// slots or a present slot is not exactly one sub-chunk of bytes.
    pub fn from_record(record: &ChunkRecord) -> Result<Chunk, StoreError> {
        let position = record.position();
        let corrupt = |reason: String| StoreError::CorruptRecord { position, reason };

        if record.sub_chunks.len() != SUB_CHUNKS_PER_CHUNK {
            return Err(corrupt(format!(
                "expected {} sub-chunk slots, found {}",
                SUB_CHUNKS_PER_CHUNK,
                record.sub_chunks.len()
            )));
        }

        let mut slots: [Option<SubChunk>; SUB_CHUNKS_PER_CHUNK] = Default::default();
        for (index, bytes) in record.sub_chunks.iter().enumerate() {
            if let Some(bytes) = bytes {
                let sub_chunk = SubChunk::from_bytes(bytes).ok_or_else(|| {
                    corrupt(format!(
                        "sub-chunk {} holds {} bytes, expected {}",
                        index,
                        bytes.len(),
                        SUB_CHUNK_SIZE
                    ))
                })?;
                slots[index] = Some(sub_chunk);
            }
        }

        Ok(Chunk::from_sub_chunks(position, slots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn record_round_trip_keeps_blocks_and_gaps() {
        let mut chunk = Chunk::empty(Point2::new(4, -9));
        chunk.set_block(0, 0, 0, BlockType::BEDROCK.id());
        chunk.set_block(15, 100, 15, BlockType::COBBLESTONE.id());

        let restored = Chunk::from_record(&chunk.to_record()).unwrap();

        assert_eq!(restored.position, chunk.position);
        assert_eq!(restored.allocated_sub_chunks(), 2);
        assert!(restored.sub_chunk(1).is_none());
        for index in 0..SUB_CHUNKS_PER_CHUNK {
            assert_eq!(
                restored.sub_chunk(index).map(SubChunk::as_bytes),
                chunk.sub_chunk(index).map(SubChunk::as_bytes)
            );
        }
    }

    #[test]
    fn json_uses_null_for_missing_slots() {
        let mut chunk = Chunk::empty(Point2::new(1, 2));
        chunk.set_block(0, 20, 0, BlockType::STONE.id());

        let json = serde_json::to_value(chunk.to_record()).unwrap();
        assert_eq!(json["chunkPos"], serde_json::json!([1, 2]));
        assert!(json["subChunks"][0].is_null());
        assert_eq!(json["subChunks"][1].as_array().map(Vec::len), Some(SUB_CHUNK_SIZE));
    }

    #[test]
    fn short_buffers_are_rejected() {
        let mut record = Chunk::empty(Point2::new(0, 0)).to_record();
        record.sub_chunks[3] = Some(vec![1; 12]);
        assert!(matches!(
            Chunk::from_record(&record),
            Err(StoreError::CorruptRecord { .. })
        ));

        record.sub_chunks.truncate(15);
        assert!(Chunk::from_record(&record).is_err());
    }
}
