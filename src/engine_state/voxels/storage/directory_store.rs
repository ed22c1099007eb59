//! On-disk chunk store: one `chunk_<x>_<z>.json` file per chunk column.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::ChunkStore;
use crate::engine_state::voxels::chunk::{chunk_record::ChunkRecord, ChunkPos};
use crate::error::StoreError;

/// A chunk store that keeps one JSON file per chunk in a directory.
///
/// Files are written to a temporary name and renamed into place, so a crash
/// mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct DirectoryChunkStore {
    root: PathBuf,
}

impl DirectoryChunkStore {
    /// Opens (creating if necessary) the store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!("Opened chunk store at {}", root.display());
        Ok(DirectoryChunkStore { root })
    }

    /// Directory the chunk files live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, position: ChunkPos) -> PathBuf {
        self.root.join(format!("chunk_{}_{}.json", position.x, position.y))
    }
}

impl ChunkStore for DirectoryChunkStore {
    async fn get(&mut self, position: ChunkPos) -> Result<Option<ChunkRecord>, StoreError> {
        let contents = match fs::read_to_string(self.path_for(position)) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let record: ChunkRecord = serde_json::from_str(&contents)?;
        if record.position() != position {
            return Err(StoreError::CorruptRecord {
                position,
                reason: format!("file holds chunk {:?}", record.chunk_pos),
            });
        }
        Ok(Some(record))
    }

    async fn put(&mut self, record: &ChunkRecord) -> Result<(), StoreError> {
        let final_path = self.path_for(record.position());
        let tmp_path = final_path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, record)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &final_path)?;
        Ok(())
    }
}
