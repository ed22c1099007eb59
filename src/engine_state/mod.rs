//! # Engine State Module
//!
//! Drives a [`World`] frame by frame.
//!
//! ## Key Components
//!
//! * `EngineState` - feeds the viewer position to the world and runs one
//!   streaming tick and one mesh rebuild pass per frame
//! * `rendering` - textures, meshing and the renderer-facing mesh sink
//! * `voxels` - blocks, chunks, storage and the world itself

use cgmath::Point3;
use log::debug;

use voxels::storage::ChunkStore;
use voxels::world::{streaming::TickReport, RebuildReport, World};

use crate::error::WorldResult;

pub mod rendering;
pub mod voxels;

/// What one frame did to the world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Chunks the streaming tick unloaded and loaded.
    pub tick: TickReport,
    /// Sub-chunk meshes regenerated after the tick.
    pub rebuild: RebuildReport,
}

/// The per-frame driver of a world.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::{EngineState, GenerationMethod, MemoryChunkStore, World, WorldConfig};
///
/// let config = WorldConfig {
///     render_distance: 1,
///     generation: GenerationMethod::Empty,
///     ..WorldConfig::default()
/// };
/// let world = pollster::block_on(World::with_store(MemoryChunkStore::new(), config)).unwrap();
/// let mut engine_state = EngineState::new(world);
///
/// for _ in 0..10 {
///     pollster::block_on(engine_state.process_frame(Point3::new(8.0, 64.0, 8.0))).unwrap();
/// }
/// assert_eq!(engine_state.world().loaded_chunk_count(), 9);
/// ```
pub struct EngineState<S: ChunkStore> {
    world: World<S>,
    frames: u64,
}

impl<S: ChunkStore> EngineState<S> {
    /// Wraps an opened world; no frame has run yet.
    pub fn new(world: World<S>) -> Self {
        EngineState { world, frames: 0 }
    }

    /// The driven world.
    pub fn world(&self) -> &World<S> {
        &self.world
    }

    /// Mutable access to the driven world, e.g. for block edits between frames.
    pub fn world_mut(&mut self) -> &mut World<S> {
        &mut self.world
    }

    /// Number of frames processed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame with the viewer at `viewer`.
    ///
    /// # Errors
    /// Store failures from the streaming tick. The mesh rebuild is skipped for
    /// that frame.
    pub async fn process_frame(&mut self, viewer: Point3<f64>) -> WorldResult<FrameReport> {
        let previous_chunk = self.world.player_chunk();
        self.world.update_player_pos(viewer);
        if self.world.player_chunk() != previous_chunk {
            debug!(
                "Viewer moved to chunk ({}, {})",
                self.world.player_chunk().x,
                self.world.player_chunk().y
            );
        }

        let tick = self.world.server_tick().await?;
        let rebuild = self.world.rebuild_meshes();
        self.frames += 1;
        Ok(FrameReport { tick, rebuild })
    }

    /// Persists every loaded chunk and returns the world.
    pub async fn shutdown(mut self) -> WorldResult<World<S>> {
        self.world.close().await?;
        debug!("Engine stopped after {} frames", self.frames);
        Ok(self.world)
    }
}
