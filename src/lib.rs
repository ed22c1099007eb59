#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A streamed, persisted voxel world: block storage in 16x256x16 chunk columns,
//! noise-driven terrain, face-culled meshing and ray picking.
//!
//! ## Key Modules
//!
//! * `config` - `WorldConfig`, loadable from TOML
//! * `error` - store and world error types
//! * `engine_state` - the per-frame driver, rendering collaborators and the
//!   voxel world itself
//!
//! ## Usage
//!
//! ```rust
//! use voxel_world::{BlockType, GenerationMethod, MemoryChunkStore, World, WorldConfig};
//! use cgmath::{Point3, Vector3};
//!
//! let config = WorldConfig {
//!     generation: GenerationMethod::Empty,
//!     ..WorldConfig::default()
//! };
//! let mut world = pollster::block_on(World::with_store(MemoryChunkStore::new(), config)).unwrap();
//! world.set_block(0, 0, 0, BlockType::STONE.id());
//!
//! let hit = world.intersect(Point3::new(0.5, 1.5, 0.5), Vector3::new(0.0, -1.0, 0.0), 1.0);
//! assert_eq!(hit.map(|hit| hit.position), Some(Point3::new(0, 0, 0)));
//! ```
//!
//! The native binary runs a short headless session through [`run`].

use cgmath::Point3;
use log::{error, info};
use web_time::Instant;

mod config;
mod engine_state;
mod error;

pub use config::{GenerationMethod, WorldConfig, MAX_RENDER_DISTANCE};
pub use engine_state::rendering::meshing::{culled, Face, Mesh, MeshMode, MeshSink, NullMeshSink};
pub use engine_state::rendering::texture::{FaceTextureLookup, TextureAtlas, UvRect};
pub use engine_state::voxels::block::{
    block_side::BlockSide, block_type::BlockType, BlockTextures, BlockTypeSize, AIR,
};
pub use engine_state::voxels::chunk::{
    chunk_generation::TerrainGenerator, chunk_record::ChunkRecord, Chunk, ChunkPos, SubChunkKey,
    CHUNK_DIMENSION, CHUNK_HEIGHT, SUB_CHUNKS_PER_CHUNK,
};
pub use engine_state::voxels::storage::{ChunkStore, DirectoryChunkStore, MemoryChunkStore};
pub use engine_state::voxels::sub_chunk::{SubChunk, SUB_CHUNK_DIMENSION, SUB_CHUNK_SIZE};
pub use engine_state::voxels::world::{
    open_world,
    raycast::{traverse, RayHit},
    streaming::TickReport,
    RebuildReport, World,
};
pub use engine_state::{EngineState, FrameReport};
pub use error::{StoreError, WorldError, WorldResult};

/// Environment variable holding the path of a TOML world config.
pub const CONFIG_PATH_VARIABLE: &str = "VOXEL_WORLD_CONFIG";
/// Name of the world the native session opens.
pub const DEFAULT_WORLD_NAME: &str = "default";
/// Number of frames the native session runs before closing the world.
const SESSION_FRAMES: u32 = 120;

/// Native entry point: sets up logging, loads the config and runs a short
/// headless session that walks the viewer across a few chunks.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::var_os(CONFIG_PATH_VARIABLE) {
        Some(path) => match WorldConfig::load(&path) {
            Ok(config) => config,
            Err(config_error) => {
                error!("{}", config_error);
                return;
            }
        },
        None => WorldConfig::default(),
    };

    if let Err(session_error) = pollster::block_on(run_session(config)) {
        error!("Session failed: {}", session_error);
    }
}

async fn run_session(config: WorldConfig) -> WorldResult<()> {
    let start = Instant::now();
    let world = open_world(DEFAULT_WORLD_NAME, config).await?;
    let mut engine_state = EngineState::new(world);

    let mut meshes_built = 0;
    for frame in 0..SESSION_FRAMES {
        let viewer = Point3::new(f64::from(frame) * 0.5, 64.0, 8.0);
        let report = engine_state.process_frame(viewer).await?;
        meshes_built += report.rebuild.rebuilt;
    }

    info!(
        "Ran {} frames in {:?}: {} chunks loaded, {} meshes built",
        engine_state.frames(),
        start.elapsed(),
        engine_state.world().loaded_chunk_count(),
        meshes_built
    );

    engine_state.shutdown().await?;
    Ok(())
}
