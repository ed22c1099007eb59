//! # World Module
//!
//! This module provides the [`World`] struct, which owns the chunks currently
//! in memory and coordinates everything that touches them: block access,
//! persistence through a [`ChunkStore`], streaming around the viewer, mesh
//! rebuilds and ray picking.
//!
//! ## Architecture
//!
//! Only chunks within the render distance of the viewer are kept in memory.
//! Everything else lives in the store, and is generated the first time it is
//! requested. The streaming jobs in [`streaming`] move at most one chunk in and
//! one chunk out per [`World::server_tick`], so I/O is spread over many ticks.
//!
//! ## Coordinates
//!
//! World block coordinates map to chunk coordinates with floor division by 16,
//! so block `-1` lives in chunk `-1` at local index 15.

use std::collections::HashMap;

use cgmath::{Point2, Point3};
use log::{debug, error, info};
use web_time::Instant;

use crate::config::WorldConfig;
use crate::engine_state::rendering::meshing::{MeshMode, MeshSink, NullMeshSink};
use crate::engine_state::rendering::texture::{FaceTextureLookup, TextureAtlas};
use crate::engine_state::voxels::block::{BlockTypeSize, AIR};
use crate::engine_state::voxels::chunk::chunk_generation::TerrainGenerator;
use crate::engine_state::voxels::chunk::{
    Chunk, ChunkPos, SubChunkKey, CHUNK_DIMENSION, CHUNK_HEIGHT,
};
use crate::engine_state::voxels::storage::{ChunkStore, DirectoryChunkStore};
use crate::error::{programmer_error, WorldResult};

pub mod raycast;
pub mod streaming;

use streaming::{LoadJob, UnloadJob};

/// Columns and rows of the default texture atlas.
const DEFAULT_ATLAS_GRID: (u32, u32) = (4, 2);

/// Summary of a [`World::rebuild_meshes`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Number of sub-chunks whose mesh was regenerated.
    pub rebuilt: usize,
}

/// Represents a voxel world composed of streamed chunks.
///
/// # Examples
///
/// ```
/// use voxel_world::{BlockType, GenerationMethod, MemoryChunkStore, World, WorldConfig};
///
/// let config = WorldConfig {
///     generation: GenerationMethod::Empty,
///     ..WorldConfig::default()
/// };
/// let mut world = pollster::block_on(World::with_store(MemoryChunkStore::new(), config)).unwrap();
///
/// world.set_block(5, 40, 5, BlockType::STONE.id());
/// assert_eq!(world.get_block(5, 40, 5), BlockType::STONE.id());
/// assert_eq!(world.rebuild_meshes().rebuilt, 1);
/// ```
pub struct World<S: ChunkStore> {
    chunks: HashMap<ChunkPos, Chunk>,
    store: S,
    generator: TerrainGenerator,
    textures: Box<dyn FaceTextureLookup>,
    mesh_sink: Box<dyn MeshSink>,
    mesh_mode: MeshMode,

    /// Chunk the viewer was last reported in.
    player_chunk: ChunkPos,
    render_distance: i32,
    focused_block: Option<Point3<i32>>,

    unload_job: UnloadJob,
    load_job: LoadJob,
}

/// Opens the named world inside `config.save_directory`, creating it if needed.
///
/// The chunk containing the origin is loaded (or generated) before returning.
pub async fn open_world(
    name: &str,
    config: WorldConfig,
) -> WorldResult<World<DirectoryChunkStore>> {
    World::open(name, config).await
}

impl World<DirectoryChunkStore> {
    /// See [`open_world`].
    pub async fn open(name: &str, config: WorldConfig) -> WorldResult<Self> {
        let store = DirectoryChunkStore::open(config.save_directory.join(name))?;
        info!("Opening world {} in {}", name, store.root().display());
        World::with_store(store, config).await
    }
}

impl<S: ChunkStore> World<S> {
    /// Creates a world backed by `store`, with the viewer at the origin.
    ///
    /// The origin chunk is loaded before returning, so blocks around spawn can
    /// be edited straight away.
    ///
    /// # Errors
    /// [`WorldError::Config`](crate::error::WorldError::Config) for a render
    /// distance outside `0..=MAX_RENDER_DISTANCE`, or any store failure while
    /// loading the origin chunk.
    pub async fn with_store(store: S, config: WorldConfig) -> WorldResult<Self> {
        config.validate()?;
        let (columns, rows) = DEFAULT_ATLAS_GRID;
        let mesh_mode = if config.wireframe {
            MeshMode::Wireframe
        } else {
            MeshMode::Triangles
        };

        let mut world = World {
            chunks: HashMap::new(),
            store,
            generator: TerrainGenerator::new(config.generation, config.seed, config.terrain_scale),
            textures: Box::new(TextureAtlas::grid(columns, rows)),
            mesh_sink: Box::new(NullMeshSink),
            mesh_mode,
            player_chunk: Point2::new(0, 0),
            render_distance: config.render_distance,
            focused_block: None,
            unload_job: UnloadJob::default(),
            load_job: LoadJob::default(),
        };

        world.load_chunk(world.player_chunk).await?;
        info!(
            "World ready: render distance {}, {:?} generation",
            world.render_distance,
            world.generator.method()
        );
        Ok(world)
    }

    /// Replaces the face texture lookup used by future mesh rebuilds.
    pub fn set_textures(&mut self, textures: Box<dyn FaceTextureLookup>) {
        self.textures = textures;
    }

    /// Replaces the rendering backend that receives rebuilt meshes.
    pub fn set_mesh_sink(&mut self, mesh_sink: Box<dyn MeshSink>) {
        self.mesh_sink = mesh_sink;
    }

    /// The backing chunk store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing chunk store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Whether the chunk at `position` is in memory.
    pub fn is_loaded(&self, position: ChunkPos) -> bool {
        self.chunks.contains_key(&position)
    }

    /// Number of chunks in memory.
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Every chunk in memory, in no particular order.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// The loaded chunk at `position`, if any.
    pub fn chunk(&self, position: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Chunk column the viewer is currently in.
    pub fn player_chunk(&self) -> ChunkPos {
        self.player_chunk
    }

    /// Radius, in chunks, of the square window kept loaded.
    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    /// Primitive layout used for rebuilt meshes.
    pub fn mesh_mode(&self) -> MeshMode {
        self.mesh_mode
    }

    /// Fetches the chunk at `position` from the store, or generates and
    /// persists it if the store has none, then inserts it into the loaded set.
    ///
    /// Loading an already loaded chunk fetches it again and replaces the
    /// in-memory copy.
    ///
    /// # Errors
    /// Any store failure. The loaded set is left untouched in that case.
    pub async fn load_chunk(&mut self, position: ChunkPos) -> WorldResult<()> {
        let chunk = match self.store.get(position).await? {
            Some(record) => {
                debug!("Loaded chunk ({}, {}) from store", position.x, position.y);
                Chunk::from_record(&record)?
            }
            None => {
                let chunk = self.generator.generate(position);
                self.store.put(&chunk.to_record()).await?;
                debug!("Generated chunk ({}, {})", position.x, position.y);
                chunk
            }
        };

        if let Some(previous) = self.chunks.insert(position, chunk) {
            release_meshes(self.mesh_sink.as_mut(), &previous);
        }
        Ok(())
    }

    /// Persists the chunk at `position` and drops it from memory, releasing
    /// any meshes the backend holds for it. Does nothing if it is not loaded.
    ///
    /// # Errors
    /// If persisting fails the chunk stays loaded, with its unsaved state, and
    /// the store error is returned.
    pub async fn unload_chunk(&mut self, position: ChunkPos) -> WorldResult<()> {
        let Some(chunk) = self.chunks.get(&position) else {
            return Ok(());
        };
        let record = chunk.to_record();

        if let Err(store_error) = self.store.put(&record).await {
            error!(
                "Failed to persist chunk ({}, {}), keeping it loaded: {}",
                position.x, position.y, store_error
            );
            return Err(store_error.into());
        }

        if let Some(chunk) = self.chunks.remove(&position) {
            release_meshes(self.mesh_sink.as_mut(), &chunk);
        }
        debug!("Unloaded chunk ({}, {})", position.x, position.y);
        Ok(())
    }

    /// Persists and unloads every loaded chunk.
    ///
    /// # Errors
    /// Stops at the first store failure; that chunk and any not yet visited
    /// remain loaded.
    pub async fn close(&mut self) -> WorldResult<()> {
        let mut positions: Vec<ChunkPos> = self.chunks.keys().copied().collect();
        positions.sort_by_key(|position| (position.x, position.y));

        for position in positions {
            self.unload_chunk(position).await?;
        }
        info!("World closed");
        Ok(())
    }

    /// Records the viewer's world position for the streaming jobs.
    pub fn update_player_pos(&mut self, position: Point3<f64>) {
        let dimension = CHUNK_DIMENSION as f64;
        self.player_chunk = Point2::new(
            (position.x / dimension).floor() as i32,
            (position.z / dimension).floor() as i32,
        );
    }

    /// Whether `position` lies within the render distance of the viewer,
    /// measured as Chebyshev distance in chunks.
    pub fn should_be_loaded(&self, position: ChunkPos) -> bool {
        let dx = (position.x - self.player_chunk.x).abs();
        let dz = (position.y - self.player_chunk.y).abs();
        dx.max(dz) <= self.render_distance
    }

    /// Returns the block at world coordinates, or air if the height is outside
    /// the world or the chunk is not loaded.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockTypeSize {
        if y < 0 || y >= CHUNK_HEIGHT as i32 {
            return AIR;
        }
        let (position, local_x, local_z) = split_world_coordinates(x, z);
        match self.chunks.get(&position) {
            Some(chunk) => chunk.get_block(local_x, y as usize, local_z),
            None => AIR,
        }
    }

    /// Writes a block at world coordinates.
    ///
    /// The target chunk must be loaded and `y` must lie in `0..256`.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockTypeSize) {
        if y < 0 || y >= CHUNK_HEIGHT as i32 {
            programmer_error!("set_block at height {} is outside the world", y);
            return;
        }
        let (position, local_x, local_z) = split_world_coordinates(x, z);
        match self.chunks.get_mut(&position) {
            Some(chunk) => chunk.set_block(local_x, y as usize, local_z, block),
            None => programmer_error!(
                "set_block at ({}, {}, {}) targets unloaded chunk ({}, {})",
                x,
                y,
                z,
                position.x,
                position.y
            ),
        }
    }

    /// Sets or clears the block highlighted by the renderer.
    pub fn focus_block(&mut self, position: Option<Point3<i32>>) {
        self.focused_block = position;
    }

    /// The block currently highlighted, if any.
    pub fn focused_block(&self) -> Option<Point3<i32>> {
        self.focused_block
    }

    /// Switches between triangle and line meshes. Every allocated sub-chunk is
    /// marked dirty when the mode changes.
    pub fn set_wireframe(&mut self, wireframe: bool) {
        let mode = if wireframe {
            MeshMode::Wireframe
        } else {
            MeshMode::Triangles
        };
        if mode == self.mesh_mode {
            return;
        }

        self.mesh_mode = mode;
        for chunk in self.chunks.values_mut() {
            for (_, sub_chunk) in chunk.sub_chunks_mut() {
                sub_chunk.mark_dirty();
            }
        }
    }

    /// Regenerates the mesh of every dirty sub-chunk and hands it to the mesh
    /// sink.
    pub fn rebuild_meshes(&mut self) -> RebuildReport {
        let start = Instant::now();
        let mut rebuilt = 0;

        for (position, chunk) in self.chunks.iter_mut() {
            for (index, sub_chunk) in chunk.sub_chunks_mut() {
                if !sub_chunk.rebuild_mesh(self.textures.as_ref(), self.mesh_mode) {
                    continue;
                }
                let key = SubChunkKey::new(*position, index);
                if let Some(mesh) = sub_chunk.mesh() {
                    self.mesh_sink.upload(key, key.origin(), mesh);
                }
                rebuilt += 1;
            }
        }

        if rebuilt > 0 {
            debug!("Rebuilt {} sub-chunk meshes in {:?}", rebuilt, start.elapsed());
        }
        RebuildReport { rebuilt }
    }
}

fn release_meshes(mesh_sink: &mut dyn MeshSink, chunk: &Chunk) {
    for (index, sub_chunk) in chunk.sub_chunks() {
        if sub_chunk.mesh().is_some() {
            mesh_sink.release(SubChunkKey::new(chunk.position, index));
        }
    }
}

/// Splits world x/z into the owning chunk and the local column inside it.
fn split_world_coordinates(x: i32, z: i32) -> (ChunkPos, usize, usize) {
    let dimension = CHUNK_DIMENSION as i32;
    (
        Point2::new(x.div_euclid(dimension), z.div_euclid(dimension)),
        x.rem_euclid(dimension) as usize,
        z.rem_euclid(dimension) as usize,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationMethod;
    use crate::engine_state::rendering::meshing::Mesh;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::storage::MemoryChunkStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct SinkLog {
        uploads: Vec<(SubChunkKey, Point3<i32>, usize)>,
        releases: Vec<SubChunkKey>,
    }

    struct RecordingSink(Rc<RefCell<SinkLog>>);

    impl MeshSink for RecordingSink {
        fn upload(&mut self, key: SubChunkKey, origin: Point3<i32>, mesh: &Mesh) {
            self.0.borrow_mut().uploads.push((key, origin, mesh.vertex_count()));
        }

        fn release(&mut self, key: SubChunkKey) {
            self.0.borrow_mut().releases.push(key);
        }
    }

    fn empty_world(render_distance: i32) -> World<MemoryChunkStore> {
        let config = WorldConfig {
            render_distance,
            generation: GenerationMethod::Empty,
            ..WorldConfig::default()
        };
        pollster::block_on(World::with_store(MemoryChunkStore::new(), config)).unwrap()
    }

    #[test]
    fn opening_loads_and_persists_the_origin_chunk() {
        let world = empty_world(1);
        assert!(world.is_loaded(Point2::new(0, 0)));
        assert_eq!(world.loaded_chunk_count(), 1);
        assert!(world.store().contains(Point2::new(0, 0)));
    }

    #[test]
    fn negative_coordinates_land_in_negative_chunks() {
        assert_eq!(split_world_coordinates(-1, 16), (Point2::new(-1, 1), 15, 0));
        assert_eq!(split_world_coordinates(-16, -17), (Point2::new(-1, -2), 0, 15));
    }

    #[test]
    fn player_position_is_floored_into_chunks() {
        let mut world = empty_world(1);
        world.update_player_pos(Point3::new(-0.5, 70.0, 31.9));
        assert_eq!(world.player_chunk(), Point2::new(-1, 1));
    }

    #[test]
    fn loading_radius_is_chebyshev() {
        let mut world = empty_world(2);
        world.update_player_pos(Point3::new(8.0, 0.0, 8.0));

        assert!(world.should_be_loaded(Point2::new(2, -2)));
        assert!(world.should_be_loaded(Point2::new(-2, 1)));
        assert!(!world.should_be_loaded(Point2::new(3, 0)));
        assert!(!world.should_be_loaded(Point2::new(0, -3)));
    }

    #[test]
    fn blocks_outside_the_loaded_world_read_as_air() {
        let mut world = empty_world(1);
        world.set_block(3, 0, 3, BlockType::BEDROCK.id());

        assert_eq!(world.get_block(3, 0, 3), BlockType::BEDROCK.id());
        assert_eq!(world.get_block(3, -1, 3), AIR);
        assert_eq!(world.get_block(3, 256, 3), AIR);
        assert_eq!(world.get_block(100, 10, 100), AIR);
    }

    #[test]
    #[should_panic]
    fn writing_into_an_unloaded_chunk_panics_in_debug() {
        let mut world = empty_world(1);
        world.set_block(-20, 10, 0, BlockType::STONE.id());
    }

    #[test]
    fn rebuilt_meshes_are_uploaded_and_released_on_unload() {
        let log = Rc::new(RefCell::new(SinkLog::default()));
        let mut world = empty_world(0);
        world.set_mesh_sink(Box::new(RecordingSink(log.clone())));

        world.set_block(5, 40, 5, BlockType::STONE.id());
        assert_eq!(world.rebuild_meshes().rebuilt, 1);
        assert_eq!(world.rebuild_meshes().rebuilt, 0);

        let key = SubChunkKey::new(Point2::new(0, 0), 2);
        assert_eq!(log.borrow().uploads, vec![(key, Point3::new(0, 32, 0), 24)]);

        pollster::block_on(world.unload_chunk(Point2::new(0, 0))).unwrap();
        assert_eq!(log.borrow().releases, vec![key]);
        assert_eq!(world.loaded_chunk_count(), 0);
    }

    #[test]
    fn wireframe_toggle_remeshes_everything() {
        let mut world = empty_world(0);
        world.set_block(0, 0, 0, BlockType::STONE.id());
        world.set_block(0, 200, 0, BlockType::STONE.id());
        assert_eq!(world.rebuild_meshes().rebuilt, 2);

        world.set_wireframe(true);
        assert_eq!(world.mesh_mode(), MeshMode::Wireframe);
        assert_eq!(world.rebuild_meshes().rebuilt, 2);

        world.set_wireframe(true);
        assert_eq!(world.rebuild_meshes().rebuilt, 0);
    }

    #[test]
    fn focus_is_stored_and_cleared() {
        let mut world = empty_world(0);
        world.focus_block(Some(Point3::new(1, 2, 3)));
        assert_eq!(world.focused_block(), Some(Point3::new(1, 2, 3)));
        world.focus_block(None);
        assert_eq!(world.focused_block(), None);
    }
}
