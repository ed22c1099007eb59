//! # Chunk Generation Module
//!
//! Populates brand-new chunks. Generation runs exactly once per chunk, the
//! first time it is requested and not found in the store; reloaded chunks
//! come from their persisted record instead.
//!
//! The height-map terrain samples a scalar noise field once per column and
//! stacks bedrock, stone, a dirt band and a grass cap up to that height.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use super::{Chunk, ChunkPos, CHUNK_DIMENSION};
use crate::config::GenerationMethod;
use crate::engine_state::voxels::block::block_type::BlockType;

/// Lowest possible terrain surface height.
pub const BASE_TERRAIN_HEIGHT: usize = 30;
/// Range added on top of [`BASE_TERRAIN_HEIGHT`] by the noise sample.
pub const TERRAIN_HEIGHT_VARIATION: f64 = 16.0;
/// Thickness of the dirt band between stone and grass.
pub const DIRT_DEPTH: usize = 3;
/// The fixed coordinate of the unused third noise axis.
pub const TERRAIN_NOISE_Y: f64 = 0.5;

/// Builds new chunks using the configured generation method.
pub struct TerrainGenerator {
    method: GenerationMethod,
    noise: Box<dyn NoiseFn<f64, 3>>,
    /// Scaling factor applied to world coordinates when sampling noise.
    scale: f64,
}

impl TerrainGenerator {
    /// Creates a generator backed by seeded Perlin noise.
    pub fn new(method: GenerationMethod, seed: u32, scale: f64) -> Self {
        Self::with_noise(method, Box::new(Perlin::new(seed)), scale)
    }

    /// Creates a generator backed by any noise function with a native
    /// output range of `[-1, 1]`.
    pub fn with_noise(
        method: GenerationMethod,
        noise: Box<dyn NoiseFn<f64, 3>>,
        scale: f64,
    ) -> Self {
        TerrainGenerator {
            method,
            noise,
            scale,
        }
    }

    /// The generation method chunks are filled with.
    pub fn method(&self) -> GenerationMethod {
        self.method
    }

    /// Generates the chunk at `position`.
    pub fn generate(&self, position: ChunkPos) -> Chunk {
        match self.method {
            GenerationMethod::HeightMap => self.height_map(position),
            GenerationMethod::Empty => Chunk::empty(position),
        }
    }

    /// Terrain surface height of the column at world `(x, z)`.
    ///
    /// The noise sample is remapped from `[-1, 1]` to `[0, 1]` and scaled into
    /// `BASE_TERRAIN_HEIGHT..=BASE_TERRAIN_HEIGHT + 16`.
    pub fn height_at(&self, world_x: i32, world_z: i32) -> usize {
        let sample = self.noise.get([
            world_x as f64 * self.scale,
            TERRAIN_NOISE_Y,
            world_z as f64 * self.scale,
        ]);
        let normalized = ((sample + 1.0) / 2.0).clamp(0.0, 1.0);
        BASE_TERRAIN_HEIGHT + (normalized * TERRAIN_HEIGHT_VARIATION).floor() as usize
    }

    fn height_map(&self, position: ChunkPos) -> Chunk {
        let mut chunk = Chunk::empty(position);
        let origin = chunk.origin();

        for x in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                let height = self.height_at(origin.x + x as i32, origin.z + z as i32);

                chunk.fill_area(
                    Point3::new(x, 0, z),
                    Point3::new(x, height, z),
                    BlockType::STONE.id(),
                );
                chunk.set_block(x, 0, z, BlockType::BEDROCK.id());
                chunk.fill_area(
                    Point3::new(x, height + 1, z),
                    Point3::new(x, height + DIRT_DEPTH, z),
                    BlockType::DIRT.id(),
                );
                chunk.set_block(x, height + DIRT_DEPTH + 1, z, BlockType::GRASS.id());
            }
        }

        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::AIR;
    use crate::engine_state::voxels::sub_chunk::SUB_CHUNK_DIMENSION;
    use cgmath::Point2;
    use noise::Constant;

    fn flat(value: f64) -> TerrainGenerator {
        TerrainGenerator::with_noise(
            GenerationMethod::HeightMap,
            Box::new(Constant::new(value)),
            0.02,
        )
    }

    #[test]
    fn column_layers_follow_the_height() {
        // A sample of 0.0 remaps to 0.5, giving height 30 + 8.
        let chunk = flat(0.0).generate(Point2::new(0, 0));

        assert_eq!(chunk.get_block(4, 0, 4), BlockType::BEDROCK.id());
        assert_eq!(chunk.get_block(4, 1, 4), BlockType::STONE.id());
        assert_eq!(chunk.get_block(4, 38, 4), BlockType::STONE.id());
        assert_eq!(chunk.get_block(4, 39, 4), BlockType::DIRT.id());
        assert_eq!(chunk.get_block(4, 41, 4), BlockType::DIRT.id());
        assert_eq!(chunk.get_block(4, 42, 4), BlockType::GRASS.id());
        assert_eq!(chunk.get_block(4, 43, 4), AIR);
    }

    #[test]
    fn height_stays_in_range_at_noise_extremes() {
        assert_eq!(flat(-1.0).height_at(0, 0), 30);
        assert_eq!(flat(1.0).height_at(0, 0), 46);
        assert_eq!(flat(5.0).height_at(0, 0), 46);
    }

    #[test]
    fn only_the_lower_bands_are_allocated() {
        let chunk = flat(1.0).generate(Point2::new(0, 0));
        // Grass tops out at 46 + 4 = 50, inside slot 3.
        let top_slot = (46 + DIRT_DEPTH + 1) / SUB_CHUNK_DIMENSION;
        assert_eq!(chunk.allocated_sub_chunks(), top_slot + 1);
    }

    #[test]
    fn same_seed_generates_identical_chunks() {
        let a = TerrainGenerator::new(GenerationMethod::HeightMap, 42, 0.02);
        let b = TerrainGenerator::new(GenerationMethod::HeightMap, 42, 0.02);
        let position = Point2::new(-3, 7);

        let (first, second) = (a.generate(position), b.generate(position));
        for index in 0..16 {
            assert_eq!(
                first.sub_chunk(index).map(|s| s.as_bytes().to_vec()),
                second.sub_chunk(index).map(|s| s.as_bytes().to_vec())
            );
        }
    }

    #[test]
    fn empty_method_allocates_nothing() {
        let generator = TerrainGenerator::new(GenerationMethod::Empty, 0, 0.02);
        assert_eq!(generator.generate(Point2::new(1, 1)).allocated_sub_chunks(), 0);
    }
}
