//! # World Configuration
//!
//! Tunables for opening a world. Every field has a default, so a config file
//! only needs the values it wants to change:
//!
//! ```toml
//! render_distance = 4
//! seed = 1337
//! generation = "height_map"
//! save_directory = "saves"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{WorldError, WorldResult};

/// Default render/load radius in chunks.
pub const RENDER_DISTANCE: i32 = 2;
/// Largest accepted render distance. The load window holds `(2r + 1)²` chunks.
pub const MAX_RENDER_DISTANCE: i32 = 64;
/// Default scaling factor applied to world coordinates when sampling terrain noise.
pub const TERRAIN_SCALE_FACTOR: f64 = 0.02;

/// The method used to generate new chunks.
#[derive(Deserialize, Copy, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Noise-driven height map with stone, dirt and grass layers.
    #[default]
    HeightMap,
    /// Chunks start as pure air.
    Empty,
}

/// Settings used when a world is opened.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Chebyshev radius, in chunks, around the viewer that is kept loaded.
    pub render_distance: i32,
    /// Seed of the terrain noise.
    pub seed: u32,
    /// Scaling factor applied to world coordinates when sampling terrain noise.
    pub terrain_scale: f64,
    /// How chunks missing from the store are filled.
    pub generation: GenerationMethod,
    /// Directory under which each named world gets its own folder.
    pub save_directory: PathBuf,
    /// Emit line meshes instead of triangles.
    pub wireframe: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            render_distance: RENDER_DISTANCE,
            seed: 0,
            terrain_scale: TERRAIN_SCALE_FACTOR,
            generation: GenerationMethod::default(),
            save_directory: PathBuf::from("saves"),
            wireframe: false,
        }
    }
}

impl WorldConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> WorldResult<Self> {
        let config: WorldConfig =
            toml::from_str(source).map_err(|error| WorldError::Config(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|error| WorldError::Config(format!("{}: {}", path.display(), error)))?;
        Self::from_toml_str(&source)
    }

    pub(crate) fn validate(&self) -> WorldResult<()> {
        if !(0..=MAX_RENDER_DISTANCE).contains(&self.render_distance) {
            return Err(WorldError::Config(format!(
                "render_distance must be in 0..={}, got {}",
                MAX_RENDER_DISTANCE, self.render_distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(WorldConfig::from_toml_str("").unwrap(), WorldConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config = WorldConfig::from_toml_str(
            "render_distance = 5\nseed = 9\ngeneration = \"empty\"\nwireframe = true\n",
        )
        .unwrap();

        assert_eq!(config.render_distance, 5);
        assert_eq!(config.seed, 9);
        assert_eq!(config.generation, GenerationMethod::Empty);
        assert!(config.wireframe);
        assert_eq!(config.terrain_scale, TERRAIN_SCALE_FACTOR);
    }

    #[test]
    fn negative_render_distance_is_rejected() {
        assert!(matches!(
            WorldConfig::from_toml_str("render_distance = -1"),
            Err(WorldError::Config(_))
        ));
    }

    #[test]
    fn render_distance_is_bounded_above() {
        assert!(WorldConfig::from_toml_str("render_distance = 64").is_ok());
        assert!(matches!(
            WorldConfig::from_toml_str("render_distance = 65"),
            Err(WorldError::Config(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("render_distance = 2000000000\ngeneration = \"empty\""),
            Err(WorldError::Config(_))
        ));
    }
}
