//! # Voxel World Entry Point
//!
//! Calls into the library's `run()` function, which opens the `default` world
//! under the configured save directory and runs a short headless session.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug VOXEL_WORLD_CONFIG=world.toml cargo run --release
//! ```

fn main() {
    voxel_world::run();
}
