//! Texture lookup for the meshing pipeline.
//!
//! The atlas packer itself lives outside this crate. All the mesher needs from
//! it is a rectangle in normalized atlas coordinates for each `(block, face)`
//! pair, which is what [`FaceTextureLookup`] provides.

use std::collections::HashMap;

use phf::phf_map;

use crate::engine_state::voxels::block::{self, block_side::BlockSide, BlockTypeSize};

/// A rectangle in normalized `[0, 1]` atlas coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct UvRect {
    /// Smallest u.
    pub left: f32,
    /// Smallest v.
    pub top: f32,
    /// Largest u.
    pub right: f32,
    /// Largest v.
    pub bottom: f32,
}

impl UvRect {
    /// The degenerate rectangle returned for unmapped faces.
    pub const ZERO: UvRect = UvRect {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// A rectangle from its edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        UvRect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// UVs for the four corners of a face quad, in the corner order of
    /// [`BlockSide::corners`]: bottom-left, bottom-right, top-right, top-left.
    pub fn corner_uvs(&self) -> [[f32; 2]; 4] {
        [
            [self.left, self.bottom],
            [self.right, self.bottom],
            [self.right, self.top],
            [self.left, self.top],
        ]
    }
}

/// Resolves the atlas rectangle drawn on one face of a block.
pub trait FaceTextureLookup {
    /// Returns the rectangle for `(block, side)`, or [`UvRect::ZERO`] if unmapped.
    fn texture_rect_for(&self, block: BlockTypeSize, side: BlockSide) -> UvRect;
}

/// Grid cell `(column, row)` of each texture in the default atlas image.
static DEFAULT_ATLAS_CELLS: phf::Map<&'static str, (u32, u32)> = phf_map! {
    "stone" => (0, 0),
    "dirt" => (1, 0),
    "grass_top" => (2, 0),
    "grass_side" => (3, 0),
    "bedrock" => (0, 1),
    "cobblestone" => (1, 1),
};

/// A texture atlas described by the rectangle of each named texture.
///
/// Blocks are resolved to texture names through their [`block::BlockTextures`],
/// then the name is looked up here.
#[derive(Clone, Debug, Default)]
pub struct TextureAtlas {
    rects: HashMap<String, UvRect>,
}

impl TextureAtlas {
    /// An atlas with no textures; every face maps to [`UvRect::ZERO`].
    pub fn new() -> Self {
        TextureAtlas {
            rects: HashMap::new(),
        }
    }

    /// Builds the default atlas layout: a `columns` x `rows` grid of equally
    /// sized tiles, one texture per tile.
    pub fn grid(columns: u32, rows: u32) -> Self {
        let mut atlas = TextureAtlas::new();
        let tile_width = 1.0 / columns as f32;
        let tile_height = 1.0 / rows as f32;

        for (name, (column, row)) in DEFAULT_ATLAS_CELLS.entries() {
            if *column >= columns || *row >= rows {
                log::warn!("Texture {} does not fit in a {}x{} atlas", name, columns, rows);
                continue;
            }
            let left = *column as f32 * tile_width;
            let top = *row as f32 * tile_height;
            atlas.insert(
                name,
                UvRect::new(left, top, left + tile_width, top + tile_height),
            );
        }

        atlas
    }

    /// Adds or replaces the rectangle of a named texture.
    pub fn insert(&mut self, name: &str, rect: UvRect) {
        self.rects.insert(name.to_owned(), rect);
    }

    /// Rectangle of the named texture, if it was inserted.
    pub fn get(&self, name: &str) -> Option<UvRect> {
        self.rects.get(name).copied()
    }
}

impl FaceTextureLookup for TextureAtlas {
    fn texture_rect_for(&self, block: BlockTypeSize, side: BlockSide) -> UvRect {
        block::texture_name(block, side)
            .and_then(|name| self.get(name))
            .unwrap_or(UvRect::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn grid_places_tiles_in_their_cells() {
        let atlas = TextureAtlas::grid(4, 2);
        assert_eq!(atlas.get("stone"), Some(UvRect::new(0.0, 0.0, 0.25, 0.5)));
        assert_eq!(atlas.get("cobblestone"), Some(UvRect::new(0.25, 0.5, 0.5, 1.0)));
    }

    #[test]
    fn faces_resolve_through_block_textures() {
        let atlas = TextureAtlas::grid(4, 2);
        let top = atlas.texture_rect_for(BlockType::GRASS.id(), BlockSide::TOP);
        let side = atlas.texture_rect_for(BlockType::GRASS.id(), BlockSide::LEFT);
        assert_eq!(Some(top), atlas.get("grass_top"));
        assert_eq!(Some(side), atlas.get("grass_side"));
    }

    #[test]
    fn unmapped_faces_are_degenerate() {
        let atlas = TextureAtlas::new();
        assert_eq!(
            atlas.texture_rect_for(BlockType::STONE.id(), BlockSide::TOP),
            UvRect::ZERO
        );
        assert_eq!(atlas.texture_rect_for(250, BlockSide::TOP), UvRect::ZERO);
    }
}
