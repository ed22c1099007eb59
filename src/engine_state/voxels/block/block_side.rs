//! # Block Side Module
//!
//! This module defines the six faces of a voxel block together with the fixed
//! per-face tables the mesher relies on: the neighbour offset used for
//! occlusion, the outward normal, and the corner pattern of the face quad.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned a unique integer value so it can index per-face
/// tables such as [`super::BlockTextures::PerFace`].
///
/// The order is: [TOP, BOTTOM, LEFT, RIGHT, FRONT, BACK]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    TOP = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The left face (facing negative X)
    LEFT = 2,

    /// The right face (facing positive X)
    RIGHT = 3,

    /// The front face (facing positive Z)
    FRONT = 4,

    /// The back face (facing negative Z)
    BACK = 5,
}

/// Corner offsets of each face quad relative to the cell's minimum corner.
///
/// Corners are listed counter-clockwise as seen from outside the cell, so the
/// triangles `(0, 1, 2)` and `(0, 2, 3)` are front-facing under back-face
/// culling. Corners 0 and 1 are the bottom edge of the texture, 2 and 3 the top.
const FACE_CORNERS: [[[u8; 3]; 4]; 6] = [
    // TOP
    [[0, 1, 1], [1, 1, 1], [1, 1, 0], [0, 1, 0]],
    // BOTTOM
    [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
    // LEFT
    [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]],
    // RIGHT
    [[1, 0, 1], [1, 0, 0], [1, 1, 0], [1, 1, 1]],
    // FRONT
    [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]],
    // BACK
    [[1, 0, 0], [0, 0, 0], [0, 1, 0], [1, 1, 0]],
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The mesher walks faces in exactly this order, so it also fixes the order
    /// in which faces of a single cell appear in the emitted mesh.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// The offset from a cell to the neighbour that would hide this face.
    pub fn offset(&self) -> Vector3<i32> {
        match self {
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(&self) -> [f32; 3] {
        FACE_NORMALS[*self as usize]
    }

    /// The four corners of this face, relative to the owning cell's minimum corner.
    pub fn corners(&self) -> &'static [[u8; 3]; 4] {
        &FACE_CORNERS[*self as usize]
    }
}
