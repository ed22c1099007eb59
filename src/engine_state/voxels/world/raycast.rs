//! Ray picking against the block grid.
//!
//! Implements Amanatides & Woo's fast voxel traversal, bounded by a caller
//! supplied distance instead of a grid extent. The cell sequence it visits is
//! observable (it decides which block a corner or edge ray reports), so the
//! axis selection and the termination rules below must stay exactly as they
//! are.

use cgmath::{Point3, Vector3};

use super::World;
use crate::engine_state::voxels::block::{BlockTypeSize, AIR};
use crate::engine_state::voxels::storage::ChunkStore;

/// The first non-air block found along a ray.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RayHit {
    /// World position of the block that was hit.
    pub position: Point3<i32>,
    /// Type of the block that was hit; never air.
    pub block: BlockTypeSize,
}

fn step_sign(component: f64) -> i32 {
    if component > 0.0 {
        1
    } else if component < 0.0 {
        -1
    } else {
        0
    }
}

/// Walks the cells pierced by a ray until `block_at` reports a non-air block.
///
/// `direction` is expected to be normalized. Axes with a zero direction
/// component never advance and never bound the walk.
///
/// The walk stops with `None` once the accumulated distance exceeds
/// `max_distance`, or as soon as a step fails to increase it. The latter only
/// happens when every axis is stuck, e.g. for a zero direction vector.
pub fn traverse(
    origin: Point3<f64>,
    direction: Vector3<f64>,
    max_distance: f64,
    mut block_at: impl FnMut(Point3<i32>) -> BlockTypeSize,
) -> Option<RayHit> {
    let start = [origin.x, origin.y, origin.z];
    let dir = [direction.x, direction.y, direction.z];

    let mut cell = start.map(|component| component.floor() as i32);
    let step = dir.map(step_sign);
    let mut t_max = [f64::INFINITY; 3];
    let mut t_delta = [0.0; 3];

    for axis in 0..3 {
        // Zero components would yield NaN below; they keep the defaults instead.
        if dir[axis] != 0.0 {
            t_max[axis] = ((cell[axis] + step[axis]) as f64 - start[axis]) / dir[axis];
            t_delta[axis] = step[axis] as f64 / dir[axis];
        }
    }

    let mut distance = 0.0;
    loop {
        let position = Point3::new(cell[0], cell[1], cell[2]);
        let block = block_at(position);
        if block != AIR {
            return Some(RayHit { position, block });
        }

        let axis = if t_max[0] < t_max[1] {
            if t_max[0] < t_max[2] {
                0
            } else {
                2
            }
        } else if t_max[1] < t_max[2] {
            1
        } else {
            2
        };

        cell[axis] += step[axis];
        t_max[axis] += t_delta[axis];

        let previous = distance;
        distance += t_delta[axis];
        if distance > max_distance || distance == previous {
            return None;
        }
    }
}

impl<S: ChunkStore> World<S> {
    /// Casts a ray through the loaded world and returns the first solid block.
    ///
    /// Unloaded chunks and heights outside the world read as air.
    pub fn intersect(
        &self,
        origin: Point3<f64>,
        direction: Vector3<f64>,
        max_distance: f64,
    ) -> Option<RayHit> {
        traverse(origin, direction, max_distance, |position| {
            self.get_block(position.x, position.y, position.z)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;
    use std::collections::HashMap;

    fn grid(blocks: &[(i32, i32, i32)]) -> HashMap<Point3<i32>, BlockTypeSize> {
        blocks
            .iter()
            .map(|&(x, y, z)| (Point3::new(x, y, z), 1))
            .collect()
    }

    fn cast(
        blocks: &HashMap<Point3<i32>, BlockTypeSize>,
        origin: Point3<f64>,
        direction: Vector3<f64>,
        max_distance: f64,
    ) -> Option<RayHit> {
        traverse(origin, direction, max_distance, |p| {
            blocks.get(&p).copied().unwrap_or(AIR)
        })
    }

    #[test]
    fn straight_down_hits_the_block_below() {
        let blocks = grid(&[(0, 0, 0)]);
        let hit = cast(
            &blocks,
            Point3::new(0.5, 1.5, 0.5),
            Vector3::new(0.0, -1.0, 0.0),
            1.0,
        );
        assert_eq!(
            hit,
            Some(RayHit {
                position: Point3::new(0, 0, 0),
                block: 1
            })
        );
    }

    #[test]
    fn short_rays_miss() {
        let blocks = grid(&[(0, 0, 0)]);
        let hit = cast(
            &blocks,
            Point3::new(0.5, 5.5, 0.5),
            Vector3::new(0.0, -1.0, 0.0),
            2.0,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn starting_inside_a_block_hits_it() {
        let blocks = grid(&[(2, 3, 4)]);
        let hit = cast(&blocks, Point3::new(2.2, 3.9, 4.1), Vector3::unit_x(), 0.0);
        assert_eq!(hit.map(|h| h.position), Some(Point3::new(2, 3, 4)));
    }

    #[test]
    fn zero_direction_stalls_out() {
        let blocks = grid(&[(5, 5, 5)]);
        let hit = cast(&blocks, Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 0.0, 0.0), 100.0);
        assert_eq!(hit, None);
    }

    #[test]
    fn diagonal_tie_advances_y_before_x() {
        let blocks = grid(&[(1, 0, 0), (0, 1, 0)]);
        let hit = cast(
            &blocks,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(1.0, 1.0, 0.0).normalize(),
            10.0,
        );
        assert_eq!(hit.map(|h| h.position), Some(Point3::new(0, 1, 0)));
    }

    #[test]
    fn x_and_z_tie_advances_z_first() {
        let blocks = grid(&[(1, 0, 0), (0, 0, 1)]);
        let hit = cast(
            &blocks,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(1.0, 0.0, 1.0).normalize(),
            10.0,
        );
        assert_eq!(hit.map(|h| h.position), Some(Point3::new(0, 0, 1)));
    }

    #[test]
    fn three_way_tie_advances_z_first() {
        let blocks = grid(&[(1, 0, 0), (0, 1, 0), (0, 0, 1)]);
        let hit = cast(
            &blocks,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(1.0, 1.0, 1.0).normalize(),
            10.0,
        );
        assert_eq!(hit.map(|h| h.position), Some(Point3::new(0, 0, 1)));
    }

    #[test]
    fn axis_aligned_rays_reach_distant_blocks() {
        let blocks = grid(&[(5, 0, 0)]);
        let origin = Point3::new(0.5, 0.5, 0.5);

        let hit = cast(&blocks, origin, Vector3::unit_x(), 10.0);
        assert_eq!(hit.map(|h| h.position), Some(Point3::new(5, 0, 0)));

        assert_eq!(cast(&blocks, origin, Vector3::unit_x(), 4.0), None);
    }

    #[test]
    fn negative_directions_walk_backwards() {
        let blocks = grid(&[(-3, 0, 0)]);
        let hit = cast(&blocks, Point3::new(0.5, 0.5, 0.5), -Vector3::unit_x(), 10.0);
        assert_eq!(hit.map(|h| h.position), Some(Point3::new(-3, 0, 0)));
    }
}
