//! # Chunk Streaming
//!
//! Two resumable jobs keep the loaded set centred on the viewer. Each server
//! tick advances the unload job by one step and then the load job by one step,
//! so at most one chunk leaves and one chunk arrives per tick.
//!
//! Both jobs read the live player chunk and render distance every step, so
//! moving mid-pass changes which chunks the rest of the pass looks at.

use std::collections::VecDeque;

use cgmath::Point2;
use log::trace;

use super::World;
use crate::engine_state::voxels::chunk::ChunkPos;
use crate::engine_state::voxels::storage::ChunkStore;
use crate::error::WorldResult;

/// What a single server tick changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Chunk persisted and dropped by the unload job, if any.
    pub unloaded: Option<ChunkPos>,
    /// Chunk fetched or generated by the load job, if any.
    pub loaded: Option<ChunkPos>,
}

impl TickReport {
    /// Whether neither job did anything this tick.
    pub fn is_idle(&self) -> bool {
        self.unloaded.is_none() && self.loaded.is_none()
    }
}

/// Walks a snapshot of the loaded chunks looking for ones out of range.
#[derive(Debug, Default)]
pub(super) struct UnloadJob {
    pass: Option<VecDeque<ChunkPos>>,
}

impl UnloadJob {
    fn in_pass(&self) -> bool {
        self.pass.is_some()
    }

    fn start_pass(&mut self, mut positions: Vec<ChunkPos>) {
        positions.sort_by_key(|position| (position.x, position.y));
        self.pass = Some(positions.into());
    }

    /// Next candidate of the current pass. Ends the pass when none remain.
    fn next_candidate(&mut self) -> Option<ChunkPos> {
        let next = self.pass.as_mut().and_then(VecDeque::pop_front);
        if next.is_none() {
            self.pass = None;
        }
        next
    }
}

/// Scans the square window around the player, x outer and z inner.
#[derive(Debug, Default)]
pub(super) struct LoadJob {
    cursor: usize,
}

/// Window offset of the `index`th cell for a given radius.
fn window_offset(index: usize, render_distance: i32) -> (i32, i32) {
    let side = (2 * render_distance + 1) as usize;
    let dx = (index / side) as i32 - render_distance;
    let dz = (index % side) as i32 - render_distance;
    (dx, dz)
}

impl<S: ChunkStore> World<S> {
    /// Advances the unload job, then the load job, by one step each.
    ///
    /// # Errors
    /// A store failure in either step is returned as is. When the unload step
    /// fails the load step is not attempted this tick.
    pub async fn server_tick(&mut self) -> WorldResult<TickReport> {
        let unloaded = self.step_unload_job().await?;
        let loaded = self.step_load_job().await?;
        if unloaded.is_some() || loaded.is_some() {
            trace!("Tick unloaded {:?}, loaded {:?}", unloaded, loaded);
        }
        Ok(TickReport { unloaded, loaded })
    }

    /// Unloads the next out-of-range chunk of the current pass.
    ///
    /// Returns `None` when the pass ran out of candidates; the following call
    /// starts a new pass over a fresh snapshot.
    async fn step_unload_job(&mut self) -> WorldResult<Option<ChunkPos>> {
        if !self.unload_job.in_pass() {
            let loaded = self.chunks.keys().copied().collect();
            self.unload_job.start_pass(loaded);
        }

        while let Some(position) = self.unload_job.next_candidate() {
            if self.is_loaded(position) && !self.should_be_loaded(position) {
                self.unload_chunk(position).await?;
                return Ok(Some(position));
            }
        }
        Ok(None)
    }

    /// Loads the next missing chunk of the window around the player.
    ///
    /// Returns `None` after a full sweep without anything to load; the cursor
    /// then starts over from the window's corner.
    async fn step_load_job(&mut self) -> WorldResult<Option<ChunkPos>> {
        loop {
            let render_distance = self.render_distance;
            let side = (2 * render_distance + 1) as usize;
            let index = self.load_job.cursor;
            if index >= side * side {
                self.load_job.cursor = 0;
                return Ok(None);
            }
            self.load_job.cursor += 1;

            let (dx, dz) = window_offset(index, render_distance);
            let position = Point2::new(self.player_chunk.x + dx, self.player_chunk.y + dz);
            if !self.is_loaded(position) && self.should_be_loaded(position) {
                self.load_chunk(position).await?;
                return Ok(Some(position));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_scanned_x_outer_z_inner() {
        let offsets: Vec<_> = (0..9).map(|index| window_offset(index, 1)).collect();
        assert_eq!(
            offsets,
            vec![
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 0),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1)
            ]
        );
    }

    #[test]
    fn zero_radius_window_is_the_centre() {
        assert_eq!(window_offset(0, 0), (0, 0));
    }

    #[test]
    fn unload_pass_is_sorted_and_ends_with_none() {
        let mut job = UnloadJob::default();
        job.start_pass(vec![Point2::new(1, 0), Point2::new(-2, 5), Point2::new(1, -1)]);

        assert_eq!(job.next_candidate(), Some(Point2::new(-2, 5)));
        assert_eq!(job.next_candidate(), Some(Point2::new(1, -1)));
        assert_eq!(job.next_candidate(), Some(Point2::new(1, 0)));
        assert!(job.in_pass());
        assert_eq!(job.next_candidate(), None);
        assert!(!job.in_pass());
    }
}
