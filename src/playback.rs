//! Paced driving of a running search for the animated visualization.
//!
//! The terminal loop redraws continuously; this module decides when the next expansion of the
//! search may happen so that the exploration unfolds at a watchable speed, and forwards the
//! notifications of each expansion to the board.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;

use crate::{
    board::Board,
    search::{CancellationToken, Search, SearchStatus},
    strategy::Strategy,
};

/// Playback state for one animated search.
///
/// This structure holds the timing of the last expansion and the cancellation token the user
/// triggers from the keyboard. A fresh token is created for every search so a cancelled run does
/// not affect the next one.
#[derive(Debug)]
pub(crate) struct Playback {
    /// Minimum delay between two expansions.
    ///
    /// A lower value results in a faster animation, while a higher value slows it down to make it
    /// easier to follow the algorithm's progress.
    pub(crate) frame_delay: Duration,
    /// Timestamp of the last expansion.
    pub(crate) last_update_time: Instant,
    /// Token checked before every expansion.
    pub(crate) cancel: CancellationToken,
}

impl Playback {
    /// Creates a playback with the given pacing.
    pub(crate) fn new(frame_delay: Duration) -> Self {
        Self {
            frame_delay,
            last_update_time: Instant::now(),
            cancel: CancellationToken::new(),
        }
    }

    /// Prepares the playback for a new search.
    pub(crate) fn reset(&mut self) {
        self.last_update_time = Instant::now();
        self.cancel = CancellationToken::new();
    }

    /// Advances the search by one expansion when the frame delay has elapsed.
    ///
    /// Notifications go straight to the board. When the search finds the end, the path is loaded
    /// onto the board in the same update. A cancelled token aborts the search before any further
    /// expansion.
    ///
    /// # Errors
    ///
    /// This function may return errors from the search engine.
    pub(crate) fn update<S: Strategy>(
        &mut self,
        search: &mut Search<S>,
        board: &mut Board,
    ) -> Result<SearchStatus> {
        if search.status() != SearchStatus::Running {
            return Ok(search.status());
        }

        if self.cancel.is_cancelled() {
            search.cancel();
            return Ok(search.status());
        }

        if self.last_update_time.elapsed() >= self.frame_delay {
            self.last_update_time = Instant::now();

            if search.step(board)? == SearchStatus::Found {
                search.load_path(board)?;
            }
        }

        Ok(search.status())
    }
}
