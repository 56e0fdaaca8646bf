use std::collections::VecDeque;
use tracing::debug;

use crate::data_types::{Cursor, FetchMode, Point};
use crate::error::SyncError;
use crate::reader::SeriesReader;
use crate::source::SeriesSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Empty,
    Buffered,
    Draining,
}

/// Plays the primary series back one point per tick.
///
/// The queue is filled from a fetch only when it is empty, and is never
/// refreshed while it still holds points: newer data waits until the
/// current buffer has drained.
#[derive(Clone, Debug, Default)]
pub struct StreamPlayer {
    queue: VecDeque<Point>,
    source_label: Option<String>,
    state: PlayerState,
}

impl StreamPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn buffered(&self) -> usize {
        self.queue.len()
    }

    /// Label of the series the current (or last) buffer was filled from.
    pub fn source_label(&self) -> Option<&str> {
        self.source_label.as_deref()
    }

    /// Fills the queue if it is empty, without emitting anything. Moves
    /// `Empty` to `Buffered` when points newer than `cursor` exist. A
    /// non-empty queue is left alone. Returns the number of buffered points.
    pub async fn prime<S: SeriesSource>(
        &mut self,
        reader: &SeriesReader<S>,
        sample_rate: u32,
        cursor: Cursor,
    ) -> Result<usize, SyncError> {
        if self.queue.is_empty() {
            self.refill(reader, sample_rate, cursor).await?;
        }
        Ok(self.queue.len())
    }

    /// Emits the oldest buffered point and moves `cursor` to it, priming
    /// first when the queue is empty. Returns `Ok(None)` when there is
    /// nothing newer than the cursor.
    ///
    /// A failed refill leaves the queue, the label and the cursor untouched.
    pub async fn step<S: SeriesSource>(
        &mut self,
        reader: &SeriesReader<S>,
        sample_rate: u32,
        cursor: &mut Cursor,
    ) -> Result<Option<Point>, SyncError> {
        self.prime(reader, sample_rate, *cursor).await?;

        let Some(point) = self.queue.pop_front() else {
            return Ok(None);
        };
        *cursor = cursor.advance_to(point.x);
        self.state = if self.queue.is_empty() {
            PlayerState::Empty
        } else {
            PlayerState::Draining
        };
        Ok(Some(point))
    }

    async fn refill<S: SeriesSource>(
        &mut self,
        reader: &SeriesReader<S>,
        sample_rate: u32,
        cursor: Cursor,
    ) -> Result<(), SyncError> {
        let snapshot = reader.fetch(FetchMode::Full, sample_rate).await?;
        let Some(primary) = snapshot.primary_series() else {
            debug!("playback idle: empty snapshot");
            return Ok(());
        };

        self.queue = primary
            .points
            .iter()
            .filter(|p| cursor.admits(p.x))
            .copied()
            .collect();
        self.source_label = Some(primary.label.clone());

        if self.queue.is_empty() {
            debug!(label = %primary.label, "playback idle: nothing newer than cursor");
        } else {
            self.state = PlayerState::Buffered;
            debug!(label = %primary.label, buffered = self.queue.len(), "playback buffer filled");
        }
        Ok(())
    }
}
