use serde::{Deserialize, Serialize};

use super::data::{Snapshot, Ticks};

/// Newest-seen timestamp watermark. Only ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cursor {
    newest: Ticks,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::MIN
    }
}

impl Cursor {
    pub const MIN: Cursor = Cursor { newest: Ticks::MIN };

    pub fn at(newest: Ticks) -> Self {
        Self { newest }
    }

    pub fn newest(&self) -> Ticks {
        self.newest
    }

    pub fn is_min(&self) -> bool {
        self.newest == Ticks::MIN
    }

    /// Cursor covering every point of `snapshot`. Unchanged for a snapshot
    /// without points.
    pub fn advance(&self, snapshot: &Snapshot) -> Cursor {
        match snapshot.max_timestamp() {
            Some(max) => self.advance_to(max),
            None => *self,
        }
    }

    pub fn advance_to(&self, ts: Ticks) -> Cursor {
        Cursor {
            newest: self.newest.max(ts),
        }
    }

    /// Whether a point at `ts` is newer than the watermark.
    pub fn admits(&self, ts: Ticks) -> bool {
        ts > self.newest
    }
}

/// Which rows a fetch cycle asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchMode {
    /// Discard prior state and load everything.
    Full,
    /// Only rows strictly newer than the cursor.
    IncrementalSince(Cursor),
}

impl FetchMode {
    pub fn for_new_only(new_only: bool, cursor: Cursor) -> Self {
        if new_only {
            FetchMode::IncrementalSince(cursor)
        } else {
            FetchMode::Full
        }
    }

    pub fn is_incremental(&self) -> bool {
        matches!(self, FetchMode::IncrementalSince(_))
    }

    /// Lower bound (exclusive) for admitted points.
    pub fn since(&self) -> Cursor {
        match self {
            FetchMode::Full => Cursor::MIN,
            FetchMode::IncrementalSince(c) => *c,
        }
    }
}
