use parking_lot::Mutex;
use std::fmt::{self, Display};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityEntry {
    pub label: String,
    pub value: String,
}

impl Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label.trim_end(), self.value)
    }
}

/// Append-only, human-readable activity log. Cloning hands out another
/// handle to the same log so the host can read it while the core writes.
#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    entries: Arc<Mutex<Vec<ActivityEntry>>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, label: impl Into<String>, value: impl Display) {
        let entry = ActivityEntry {
            label: label.into(),
            value: value.to_string(),
        };
        debug!(label = %entry.label, value = %entry.value, "activity");
        self.entries.lock().push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.lock().clone()
    }

    pub fn last(&self) -> Option<ActivityEntry> {
        self.entries.lock().last().cloned()
    }

    /// One line per entry, oldest first.
    pub fn output(&self) -> String {
        let entries = self.entries.lock();
        let mut out = String::new();
        for e in entries.iter() {
            out.push_str(&e.to_string());
            out.push('\n');
        }
        out
    }
}
