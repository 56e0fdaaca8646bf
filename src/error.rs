use thiserror::Error;

/// Failure of a fetch cycle. Any of these aborts the cycle before the
/// cursor, palette or playback queue are touched.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("fetch failed: {url} returned {status}")]
    Status { url: String, status: u16 },
    #[error("malformed row at line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("malformed sampled payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl SyncError {
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        SyncError::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Transport failure or non-success status.
    pub fn is_fetch(&self) -> bool {
        matches!(self, SyncError::Fetch(_) | SyncError::Status { .. })
    }

    /// Malformed response body.
    pub fn is_parse(&self) -> bool {
        matches!(self, SyncError::Parse { .. } | SyncError::Json(_))
    }
}

/// Failure reported by a rendering engine adapter. Logged, never propagated
/// into the model.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendering engine rejected `{command}`: {reason}")]
    Rejected { command: &'static str, reason: String },
    #[error("rendering engine unavailable: {0}")]
    Unavailable(String),
}
