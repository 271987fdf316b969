use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Unknown operator identity: '{name}'")]
    UnknownIdentity { name: String },

    #[error("Invalid period '{period}': expected Outubro, Novembro or Dezembro")]
    InvalidPeriod { period: String },

    #[error("Malformed entry: {reason}")]
    MalformedEntry { reason: String },

    #[error("Sheet header too narrow: expected at least {expected} columns, got {got}")]
    StructuralMismatch { expected: usize, got: usize },

    #[error("Operator '{operator}' not found in the sheet")]
    NotFound { operator: String },

    #[error("Source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("Spreadsheet request failed ({kind}): {message}")]
    Upstream { kind: UpstreamKind, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SyncResult<T> = Result<T, SyncError>;

/// Failure shape of a spreadsheet fetch, used to pick a user-actionable
/// message instead of a bare HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    Permission,
    SheetNotFound,
    MalformedRange,
    Other,
}

impl fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UpstreamKind::Permission => "permission",
            UpstreamKind::SheetNotFound => "not_found",
            UpstreamKind::MalformedRange => "malformed_range",
            UpstreamKind::Other => "other",
        };
        f.write_str(label)
    }
}
