use std::path::PathBuf;

use crate::config::mappers::ConversionError;

/// Errors that stop a run as a whole. Per-case failures never end up here.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("failed to read setting file {path:?}: {source}")]
    ReadSetting {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse setting file {path:?}: {source}")]
    ParseSetting {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid setting file {path:?}: {source}")]
    InvalidSetting {
        path: PathBuf,
        source: ConversionError,
    },
    #[error("failed to serialize report: {0}")]
    SerializeReport(#[from] serde_json::Error),
    #[error("failed to write report to {path:?}: {source}")]
    WriteReport {
        path: PathBuf,
        source: std::io::Error,
    },
}
