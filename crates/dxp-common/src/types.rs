//! Common types used across DXP

use serde::{Deserialize, Serialize};

/// A remote export file that has not yet been confirmed downloaded.
///
/// Produced by the pending-file source once per orchestration cycle and
/// consumed read-only by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFile {
    /// Identifier assigned by the pending-file source
    pub id: i64,
    /// Source URL the remote host serves the file from
    pub download_path: String,
}

impl PendingFile {
    pub fn new(id: i64, download_path: impl Into<String>) -> Self {
        Self {
            id,
            download_path: download_path.into(),
        }
    }
}

impl std::fmt::Display for PendingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.download_path)
    }
}

/// Per-file result of one dispatch attempt.
///
/// Created exactly once per `PendingFile` per cycle and never mutated.
/// `success=false` with no error means the file was not yet available and
/// will be retried on the next cycle; an attached error means the worker
/// invocation itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOutcome {
    pub file: PendingFile,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DownloadOutcome {
    /// Outcome for a file that was handled (dispatched or already present)
    pub fn succeeded(file: PendingFile) -> Self {
        Self {
            file,
            success: true,
            error: None,
        }
    }

    /// Outcome for a file that is not yet available on the remote host
    pub fn not_ready(file: PendingFile) -> Self {
        Self {
            file,
            success: false,
            error: None,
        }
    }

    /// Outcome for a file whose worker invocation failed
    pub fn failed(file: PendingFile, error: impl Into<String>) -> Self {
        Self {
            file,
            success: false,
            error: Some(error.into()),
        }
    }
}
