//! Per-file download dispatch
//!
//! One dispatch handles one pending file: probe the remote host, skip
//! files already in the bucket, and hand the rest to the download worker.
//! Every failure path is folded into the returned outcome so that a bad
//! file never aborts its siblings.

use crate::existence::ExistenceChecker;
use crate::probe::AvailabilityProbe;
use crate::worker::DownloadWorker;
use dxp_common::{DownloadOutcome, PendingFile};
use std::sync::Arc;
use tracing::{debug, error};

/// Runs the probe / exists / invoke sequence for a single file.
#[derive(Clone)]
pub struct Dispatcher {
    probe: AvailabilityProbe,
    checker: ExistenceChecker,
    worker: Arc<dyn DownloadWorker>,
    bucket: String,
}

impl Dispatcher {
    pub fn new(
        probe: AvailabilityProbe,
        checker: ExistenceChecker,
        worker: Arc<dyn DownloadWorker>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            probe,
            checker,
            worker,
            bucket: bucket.into(),
        }
    }

    /// Dispatch one file. Never returns an error:
    ///
    /// - not yet available: `success=false`, no error, retried next cycle
    /// - already in the bucket: `success=true`, worker not invoked
    /// - invocation acknowledged: `success=true`
    /// - invocation failed: `success=false` with the error attached
    pub async fn dispatch(&self, file: PendingFile) -> DownloadOutcome {
        if !self.probe.probe(&file).await {
            debug!(file = %file, "Download is not ready yet, will wait for next scheduled check");
            return DownloadOutcome::not_ready(file);
        }

        if self.checker.exists(&file).await {
            debug!(file = %file, "Object already exists, skipping");
            return DownloadOutcome::succeeded(file);
        }

        debug!(file = %file, "Downloading file");
        match self.worker.invoke(&file.download_path, &self.bucket).await {
            Ok(()) => DownloadOutcome::succeeded(file),
            Err(e) => {
                error!(file = %file, error = %e, "Error invoking download worker");
                DownloadOutcome::failed(file, e.to_string())
            },
        }
    }
}
