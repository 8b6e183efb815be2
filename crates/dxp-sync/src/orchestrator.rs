//! Orchestration cycle
//!
//! One cycle: fetch the pending-file list, fan every file out through the
//! dispatcher with bounded concurrency, and collect every outcome. The
//! only failure that escalates is the list fetch itself.

use crate::dispatch::Dispatcher;
use crate::source::PendingSource;
use dxp_common::{DownloadOutcome, Result};
use futures::{stream, StreamExt};
use std::sync::Arc;
use tracing::info;

/// Default cap on simultaneous dispatches within one cycle.
pub const DEFAULT_MAX_CONCURRENT_DISPATCHES: usize = 8;

/// Runs one full check-downloads cycle.
pub struct Orchestrator {
    source: Arc<dyn PendingSource>,
    dispatcher: Dispatcher,
    max_concurrent: usize,
}

impl Orchestrator {
    pub fn new(source: Arc<dyn PendingSource>, dispatcher: Dispatcher) -> Self {
        Self {
            source,
            dispatcher,
            max_concurrent: DEFAULT_MAX_CONCURRENT_DISPATCHES,
        }
    }

    /// Cap the number of dispatches in flight at once. Large pending lists
    /// would otherwise open one outbound connection per file.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Run one cycle.
    ///
    /// Errors only when the pending list cannot be fetched; individual
    /// dispatch failures stay inside their `DownloadOutcome`. The returned
    /// list always has one outcome per pending file, in completion order.
    pub async fn run(&self) -> Result<Vec<DownloadOutcome>> {
        let files = self.source.list_pending().await?;
        info!(pending = files.len(), "Checking pending downloads");

        let outcomes: Vec<DownloadOutcome> = stream::iter(files)
            .map(|file| self.dispatcher.dispatch(file))
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        let dispatched = outcomes.iter().filter(|o| o.success).count();
        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        let waiting = outcomes.len() - dispatched - failed;
        info!(
            total = outcomes.len(),
            dispatched, waiting, failed, "Cycle complete"
        );

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::existence::{ExistenceChecker, ObjectStore};
    use crate::probe::AvailabilityProbe;
    use crate::worker::DownloadWorker;
    use anyhow::Result as AnyResult;
    use async_trait::async_trait;
    use dxp_common::{DxpError, PendingFile};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedSource {
        files: Vec<PendingFile>,
    }

    #[async_trait]
    impl PendingSource for FixedSource {
        async fn list_pending(&self) -> dxp_common::Result<Vec<PendingFile>> {
            Ok(self.files.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PendingSource for FailingSource {
        async fn list_pending(&self) -> dxp_common::Result<Vec<PendingFile>> {
            Err(DxpError::Source("connection refused".to_string()))
        }
    }

    struct EmptyStore;

    #[async_trait]
    impl ObjectStore for EmptyStore {
        async fn head(&self, key: &str) -> AnyResult<()> {
            anyhow::bail!("NotFound: {}", key)
        }
    }

    struct FlakyWorker {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DownloadWorker for FlakyWorker {
        async fn invoke(&self, path: &str, _bucket: &str) -> AnyResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if path.contains("bad") {
                anyhow::bail!("worker refused {}", path)
            }
            Ok(())
        }
    }

    fn dispatcher(worker: Arc<FlakyWorker>) -> Dispatcher {
        Dispatcher::new(
            AvailabilityProbe::new(reqwest::Client::new()),
            ExistenceChecker::new(Arc::new(EmptyStore)),
            worker,
            "downloads",
        )
    }

    /// Remote host where `/missing.xml` 404s and everything else is ready.
    async fn remote_host() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/missing.xml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_one_outcome_per_pending_file() {
        let server = remote_host().await;
        let files = vec![
            PendingFile::new(1, format!("{}/good.xml", server.uri())),
            PendingFile::new(2, format!("{}/missing.xml", server.uri())),
            PendingFile::new(3, format!("{}/bad.xml", server.uri())),
            PendingFile::new(4, format!("{}/other.xml", server.uri())),
        ];
        let worker = Arc::new(FlakyWorker {
            calls: AtomicUsize::new(0),
        });
        let orchestrator = Orchestrator::new(
            Arc::new(FixedSource { files }),
            dispatcher(worker.clone()),
        )
        .with_max_concurrent(2);

        let outcomes = orchestrator.run().await.unwrap();

        assert_eq!(outcomes.len(), 4);
        let by_id = |id: i64| outcomes.iter().find(|o| o.file.id == id).unwrap();
        assert!(by_id(1).success);
        assert!(!by_id(2).success);
        assert!(by_id(2).error.is_none());
        assert!(!by_id(3).success);
        assert!(by_id(3).error.is_some());
        assert!(by_id(4).success);
        // unavailable file never reached the worker
        assert_eq!(worker.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_cycle() {
        let worker = Arc::new(FlakyWorker {
            calls: AtomicUsize::new(0),
        });
        let orchestrator = Orchestrator::new(Arc::new(FailingSource), dispatcher(worker.clone()));

        let result = orchestrator.run().await;

        assert!(result.is_err());
        assert_eq!(worker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_pending_list_yields_empty_outcomes() {
        let worker = Arc::new(FlakyWorker {
            calls: AtomicUsize::new(0),
        });
        let orchestrator = Orchestrator::new(
            Arc::new(FixedSource { files: vec![] }),
            dispatcher(worker),
        );

        let outcomes = orchestrator.run().await.unwrap();
        assert!(outcomes.is_empty());
    }
}
