//! DXP Sync Library
//!
//! Download orchestration for exported analytics files. Each cycle checks
//! which pending export files are available on the remote host, skips files
//! already present in the destination bucket, and hands the rest to the
//! download worker.
//!
//! # Example
//!
//! ```no_run
//! use dxp_sync::Orchestrator;
//!
//! # async fn run(orchestrator: Orchestrator) -> anyhow::Result<()> {
//! let outcomes = orchestrator.run().await?;
//! for outcome in &outcomes {
//!     println!("{}: success={}", outcome.file, outcome.success);
//! }
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod existence;
pub mod orchestrator;
pub mod probe;
pub mod source;
pub mod worker;

pub use dispatch::Dispatcher;
pub use existence::{derive_bucket_key, ExistenceChecker, ObjectStore, S3ObjectStore, S3Options};
pub use orchestrator::Orchestrator;
pub use probe::AvailabilityProbe;
pub use source::PendingSource;
pub use worker::{DownloadWorker, HttpDownloadWorker};
