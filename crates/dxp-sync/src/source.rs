//! Pending-file source
//!
//! The list of files still waiting for download lives outside this crate.
//! The orchestrator only needs one read-only query against it per cycle.

use async_trait::async_trait;
use dxp_common::{PendingFile, Result};

/// Supplies the pending-file list for one orchestration cycle.
///
/// A failure here aborts the whole cycle since there is nothing to
/// dispatch without the list.
#[async_trait]
pub trait PendingSource: Send + Sync {
    async fn list_pending(&self) -> Result<Vec<PendingFile>>;
}
