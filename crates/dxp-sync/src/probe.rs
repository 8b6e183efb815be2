//! Remote file availability probe
//!
//! Export files show up on the remote host some time after they are
//! announced, so each cycle checks availability with a HEAD request before
//! anything else. Unavailability is a normal condition, not a fault.

use dxp_common::PendingFile;
use reqwest::StatusCode;
use tracing::warn;

/// Checks whether a pending file is currently fetchable on the remote host.
#[derive(Clone)]
pub struct AvailabilityProbe {
    client: reqwest::Client,
}

impl AvailabilityProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Returns `true` only when the remote host answers the HEAD request
    /// with 200. Transport failures, timeouts, and every other status all
    /// read as "not ready yet" and are left for the next cycle.
    pub async fn probe(&self, file: &PendingFile) -> bool {
        match self.client.head(&file.download_path).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                warn!(
                    url = %file.download_path,
                    error = %e,
                    "Unable to check head status of file"
                );
                false
            },
        }
    }
}
