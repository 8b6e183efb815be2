//! Download worker invocation
//!
//! The actual file transfer happens in a separate worker service. This
//! module only covers handing a file over to it; the worker acknowledges
//! the invocation and performs the download on its own.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

/// Payload the worker expects for one download.
#[derive(Debug, Serialize)]
pub struct DownloadRequest<'a> {
    pub path: &'a str,
    pub bucket: &'a str,
}

/// Fire-and-forget handle to the download worker.
#[async_trait]
pub trait DownloadWorker: Send + Sync {
    /// Ask the worker to fetch `path` into `bucket`. `Ok` means the worker
    /// acknowledged the invocation, not that the transfer finished.
    async fn invoke(&self, path: &str, bucket: &str) -> Result<()>;
}

/// Worker invoked over HTTP with a JSON payload.
#[derive(Clone)]
pub struct HttpDownloadWorker {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDownloadWorker {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl DownloadWorker for HttpDownloadWorker {
    async fn invoke(&self, path: &str, bucket: &str) -> Result<()> {
        debug!(path = %path, bucket = %bucket, "Invoking download worker");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&DownloadRequest { path, bucket })
            .send()
            .await
            .context("Failed to reach download worker")?;

        if !response.status().is_success() {
            anyhow::bail!("Download worker rejected invocation: {}", response.status());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_invoke_posts_path_and_bucket() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoke"))
            .and(body_json(serde_json::json!({
                "path": "exports/day1.xml",
                "bucket": "downloads"
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let worker =
            HttpDownloadWorker::new(reqwest::Client::new(), format!("{}/invoke", server.uri()));
        worker.invoke("exports/day1.xml", "downloads").await.unwrap();
    }

    #[tokio::test]
    async fn test_invoke_fails_on_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let worker =
            HttpDownloadWorker::new(reqwest::Client::new(), format!("{}/invoke", server.uri()));
        let result = worker.invoke("exports/day1.xml", "downloads").await;
        assert!(result.is_err());
    }
}
