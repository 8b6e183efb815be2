//! Destination bucket existence check
//!
//! Downloads land in the bucket under a key derived from the source path,
//! so a metadata lookup on that key tells us whether a file has already
//! been retrieved by an earlier cycle.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::{config::Region, Client};
use dxp_common::PendingFile;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Extension the download worker writes converted files under.
const DOWNLOAD_EXTENSION: &str = "csv";

/// Derive the destination object key from a source download path.
///
/// Strips the directory and original extension and appends the fixed
/// download extension: `"foo/bar.xml"` becomes `"bar.csv"`.
pub fn derive_bucket_key(download_path: &str) -> String {
    let stem = Path::new(download_path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.{}", stem, DOWNLOAD_EXTENSION)
}

/// Metadata-only view of the destination bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Metadata lookup for an object key. `Ok(())` means the object exists;
    /// any error (not-found or transient) means it could not be confirmed.
    async fn head(&self, key: &str) -> Result<()>;
}

/// Connection overrides for the destination bucket, on top of ambient AWS
/// configuration. Needed for S3-compatible stores (MinIO, localstack).
#[derive(Debug, Clone, Default)]
pub struct S3Options {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub path_style: bool,
}

/// `ObjectStore` backed by an S3 bucket.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a store from ambient AWS configuration (environment
    /// credentials and region).
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        Self::connect(bucket, S3Options::default()).await
    }

    /// Build a store from ambient AWS configuration with explicit
    /// region / endpoint / addressing-style overrides.
    pub async fn connect(bucket: impl Into<String>, options: S3Options) -> Self {
        let base = aws_config::load_from_env().await;
        let mut builder =
            aws_sdk_s3::config::Builder::from(&base).force_path_style(options.path_style);

        if let Some(region) = options.region {
            builder = builder.region(Region::new(region));
        }

        if let Some(endpoint) = options.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(Client::from_conf(builder.build()), bucket)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn head(&self, key: &str) -> Result<()> {
        self.client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .context(format!("HeadObject failed for key: {}", key))?;
        Ok(())
    }
}

/// Answers whether a pending file has already been downloaded into the
/// destination bucket.
#[derive(Clone)]
pub struct ExistenceChecker {
    store: Arc<dyn ObjectStore>,
}

impl ExistenceChecker {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Returns `true` when the derived key is present in the bucket.
    ///
    /// A failed lookup reads as absent, whether not-found or a transient
    /// storage error. Re-dispatching an already-completed download is safe,
    /// so the two cases are not distinguished here.
    pub async fn exists(&self, file: &PendingFile) -> bool {
        let key = derive_bucket_key(&file.download_path);
        match self.store.head(&key).await {
            Ok(()) => {
                debug!(key = %key, "Object exists");
                true
            },
            Err(e) => {
                debug!(key = %key, error = %e, "Object does not exist");
                false
            },
        }
    }
}
