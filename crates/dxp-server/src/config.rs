//! Configuration management

use serde::{Deserialize, Serialize};

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/dxp";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default probe timeout in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Default cap on concurrent dispatches per cycle.
pub const DEFAULT_MAX_CONCURRENT_DISPATCHES: usize = 8;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub downloads: DownloadConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Download-orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Destination bucket downloads land in
    pub bucket: String,
    /// Endpoint of the download worker service
    pub worker_endpoint: String,
    /// Timeout applied to probe and worker HTTP calls
    pub probe_timeout_secs: u64,
    /// Cap on simultaneous dispatches within one cycle
    pub max_concurrent_dispatches: usize,
    /// S3 region override; falls back to ambient AWS configuration
    pub s3_region: Option<String>,
    /// S3 endpoint override for S3-compatible stores (MinIO, localstack)
    pub s3_endpoint: Option<String>,
    /// Use path-style bucket addressing
    pub s3_path_style: bool,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: std::env::var("DXP_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: std::env::var("DXP_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SERVER_PORT),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS),
            },
            downloads: DownloadConfig {
                bucket: std::env::var("DOWNLOAD_BUCKET")
                    .map_err(|_| anyhow::anyhow!("DOWNLOAD_BUCKET must be set"))?,
                worker_endpoint: std::env::var("DOWNLOAD_WORKER_ENDPOINT")
                    .map_err(|_| anyhow::anyhow!("DOWNLOAD_WORKER_ENDPOINT must be set"))?,
                probe_timeout_secs: std::env::var("PROBE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS),
                max_concurrent_dispatches: std::env::var("MAX_CONCURRENT_DISPATCHES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MAX_CONCURRENT_DISPATCHES),
                s3_region: std::env::var("S3_REGION").ok(),
                s3_endpoint: std::env::var("S3_ENDPOINT").ok(),
                s3_path_style: std::env::var("S3_PATH_STYLE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(false),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Reject obviously broken values before anything starts up
    fn validate(&self) -> anyhow::Result<()> {
        if self.downloads.bucket.is_empty() {
            anyhow::bail!("DOWNLOAD_BUCKET must not be empty");
        }
        if self.downloads.worker_endpoint.is_empty() {
            anyhow::bail!("DOWNLOAD_WORKER_ENDPOINT must not be empty");
        }
        if self.downloads.max_concurrent_dispatches == 0 {
            anyhow::bail!("MAX_CONCURRENT_DISPATCHES must be at least 1");
        }
        Ok(())
    }
}
