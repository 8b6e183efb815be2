//! Pending-file source backed by Postgres
//!
//! The export host records announced files in `pending_downloads`; rows
//! stay pending until the download worker marks them retrieved. This is
//! the only query the orchestration service makes against the database.

use async_trait::async_trait;
use dxp_common::{DxpError, PendingFile, Result};
use dxp_sync::PendingSource;
use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
struct PendingFileRow {
    id: i64,
    download_path: String,
}

impl From<PendingFileRow> for PendingFile {
    fn from(row: PendingFileRow) -> Self {
        PendingFile::new(row.id, row.download_path)
    }
}

/// `PendingSource` reading from the `pending_downloads` table.
#[derive(Clone)]
pub struct PgPendingSource {
    pool: PgPool,
}

impl PgPendingSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PendingSource for PgPendingSource {
    async fn list_pending(&self) -> Result<Vec<PendingFile>> {
        let rows = sqlx::query_as::<_, PendingFileRow>(
            r#"
            SELECT id, download_path
            FROM pending_downloads
            WHERE downloaded = FALSE
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DxpError::Source(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
