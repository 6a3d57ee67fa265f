//! Read-through on-disk cache of raw MARC records
//!
//! One file per identifier, `<dir>/<identifier>.marc`, holding the record
//! bytes exactly as retrieved. Entries never expire and are never
//! invalidated; concurrent writers for the same identifier are not
//! coordinated (last writer wins).

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::RecordId,
    services::z3950::CatalogClient,
};

/// File extension of cached records
pub const CACHE_EXTENSION: &str = "marc";

#[derive(Clone)]
pub struct RecordCache {
    dir: PathBuf,
    client: Arc<dyn CatalogClient>,
}

impl RecordCache {
    pub fn new(dir: impl Into<PathBuf>, client: Arc<dyn CatalogClient>) -> Self {
        Self {
            dir: dir.into(),
            client,
        }
    }

    /// Cache file for `id`
    pub fn path_for(&self, id: &RecordId) -> PathBuf {
        self.dir.join(format!("{}.{}", id, CACHE_EXTENSION))
    }

    /// Whether a record for `id` is already cached
    pub async fn contains(&self, id: &RecordId) -> AppResult<bool> {
        match tokio::fs::metadata(self.path_for(id)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::io(id.as_str(), e)),
        }
    }

    /// Return the raw record for `id`, from disk if present, otherwise from
    /// the catalog (persisting it before returning).
    pub async fn fetch(&self, id: &RecordId) -> AppResult<Vec<u8>> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::io(id.as_str(), e))?;

        let path = self.path_for(id);

        if self.contains(id).await? {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| AppError::io(id.as_str(), e))?;
            tracing::debug!("Cache hit for sysid {} ({} bytes)", id, bytes.len());
            return Ok(bytes);
        }

        tracing::debug!("Cache miss for sysid {}, querying catalog", id);
        let bytes = self.client.query(id).await?;

        let dir = self.dir.clone();
        let target = path.clone();
        let bytes = tokio::task::spawn_blocking(move || {
            write_atomic(&dir, &target, &bytes).map(|()| bytes)
        })
        .await
        .map_err(|e| AppError::io(id.as_str(), std::io::Error::other(e)))?
        .map_err(|e| AppError::io(id.as_str(), e))?;
        tracing::info!("Cached sysid {} at {}", id, path.display());

        Ok(bytes)
    }
}

/// Write `bytes` to `path` via a temporary file in `dir` renamed into place.
///
/// A failed write leaves nothing at `path`.
fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
