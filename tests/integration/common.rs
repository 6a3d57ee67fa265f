//! Shared fixtures

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aleph_marc::{
    marc::{DataField, MarcRecord},
    services::z3950::CatalogClient,
    AppConfig, AppError, AppResult, RecordId, Services,
};
use async_trait::async_trait;

/// Catalog returning a fixed record and counting calls
pub struct FixedCatalog {
    pub bytes: Vec<u8>,
    pub calls: AtomicUsize,
}

impl FixedCatalog {
    pub fn new(bytes: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            bytes,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogClient for FixedCatalog {
    async fn query(&self, _id: &RecordId) -> AppResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.bytes.clone())
    }
}

/// Catalog that cannot be reached
pub struct UnreachableCatalog;

#[async_trait]
impl CatalogClient for UnreachableCatalog {
    async fn query(&self, id: &RecordId) -> AppResult<Vec<u8>> {
        Err(AppError::Z3950(format!("Connection refused for {}", id)))
    }
}

pub fn record_bytes(fields: &[(&str, &[(char, &str)])]) -> Vec<u8> {
    MarcRecord::new(
        fields
            .iter()
            .map(|(tag, subfields)| DataField::new(tag, subfields))
            .collect(),
    )
    .to_bytes()
}

pub fn services(dir: &std::path::Path, client: Arc<dyn CatalogClient>) -> Services {
    let mut config = AppConfig::default();
    config.cache.dir = dir.to_path_buf();
    Services::with_client(&config, client)
}
