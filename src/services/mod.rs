//! Retrieval services

pub mod cache;
pub mod catalog;
pub mod z3950;

use std::sync::Arc;

use crate::config::AppConfig;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Wire the production services: yaz-client behind the on-disk cache
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(config, Arc::new(z3950::YazClient::new(config)))
    }

    /// Same wiring with a caller-supplied catalog client
    pub fn with_client(config: &AppConfig, client: Arc<dyn z3950::CatalogClient>) -> Self {
        let cache = cache::RecordCache::new(&config.cache.dir, client);
        Self {
            catalog: catalog::CatalogService::new(cache),
        }
    }
}
