//! Catalog service: identifier to bibliographic summary

use crate::{
    error::AppResult,
    marc::{self, MarcRecord},
    models::{BibliographicSummary, RecordId},
    services::cache::RecordCache,
};

#[derive(Clone)]
pub struct CatalogService {
    cache: RecordCache,
}

impl CatalogService {
    pub fn new(cache: RecordCache) -> Self {
        Self { cache }
    }

    /// Fetch (through the cache) and decode the record for `id`
    pub async fn record(&self, id: &RecordId) -> AppResult<MarcRecord> {
        let raw = self.cache.fetch(id).await?;
        marc::decode(&raw).map_err(|e| {
            tracing::warn!("Failed to decode record for sysid {}: {}", id, e);
            e
        })
    }

    /// Build the bibliographic summary for a raw identifier.
    ///
    /// Any validation, cache, catalog or decode failure yields no summary.
    pub async fn summary(&self, identifier: &str) -> AppResult<BibliographicSummary> {
        let id = RecordId::parse(identifier)?;
        let record = self.record(&id).await?;
        let summary = marc::summarize(&record);

        tracing::info!(
            "Extracted sysid {}: {} author(s), {} recipient(s), {} mentioned",
            id,
            summary.author.len(),
            summary.recipient.len(),
            summary.mentioned_persons.len()
        );

        let unlinked = summary
            .author
            .iter()
            .chain(&summary.recipient)
            .chain(&summary.mentioned_persons)
            .filter(|p| !p.has_gnd())
            .count();
        if unlinked > 0 {
            tracing::debug!("sysid {}: {} person(s) without GND link", id, unlinked);
        }
        Ok(summary)
    }
}
