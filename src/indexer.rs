//! Builds the JSON works index

use crate::collector::{collect_works, WorkRecord};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::io::write_atomic;
use crate::media::{best_media_source, MediaEnricher};
use log::{info, warn};

/// Outcome of one index build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    /// Output path relative to the repository root
    pub output: String,
    pub entries: usize,
    pub enriched: usize,
}

impl IndexSummary {
    pub fn message(&self) -> String {
        format!("Wrote {} with {} entries.", self.output, self.entries)
    }
}

/// Attach `mediaWidth`/`mediaHeight` wherever the enricher can measure the
/// work's media; returns how many records were enriched
pub fn enrich(records: &mut [WorkRecord], enricher: &mut dyn MediaEnricher) -> usize {
    let mut enriched = 0;
    for record in records.iter_mut() {
        let Some(source) = best_media_source(record) else {
            continue;
        };
        if let Some(dimensions) = enricher.dimensions(&source) {
            record.set("mediaWidth", i64::from(dimensions.width));
            record.set("mediaHeight", i64::from(dimensions.height));
            enriched += 1;
        }
    }
    enriched
}

/// Collect, optionally enrich, and write the index
///
/// Nothing is written when collection fails. The enricher's cache is
/// persisted after the index; a failure there is only logged.
pub fn build_index(
    config: &CatalogConfig,
    enricher: Option<&mut dyn MediaEnricher>,
) -> Result<IndexSummary> {
    let mut records = collect_works(config)?;

    let mut enriched = 0;
    if let Some(enricher) = enricher {
        enriched = enrich(&mut records, &mut *enricher);
        info!("Resolved media dimensions for {} of {} works", enriched, records.len());
        write_index(config, &records)?;
        if let Err(e) = enricher.persist() {
            warn!("Failed to save media metadata: {}", e);
        }
    } else {
        write_index(config, &records)?;
    }

    Ok(IndexSummary {
        output: config.display_path(&config.output_path),
        entries: records.len(),
        enriched,
    })
}

fn write_index(config: &CatalogConfig, records: &[WorkRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    write_atomic(&config.output_path, json)
}
