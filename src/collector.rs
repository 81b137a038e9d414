//! Collects every work document into index records

use crate::config::CatalogConfig;
use crate::core::{FieldValue, FrontMatter};
use crate::error::Result;
use crate::io::{read_document, resolve_work_files};
use log::{debug, info};
use serde::Serialize;

/// One entry of the works index
///
/// The document's fields in header order, plus `file` (the document path
/// relative to the repository root) and, after enrichment, `mediaWidth` and
/// `mediaHeight`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkRecord(FrontMatter);

impl WorkRecord {
    pub fn fields(&self) -> &FrontMatter {
        &self.0
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get_str(key)
    }

    pub fn file(&self) -> Option<&str> {
        self.get_str("file")
    }

    pub fn set(&mut self, key: &str, value: impl Into<FieldValue>) {
        self.0.insert(key, value);
    }
}

impl From<FrontMatter> for WorkRecord {
    fn from(fields: FrontMatter) -> Self {
        Self(fields)
    }
}

/// Parse every work document, in sorted path order
///
/// The first malformed document aborts the whole collection.
pub fn collect_works(config: &CatalogConfig) -> Result<Vec<WorkRecord>> {
    let files = resolve_work_files(&config.works_dir, &config.index_document)?;
    info!("Collecting {} work documents", files.len());

    let mut records = Vec::with_capacity(files.len());
    for path in files {
        debug!("Reading {}", path.display());
        let document = read_document(&path)?;
        let mut record = WorkRecord::from(document.front_matter().clone());
        record.set("file", config.display_path(&path));
        records.push(record);
    }
    Ok(records)
}
