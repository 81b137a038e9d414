//! Catalog locations
//!
//! Every path the tools touch is derived from a single repository root.

use std::path::{Path, PathBuf};

/// User agent sent when downloading media
pub const DEFAULT_USER_AGENT: &str = "workmatter-works-index/1.0";

/// Paths and settings for one catalog checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Repository root; `file` entries in the index are relative to it
    pub root: PathBuf,
    /// Directory holding the work documents
    pub works_dir: PathBuf,
    /// File name skipped by the collector and the validator
    pub index_document: String,
    /// JSON index written by the indexer
    pub output_path: PathBuf,
    pub media_cache_dir: PathBuf,
    pub media_metadata_path: PathBuf,
    pub user_agent: String,
}

impl CatalogConfig {
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let works_dir = root.join("docs").join("works");
        let computed = root.join("computed");
        let media_cache_dir = computed.join("media-cache");

        Self {
            works_dir,
            index_document: "index.md".to_string(),
            output_path: computed.join("works-index.json"),
            media_metadata_path: media_cache_dir.join("metadata.json"),
            media_cache_dir,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            root,
        }
    }

    /// `path` relative to the repository root, for display and the `file` field
    pub fn display_path(&self, path: &Path) -> String {
        crate::io::relative_to(path, &self.root)
            .to_string_lossy()
            .into_owned()
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::for_root(".")
    }
}
