//! Reading work documents from disk

use crate::core::WorkDocument;
use crate::error::{Result, WorksError};
use std::fs;
use std::path::Path;

/// Read and parse a work document
pub fn read_document(path: &Path) -> Result<WorkDocument> {
    let content = read_to_string(path)?;
    WorkDocument::parse(path, &content)
}

/// Read a UTF-8 file, reporting a missing file as [`WorksError::FileNotFound`]
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => WorksError::file_not_found(path),
        _ => WorksError::Io(e),
    })
}
