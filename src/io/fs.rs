use crate::error::{Result, WorksError};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn is_markdown(path: &Path) -> bool {
    path.extension().map(|s| s == "md").unwrap_or(false)
}

/// List the markdown documents under `works_dir`, recursively, in sorted path
/// order, leaving out every file named `index_document`
pub fn resolve_work_files(works_dir: &Path, index_document: &str) -> Result<Vec<PathBuf>> {
    if !works_dir.is_dir() {
        return Err(WorksError::works_dir_not_found(works_dir));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(works_dir) {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => WorksError::Io(io),
            None => WorksError::works_dir_not_found(works_dir),
        })?;
        // `Path::is_file` follows symlinks; `entry.file_type()` would not
        if !entry.path().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        if entry.file_name() == index_document {
            debug!("Skipping index document {}", entry.path().display());
            continue;
        }
        files.push(entry.into_path());
    }

    files.sort();
    Ok(files)
}

/// `path` relative to `root`, or `path` itself when it lies outside `root`
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
