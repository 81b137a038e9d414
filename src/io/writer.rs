//! Atomic file writing

use crate::error::{Result, WorksError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `content` to `path`, creating parent directories as needed
///
/// Content goes to a temporary file in the target directory which is then
/// renamed over `path`, so readers never observe a partial file.
pub fn write_atomic(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(content.as_ref())?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        WorksError::Io(std::io::Error::other(format!(
            "Failed to persist temporary file for {}: {}",
            path.display(),
            e
        )))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("computed/nested/out.json");

        write_atomic(&target, "[]").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "[]");
    }

    #[test]
    fn test_write_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a.md");
        fs::write(&target, "old").unwrap();

        write_atomic(&target, "new").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }
}
