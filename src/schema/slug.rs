//! Slug handling: normalization, suggestion from a title, and file placement

use crate::error::{Result, WorksError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Every slug lives under this prefix
pub const SLUG_PREFIX: &str = "/works/";

const UNTITLED: &str = "untitled_work";

/// Normalize a slug entry
///
/// Trims, adds a leading `/` when missing, requires the `/works/` prefix and
/// drops one trailing `/`.
pub fn normalize_slug(raw: &str) -> Result<String> {
    let slug = raw.trim();
    if slug.is_empty() {
        return Err(WorksError::validation("slug cannot be empty"));
    }

    let mut slug = if slug.starts_with('/') {
        slug.to_string()
    } else {
        format!("/{}", slug)
    };
    if !slug.starts_with(SLUG_PREFIX) {
        return Err(WorksError::validation("slug must start with /works/"));
    }
    if slug.ends_with('/') && slug != "/" {
        slug.pop();
    }
    Ok(slug)
}

fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static regex is valid"))
}

/// Suggest a slug for a title: lowercase, runs of other characters become `_`
pub fn slug_from_title(title: Option<&str>) -> String {
    let cleaned = title
        .map(|t| {
            non_alphanumeric()
                .replace_all(&t.to_lowercase(), "_")
                .trim_matches('_')
                .to_string()
        })
        .unwrap_or_default();

    if cleaned.is_empty() {
        format!("{}{}", SLUG_PREFIX, UNTITLED)
    } else {
        format!("{}{}", SLUG_PREFIX, cleaned)
    }
}

/// Map a slug to its markdown file under `works_dir`
///
/// `/works/a/b` becomes `<works_dir>/a/b.md`.
pub fn slug_to_path(works_dir: &Path, slug: &str) -> Result<PathBuf> {
    let mut segments: Vec<&str> = slug
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return Err(WorksError::validation("slug must contain at least one segment"));
    }
    if segments[0] == "works" {
        segments.remove(0);
    }
    if segments.iter().any(|s| *s == "." || *s == "..") {
        return Err(WorksError::validation("slug segments cannot be '.' or '..'"));
    }

    let Some((basename, dirs)) = segments.split_last() else {
        return Err(WorksError::validation(
            "slug must contain a segment after /works/",
        ));
    };

    let mut target = works_dir.to_path_buf();
    target.extend(dirs);
    target.push(format!("{}.md", basename));
    Ok(target)
}
