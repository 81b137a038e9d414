//! A work document: front matter fields plus the untouched body text

use crate::core::FrontMatter;
use crate::error::{FormatError, WorksError};
use crate::io::formatter;
use crate::schema;
use std::path::{Path, PathBuf};

/// Represents one markdown file of the catalog
#[derive(Debug, Clone)]
pub struct WorkDocument {
    path: PathBuf,
    front_matter: FrontMatter,
    body: String,
}

impl WorkDocument {
    /// Create a document with the given fields and body
    pub fn new(
        path: impl Into<PathBuf>,
        front_matter: FrontMatter,
        body: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            front_matter,
            body: body.into(),
        }
    }

    /// Parse document content read from `path`
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, WorksError> {
        let path = path.into();
        match formatter::parse(content) {
            Ok(parsed) => {
                let body = parsed.body(content).to_string();
                Ok(Self::new(path, parsed.fields, body))
            }
            Err(source) => Err(WorksError::format(path, source)),
        }
    }

    /// Parse without a source path
    pub fn parse_str(content: &str) -> Result<Self, FormatError> {
        let parsed = formatter::parse(content)?;
        let body = parsed.body(content).to_string();
        Ok(Self::new(PathBuf::new(), parsed.fields, body))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn front_matter(&self) -> &FrontMatter {
        &self.front_matter
    }

    pub fn front_matter_mut(&mut self) -> &mut FrontMatter {
        &mut self.front_matter
    }

    pub fn set_front_matter(&mut self, front_matter: FrontMatter) {
        self.front_matter = front_matter;
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Render the document with the header in canonical field order
    pub fn render(&self) -> String {
        formatter::format(&self.front_matter, &schema::canonical_order(), &self.body)
    }
}
