//! Error types for the workmatter library
//!
//! Two layers: [`FormatError`] describes why a front matter block could not be
//! parsed, and [`WorksError`] is the crate-wide error carried by every fallible
//! operation (I/O, malformed documents, rejected field values, user aborts).

use std::path::PathBuf;
use thiserror::Error;

/// Malformed front matter, reported by the codec
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// First line is not a `---` delimiter
    #[error("missing frontmatter start marker '---'")]
    MissingStartMarker,

    /// No closing `---` delimiter before end of input
    #[error("missing frontmatter end marker '---'")]
    MissingEndMarker,

    /// A header line without a `:` separator
    #[error("unrecognized frontmatter line '{line}'")]
    UnrecognizedLine { line: String },

    /// A header line whose key is empty after trimming
    #[error("empty frontmatter key in line '{line}'")]
    EmptyKey { line: String },
}

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum WorksError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Front matter parsing errors
    #[error("{}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    /// A field value rejected by its normalizer
    #[error("{message}")]
    Validation { message: String },

    /// The works directory does not exist
    #[error("Works directory not found: {}", path.display())]
    WorksDirNotFound { path: PathBuf },

    /// File not found or invalid path
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Media download failures
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The user cancelled an interactive session
    #[error("Aborted by user.")]
    Aborted,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WorksError>;

impl WorksError {
    /// Create a new front matter format error for a document
    pub fn format(path: impl Into<PathBuf>, source: FormatError) -> Self {
        Self::Format {
            path: path.into(),
            source,
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new missing works directory error
    pub fn works_dir_not_found(path: impl Into<PathBuf>) -> Self {
        Self::WorksDirNotFound { path: path.into() }
    }

    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Check if an interactive tool can recover from this error
    ///
    /// Bad values are re-prompted and malformed documents are skipped; all
    /// other errors end the run.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Validation { .. } | Self::Format { .. } => true,
            Self::Io(_)
            | Self::Json(_)
            | Self::WorksDirNotFound { .. }
            | Self::FileNotFound { .. }
            | Self::Fetch(_)
            | Self::Aborted => false,
        }
    }
}
