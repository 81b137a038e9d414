//! Core types for work documents
//!
//! - FieldValue: a typed front matter scalar (integer or string)
//! - FrontMatter: insertion-ordered field mapping
//! - WorkDocument: front matter plus the document body

pub mod document;
pub mod front_matter;
pub mod value;

pub use document::WorkDocument;
pub use front_matter::FrontMatter;
pub use value::FieldValue;
