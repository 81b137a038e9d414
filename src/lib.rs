//! workmatter: tooling for a catalog of works kept as markdown files
//!
//! Each work is one markdown document under `docs/works` whose header is a
//! block of `key: value` lines between `---` delimiters. This library backs
//! three tools:
//!
//! - **build-work-index** collects every work into `computed/works-index.json`,
//!   adding media dimensions when the work's media can be measured
//! - **create-work** asks for each field and writes a new work document
//! - **validate-works** checks existing documents against the field schema and
//!   repairs them interactively
//!
//! # Quick Start
//!
//! ## Reading a work
//!
//! ```rust,no_run
//! use std::path::Path;
//! use workmatter::{read_document, Result};
//!
//! fn main() -> Result<()> {
//!     let doc = read_document(Path::new("docs/works/dawn.md"))?;
//!     println!("{:?}", doc.front_matter().get_str("title"));
//!     Ok(())
//! }
//! ```
//!
//! ## Building the index
//!
//! ```rust,no_run
//! use workmatter::{build_index, CatalogConfig, MediaEnricher, MediaResolver, Result};
//!
//! fn main() -> Result<()> {
//!     let config = CatalogConfig::for_root(".");
//!     let mut media = MediaResolver::from_config(&config)?;
//!     let summary = build_index(&config, Some(&mut media as &mut dyn MediaEnricher))?;
//!     println!("{}", summary.message());
//!     Ok(())
//! }
//! ```
//!
//! ## Normalizing values
//!
//! ```rust
//! use workmatter::schema::normalize_slug;
//!
//! assert_eq!(normalize_slug("works/dawn/").unwrap(), "/works/dawn");
//! assert!(normalize_slug("/elsewhere/dawn").is_err());
//! ```
//!
//! # Architecture
//!
//! - [`core`]: field values, the ordered front matter mapping and documents
//! - [`io`]: the header codec, reading, atomic writing and directory listing
//! - [`schema`]: the field catalogue with date and slug normalization
//! - [`prompt`]: line prompts and single-choice selection
//! - [`collector`], [`media`], [`indexer`]: the index build
//! - [`scaffold`], [`validate`]: the interactive tools
//! - [`error`]: error types shared by all of the above

pub use error::{FormatError, Result, WorksError};

pub use config::CatalogConfig;
pub use crate::core::{FieldValue, FrontMatter, WorkDocument};
pub use io::{read_document, write_atomic};

pub use collector::{collect_works, WorkRecord};
pub use indexer::{build_index, IndexSummary};
pub use media::{Dimensions, MediaCache, MediaEnricher, MediaKind, MediaResolver};
pub use prompt::{ChoicePrompt, LinePrompt, NumberedChoice, Prompt, TerminalChoice};
pub use scaffold::{ScaffoldOutcome, Scaffolder};
pub use validate::{ValidationSummary, Validator};

pub mod cli;
pub mod collector;
pub mod config;
pub mod core;
pub mod error;
pub mod indexer;
pub mod io;
pub mod media;
pub mod prompt;
pub mod scaffold;
pub mod schema;
pub mod validate;
