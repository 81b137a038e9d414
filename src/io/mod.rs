pub mod formatter;
pub mod fs;
pub mod reader;
pub mod writer;

pub use formatter::{format, parse, ParsedFrontMatter};
pub use fs::{is_markdown, relative_to, resolve_work_files};
pub use reader::{read_document, read_to_string};
pub use writer::write_atomic;
