//! Front matter codec
//!
//! The header is a block of `key: value` lines between two `---` delimiter
//! lines. Blank lines and lines starting with `#` inside the block are
//! skipped. See [`FieldValue::decode`] for how values are typed.

use crate::core::{FieldValue, FrontMatter};
use crate::error::FormatError;

const DELIMITER: &str = "---";

/// Result of parsing a document's header
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFrontMatter {
    /// Decoded fields in order of first appearance
    pub fields: FrontMatter,
    /// Index of the first line after the closing delimiter
    pub body_line: usize,
    /// Byte offset of the first line after the closing delimiter
    pub body_offset: usize,
}

impl ParsedFrontMatter {
    /// The text following the closing delimiter line, unchanged
    pub fn body<'a>(&self, content: &'a str) -> &'a str {
        &content[self.body_offset..]
    }
}

/// Parse the delimited header at the top of `content`
///
/// Duplicate keys keep their first position and their last value.
pub fn parse(content: &str) -> Result<ParsedFrontMatter, FormatError> {
    let mut lines = content.split_inclusive('\n');
    let mut offset = 0;

    match lines.next() {
        Some(first) if first.trim() == DELIMITER => offset += first.len(),
        _ => return Err(FormatError::MissingStartMarker),
    }

    let mut fields = FrontMatter::new();
    for (index, raw_line) in lines.enumerate() {
        offset += raw_line.len();
        let line = raw_line.trim();

        if line == DELIMITER {
            return Ok(ParsedFrontMatter {
                fields,
                body_line: index + 2,
                body_offset: offset,
            });
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| FormatError::UnrecognizedLine {
                line: display_line(raw_line),
            })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(FormatError::EmptyKey {
                line: display_line(raw_line),
            });
        }
        fields.insert(key, FieldValue::decode(value.trim()));
    }

    Err(FormatError::MissingEndMarker)
}

/// Serialize a header followed by `body`
///
/// Keys listed in `order` come first, in that order; remaining keys follow in
/// insertion order.
pub fn format(fields: &FrontMatter, order: &[&str], body: &str) -> String {
    let mut out = String::from(DELIMITER);
    out.push('\n');

    let ordered = order.iter().filter_map(|key| fields.get(key).map(|v| (*key, v)));
    let rest = fields.iter().filter(|(key, _)| !order.contains(key));
    for (key, value) in ordered.chain(rest) {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&value.encode());
        out.push('\n');
    }

    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(body);
    out
}

fn display_line(raw_line: &str) -> String {
    raw_line.trim_end_matches(['\n', '\r']).to_string()
}
