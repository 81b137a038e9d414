//! Scalar values stored in a work's front matter
//!
//! A header value is either an integer or a string. Quoted values are always
//! strings; unquoted values become integers when they parse as one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single front matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    /// Create a string value
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create an integer value
    pub fn int(i: i64) -> Self {
        Self::Int(i)
    }

    /// Decode a trimmed raw header value
    ///
    /// `"..."` is unquoted with `\"` then `\\` unescaped; anything else is an
    /// integer if it parses as one, otherwise the raw text.
    pub fn decode(raw: &str) -> Self {
        if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            let inner = &raw[1..raw.len() - 1];
            return Self::Text(inner.replace("\\\"", "\"").replace("\\\\", "\\"));
        }
        match raw.parse::<i64>() {
            Ok(i) => Self::Int(i),
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    /// Encode for a header line: integers bare, strings quoted and escaped
    pub fn encode(&self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Text(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        }
    }

    /// Try to convert to string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// Try to convert to integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Text(_) => None,
        }
    }

    /// An empty string counts as no value
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_quoted() {
        assert_eq!(FieldValue::decode("\"Hello\""), FieldValue::text("Hello"));
        assert_eq!(
            FieldValue::decode(r#""say \"hi\" \\ bye""#),
            FieldValue::text(r#"say "hi" \ bye"#)
        );
        assert_eq!(FieldValue::decode("\"42\""), FieldValue::text("42"));
    }

    #[test]
    fn test_decode_unquoted() {
        assert_eq!(FieldValue::decode("42"), FieldValue::int(42));
        assert_eq!(FieldValue::decode("-3"), FieldValue::int(-3));
        assert_eq!(FieldValue::decode("2024-01-05"), FieldValue::text("2024-01-05"));
        assert_eq!(FieldValue::decode(""), FieldValue::text(""));
        assert_eq!(FieldValue::decode("\""), FieldValue::text("\""));
    }

    #[test]
    fn test_encode() {
        assert_eq!(FieldValue::int(7).encode(), "7");
        assert_eq!(FieldValue::text("plain").encode(), "\"plain\"");
        assert_eq!(FieldValue::text(r#"a"b\c"#).encode(), r#""a\"b\\c""#);
    }

    #[test]
    fn test_blank() {
        assert!(FieldValue::text("").is_blank());
        assert!(!FieldValue::text(" x").is_blank());
        assert!(!FieldValue::int(0).is_blank());
    }

    #[test]
    fn test_tricky_escapes() {
        for s in [r#"\""#, r#"\\""#, r#"x\"#, r#"""#, r#"\\\"#, r#""\""#] {
            assert_eq!(FieldValue::decode(&FieldValue::text(s).encode()), FieldValue::text(s));
        }
    }

    proptest! {
        #[test]
        fn test_quoted_value_law(s in "\\PC*") {
            let decoded = FieldValue::decode(&FieldValue::text(s.clone()).encode());
            prop_assert_eq!(decoded, FieldValue::Text(s));
        }
    }
}
