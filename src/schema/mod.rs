//! The work field schema
//!
//! A fixed, ordered catalogue of field descriptors shared by the scaffolder
//! and the validator. The order of [`FIELDS`] is also the canonical order in
//! which front matter is written.

pub mod date;
pub mod slug;

pub use date::{parse_date, today, weekday_from_name, NoWeekdayPicker, WeekdayPicker};
pub use slug::{normalize_slug, slug_from_title, slug_to_path, SLUG_PREFIX};

use crate::core::FieldValue;
use crate::error::{Result, WorksError};
use chrono::NaiveDate;

/// Legal values of the `type` field
pub const WORK_TYPE_OPTIONS: &[&str] = &["digital", "physical"];

/// Legal values of the `format` field
pub const WORK_FORMAT_OPTIONS: &[&str] = &[
    "Visual digital static",
    "Visual digital animated",
    "Visual digital interactive",
    "Visual audio-reactive",
    "Audio-visual",
    "Visual print poster",
    "Visual print book",
];

/// How a field's value is checked and normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string
    Text,
    /// A non-negative integer
    Integer,
    /// An ISO date, or a relative keyword resolved to one
    Date,
    /// A `/works/...` path
    Slug,
    /// One of a fixed list of strings
    Choice {
        options: &'static [&'static str],
        allow_blank: bool,
    },
}

/// Descriptor for one recognized field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub default: Option<&'static str>,
    pub kind: FieldKind,
}

const fn text(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        required: false,
        default: None,
        kind: FieldKind::Text,
    }
}

const fn required(spec: FieldSpec) -> FieldSpec {
    FieldSpec {
        required: true,
        ..spec
    }
}

const fn kind(spec: FieldSpec, kind: FieldKind) -> FieldSpec {
    FieldSpec { kind, ..spec }
}

/// All recognized fields, in canonical order
pub const FIELDS: &[FieldSpec] = &[
    required(text("title", "Title")),
    required(kind(text("slug", "Slug (e.g., /works/example)"), FieldKind::Slug)),
    required(text("description", "Description")),
    kind(text("sidebar_position", "Sidebar position"), FieldKind::Integer),
    required(kind(text("created", "Created (YYYY-MM-DD)"), FieldKind::Date)),
    required(kind(
        text("issued", "Issued/Published (YYYY-MM-DD)"),
        FieldKind::Date,
    )),
    required(text("creator", "Creator")),
    text("contributor", "Contributor"),
    text("publisher", "Publisher"),
    text("subject", "Subject"),
    kind(
        text("type", "Type"),
        FieldKind::Choice {
            options: WORK_TYPE_OPTIONS,
            allow_blank: false,
        },
    ),
    kind(
        text("format", "Format"),
        FieldKind::Choice {
            options: WORK_FORMAT_OPTIONS,
            allow_blank: true,
        },
    ),
    text("identifier", "Identifier"),
    text("source", "Source"),
    text("language", "Language"),
    text("relation", "Relation"),
    text("coverage", "Coverage"),
    text("rights", "Rights"),
    required(text("fileSource", "File source")),
    required(text("previewSource", "Preview source")),
    required(text("staticPreviewSource", "Static preview source")),
];

/// Look up a recognized field
pub fn field(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.key == key)
}

pub fn is_known_field(key: &str) -> bool {
    field(key).is_some()
}

/// Field keys in the order front matter is written
pub fn canonical_order() -> Vec<&'static str> {
    FIELDS.iter().map(|f| f.key).collect()
}

pub fn required_fields() -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(|f| f.required)
}

/// Parse a sidebar position: an integer that is zero or positive
pub fn parse_sidebar_position(raw: &str) -> Result<i64> {
    let position: i64 = raw
        .trim()
        .parse()
        .map_err(|_| WorksError::validation("enter an integer"))?;
    if position < 0 {
        return Err(WorksError::validation("value must be zero or positive"));
    }
    Ok(position)
}

impl FieldSpec {
    /// Normalize a stored or entered value
    ///
    /// `Ok(None)` means the field holds no value (blank text, or a blank
    /// choice where blank is allowed) and should be dropped. Dates are
    /// resolved against `today`.
    pub fn normalize<P>(
        &self,
        value: &FieldValue,
        today: NaiveDate,
        picker: &mut P,
    ) -> Result<Option<FieldValue>>
    where
        P: WeekdayPicker + ?Sized,
    {
        if value.is_blank() {
            return Ok(None);
        }
        let raw = value.to_string();

        let normalized = match self.kind {
            FieldKind::Text => FieldValue::Text(raw),
            FieldKind::Integer => match value {
                FieldValue::Int(i) if *i >= 0 => FieldValue::Int(*i),
                _ => FieldValue::Int(parse_sidebar_position(&raw)?),
            },
            FieldKind::Date => FieldValue::Text(parse_date(&raw, today, picker)?),
            FieldKind::Slug => FieldValue::Text(normalize_slug(&raw)?),
            FieldKind::Choice { options, .. } => {
                if !options.contains(&raw.as_str()) {
                    return Err(WorksError::validation(format!(
                        "{} must be one of {}",
                        self.label,
                        options.join(", ")
                    )));
                }
                FieldValue::Text(raw)
            }
        };
        Ok(Some(normalized))
    }

    /// Whether values of this field are dates
    pub fn is_date(&self) -> bool {
        self.kind == FieldKind::Date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn normalize(key: &str, value: FieldValue) -> Result<Option<FieldValue>> {
        field(key)
            .unwrap()
            .normalize(&value, reference(), &mut NoWeekdayPicker)
    }

    #[test]
    fn test_catalogue_shape() {
        assert_eq!(FIELDS.len(), 21);
        assert_eq!(WORK_FORMAT_OPTIONS.len(), 7);
        let required: Vec<_> = required_fields().map(|f| f.key).collect();
        assert_eq!(
            required,
            vec![
                "title",
                "slug",
                "description",
                "created",
                "issued",
                "creator",
                "fileSource",
                "previewSource",
                "staticPreviewSource"
            ]
        );
        assert_eq!(canonical_order()[3], "sidebar_position");
        assert!(!is_known_field("foo"));
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(
            normalize("creator", FieldValue::text("Ada")).unwrap(),
            Some(FieldValue::text("Ada"))
        );
        assert_eq!(
            normalize("identifier", FieldValue::int(123)).unwrap(),
            Some(FieldValue::text("123"))
        );
        assert_eq!(normalize("rights", FieldValue::text("")).unwrap(), None);
    }

    #[test]
    fn test_normalize_sidebar_position() {
        assert_eq!(
            normalize("sidebar_position", FieldValue::int(4)).unwrap(),
            Some(FieldValue::int(4))
        );
        assert_eq!(
            normalize("sidebar_position", FieldValue::text("7")).unwrap(),
            Some(FieldValue::int(7))
        );
        assert!(normalize("sidebar_position", FieldValue::int(-1)).is_err());
        assert!(normalize("sidebar_position", FieldValue::text("x")).is_err());
    }

    #[test]
    fn test_normalize_date_and_slug() {
        assert_eq!(
            normalize("created", FieldValue::text("tomorrow")).unwrap(),
            Some(FieldValue::text("2026-10-15"))
        );
        assert!(normalize("issued", FieldValue::int(2024)).is_err());
        assert_eq!(
            normalize("slug", FieldValue::text("works/a/")).unwrap(),
            Some(FieldValue::text("/works/a"))
        );
    }

    #[test]
    fn test_normalize_choices() {
        assert_eq!(
            normalize("type", FieldValue::text("digital")).unwrap(),
            Some(FieldValue::text("digital"))
        );
        let err = normalize("type", FieldValue::text("virtual")).unwrap_err();
        assert_eq!(err.to_string(), "Type must be one of digital, physical");

        assert_eq!(
            normalize("format", FieldValue::text("Audio-visual")).unwrap(),
            Some(FieldValue::text("Audio-visual"))
        );
        assert_eq!(normalize("format", FieldValue::text("")).unwrap(), None);
        assert!(normalize("format", FieldValue::text("audio-visual")).is_err());
    }

    #[test]
    fn test_parse_sidebar_position() {
        assert_eq!(parse_sidebar_position(" 0 ").unwrap(), 0);
        assert_eq!(
            parse_sidebar_position("-2").unwrap_err().to_string(),
            "value must be zero or positive"
        );
        assert_eq!(
            parse_sidebar_position("two").unwrap_err().to_string(),
            "enter an integer"
        );
    }
}
