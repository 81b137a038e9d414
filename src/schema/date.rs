//! Date normalization
//!
//! Accepts `YYYY-MM-DD` or one of the keywords `today`, `tomorrow`,
//! `yesterday`, `next week` (asks which weekday) and `next <weekday>`. Next
//! week always starts on the Monday after the current week.

use crate::error::{Result, WorksError};
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// Supplies the weekday for the `next week` keyword
pub trait WeekdayPicker {
    fn pick_weekday(&mut self) -> Result<Weekday>;
}

/// Picker for non-interactive contexts; `next week` is rejected
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWeekdayPicker;

impl WeekdayPicker for NoWeekdayPicker {
    fn pick_weekday(&mut self) -> Result<Weekday> {
        Err(WorksError::validation(
            "'next week' needs a weekday; use 'next <weekday>' instead",
        ))
    }
}

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("mon", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("tue", Weekday::Tue),
    ("tues", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("wed", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("thu", Weekday::Thu),
    ("thur", Weekday::Thu),
    ("thurs", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("fri", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sat", Weekday::Sat),
    ("sunday", Weekday::Sun),
    ("sun", Weekday::Sun),
];

/// Look up a weekday name or abbreviation, ignoring case and surrounding space
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    let name = name.trim().to_lowercase();
    WEEKDAYS.iter().find(|(n, _)| *n == name).map(|(_, d)| *d)
}

/// The current local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Monday of the week following the one containing `reference`
pub fn start_of_next_week(reference: NaiveDate) -> NaiveDate {
    let into_week = u64::from(reference.weekday().num_days_from_monday());
    reference - Days::new(into_week) + Days::new(7)
}

/// Date of `weekday` in the week after the one containing `reference`
pub fn next_weekday(reference: NaiveDate, weekday: Weekday) -> NaiveDate {
    start_of_next_week(reference) + Days::new(u64::from(weekday.num_days_from_monday()))
}

/// Exactly `YYYY-MM-DD`: ten ASCII bytes, digits apart from the two dashes
fn is_iso_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Normalize a date entry to ISO `YYYY-MM-DD`, resolving keywords against `reference`
pub fn parse_date<P>(raw: &str, reference: NaiveDate, picker: &mut P) -> Result<String>
where
    P: WeekdayPicker + ?Sized,
{
    let trimmed = raw.trim();
    let text = trimmed.to_lowercase();

    let date = match text.as_str() {
        "today" => reference,
        "tomorrow" => reference + Days::new(1),
        "yesterday" => reference - Days::new(1),
        "next week" => next_weekday(reference, picker.pick_weekday()?),
        _ => match text.strip_prefix("next ") {
            Some(token) => {
                let weekday = weekday_from_name(token)
                    .ok_or_else(|| WorksError::validation("unrecognized weekday after 'next'"))?;
                next_weekday(reference, weekday)
            }
            None => is_iso_shape(trimmed)
                .then(|| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok())
                .flatten()
                .ok_or_else(|| {
                    WorksError::validation(
                        "use ISO format YYYY-MM-DD or keywords like 'today'/'next week'",
                    )
                })?,
        },
    };

    Ok(date.format("%Y-%m-%d").to_string())
}
