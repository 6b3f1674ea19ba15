//! German relative-date handling for the dialogue layer.
//!
//! `replace_date_keywords` rewrites fragments like "morgen" or
//! "nächsten Montag" inside free text into ISO dates before the text is
//! handed to the language model, so the model never has to guess what
//! "übermorgen" means. Everything here is fail-soft: a fragment that
//! cannot be resolved stays exactly as the user typed it.

use chrono::{Datelike, Duration, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref DATE_KEYWORD_REGEX: Regex =
        Regex::new(r"(?i)\b(heute|gestern|morgen|übermorgen|nächsten?\s+\w+)\b").unwrap();
    static ref NEXT_WEEKDAY_REGEX: Regex = Regex::new(r"(?i)^nächsten?\s+(\w+)$").unwrap();
    static ref MONTH_DAY_REGEX: Regex = Regex::new(r"^\d{1,2}-\d{1,2}$").unwrap();
    static ref YEAR_REGEX: Regex = Regex::new(r"\b\d{4}\b").unwrap();
}

// weekday name -> days from Monday
const WEEKDAYS: [(&str, u32); 7] = [
    ("montag", 0),
    ("dienstag", 1),
    ("mittwoch", 2),
    ("donnerstag", 3),
    ("freitag", 4),
    ("samstag", 5),
    ("sonntag", 6),
];

fn weekday_index(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    WEEKDAYS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, idx)| *idx)
}

/// Date of the next occurrence of `target_weekday` strictly after `today`.
///
/// If today already is that weekday, the result is one week out; the
/// offset is always in 1..=7.
pub fn next_weekday(today: NaiveDate, target_weekday: u32) -> NaiveDate {
    let mut delta = (i64::from(target_weekday) - i64::from(today.weekday().num_days_from_monday())
        + 7)
        % 7;
    if delta == 0 {
        delta = 7;
    }
    today + Duration::days(delta)
}

fn resolve_fragment(fragment: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(caps) = NEXT_WEEKDAY_REGEX.captures(fragment) {
        return weekday_index(&caps[1]).map(|idx| next_weekday(today, idx));
    }

    match fragment.to_lowercase().as_str() {
        "heute" => Some(today),
        "gestern" => Some(today - Duration::days(1)),
        "morgen" => Some(today + Duration::days(1)),
        "übermorgen" => Some(today + Duration::days(2)),
        _ => None,
    }
}

/// Replaces every known German relative-date fragment in `text` with an
/// ISO `YYYY-MM-DD` date computed against `today`. Unknown fragments and
/// all other text pass through unchanged, which also makes the function
/// idempotent: ISO dates never match the keyword pattern again.
pub fn replace_date_keywords_from(text: &str, today: NaiveDate) -> String {
    DATE_KEYWORD_REGEX
        .replace_all(text, |caps: &Captures| {
            match resolve_fragment(&caps[0], today) {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// `replace_date_keywords_from` against the local calendar date.
pub fn replace_date_keywords(text: &str) -> String {
    replace_date_keywords_from(text, Local::now().date_naive())
}

/// True if the user typed a four-digit year anywhere in their message.
pub fn mentions_year(text: &str) -> bool {
    YEAR_REGEX.is_match(text)
}

/// Validates a dialogue-supplied travel date and repairs the common
/// model mistakes:
///
/// - month-day only ("6-15") gets the current year,
/// - a date in a different year than today is pulled back to the current
///   year unless the user themselves named a year,
/// - anything unparseable falls back to today.
pub fn normalize_travel_date(raw: &str, user_named_year: bool, today: NaiveDate) -> NaiveDate {
    if MONTH_DAY_REGEX.is_match(raw) {
        let mut parts = raw.split('-');
        let month: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        let day: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        return NaiveDate::from_ymd_opt(today.year(), month, day).unwrap_or(today);
    }

    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) if date.year() != today.year() && !user_named_year => {
            date.with_year(today.year()).unwrap_or(today)
        }
        Ok(date) => date,
        Err(_) => today,
    }
}
