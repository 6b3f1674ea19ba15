//! Time-of-day canonicalization for dialogue-supplied values.

use lazy_static::lazy_static;
use regex::Regex;

/// Substituted whenever the input is not recognizable as a time of day.
/// Deliberate policy, not an error path: a garbled time must never abort
/// the planning flow.
pub const DEFAULT_DEPARTURE_TIME: &str = "08:00:00";

lazy_static! {
    static ref TIME_OF_DAY_REGEX: Regex =
        Regex::new(r"^(\d{1,2}):?(\d{2})?:?(\d{2})?$").unwrap();
}

/// Canonicalizes a loose `H[:MM[:SS]]` string into `HH:MM:SS`.
///
/// The hour is zero-padded, missing minute/second groups become "00".
/// Input that does not match the pattern at all yields
/// [`DEFAULT_DEPARTURE_TIME`].
pub fn normalize_time_of_day(raw: &str) -> String {
    match TIME_OF_DAY_REGEX.captures(raw.trim()) {
        Some(caps) => {
            let hour = &caps[1];
            let minute = caps.get(2).map_or("00", |m| m.as_str());
            let second = caps.get(3).map_or("00", |m| m.as_str());
            format!("{:0>2}:{}:{}", hour, minute, second)
        }
        None => DEFAULT_DEPARTURE_TIME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_only() {
        assert_eq!(normalize_time_of_day("9"), "09:00:00");
    }

    #[test]
    fn test_hour_minute() {
        assert_eq!(normalize_time_of_day("9:45"), "09:45:00");
    }

    #[test]
    fn test_full_time() {
        assert_eq!(normalize_time_of_day("9:45:30"), "09:45:30");
    }

    #[test]
    fn test_already_padded() {
        assert_eq!(normalize_time_of_day("14:05"), "14:05:00");
    }

    #[test]
    fn test_without_separators() {
        assert_eq!(normalize_time_of_day("945"), "09:45:00");
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(normalize_time_of_day("garbage"), DEFAULT_DEPARTURE_TIME);
        assert_eq!(normalize_time_of_day(""), DEFAULT_DEPARTURE_TIME);
        assert_eq!(normalize_time_of_day("25:0"), DEFAULT_DEPARTURE_TIME);
    }
}
