//! Plain-text rendering of ranked itineraries.
//!
//! This is the display layer the parser defers to: document fields that
//! were absent show up here as the `–` placeholder instead of having
//! aborted the parse.

use chrono::TimeDelta;

use crate::models::{ItineraryCandidate, LegStep, RankedResult};
use crate::MISSING_FIELD_PLACEHOLDER;

fn field(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING_FIELD_PLACEHOLDER)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `0:45:00` style, like a wall clock reads a span.
pub fn format_duration(duration: TimeDelta) -> String {
    let total_seconds = duration.num_seconds();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// One numbered step line in travel order.
pub fn format_step(index: usize, step: &LegStep) -> String {
    match step {
        LegStep::Ride {
            line,
            origin_station,
            origin_time,
            origin_quay,
            destination_station,
            destination_time,
            destination_quay,
        } => format!(
            "{index}. Linie {}: {} ({} Uhr, Gleis {}) -> {} ({} Uhr, Gleis {})",
            field(line.as_deref()),
            field(origin_station.as_deref()),
            field(origin_time.as_deref()),
            field(origin_quay.as_deref()),
            field(destination_station.as_deref()),
            field(destination_time.as_deref()),
            field(destination_quay.as_deref()),
        ),
        LegStep::Walk {
            mode,
            from_name,
            to_name,
            duration,
        } => format!(
            "{index}. {} von {} nach {} (Dauer {})",
            capitalize(field(mode.as_deref())),
            field(from_name.as_deref()),
            field(to_name.as_deref()),
            field(duration.as_deref()),
        ),
    }
}

pub fn format_itinerary(itinerary: &ItineraryCandidate) -> Vec<String> {
    itinerary
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| format_step(i + 1, step))
        .collect()
}

/// The full result block: fastest connection first, alternatives after.
pub fn format_ranked(ranked: &RankedResult) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Schnellste Verbindung (Dauer {}):",
        format_duration(ranked.best.total_duration)
    ));
    lines.extend(format_itinerary(&ranked.best));

    if ranked.alternatives.is_empty() {
        lines.push(String::new());
        lines.push("Keine Alternativen verfügbar.".to_string());
    } else {
        for (i, alternative) in ranked.alternatives.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!(
                "Alternative {} (Dauer {}):",
                i + 1,
                format_duration(alternative.total_duration)
            ));
            lines.extend(format_itinerary(alternative));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ride_with_missing_quays() -> LegStep {
        LegStep::Ride {
            line: Some("IR 15".to_string()),
            origin_station: Some("Bern".to_string()),
            origin_time: Some("08:02:00".to_string()),
            origin_quay: None,
            destination_station: Some("Luzern".to_string()),
            destination_time: Some("08:47:00".to_string()),
            destination_quay: Some("7".to_string()),
        }
    }

    #[test]
    fn test_ride_step_renders_placeholder_for_missing_quay() {
        let line = format_step(1, &ride_with_missing_quays());
        assert_eq!(
            line,
            "1. Linie IR 15: Bern (08:02:00 Uhr, Gleis –) -> Luzern (08:47:00 Uhr, Gleis 7)"
        );
    }

    #[test]
    fn test_walk_step_capitalizes_mode() {
        let step = LegStep::Walk {
            mode: Some("walk".to_string()),
            from_name: Some("Olten".to_string()),
            to_name: Some("Olten Süd".to_string()),
            duration: Some("5m".to_string()),
        };
        assert_eq!(
            format_step(2, &step),
            "2. Walk von Olten nach Olten Süd (Dauer 5m)"
        );
    }

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration(TimeDelta::minutes(45)), "0:45:00");
        assert_eq!(format_duration(TimeDelta::minutes(65)), "1:05:00");
    }

    #[test]
    fn test_ranked_block_lists_alternatives_in_order() {
        let ranked = RankedResult {
            best: ItineraryCandidate {
                steps: vec![ride_with_missing_quays()],
                total_duration: TimeDelta::minutes(45),
            },
            alternatives: vec![ItineraryCandidate {
                steps: vec![ride_with_missing_quays()],
                total_duration: TimeDelta::minutes(52),
            }],
        };
        let block = format_ranked(&ranked);
        assert!(block.starts_with("Schnellste Verbindung (Dauer 0:45:00):"));
        assert!(block.contains("Alternative 1 (Dauer 0:52:00):"));
        assert!(!block.contains("Keine Alternativen"));
    }

    #[test]
    fn test_ranked_block_without_alternatives() {
        let ranked = RankedResult {
            best: ItineraryCandidate {
                steps: vec![ride_with_missing_quays()],
                total_duration: TimeDelta::minutes(45),
            },
            alternatives: vec![],
        };
        assert!(format_ranked(&ranked).contains("Keine Alternativen verfügbar."));
    }
}
