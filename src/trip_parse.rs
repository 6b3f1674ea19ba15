//! Parses OJP trip-response documents into itinerary candidates.
//!
//! Each `ojp:Trip` becomes one [`ItineraryCandidate`]: a flat step
//! sequence (rides and walks, in travel order) plus the total duration.
//! The duration is last timed-leg arrival minus first timed-leg
//! departure; walking legs carry no absolute timestamps in the source
//! data and never contribute. A trip without a usable timed leg cannot
//! be ranked and is dropped here — an itinerary consisting purely of
//! transfer legs never surfaces to the user.

use chrono::NaiveDateTime;
use roxmltree::Node;

use crate::models::{ItineraryCandidate, LegStep};
use crate::ojp_client::OjpError;
use crate::ojp_xml::{self, OJP_NS};

/// Extracts all rankable itineraries of a trip-response document, in
/// document order.
pub fn parse_trip_response(document: &str) -> Result<Vec<ItineraryCandidate>, OjpError> {
    let doc = roxmltree::Document::parse(document)?;
    let mut candidates = Vec::new();

    for trip_result in ojp_xml::descendants(doc.root_element(), OJP_NS, "TripResult") {
        for trip in ojp_xml::children(trip_result, OJP_NS, "Trip") {
            if let Some(candidate) = parse_trip(trip) {
                candidates.push(candidate);
            }
        }
    }

    Ok(candidates)
}

fn parse_trip(trip: Node) -> Option<ItineraryCandidate> {
    let mut steps = Vec::new();
    let mut timed_times: Vec<(Option<NaiveDateTime>, Option<NaiveDateTime>)> = Vec::new();

    for leg in ojp_xml::children(trip, OJP_NS, "TripLeg") {
        if let Some(timed) = ojp_xml::child(leg, OJP_NS, "TimedLeg") {
            let (step, board_time, alight_time) = parse_timed_leg(timed);
            steps.push(step);
            timed_times.push((board_time, alight_time));
        } else if let Some(transfer) = ojp_xml::child(leg, OJP_NS, "TransferLeg") {
            steps.push(parse_transfer_leg(transfer));
        }
        // other leg kinds (e.g. ContinuousLeg) are not rendered
    }

    // duration needs the first board and last alight timestamps; without
    // them the whole trip is unrankable
    let first_board = timed_times.first().copied()?.0?;
    let last_alight = timed_times.last().copied()?.1?;

    Some(ItineraryCandidate {
        steps,
        total_duration: last_alight - first_board,
    })
}

fn parse_timed_leg(timed: Node) -> (LegStep, Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let board = ojp_xml::child(timed, OJP_NS, "LegBoard");
    let alight = ojp_xml::child(timed, OJP_NS, "LegAlight");
    let service = ojp_xml::child(timed, OJP_NS, "Service");

    let board_raw = board.and_then(|n| ojp_xml::descendant_text(n, OJP_NS, "TimetabledTime"));
    let alight_raw = alight.and_then(|n| ojp_xml::descendant_text(n, OJP_NS, "TimetabledTime"));

    let step = LegStep::Ride {
        line: service
            .and_then(|n| ojp_xml::descendant(n, OJP_NS, "PublishedLineName"))
            .and_then(|n| ojp_xml::descendant_text(n, OJP_NS, "Text")),
        origin_station: board
            .and_then(|n| ojp_xml::descendant(n, OJP_NS, "StopPointName"))
            .and_then(|n| ojp_xml::descendant_text(n, OJP_NS, "Text")),
        origin_time: board_raw.as_deref().map(clock_portion),
        origin_quay: board
            .and_then(|n| ojp_xml::descendant(n, OJP_NS, "PlannedQuay"))
            .and_then(|n| ojp_xml::descendant_text(n, OJP_NS, "Text")),
        destination_station: alight
            .and_then(|n| ojp_xml::descendant(n, OJP_NS, "StopPointName"))
            .and_then(|n| ojp_xml::descendant_text(n, OJP_NS, "Text")),
        destination_time: alight_raw.as_deref().map(clock_portion),
        destination_quay: alight
            .and_then(|n| ojp_xml::descendant(n, OJP_NS, "PlannedQuay"))
            .and_then(|n| ojp_xml::descendant_text(n, OJP_NS, "Text")),
    };

    let board_time = board_raw.as_deref().and_then(parse_timetabled);
    let alight_time = alight_raw.as_deref().and_then(parse_timetabled);
    (step, board_time, alight_time)
}

fn parse_transfer_leg(transfer: Node) -> LegStep {
    LegStep::Walk {
        mode: ojp_xml::descendant_text(transfer, OJP_NS, "TransferMode"),
        from_name: ojp_xml::descendant(transfer, OJP_NS, "LegStart")
            .and_then(|n| ojp_xml::descendant(n, OJP_NS, "LocationName"))
            .and_then(|n| ojp_xml::descendant_text(n, OJP_NS, "Text")),
        to_name: ojp_xml::descendant(transfer, OJP_NS, "LegEnd")
            .and_then(|n| ojp_xml::descendant(n, OJP_NS, "LocationName"))
            .and_then(|n| ojp_xml::descendant_text(n, OJP_NS, "Text")),
        duration: ojp_xml::descendant_text(transfer, OJP_NS, "Duration")
            .map(|d| strip_duration_marker(&d)),
    }
}

/// "PT5M" -> "5m": the leading period/time designators go, the rest is
/// lowercased for display.
fn strip_duration_marker(raw: &str) -> String {
    raw.trim_start_matches(['P', 'T']).to_lowercase()
}

/// Clock part of a timetabled timestamp, trailing timezone marker
/// stripped: "2025-06-05T08:02:00Z" -> "08:02:00".
fn clock_portion(raw: &str) -> String {
    raw.rsplit('T')
        .next()
        .unwrap_or(raw)
        .trim_end_matches('Z')
        .to_string()
}

fn parse_timetabled(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn timed_leg(
        dep_station: &str,
        dep_time: &str,
        dep_quay: Option<&str>,
        arr_station: &str,
        arr_time: &str,
        line: &str,
    ) -> String {
        let dep_quay = dep_quay
            .map(|q| format!("<ojp:PlannedQuay><ojp:Text>{q}</ojp:Text></ojp:PlannedQuay>"))
            .unwrap_or_default();
        format!(
            r#"<ojp:TripLeg>
  <ojp:TimedLeg>
    <ojp:LegBoard>
      <ojp:StopPointName><ojp:Text>{dep_station}</ojp:Text></ojp:StopPointName>
      {dep_quay}
      <ojp:ServiceDeparture><ojp:TimetabledTime>{dep_time}</ojp:TimetabledTime></ojp:ServiceDeparture>
    </ojp:LegBoard>
    <ojp:LegAlight>
      <ojp:StopPointName><ojp:Text>{arr_station}</ojp:Text></ojp:StopPointName>
      <ojp:ServiceArrival><ojp:TimetabledTime>{arr_time}</ojp:TimetabledTime></ojp:ServiceArrival>
    </ojp:LegAlight>
    <ojp:Service>
      <ojp:PublishedLineName><ojp:Text>{line}</ojp:Text></ojp:PublishedLineName>
    </ojp:Service>
  </ojp:TimedLeg>
</ojp:TripLeg>"#
        )
    }

    fn walk_leg(from: &str, to: &str, duration: &str) -> String {
        format!(
            r#"<ojp:TripLeg>
  <ojp:TransferLeg>
    <ojp:TransferMode>walk</ojp:TransferMode>
    <ojp:LegStart><ojp:LocationName><ojp:Text>{from}</ojp:Text></ojp:LocationName></ojp:LegStart>
    <ojp:LegEnd><ojp:LocationName><ojp:Text>{to}</ojp:Text></ojp:LocationName></ojp:LegEnd>
    <ojp:Duration>{duration}</ojp:Duration>
  </ojp:TransferLeg>
</ojp:TripLeg>"#
        )
    }

    fn document(trips: &[String]) -> String {
        let trip_results: String = trips
            .iter()
            .map(|legs| format!("<ojp:TripResult><ojp:Trip>{legs}</ojp:Trip></ojp:TripResult>"))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Response xmlns="http://www.siri.org.uk/siri" xmlns:ojp="http://www.vdv.de/ojp">
  <ojp:OJPTripDelivery>{trip_results}</ojp:OJPTripDelivery>
</Response>"#
        )
    }

    #[test]
    fn test_single_ride_trip() {
        let doc = document(&[timed_leg(
            "Bern",
            "2025-06-05T08:02:00Z",
            Some("4"),
            "Luzern",
            "2025-06-05T08:47:00Z",
            "IR 15",
        )]);
        let candidates = parse_trip_response(&doc).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].total_duration, TimeDelta::minutes(45));
        assert_eq!(
            candidates[0].steps,
            vec![LegStep::Ride {
                line: Some("IR 15".to_string()),
                origin_station: Some("Bern".to_string()),
                origin_time: Some("08:02:00".to_string()),
                origin_quay: Some("4".to_string()),
                destination_station: Some("Luzern".to_string()),
                destination_time: Some("08:47:00".to_string()),
                destination_quay: None,
            }]
        );
    }

    #[test]
    fn test_ride_walk_ride_trip() {
        let legs = format!(
            "{}{}{}",
            timed_leg(
                "Bern",
                "2025-06-05T08:05:00Z",
                None,
                "Olten",
                "2025-06-05T08:15:00Z",
                "IC 5",
            ),
            walk_leg("Olten", "Olten Süd", "PT5M"),
            timed_leg(
                "Olten Süd",
                "2025-06-05T08:22:00Z",
                None,
                "Luzern",
                "2025-06-05T08:35:00Z",
                "S 9",
            ),
        );
        let candidates = parse_trip_response(&document(&[legs])).unwrap();
        assert_eq!(candidates.len(), 1);
        // walking time sits inside the board/alight window and is not
        // summed separately
        assert_eq!(candidates[0].total_duration, TimeDelta::minutes(30));
        assert_eq!(candidates[0].steps.len(), 3);
        assert_eq!(
            candidates[0].steps[1],
            LegStep::Walk {
                mode: Some("walk".to_string()),
                from_name: Some("Olten".to_string()),
                to_name: Some("Olten Süd".to_string()),
                duration: Some("5m".to_string()),
            }
        );
    }

    #[test]
    fn test_walk_only_trip_is_dropped() {
        let doc = document(&[walk_leg("Bern", "Bern Bahnhof", "PT7M")]);
        assert!(parse_trip_response(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_walk_only_document_ranks_to_the_empty_state() {
        let doc = document(&[walk_leg("Bern", "Bern Bahnhof", "PT7M")]);
        let candidates = parse_trip_response(&doc).unwrap();
        assert!(crate::trip_rank::rank_itineraries(candidates).is_none());
    }

    #[test]
    fn test_trip_with_missing_board_time_is_dropped() {
        let broken = r#"<ojp:TripLeg>
  <ojp:TimedLeg>
    <ojp:LegBoard>
      <ojp:StopPointName><ojp:Text>Bern</ojp:Text></ojp:StopPointName>
    </ojp:LegBoard>
    <ojp:LegAlight>
      <ojp:ServiceArrival><ojp:TimetabledTime>2025-06-05T08:47:00Z</ojp:TimetabledTime></ojp:ServiceArrival>
    </ojp:LegAlight>
  </ojp:TimedLeg>
</ojp:TripLeg>"#
            .to_string();
        let intact = timed_leg(
            "Bern",
            "2025-06-05T09:00:00Z",
            None,
            "Thun",
            "2025-06-05T09:18:00Z",
            "S 1",
        );
        let candidates = parse_trip_response(&document(&[broken, intact])).unwrap();
        // only the intact trip survives
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].total_duration, TimeDelta::minutes(18));
    }

    #[test]
    fn test_missing_display_fields_become_none_not_a_drop() {
        let sparse = r#"<ojp:TripLeg>
  <ojp:TimedLeg>
    <ojp:LegBoard>
      <ojp:ServiceDeparture><ojp:TimetabledTime>2025-06-05T08:00:00Z</ojp:TimetabledTime></ojp:ServiceDeparture>
    </ojp:LegBoard>
    <ojp:LegAlight>
      <ojp:ServiceArrival><ojp:TimetabledTime>2025-06-05T08:30:00Z</ojp:TimetabledTime></ojp:ServiceArrival>
    </ojp:LegAlight>
  </ojp:TimedLeg>
</ojp:TripLeg>"#
            .to_string();
        let candidates = parse_trip_response(&document(&[sparse])).unwrap();
        assert_eq!(candidates.len(), 1);
        match &candidates[0].steps[0] {
            LegStep::Ride {
                line,
                origin_station,
                origin_time,
                ..
            } => {
                assert!(line.is_none());
                assert!(origin_station.is_none());
                assert_eq!(origin_time.as_deref(), Some("08:00:00"));
            }
            other => panic!("expected a ride step, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_leg_kind_is_skipped() {
        let legs = format!(
            "<ojp:TripLeg><ojp:ContinuousLeg></ojp:ContinuousLeg></ojp:TripLeg>{}",
            timed_leg(
                "Bern",
                "2025-06-05T08:00:00Z",
                None,
                "Thun",
                "2025-06-05T08:20:00Z",
                "S 1",
            )
        );
        let candidates = parse_trip_response(&document(&[legs])).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].steps.len(), 1);
    }

    #[test]
    fn test_duration_marker_stripping() {
        assert_eq!(strip_duration_marker("PT5M"), "5m");
        assert_eq!(strip_duration_marker("PT1H5M"), "1h5m");
    }

    #[test]
    fn test_clock_portion() {
        assert_eq!(clock_portion("2025-06-05T08:02:00Z"), "08:02:00");
        assert_eq!(clock_portion("2025-06-05T08:02:00"), "08:02:00");
    }
}
