use chrono::{NaiveDate, NaiveTime, TimeDelta};
use compact_str::CompactString;

/// Whether the requested time is the earliest departure or the latest
/// arrival. Decides which end of the trip request carries the DepArrTime.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelDirection {
    DepartAfter,
    ArriveBefore,
}

/// One fully collected journey request. Date and time are already
/// normalized when this is built; nothing downstream re-parses user text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TravelRequest {
    pub origin_text: String,
    pub destination_text: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub direction: TravelDirection,
}

/// One stop place returned by the location-information service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlaceCandidate {
    pub id: CompactString,
    pub name: String,
}

/// One rendered segment of an itinerary, in travel order.
///
/// Optional fields are ones the response document is allowed to omit;
/// they show up as a placeholder in the display layer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LegStep {
    Ride {
        line: Option<String>,
        origin_station: Option<String>,
        origin_time: Option<String>,
        origin_quay: Option<String>,
        destination_station: Option<String>,
        destination_time: Option<String>,
        destination_quay: Option<String>,
    },
    Walk {
        mode: Option<String>,
        from_name: Option<String>,
        to_name: Option<String>,
        duration: Option<String>,
    },
}

/// An itinerary together with its computed door-to-door duration.
///
/// The step order is the travel order and is never reordered. Duration is
/// last timed-leg arrival minus first timed-leg departure; trips without a
/// usable timed leg never become a candidate in the first place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItineraryCandidate {
    pub steps: Vec<LegStep>,
    pub total_duration: TimeDelta,
}

/// Ranking output: fastest itinerary first, the rest ascending by
/// duration. Ties keep the order the service returned them in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedResult {
    pub best: ItineraryCandidate,
    pub alternatives: Vec<ItineraryCandidate>,
}
