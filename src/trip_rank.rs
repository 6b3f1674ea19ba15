//! Orders itinerary candidates by total duration.

use itertools::Itertools;

use crate::models::{ItineraryCandidate, RankedResult};

/// Stable ascending sort by duration: the fastest itinerary becomes
/// `best`, the rest are alternatives in ascending order, equal durations
/// keeping the order the service returned them in. `None` is the valid
/// zero-result state (no usable itinerary in the document), not an error.
///
/// No cap on the number of alternatives — trimming the list is a display
/// concern.
pub fn rank_itineraries(candidates: Vec<ItineraryCandidate>) -> Option<RankedResult> {
    let mut by_duration = candidates
        .into_iter()
        .sorted_by_key(|candidate| candidate.total_duration);

    let best = by_duration.next()?;
    Some(RankedResult {
        best,
        alternatives: by_duration.collect(),
    })
}
