//! Stop-place resolution against the OJP location-information service.

use crate::models::PlaceCandidate;
use crate::ojp_client::{OjpClient, OjpError};
use crate::ojp_xml::{self, OJP_NS};

/// Outcome of resolving one place-name query.
///
/// `NoCandidates` and `NeedsChoice` are both expected results, not
/// errors, and callers treat them differently: the first is a hard stop
/// for that query, the second an interactive choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaceResolution {
    NoCandidates,
    Unambiguous(PlaceCandidate),
    NeedsChoice(Vec<PlaceCandidate>),
}

/// Extracts every stop place of a location-information response, in the
/// order the service returned them. Entries missing their ref or display
/// name are skipped.
pub fn parse_stop_places(document: &str) -> Result<Vec<PlaceCandidate>, OjpError> {
    let doc = roxmltree::Document::parse(document)?;
    let mut results = Vec::new();

    for stop_place in ojp_xml::descendants(doc.root_element(), OJP_NS, "StopPlace") {
        let id = ojp_xml::descendant_text(stop_place, OJP_NS, "StopPlaceRef");
        let name = ojp_xml::descendant(stop_place, OJP_NS, "StopPlaceName")
            .and_then(|n| ojp_xml::descendant_text(n, OJP_NS, "Text"));
        if let (Some(id), Some(name)) = (id, name) {
            results.push(PlaceCandidate {
                id: id.into(),
                name,
            });
        }
    }

    Ok(results)
}

/// Disambiguation policy over a candidate list:
///
/// 1. a display name equal to the trimmed query (case-insensitive) wins,
/// 2. otherwise a lone result is the implicit pick,
/// 3. otherwise the caller has to ask the user.
pub fn resolve_place(query: &str, candidates: Vec<PlaceCandidate>) -> PlaceResolution {
    let needle = query.trim().to_lowercase();
    if let Some(exact) = candidates
        .iter()
        .find(|c| c.name.trim().to_lowercase() == needle)
    {
        return PlaceResolution::Unambiguous(exact.clone());
    }

    let mut candidates = candidates;
    match candidates.len() {
        0 => PlaceResolution::NoCandidates,
        1 => PlaceResolution::Unambiguous(candidates.remove(0)),
        _ => PlaceResolution::NeedsChoice(candidates),
    }
}

/// Queries the service for `query` and applies [`resolve_place`].
pub fn lookup_stop_place(client: &OjpClient, query: &str) -> Result<PlaceResolution, OjpError> {
    let document = client.fetch_location_information(query)?;
    let candidates = parse_stop_places(&document)?;
    Ok(resolve_place(query, candidates))
}
