//! Derives the map path of the fastest offered itinerary.
//!
//! The trip-response document carries a pool of `ojp:Location` records
//! tying stop-point refs to WGS84 coordinates. The path is the ordered
//! ref sequence of the FIRST trip (board/alight per timed leg, start/end
//! per transfer leg) resolved through that pool. Refs the pool cannot
//! resolve are dropped silently — a partial path still renders, an empty
//! one means there is nothing to draw.

use ahash::AHashMap;
use geo_types::Point;

use crate::ojp_client::OjpError;
use crate::ojp_xml::{self, OJP_NS, SIRI_NS};

pub fn extract_first_trip_path(document: &str) -> Result<Vec<Point<f64>>, OjpError> {
    let doc = roxmltree::Document::parse(document)?;
    let root = doc.root_element();

    let coords_by_ref = stop_point_coordinates(root);

    let Some(trip) = ojp_xml::descendant(root, OJP_NS, "TripResult")
        .and_then(|tr| ojp_xml::child(tr, OJP_NS, "Trip"))
    else {
        return Ok(Vec::new());
    };

    let mut path: Vec<Point<f64>> = visited_stop_refs(trip)
        .iter()
        .filter_map(|r| coords_by_ref.get(r).copied())
        .collect();
    // consecutive duplicates only; a loop revisiting a stop later stays
    path.dedup();
    Ok(path)
}

/// Mapping pass over every location record holding a stop point.
fn stop_point_coordinates(root: roxmltree::Node) -> AHashMap<String, Point<f64>> {
    let mut coords_by_ref = AHashMap::new();

    for location in ojp_xml::descendants(root, OJP_NS, "Location") {
        let Some(stop_point) = ojp_xml::child(location, OJP_NS, "StopPoint") else {
            continue;
        };
        let Some(stop_ref) = ojp_xml::child_text(stop_point, SIRI_NS, "StopPointRef") else {
            continue;
        };
        let Some(geo) = ojp_xml::child(location, OJP_NS, "GeoPosition") else {
            continue;
        };
        let lon = ojp_xml::child_text(geo, SIRI_NS, "Longitude").and_then(|t| t.parse().ok());
        let lat = ojp_xml::child_text(geo, SIRI_NS, "Latitude").and_then(|t| t.parse().ok());
        if let (Some(lon), Some(lat)) = (lon, lat) {
            coords_by_ref.insert(stop_ref, Point::new(lon, lat));
        }
    }

    coords_by_ref
}

/// Stop-point refs in travel order: board then alight for timed legs,
/// start then end for transfer legs.
fn visited_stop_refs(trip: roxmltree::Node) -> Vec<String> {
    let mut refs = Vec::new();

    for leg in ojp_xml::children(trip, OJP_NS, "TripLeg") {
        if let Some(timed) = ojp_xml::child(leg, OJP_NS, "TimedLeg") {
            for end in ["LegBoard", "LegAlight"] {
                if let Some(stop_ref) = ojp_xml::child(timed, OJP_NS, end)
                    .and_then(|n| ojp_xml::child_text(n, SIRI_NS, "StopPointRef"))
                {
                    refs.push(stop_ref);
                }
            }
        }
        if let Some(transfer) = ojp_xml::child(leg, OJP_NS, "TransferLeg") {
            for end in ["LegStart", "LegEnd"] {
                if let Some(stop_ref) = ojp_xml::child(transfer, OJP_NS, end)
                    .and_then(|n| ojp_xml::child_text(n, SIRI_NS, "StopPointRef"))
                {
                    refs.push(stop_ref);
                }
            }
        }
    }

    refs
}
