//! Blocking client for the OJP 1.0 journey-planning service.
//!
//! Builds the two request documents this crate needs (location
//! information and trip) and POSTs them with bearer authentication. No
//! retries: a transport failure or non-2xx status is the caller's
//! problem, everything else downstream works on the returned body.

use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use crate::models::{PlaceCandidate, TravelDirection, TravelRequest};

/// How many trip options to ask the service for.
const NUMBER_OF_RESULTS: u8 = 5;

#[derive(Error, Debug)]
pub enum OjpError {
    #[error("request to the journey service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("journey service returned status {0}")]
    Status(u16),
    #[error("malformed response document: {0}")]
    BadDocument(#[from] roxmltree::Error),
}

pub struct OjpClient {
    endpoint: String,
    api_key: String,
    requestor_ref: String,
    http: reqwest::blocking::Client,
}

impl OjpClient {
    pub fn new(endpoint: &str, api_key: &str, requestor_ref: &str) -> Self {
        OjpClient {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            requestor_ref: requestor_ref.to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// POSTs a request document, returning the response body on 2xx.
    pub fn post(&self, body: String) -> Result<String, OjpError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/xml")
            .bearer_auth(&self.api_key)
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(OjpError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }

    /// Sends a stop-type location-information request for `place_name`
    /// and returns the raw response document.
    pub fn fetch_location_information(&self, place_name: &str) -> Result<String, OjpError> {
        let now = Utc::now();
        let body = location_information_body(
            &self.requestor_ref,
            place_name,
            &now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            now.timestamp(),
        );
        self.post(body)
    }

    /// Sends a trip request between two resolved stop places and returns
    /// the raw response document.
    pub fn fetch_trip(
        &self,
        origin: &PlaceCandidate,
        destination: &PlaceCandidate,
        request: &TravelRequest,
    ) -> Result<String, OjpError> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let body = trip_request_body(&self.requestor_ref, origin, destination, request, &timestamp);
        self.post(body)
    }
}

/// Escapes the XML-sensitive characters of user-supplied text before it
/// is interpolated into a request document.
fn escape_xml_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn location_information_body(
    requestor_ref: &str,
    place_name: &str,
    timestamp: &str,
    message_counter: i64,
) -> String {
    let place_name = escape_xml_text(place_name);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OJP xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
     xmlns:xsd="http://www.w3.org/2001/XMLSchema"
     xmlns="http://www.siri.org.uk/siri"
     xmlns:ojp="http://www.vdv.de/ojp"
     version="1.0"
     xsi:schemaLocation="http://www.siri.org.uk/siri ../ojp-xsd-v1.0/OJP.xsd">
  <OJPRequest>
    <ServiceRequest>
      <RequestTimestamp>{timestamp}</RequestTimestamp>
      <RequestorRef>{requestor_ref}</RequestorRef>
      <ojp:OJPLocationInformationRequest>
        <RequestTimestamp>{timestamp}</RequestTimestamp>
        <MessageIdentifier>mi-{message_counter}</MessageIdentifier>
        <ojp:InitialInput>
          <ojp:LocationName>{place_name}</ojp:LocationName>
        </ojp:InitialInput>
        <ojp:Restrictions>
          <ojp:Type>stop</ojp:Type>
          <ojp:IncludePtModes>true</ojp:IncludePtModes>
        </ojp:Restrictions>
      </ojp:OJPLocationInformationRequest>
    </ServiceRequest>
  </OJPRequest>
</OJP>"#
    )
}

fn place_ref_block(place: &PlaceCandidate, dep_arr_time: Option<&str>) -> String {
    let name = escape_xml_text(&place.name);
    let id = escape_xml_text(&place.id);
    let time_line = match dep_arr_time {
        Some(t) => format!("\n          <ojp:DepArrTime>{t}</ojp:DepArrTime>"),
        None => String::new(),
    };
    format!(
        r#"<ojp:PlaceRef>
            <ojp:StopPlaceRef>{id}</ojp:StopPlaceRef>
            <ojp:LocationName>
              <ojp:Text>{name}</ojp:Text>
            </ojp:LocationName>
          </ojp:PlaceRef>{time_line}"#
    )
}

fn trip_request_body(
    requestor_ref: &str,
    origin: &PlaceCandidate,
    destination: &PlaceCandidate,
    request: &TravelRequest,
    timestamp: &str,
) -> String {
    let dep_arr_time = format!(
        "{}T{}Z",
        request.date.format("%Y-%m-%d"),
        request.time.format("%H:%M:%S")
    );
    // the requested time constrains the end it is attached to
    let (origin_time, destination_time) = match request.direction {
        TravelDirection::DepartAfter => (Some(dep_arr_time.as_str()), None),
        TravelDirection::ArriveBefore => (None, Some(dep_arr_time.as_str())),
    };
    let origin_block = place_ref_block(origin, origin_time);
    let destination_block = place_ref_block(destination, destination_time);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OJP xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
     xmlns:xsd="http://www.w3.org/2001/XMLSchema"
     xmlns="http://www.siri.org.uk/siri"
     xmlns:ojp="http://www.vdv.de/ojp"
     version="1.0"
     xsi:schemaLocation="http://www.siri.org.uk/siri ../ojp-xsd-v1.0/OJP.xsd">
  <OJPRequest>
    <ServiceRequest>
      <RequestTimestamp>{timestamp}</RequestTimestamp>
      <RequestorRef>{requestor_ref}</RequestorRef>
      <ojp:OJPTripRequest>
        <RequestTimestamp>{timestamp}</RequestTimestamp>
        <ojp:Origin>
          {origin_block}
        </ojp:Origin>
        <ojp:Destination>
          {destination_block}
        </ojp:Destination>
        <ojp:Params>
          <ojp:NumberOfResults>{NUMBER_OF_RESULTS}</ojp:NumberOfResults>
          <ojp:OptimisationMethod>fastest</ojp:OptimisationMethod>
        </ojp:Params>
      </ojp:OJPTripRequest>
    </ServiceRequest>
  </OJPRequest>
</OJP>"#
    )
}
