//! Planning-dialogue stages, as an explicit state machine.
//!
//! The front ends drive one journey request through these stages; the
//! stage decides which inputs are currently meaningful. Kept outside the
//! normalizer/parser components — those stay pure functions.

/// Where the dialogue currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanningStage {
    /// Gathering origin, destination, date and time from the user.
    Collecting,
    /// Turning the collected place names into stop identifiers.
    ResolvingPlaces,
    /// Waiting on the journey service's trip response.
    FetchingItinerary,
    /// Best connection and alternatives are on screen.
    Presenting,
    /// Farewell; no further input changes anything.
    Closing,
}

/// What just happened, as far as the dialogue is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogEvent {
    /// All four request fields are collected and normalized.
    RequestComplete,
    /// Origin and destination both resolved to a stop identifier.
    PlacesResolved,
    /// A place query yielded no candidates; the user must rephrase.
    PlaceNotFound,
    /// The trip response was parsed and ranked.
    ItineraryReady,
    /// Trip fetch hard-failed or ranked to the empty state.
    NothingToPresent,
    /// The user acknowledged the presented connections.
    Confirmed,
}

impl PlanningStage {
    /// Advances the stage. Events that do not apply to the current stage
    /// leave it unchanged, so out-of-order input cannot wedge a dialogue.
    pub fn advance(self, event: DialogEvent) -> PlanningStage {
        use DialogEvent::*;
        use PlanningStage::*;

        match (self, event) {
            (Collecting, RequestComplete) => ResolvingPlaces,
            (ResolvingPlaces, PlacesResolved) => FetchingItinerary,
            (ResolvingPlaces, PlaceNotFound) => Collecting,
            (FetchingItinerary, ItineraryReady) => Presenting,
            (FetchingItinerary, NothingToPresent) => Closing,
            (Presenting, Confirmed) => Closing,
            (stage, _) => stage,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == PlanningStage::Closing
    }
}
