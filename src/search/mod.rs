//! Nearby-place search: the provider capability, the location signal and
//! the controller tying them together.

pub mod controller;
pub mod location;
pub mod provider;

pub use controller::{
    ProximitySearchController, SearchDiagnostics, SearchOutcome, SearchState, rank_candidates,
    saved_selection,
};
pub use location::{
    AuthorizationState, LocationEvent, LocationReceiver, LocationSender, location_channel,
};
pub use provider::{Candidate, FilePlacesProvider, PlacesError, PlacesProvider};
