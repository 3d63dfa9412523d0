use tokio::sync::mpsc;

use crate::models::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationState {
    #[default]
    NotDetermined,
    Authorized,
    Denied,
    Restricted,
}

impl AuthorizationState {
    /// Denied or restricted means no further position updates will come.
    /// That is a steady state, not an error.
    pub fn allows_updates(&self) -> bool {
        matches!(
            self,
            AuthorizationState::NotDetermined | AuthorizationState::Authorized
        )
    }
}

/// What the current-location signal delivers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationEvent {
    Position(GeoPoint),
    Authorization(AuthorizationState),
}

pub type LocationSender = mpsc::Sender<LocationEvent>;
pub type LocationReceiver = mpsc::Receiver<LocationEvent>;

pub fn location_channel(buffer: usize) -> (LocationSender, LocationReceiver) {
    mpsc::channel(buffer.max(1))
}
