//! Seams to the vendor map widget and the geolocation service.
//!
//! Neither trait knows anything about reconciliation; [`crate::MapView`] drives
//! them with the output of the diff.

use std::fmt;

use g11_schemas::LatLng;

use crate::MarkerSpec;

/// The interactive map a view renders into.
///
/// Implementations wrap whatever widget actually draws tiles and overlays.
/// All calls are synchronous; the widget is expected to queue its own redraws.
pub trait MapSurface: Send {
    /// Current center, or `None` before the widget has been positioned.
    fn center(&self) -> Option<LatLng>;

    fn set_center(&mut self, pos: LatLng);

    /// Create an overlay for `marker`. Its `id` is the handle for removal.
    fn add_marker(&mut self, marker: &MarkerSpec);

    /// Destroy the overlay created for `id`. Unknown ids are ignored.
    fn remove_marker(&mut self, id: &str);
}

/// Why a position could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The user declined location sharing.
    Denied,
    /// The platform could not produce a fix.
    Unavailable(String),
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeolocationError::Denied => write!(f, "geolocation permission denied"),
            GeolocationError::Unavailable(msg) => write!(f, "geolocation unavailable: {msg}"),
        }
    }
}

impl std::error::Error for GeolocationError {}

/// Source of the device's current position.
///
/// A platform without geolocation support has no `Geolocator` at all; callers
/// pass `None` to [`crate::MapView::initial_center`].
#[async_trait::async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<LatLng, GeolocationError>;
}
