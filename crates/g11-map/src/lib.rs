//! g11-map
//!
//! Map views bound to the nearby-points endpoint.
//!
//! A view is discovered from a host element, centered (explicit options,
//! geolocation, or the configured default), and refreshed with markers as the
//! user pans. The widget, the geolocation service and the HTTP transport sit
//! behind [`MapSurface`], [`Geolocator`] and [`NearClient`].

pub mod debounce;
pub mod discover;
pub mod marker;
pub mod near_client;
pub mod surface;
pub mod view;
pub mod watermark;

pub use debounce::{refresh_view, RefreshScheduler, ViewRefresher};
pub use discover::{discover_maps, DiscoveredMap, ElementDescriptor};
pub use marker::{info_window_content, MarkerSpec};
pub use near_client::{HttpNearClient, NearClient};
pub use surface::{GeolocationError, Geolocator, MapSurface};
pub use view::{CenterSource, MapView, MarkerUpdate, SupersededLoad};
pub use watermark::{LoadFreshness, LoadTicket, ResponseWatermark};
