//! In-memory stand-ins for the map widget, geolocation and the endpoint,
//! plus fixture helpers. Used by the scenario tests under `tests/`.

use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use g11_map::{GeolocationError, Geolocator, MapSurface, MarkerSpec, NearClient};
use g11_schemas::{GeoPoint, LatLng, NearPoint, NearResponse, PointPage};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A point at `(lat, lng)` with title `"Title {id}"` and no distance.
pub fn point(id: &str, lat: f64, lng: f64) -> NearPoint {
    NearPoint {
        page: PointPage {
            id: id.to_string(),
            title: format!("Title {id}"),
            url: format!("http://example.test/{id}"),
            loc: GeoPoint::from_lat_lng(LatLng::new(lat, lng)),
        },
        dis: None,
    }
}

/// Points at the origin, one per id.
pub fn points(ids: &[&str]) -> Vec<NearPoint> {
    ids.iter().map(|id| point(id, 0.0, 0.0)).collect()
}

pub fn load_points_json(path: &str) -> Result<Vec<NearPoint>> {
    let s = fs::read_to_string(path).with_context(|| format!("read points: {path}"))?;
    NearResponse::parse(&s).with_context(|| format!("parse points json: {path}"))
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetCenter(LatLng),
    AddMarker(String),
    RemoveMarker(String),
}

/// Records every call and keeps the live overlay set.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    center: Option<LatLng>,
    pub markers: BTreeMap<String, MarkerSpec>,
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface already showing `pos`, as if the widget was created there.
    pub fn centered_at(pos: LatLng) -> Self {
        Self {
            center: Some(pos),
            ..Self::default()
        }
    }

    /// Move the center without recording a call, as a user drag would.
    pub fn pan_to(&mut self, pos: LatLng) {
        self.center = Some(pos);
    }

    pub fn marker_ids(&self) -> Vec<String> {
        self.markers.keys().cloned().collect()
    }

    pub fn set_center_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::SetCenter(_)))
            .count()
    }
}

impl MapSurface for RecordingSurface {
    fn center(&self) -> Option<LatLng> {
        self.center
    }

    fn set_center(&mut self, pos: LatLng) {
        self.center = Some(pos);
        self.calls.push(SurfaceCall::SetCenter(pos));
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        self.markers.insert(marker.id.clone(), marker.clone());
        self.calls.push(SurfaceCall::AddMarker(marker.id.clone()));
    }

    fn remove_marker(&mut self, id: &str) {
        self.markers.remove(id);
        self.calls.push(SurfaceCall::RemoveMarker(id.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Geolocation
// ---------------------------------------------------------------------------

pub struct FixedGeolocator(pub LatLng);

#[async_trait::async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        Ok(self.0)
    }
}

pub struct DeniedGeolocator;

#[async_trait::async_trait]
impl Geolocator for DeniedGeolocator {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        Err(GeolocationError::Denied)
    }
}

/// A platform that cannot produce a fix, e.g. a timeout.
pub struct UnavailableGeolocator(String);

impl UnavailableGeolocator {
    pub fn new(reason: &str) -> Self {
        Self(reason.to_string())
    }
}

#[async_trait::async_trait]
impl Geolocator for UnavailableGeolocator {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        Err(GeolocationError::Unavailable(self.0.clone()))
    }
}

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

struct Canned {
    delay: Duration,
    result: Result<Vec<NearPoint>, String>,
}

/// Serves queued responses in order and records every requested center.
///
/// An exhausted queue answers with an error.
#[derive(Default)]
pub struct StaticNearClient {
    queue: Mutex<VecDeque<Canned>>,
    requested: Mutex<Vec<LatLng>>,
}

impl StaticNearClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, points: Vec<NearPoint>) -> Self {
        self.respond_after(Duration::ZERO, points)
    }

    /// Queue a response that arrives `delay` after the request.
    pub fn respond_after(self, delay: Duration, points: Vec<NearPoint>) -> Self {
        self.push(Canned {
            delay,
            result: Ok(points),
        });
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Canned {
            delay: Duration::ZERO,
            result: Err(message.to_string()),
        });
        self
    }

    pub fn requested(&self) -> Vec<LatLng> {
        self.requested
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn push(&self, canned: Canned) {
        if let Ok(mut q) = self.queue.lock() {
            q.push_back(canned);
        }
    }
}

#[async_trait::async_trait]
impl NearClient for StaticNearClient {
    async fn fetch_near(&self, center: LatLng) -> Result<Vec<NearPoint>> {
        if let Ok(mut r) = self.requested.lock() {
            r.push(center);
        }
        let next = self.queue.lock().ok().and_then(|mut q| q.pop_front());
        let Some(canned) = next else {
            return Err(anyhow!("no canned response for {},{}", center.lat, center.lng));
        };
        if !canned.delay.is_zero() {
            tokio::time::sleep(canned.delay).await;
        }
        canned.result.map_err(|m| anyhow!(m))
    }
}
