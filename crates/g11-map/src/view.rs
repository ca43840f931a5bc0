//! One interactive map bound to the nearby-points endpoint.
//!
//! A view owns its surface, the sorted list of points currently shown, and
//! the live markers keyed by point id. Each refresh reconciles the held list
//! against a fresh batch and touches only the markers that changed.
//!
//! Points whose id is unchanged keep their existing marker even if the title,
//! position or distance changed. Identity is the id alone.

use std::collections::BTreeMap;

use anyhow::Result;
use g11_config::{MapConfig, MapOptions};
use g11_reconcile::reconcile;
use g11_schemas::{LatLng, NearPoint};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::watermark::{LoadFreshness, LoadTicket, ResponseWatermark};
use crate::{Geolocator, MapSurface, MarkerSpec, NearClient};

/// Where the initial center came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterSource {
    Explicit,
    Geolocated,
    Default,
}

/// Ids touched by one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkerUpdate {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl MarkerUpdate {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// A response arrived after a newer one had already been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupersededLoad {
    pub freshness: LoadFreshness,
}

impl std::fmt::Display for SupersededLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.freshness {
            LoadFreshness::Superseded { applied, got } => write!(
                f,
                "superseded marker load dropped: applied={applied} got={got}"
            ),
            LoadFreshness::Fresh => write!(f, "SupersededLoad: constructed with Fresh"),
        }
    }
}

impl std::error::Error for SupersededLoad {}

pub struct MapView<S> {
    view_id: Uuid,
    surface: S,
    options: MapOptions,
    config: MapConfig,
    /// Sorted by id, unique.
    points: Vec<NearPoint>,
    markers: BTreeMap<String, MarkerSpec>,
    watermark: ResponseWatermark,
}

impl<S: MapSurface> MapView<S> {
    pub fn new(surface: S, options: MapOptions, config: MapConfig) -> Self {
        Self {
            view_id: Uuid::new_v4(),
            surface,
            options,
            config,
            points: Vec::new(),
            markers: BTreeMap::new(),
            watermark: ResponseWatermark::new(),
        }
    }

    pub fn view_id(&self) -> Uuid {
        self.view_id
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn points(&self) -> &[NearPoint] {
        &self.points
    }

    pub fn marker(&self, id: &str) -> Option<&MarkerSpec> {
        self.markers.get(id)
    }

    pub fn marker_ids(&self) -> Vec<String> {
        self.markers.keys().cloned().collect()
    }

    /// Position the view: explicit options first, then geolocation, then the
    /// configured default. `None` means the platform has no geolocation.
    pub async fn initial_center(&mut self, geolocator: Option<&dyn Geolocator>) -> CenterSource {
        if let Some(pos) = self.options.explicit_center() {
            self.set_center(pos);
            return CenterSource::Explicit;
        }

        let Some(geo) = geolocator else {
            self.set_center(self.config.default_center);
            return CenterSource::Default;
        };

        match geo.current_position().await {
            Ok(pos) => {
                self.set_center(pos);
                CenterSource::Geolocated
            }
            Err(err) => {
                warn!(view_id = %self.view_id, error = %err, "geolocation failed; using default center");
                self.set_center(self.config.default_center);
                CenterSource::Default
            }
        }
    }

    /// Move the surface unless it is already exactly there. Returns `true`
    /// if the center changed.
    pub fn set_center(&mut self, pos: LatLng) -> bool {
        if self.surface.center() == Some(pos) {
            return false;
        }
        self.surface.set_center(pos);
        true
    }

    /// Replace the shown points with `points`, adding and removing markers
    /// for the difference.
    ///
    /// The batch is sorted by id here. A repeated id keeps its first entry.
    pub fn render_marker_data(&mut self, mut points: Vec<NearPoint>) -> MarkerUpdate {
        let received = points.len();
        points.sort_by(NearPoint::cmp_by_id);
        points.dedup_by(|b, a| a.id() == b.id());
        if points.len() != received {
            warn!(
                view_id = %self.view_id,
                dropped = received - points.len(),
                "duplicate point ids in batch"
            );
        }

        let (added, removed) = reconcile(&self.points, &points, NearPoint::cmp_by_id).into_parts();

        for p in &removed {
            self.surface.remove_marker(p.id());
            self.markers.remove(p.id());
        }

        for p in &added {
            let marker = MarkerSpec::for_point(p, &self.config.marker_icon);
            self.surface.add_marker(&marker);
            self.markers.insert(marker.id.clone(), marker);
        }

        self.points = points;

        let update = MarkerUpdate {
            added: added.iter().map(|p| p.id().to_string()).collect(),
            removed: removed.iter().map(|p| p.id().to_string()).collect(),
        };
        info!(
            view_id = %self.view_id,
            received,
            added = update.added.len(),
            removed = update.removed.len(),
            "rendered marker data"
        );
        update
    }

    /// Take a ticket before starting a fetch whose result will be passed to
    /// [`MapView::apply_response`].
    pub fn begin_load(&mut self) -> LoadTicket {
        self.watermark.issue()
    }

    /// Render `points` unless a newer load has already been applied.
    pub fn apply_response(
        &mut self,
        ticket: LoadTicket,
        points: Vec<NearPoint>,
    ) -> Result<MarkerUpdate, SupersededLoad> {
        let freshness = self.watermark.accept(ticket);
        if !freshness.is_fresh() {
            debug!(view_id = %self.view_id, seq = ticket.seq(), "dropping superseded response");
            return Err(SupersededLoad { freshness });
        }
        Ok(self.render_marker_data(points))
    }

    /// Fetch points near `center` and render them.
    ///
    /// On fetch failure the error is logged and returned; markers are left as
    /// they were.
    pub async fn load_markers_for(
        &mut self,
        client: &dyn NearClient,
        center: LatLng,
    ) -> Result<MarkerUpdate> {
        let view_id = self.view_id;
        info!(%view_id, lat = center.lat, lng = center.lng, "loading markers");
        let ticket = self.begin_load();
        let points = client.fetch_near(center).await.map_err(|err| {
            warn!(%view_id, error = %err, "marker load failed");
            err
        })?;
        Ok(self.apply_response(ticket, points)?)
    }
}
