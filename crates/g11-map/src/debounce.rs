//! Debounced marker refresh.
//!
//! Panning fires a burst of center-change notifications. The first one in a
//! burst schedules a refresh after the quiet period; the rest are dropped
//! while that refresh is pending. At most one refresh is pending per view.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{MapSurface, MapView, MarkerUpdate, NearClient};

/// Single-flight delay timer.
#[derive(Clone, Debug)]
pub struct RefreshScheduler {
    delay: Duration,
    pending: Arc<AtomicBool>,
}

impl RefreshScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Schedule `job` to run after the delay. Returns `false`, and drops
    /// `job`, if a run is already pending or the caller is not on a Tokio
    /// runtime.
    ///
    /// The pending flag clears when the delay elapses, before `job` starts, so
    /// a notification during a slow job schedules the next refresh.
    pub fn center_changed<F, Fut>(&self, job: F) -> bool
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            warn!("center change outside a tokio runtime; refresh not scheduled");
            return false;
        };
        if self.pending.swap(true, Ordering::AcqRel) {
            return false;
        }
        let pending = Arc::clone(&self.pending);
        let delay = self.delay;
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            pending.store(false, Ordering::Release);
            job().await;
        });
        true
    }
}

/// Read the view's current center, fetch, and apply the result.
///
/// The view lock is not held across the fetch, so other notifications and
/// renders can proceed; the load ticket keeps a slow, stale response from
/// overwriting a newer one. Returns `Ok(None)` when the surface has no
/// center yet or the response was superseded.
pub async fn refresh_view<S: MapSurface>(
    view: &Mutex<MapView<S>>,
    client: &dyn NearClient,
) -> Result<Option<MarkerUpdate>> {
    let (ticket, center, view_id) = {
        let mut v = view.lock().await;
        let Some(center) = v.surface().center() else {
            debug!(view_id = %v.view_id(), "surface has no center yet; skipping refresh");
            return Ok(None);
        };
        (v.begin_load(), center, v.view_id())
    };

    debug!(%view_id, lat = center.lat, lng = center.lng, "center changed");
    let points = client.fetch_near(center).await?;

    let mut v = view.lock().await;
    match v.apply_response(ticket, points) {
        Ok(update) => Ok(Some(update)),
        Err(stale) => {
            debug!(%view_id, reason = %stale, "refresh result discarded");
            Ok(None)
        }
    }
}

/// A shared view wired to its scheduler and endpoint client.
pub struct ViewRefresher<S> {
    view: Arc<Mutex<MapView<S>>>,
    client: Arc<dyn NearClient>,
    scheduler: RefreshScheduler,
}

impl<S> Clone for ViewRefresher<S> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            client: Arc::clone(&self.client),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<S: MapSurface + 'static> ViewRefresher<S> {
    pub fn new(view: Arc<Mutex<MapView<S>>>, client: Arc<dyn NearClient>, delay: Duration) -> Self {
        Self {
            view,
            client,
            scheduler: RefreshScheduler::new(delay),
        }
    }

    /// Wrap `view` for sharing, with the quiet period taken from its
    /// `debounce_ms` setting.
    pub fn for_view(view: MapView<S>, client: Arc<dyn NearClient>) -> Self {
        let delay = Duration::from_millis(view.config().debounce_ms);
        Self::new(Arc::new(Mutex::new(view)), client, delay)
    }

    pub fn view(&self) -> &Arc<Mutex<MapView<S>>> {
        &self.view
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    /// Center-change hook for the surface. Returns `true` if this
    /// notification scheduled a refresh.
    pub fn center_changed(&self) -> bool {
        let view = Arc::clone(&self.view);
        let client = Arc::clone(&self.client);
        self.scheduler.center_changed(move || async move {
            if let Err(err) = refresh_view(&view, client.as_ref()).await {
                warn!(error = %err, "debounced marker refresh failed");
            }
        })
    }
}
