//! Nearby-points endpoint client.

use anyhow::{anyhow, Context, Result};
use g11_config::EndpointConfig;
use g11_schemas::{ErrorBody, LatLng, NearPoint, NearResponse};
use tracing::debug;

/// Source of points near a coordinate.
#[async_trait::async_trait]
pub trait NearClient: Send + Sync {
    /// Points near `center`, in whatever order the server returns them.
    async fn fetch_near(&self, center: LatLng) -> Result<Vec<NearPoint>>;
}

/// HTTP-backed [`NearClient`].
#[derive(Debug, Clone)]
pub struct HttpNearClient {
    http: reqwest::Client,
    base_url: String,
    near_path: String,
}

impl HttpNearClient {
    pub fn new(base_url: impl Into<String>, near_path: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            near_path: near_path.into(),
        }
    }

    pub fn from_config(cfg: &EndpointConfig) -> Self {
        Self::new(cfg.base_url.clone(), cfg.near_path.clone())
    }

    /// `{base_url}{near_path}` with `{lat}` and `{lng}` filled in.
    ///
    /// Coordinates use shortest round-trip formatting: `60`, not `60.0`.
    pub fn near_url(&self, center: LatLng) -> String {
        let path = self
            .near_path
            .replace("{lat}", &center.lat.to_string())
            .replace("{lng}", &center.lng.to_string());
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl NearClient for HttpNearClient {
    async fn fetch_near(&self, center: LatLng) -> Result<Vec<NearPoint>> {
        let url = self.near_url(center);
        debug!(%url, "loading nearby points");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("near request failed")?;

        let status = resp.status();
        let body = resp.text().await.context("near response body read failed")?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(anyhow!(
                "near endpoint http error status={} message={}",
                status.as_u16(),
                message
            ));
        }

        NearResponse::parse(&body).context("near response json decode failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_substitutes_coordinates() {
        let c = HttpNearClient::new("http://h:5000/", "/near/{lat}/{lng}");
        assert_eq!(
            c.near_url(LatLng::new(60.0, 105.5)),
            "http://h:5000/near/60/105.5"
        );
    }

    #[test]
    fn url_handles_negative_coordinates_and_custom_template() {
        let c = HttpNearClient::new("http://h", "all/points/near/{lat}/{lng}");
        assert_eq!(
            c.near_url(LatLng::new(-33.25, -70.5)),
            "http://h/all/points/near/-33.25/-70.5"
        );
    }
}
