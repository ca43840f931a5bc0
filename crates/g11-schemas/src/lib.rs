//! Wire types for the nearby-points endpoint.
//!
//! The endpoint has shipped two payload shapes:
//! - an envelope `{"points": [page, ...]}` where each page carries its own
//!   `dis` field
//! - the raw geo-near result list `[{"obj": page, "dis": 1.2}, ...]`
//!
//! [`NearResponse::parse`] accepts both and yields [`NearPoint`]s.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// GeoJSON-style point; `coordinates` is `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn from_lat_lng(pos: LatLng) -> Self {
        Self {
            coordinates: [pos.lng, pos.lat],
        }
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.coordinates[1], self.coordinates[0])
    }
}

/// A point-of-interest page. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPage {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    pub loc: GeoPoint,
}

/// A page plus its distance from the query center, when the server sent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearPoint {
    #[serde(rename = "obj")]
    pub page: PointPage,
    #[serde(default)]
    pub dis: Option<f64>,
}

impl NearPoint {
    pub fn id(&self) -> &str {
        &self.page.id
    }

    pub fn position(&self) -> LatLng {
        self.page.loc.lat_lng()
    }

    /// Lexicographic order on `_id`; the order marker state is kept in.
    pub fn cmp_by_id(a: &NearPoint, b: &NearPoint) -> Ordering {
        a.id().cmp(b.id())
    }
}

/// Envelope entry: a flattened page with `dis` alongside its fields.
#[derive(Debug, Clone, Deserialize)]
struct FlatPoint {
    #[serde(flatten)]
    page: PointPage,
    #[serde(default)]
    dis: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct Envelope {
    points: Vec<FlatPoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AnyShape {
    Envelope(Envelope),
    Raw(Vec<NearPoint>),
}

/// Decoder for nearby-points response bodies.
pub struct NearResponse;

impl NearResponse {
    pub fn parse(body: &str) -> Result<Vec<NearPoint>, serde_json::Error> {
        let shape: AnyShape = serde_json::from_str(body)?;
        Ok(match shape {
            AnyShape::Raw(points) => points,
            AnyShape::Envelope(env) => env
                .points
                .into_iter()
                .map(|p| NearPoint {
                    page: p.page,
                    dis: p.dis,
                })
                .collect(),
        })
    }
}

/// Error body the server returns with 4xx/5xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
