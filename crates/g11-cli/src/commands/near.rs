use anyhow::Result;
use chrono::Utc;
use g11_config::ClientConfig;
use g11_map::{HttpNearClient, NearClient};
use g11_schemas::{LatLng, NearPoint};
use serde_json::json;

/// One fetch against the configured endpoint, sorted by id.
pub async fn run(cfg: &ClientConfig, center: LatLng) -> Result<()> {
    let client = HttpNearClient::from_config(&cfg.endpoint);
    let url = client.near_url(center);

    let mut points = client.fetch_near(center).await?;
    points.sort_by(NearPoint::cmp_by_id);

    let rows: Vec<_> = points
        .iter()
        .map(|p| {
            json!({
                "id": p.id(),
                "title": p.page.title,
                "position": p.position(),
                "dis": p.dis,
            })
        })
        .collect();

    let out = json!({
        "fetched_at": Utc::now().to_rfc3339(),
        "url": url,
        "center": center,
        "points": rows,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
