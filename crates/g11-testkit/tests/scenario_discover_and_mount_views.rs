//! Scenario: discover host elements and mount views
//!
//! End to end without a browser: elements are scanned, each match becomes a
//! view centered from its options, and the first marker load renders.

use g11_config::MapConfig;
use g11_map::{discover_maps, ElementDescriptor, Geolocator, MapSurface, MapView};
use g11_schemas::LatLng;
use g11_testkit::{load_points_json, DeniedGeolocator, RecordingSurface, StaticNearClient};

const PAYLOAD: &str = r#"{"points": [
  {"_id": "5f1", "title": "Old Mill", "url": "/wiki/Old_Mill",
   "loc": {"coordinates": [2.35, 48.85]}, "dis": 0.4},
  {"_id": "3c9", "title": "Bridge", "url": "/wiki/Bridge",
   "loc": {"coordinates": [2.36, 48.86]}, "dis": 1.1}
]}"#;

#[tokio::test]
async fn each_matching_element_gets_a_centered_view() {
    let cfg = MapConfig::default();
    let elements = vec![
        ElementDescriptor {
            id: "paris".to_string(),
            class_list: vec!["google-map".to_string()],
            data_options: Some("lat=48.85;lon=2.35;zoom=14".to_string()),
        },
        ElementDescriptor {
            id: "nav".to_string(),
            class_list: vec!["menu".to_string()],
            data_options: None,
        },
        ElementDescriptor {
            id: "here".to_string(),
            class_list: vec!["google-map".to_string()],
            data_options: None,
        },
    ];

    let found = discover_maps(&elements, &cfg);
    assert_eq!(found.len(), 2);

    let mut centers = Vec::new();
    for m in found {
        let mut view = MapView::new(RecordingSurface::new(), m.options, cfg.clone());
        view.initial_center(Some(&DeniedGeolocator as &dyn Geolocator))
            .await;
        centers.push((m.element_id, view.surface().center()));
    }

    assert_eq!(
        centers,
        vec![
            ("paris".to_string(), Some(LatLng::new(48.85, 2.35))),
            ("here".to_string(), Some(LatLng::new(60.0, 105.0))),
        ]
    );
}

#[tokio::test]
async fn fixture_payload_renders_sorted_markers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("near.json");
    std::fs::write(&path, PAYLOAD).unwrap();
    let pts = load_points_json(path.to_str().unwrap()).unwrap();

    let center = LatLng::new(48.85, 2.35);
    let client = StaticNearClient::new().respond(pts);
    let mut view = MapView::new(
        RecordingSurface::centered_at(center),
        Default::default(),
        MapConfig::default(),
    );

    let update = view.load_markers_for(&client, center).await.unwrap();
    assert_eq!(update.added, vec!["3c9".to_string(), "5f1".to_string()]);
    let bridge = &view.surface().markers["3c9"];
    assert_eq!(bridge.position, LatLng::new(48.86, 2.36));
    assert!(bridge.info_html.contains("Distance: 1.1"));
}
