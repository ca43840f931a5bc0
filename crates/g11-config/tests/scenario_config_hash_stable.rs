//! Scenario: layered config hash is stable
//!
//! GREEN when:
//! - the same input twice yields the same hash
//! - key order in the YAML does not change the hash
//! - an overriding layer changes the hash and the merged values

use g11_config::{load_layered_yaml, load_layered_yaml_from_strings};

const BASE_YAML: &str = r#"
endpoint:
  base_url: "http://maps.local:5000"
  near_path: "/near/{lat}/{lng}"
map:
  class_name: "google-map"
  debounce_ms: 500
"#;

const BASE_YAML_REORDERED: &str = r#"
map:
  debounce_ms: 500
  class_name: "google-map"
endpoint:
  near_path: "/near/{lat}/{lng}"
  base_url: "http://maps.local:5000"
"#;

const OVERLAY_YAML: &str = r#"
map:
  debounce_ms: 250
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
    assert_eq!(a.config_hash.len(), 64, "sha256 hex digest");
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();
    assert_eq!(original.config_hash, reordered.config_hash);
}

#[test]
fn overlay_changes_hash_and_wins() {
    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let layered = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_ne!(base.config_hash, layered.config_hash);

    let cfg = layered.client().unwrap();
    assert_eq!(cfg.map.debounce_ms, 250);
    assert_eq!(cfg.map.class_name, "google-map");
    assert_eq!(cfg.endpoint.base_url, "http://maps.local:5000");
}

#[test]
fn files_load_in_merge_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.yaml");
    let overlay = dir.path().join("overlay.yaml");
    std::fs::write(&base, BASE_YAML).unwrap();
    std::fs::write(&overlay, OVERLAY_YAML).unwrap();

    let base_s = base.to_str().unwrap();
    let overlay_s = overlay.to_str().unwrap();
    let from_files = load_layered_yaml(&[base_s, overlay_s]).unwrap();
    let from_strings = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_eq!(from_files.config_hash, from_strings.config_hash);
}

#[test]
fn missing_file_is_an_error_naming_the_path() {
    let err = load_layered_yaml(&["/definitely/not/here.yaml"]).unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.yaml"));
}

#[test]
fn invalid_yaml_is_rejected() {
    assert!(load_layered_yaml_from_strings(&["map: [unclosed"]).is_err());
}
