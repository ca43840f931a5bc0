//! g11-config
//!
//! Two kinds of configuration feed a map view:
//! - client config: layered YAML files merged into one document, hashed, and
//!   decoded into [`ClientConfig`]
//! - per-element data options: the `key=val;key=val` string on a host element,
//!   parsed by [`options::parse_data_options`]

pub mod options;

use anyhow::{bail, Context, Result};
use g11_schemas::LatLng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;

pub use options::{parse_data_options, MapOptions, OptionValue};

/// Env var naming a `,`-separated list of config paths (merge order).
pub const ENV_CONFIG_PATHS: &str = "G11_CONFIG";

// ---------------------------------------------------------------------------
// Typed client config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
    /// Path template; `{lat}` and `{lng}` are substituted per request.
    pub near_path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            near_path: "/near/{lat}/{lng}".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Class name identifying host elements.
    pub class_name: String,
    /// Center used when neither explicit coordinates nor geolocation are available.
    pub default_center: LatLng,
    pub default_zoom: f64,
    /// Quiet period after a center change before markers are reloaded.
    pub debounce_ms: u64,
    pub marker_icon: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            class_name: "google-map".to_string(),
            default_center: LatLng::new(60.0, 105.0),
            default_zoom: 12.0,
            debounce_ms: 500,
            marker_icon: "images/blue_dot.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: EndpointConfig,
    pub map: MapConfig,
}

impl ClientConfig {
    pub fn from_json(v: &Value) -> Result<Self> {
        serde_json::from_value(v.clone()).context("client config does not match schema")
    }
}

/// JSON-pointer prefixes read by [`ClientConfig`].
///
/// Must track the struct fields above.
pub const CONSUMED_POINTERS: &[&str] = &[
    "/endpoint/base_url",
    "/endpoint/near_path",
    "/map/class_name",
    "/map/default_center/lat",
    "/map/default_center/lng",
    "/map/default_zoom",
    "/map/debounce_ms",
    "/map/marker_icon",
];

// ---------------------------------------------------------------------------
// Unused-key report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Minimal set of unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// List config leaves that no [`ClientConfig`] field reads.
///
/// `Fail` turns a non-empty report into an error; `Warn` always returns it.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|lp| !CONSUMED_POINTERS.iter().any(|cp| is_prefix_pointer(cp, lp)))
        .collect();
    unused.sort();

    let report = UnusedKeyReport {
        unused_leaf_pointers: unused,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s): {}",
            report.unused_leaf_pointers.len(),
            report.unused_leaf_pointers.join(", ")
        );
    }

    Ok(report)
}

/// "/a/b" covers "/a/b" and "/a/b/c" but not "/a/bc".
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

/// Objects are walked; anything else, arrays included, is one leaf. No
/// consumed key is an array, so a whole array is reported as a single key.
fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, vv) in map {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        _ if prefix.is_empty() => out.push("/".to_string()),
        _ => out.push(prefix.to_string()),
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

// ---------------------------------------------------------------------------
// Layered YAML
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    pub fn client(&self) -> Result<ClientConfig> {
        ClientConfig::from_json(&self.config_json)
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

/// Merge YAML docs in order: earlier docs are base, later docs override.
pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    // serde_json::Map is key-sorted, so this is stable across key order in the sources.
    let canonical_json = serde_json::to_string(&merged).context("canonical json serialize failed")?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Resolve config paths from `G11_CONFIG`; empty when unset.
pub fn paths_from_env() -> Vec<String> {
    std::env::var(ENV_CONFIG_PATHS)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_pointer_respects_segment_boundary() {
        assert!(is_prefix_pointer("/map", "/map/debounce_ms"));
        assert!(is_prefix_pointer("/map", "/map"));
        assert!(!is_prefix_pointer("/map", "/mapper"));
    }

    #[test]
    fn arrays_are_reported_as_one_leaf() {
        let v = serde_json::json!({"map": {"class_name": "m", "layers": [1, 2, 3]}, "x~y": 1});
        let mut leaves = Vec::new();
        collect_leaf_pointers(&v, "", &mut leaves);
        leaves.sort();
        assert_eq!(leaves, vec!["/map/class_name", "/map/layers", "/x~0y"]);

        let report = report_unused_keys(&v, UnusedKeyPolicy::Warn).unwrap();
        assert_eq!(report.unused_leaf_pointers, vec!["/map/layers", "/x~0y"]);
    }

    #[test]
    fn deep_merge_overrides_leaves_only() {
        let a = serde_json::json!({"map": {"debounce_ms": 500, "class_name": "google-map"}});
        let b = serde_json::json!({"map": {"debounce_ms": 250}});
        let m = deep_merge(a, b);
        assert_eq!(m["map"]["debounce_ms"], 250);
        assert_eq!(m["map"]["class_name"], "google-map");
    }
}
