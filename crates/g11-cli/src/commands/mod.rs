//! Command implementations shared by `main`.

pub mod diff;
pub mod near;

use std::fs;

use anyhow::{Context, Result};
use g11_config::{ClientConfig, UnusedKeyPolicy};
use g11_map::{discover_maps, ElementDescriptor};
use g11_schemas::{NearPoint, NearResponse};
use serde_json::json;
use tracing::warn;

/// Client config from `--config` paths, else `G11_CONFIG`, else defaults.
///
/// Unused keys are reported as a warning, never an error.
pub fn load_client_config(paths: &[String]) -> Result<ClientConfig> {
    let paths = if paths.is_empty() {
        g11_config::paths_from_env()
    } else {
        paths.to_vec()
    };
    if paths.is_empty() {
        return Ok(ClientConfig::default());
    }

    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = g11_config::load_layered_yaml(&path_refs)?;
    let report = g11_config::report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    if !report.is_clean() {
        warn!(
            unused = ?report.unused_leaf_pointers,
            config_hash = %loaded.config_hash,
            "config has keys nothing reads"
        );
    }
    loaded.client()
}

/// A points payload in either endpoint shape.
pub fn load_points(path: &str) -> Result<Vec<NearPoint>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read points file failed: {path}"))?;
    NearResponse::parse(&raw).with_context(|| format!("points file is not a near payload: {path}"))
}

pub fn discover(elements_path: &str, cfg: &ClientConfig) -> Result<()> {
    let raw = fs::read_to_string(elements_path)
        .with_context(|| format!("read elements file failed: {elements_path}"))?;
    let elements: Vec<ElementDescriptor> = serde_json::from_str(&raw)
        .with_context(|| format!("elements file is not a descriptor list: {elements_path}"))?;

    let found: Vec<_> = discover_maps(&elements, &cfg.map)
        .into_iter()
        .map(|m| {
            let center = m.options.explicit_center();
            json!({
                "element_id": m.element_id,
                "center": center,
                "options": m.options,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(())
}
