//! Host element discovery.
//!
//! The host document is outside this crate. Callers hand over a flat list of
//! element descriptors; anything carrying the configured class becomes a map.

use g11_config::{options::parse_data_options_with, MapConfig, MapOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub id: String,
    #[serde(default)]
    pub class_list: Vec<String>,
    /// Raw `data-options` attribute, if present.
    #[serde(default)]
    pub data_options: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredMap {
    pub element_id: String,
    pub options: MapOptions,
}

/// Elements whose class list contains `config.class_name`, in document order.
pub fn discover_maps(elements: &[ElementDescriptor], config: &MapConfig) -> Vec<DiscoveredMap> {
    elements
        .iter()
        .filter(|el| el.class_list.iter().any(|c| c == &config.class_name))
        .map(|el| {
            let raw = el.data_options.as_deref().unwrap_or("");
            let options = parse_data_options_with(raw, config.default_zoom);
            debug!(element_id = %el.id, zoom = options.zoom, "found map element");
            DiscoveredMap {
                element_id: el.id.clone(),
                options,
            }
        })
        .collect()
}
