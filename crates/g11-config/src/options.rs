//! Per-element data options.
//!
//! Host elements carry a `data-options` attribute of the form
//! `key1=val1;key2=val2`. Values that parse as numbers become
//! [`OptionValue::Number`], everything else stays text. `zoom`, `lat` and
//! `lon` are lifted into typed fields; any other key lands in `extras`.

use std::collections::BTreeMap;

use g11_schemas::LatLng;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_ZOOM: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(f64),
    Text(String),
}

impl OptionValue {
    fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => OptionValue::Number(n),
            _ => OptionValue::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            OptionValue::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub zoom: f64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Remaining keys, passed through to the map surface untouched.
    pub extras: BTreeMap<String, OptionValue>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            lat: None,
            lon: None,
            extras: BTreeMap::new(),
        }
    }
}

impl MapOptions {
    /// Explicit center, only when both `lat` and `lon` were given as numbers.
    pub fn explicit_center(&self) -> Option<LatLng> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(LatLng::new(lat, lon)),
            _ => None,
        }
    }
}

/// Parse with the stock default zoom.
pub fn parse_data_options(raw: &str) -> MapOptions {
    parse_data_options_with(raw, DEFAULT_ZOOM)
}

/// Parse a `data-options` string; `default_zoom` applies when `zoom` is absent.
///
/// Never fails. Empty terms are skipped, terms without `=` are skipped with a
/// warning, and a repeated key keeps its last value.
pub fn parse_data_options_with(raw: &str, default_zoom: f64) -> MapOptions {
    let mut terms: BTreeMap<String, OptionValue> = BTreeMap::new();

    for term in raw.split(';') {
        if term.trim().is_empty() {
            continue;
        }
        let Some((key, val)) = term.split_once('=') else {
            warn!(term, "ignoring data-options term without '='");
            continue;
        };
        terms.insert(key.trim().to_string(), OptionValue::parse(val));
    }

    let zoom = take_number(&mut terms, "zoom").unwrap_or(default_zoom);
    let lat = take_number(&mut terms, "lat");
    let lon = take_number(&mut terms, "lon");

    MapOptions {
        zoom,
        lat,
        lon,
        extras: terms,
    }
}

/// Remove `key` if numeric; a text value is left in place for `extras`.
fn take_number(terms: &mut BTreeMap<String, OptionValue>, key: &str) -> Option<f64> {
    let n = terms.get(key)?.as_number();
    match n {
        Some(_) => {
            terms.remove(key);
        }
        None => warn!(key, "non-numeric value for numeric data option"),
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_text() {
        let o = parse_data_options("lat=59.5;lon=30.25;zoom=9;style=dark");
        assert_eq!(o.zoom, 9.0);
        assert_eq!(o.explicit_center(), Some(LatLng::new(59.5, 30.25)));
        assert_eq!(
            o.extras.get("style"),
            Some(&OptionValue::Text("dark".to_string()))
        );
    }

    #[test]
    fn missing_zoom_gets_default() {
        let o = parse_data_options("lat=1;lon=2");
        assert_eq!(o.zoom, DEFAULT_ZOOM);
        let o = parse_data_options_with("", 4.0);
        assert_eq!(o.zoom, 4.0);
        assert_eq!(o.explicit_center(), None);
    }

    #[test]
    fn value_keeps_everything_after_first_equals() {
        let o = parse_data_options("title=a=b");
        assert_eq!(
            o.extras.get("title"),
            Some(&OptionValue::Text("a=b".to_string()))
        );
    }

    #[test]
    fn skips_empty_and_malformed_terms() {
        let o = parse_data_options(";;bogus;zoom=3;");
        assert_eq!(o.zoom, 3.0);
        assert!(o.extras.is_empty());
    }

    #[test]
    fn lat_without_lon_is_not_a_center() {
        let o = parse_data_options("lat=10");
        assert_eq!(o.lat, Some(10.0));
        assert_eq!(o.explicit_center(), None);
    }

    #[test]
    fn non_numeric_lat_moves_to_extras() {
        let o = parse_data_options("lat=north;lon=3");
        assert_eq!(o.lat, None);
        assert_eq!(o.lon, Some(3.0));
        assert!(o.extras.contains_key("lat"));
    }

    #[test]
    fn later_key_wins() {
        let o = parse_data_options("zoom=3;zoom=5");
        assert_eq!(o.zoom, 5.0);
    }
}
