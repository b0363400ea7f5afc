//! GeoJSON road-segment loader.
//!
//! # Input format
//!
//! A `FeatureCollection` of `LineString` features, coordinates in
//! `[lon, lat]` order (extra ordinates such as elevation are ignored):
//!
//! ```json
//! {
//!   "type": "FeatureCollection",
//!   "features": [{
//!     "type": "Feature",
//!     "properties": { "roadway_id": "R1", "total_lanes": 4, "speed_limit": 40, "oneway": false },
//!     "geometry": { "type": "LineString", "coordinates": [[-82.4163, 28.0585], [-82.4163, 28.0685]] }
//!   }]
//! }
//! ```
//!
//! **Property keys** (first present, non-null key wins):
//!
//! | Field       | Keys                                         |
//! |-------------|----------------------------------------------|
//! | roadway id  | `roadway_id`, `roadway id`, `id`             |
//! | lanes       | `total_lanes`, `number_of_lanes`, `lanes`    |
//! | speed (mph) | `speed_limit`, `speed`, `speedlimit`         |
//! | one-way     | `oneway` (see [`coerce_bool`])               |
//! | mile posts  | `bmp`, `emp` (optional)                      |
//!
//! Entries of the collection whose `type` is not `Feature` are skipped.  Any
//! other malformed feature, or a repeated roadway id, fails the whole load.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use ro_core::{GeoPoint, RoadSegment};

use crate::{IngestError, IngestResult};

// ── Raw document ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type", default)]
    kind:     String,
    #[serde(default)]
    features: Vec<Value>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load road segments from a GeoJSON file.
///
/// `default_oneway` applies to features whose `oneway` is missing or null.
pub fn load_segments_geojson(path: &Path, default_oneway: bool) -> IngestResult<Vec<RoadSegment>> {
    let file = File::open(path)?;
    load_segments_reader(BufReader::new(file), default_oneway)
}

/// Like [`load_segments_geojson`] but accepts any `Read` source.
pub fn load_segments_reader<R: Read>(reader: R, default_oneway: bool) -> IngestResult<Vec<RoadSegment>> {
    let raw: RawCollection = serde_json::from_reader(reader)?;
    if raw.kind != "FeatureCollection" {
        return Err(IngestError::NotFeatureCollection(raw.kind));
    }

    let empty = Map::new();
    let mut segments = Vec::with_capacity(raw.features.len());
    let mut seen = HashSet::with_capacity(raw.features.len());
    let mut skipped = 0usize;

    for (index, feature) in raw.features.iter().enumerate() {
        if feature.get("type").and_then(Value::as_str) != Some("Feature") {
            skipped += 1;
            continue;
        }
        let props = feature.get("properties").and_then(Value::as_object).unwrap_or(&empty);
        let geometry = feature.get("geometry").and_then(Value::as_object).unwrap_or(&empty);
        let segment = parse_feature(index, props, geometry, default_oneway)?;
        if !seen.insert(segment.roadway_id.clone()) {
            return Err(IngestError::DuplicateRoadway(segment.roadway_id));
        }
        segments.push(segment);
    }

    if skipped > 0 {
        debug!(skipped, "non-Feature entries skipped");
    }
    if segments.is_empty() {
        return Err(IngestError::Empty);
    }
    info!(segments = segments.len(), "road segments loaded");
    Ok(segments)
}

/// Interpret a GeoJSON property as a boolean.
///
/// | Input                                         | Result      |
/// |-----------------------------------------------|-------------|
/// | missing or `null`                             | `default`   |
/// | `true` / `false`                              | as is       |
/// | `1` / `0` (integer or float)                  | true/false  |
/// | `"true" "t" "yes" "y" "1"` (trimmed, any case)| `true`      |
/// | `"false" "f" "no" "n" "0" ""`                 | `false`     |
///
/// # Errors
///
/// [`IngestError::InvalidBoolean`] for anything else.
pub fn coerce_bool(value: Option<&Value>, default: bool) -> IngestResult<bool> {
    let invalid = |v: &Value| IngestError::InvalidBoolean(v.to_string());
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(v @ Value::Number(n)) => match n.as_f64() {
            Some(x) if x == 0.0 => Ok(false),
            Some(x) if x == 1.0 => Ok(true),
            _ => Err(invalid(v)),
        },
        Some(v @ Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Ok(true),
            "false" | "f" | "no" | "n" | "0" | "" => Ok(false),
            _ => Err(invalid(v)),
        },
        Some(v) => Err(invalid(v)),
    }
}

// ── Feature parsing ───────────────────────────────────────────────────────────

fn lookup<'a>(props: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| props.get(*k))
        .find(|v| !v.is_null())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|x| x.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_feature(
    index:          usize,
    props:          &Map<String, Value>,
    geometry:       &Map<String, Value>,
    default_oneway: bool,
) -> IngestResult<RoadSegment> {
    let roadway_id = match lookup(props, &["roadway_id", "roadway id", "id"]) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            return Err(IngestError::InvalidFeature {
                index,
                roadway_id: "?".into(),
                reason:     "missing roadway_id in feature properties".into(),
            });
        }
    };
    let invalid = |reason: String| IngestError::InvalidFeature {
        index,
        roadway_id: roadway_id.clone(),
        reason,
    };

    let lanes = match lookup(props, &["total_lanes", "number_of_lanes", "lanes"]) {
        None => 0,
        Some(v) => as_integer(v).ok_or_else(|| invalid(format!("total_lanes is not an integer: {v}")))?,
    };
    let total_lanes = u32::try_from(lanes)
        .ok()
        .filter(|&l| l > 0)
        .ok_or_else(|| invalid(format!("invalid total_lanes: {lanes}")))?;

    let speed_limit = match lookup(props, &["speed_limit", "speed", "speedlimit"]) {
        None => 0.0,
        Some(v) => as_number(v).ok_or_else(|| invalid(format!("speed_limit is not a number: {v}")))?,
    };
    if !(speed_limit > 0.0) {
        return Err(invalid(format!("invalid speed_limit: {speed_limit}")));
    }

    let oneway = coerce_bool(lookup(props, &["oneway"]), default_oneway)
        .map_err(|e| invalid(e.to_string()))?;

    let mile_post = |key: &str| -> IngestResult<Option<f64>> {
        lookup(props, &[key])
            .map(|v| as_number(v).ok_or_else(|| invalid(format!("{key} is not a number: {v}"))))
            .transpose()
    };
    let bmp = mile_post("bmp")?;
    let emp = mile_post("emp")?;

    let kind = geometry.get("type").and_then(Value::as_str).unwrap_or("");
    if kind != "LineString" {
        return Err(invalid(format!("only LineString geometry is supported, got {kind:?}")));
    }
    let raw_coords = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .filter(|c| c.len() >= 2)
        .ok_or_else(|| invalid("LineString must have >= 2 coordinates".into()))?;

    let coords = raw_coords
        .iter()
        .map(|c| {
            let pair = c.as_array().filter(|p| p.len() >= 2);
            let lon = pair.and_then(|p| p[0].as_f64());
            let lat = pair.and_then(|p| p[1].as_f64());
            match (lat, lon) {
                (Some(lat), Some(lon)) => Ok(GeoPoint::new(lat, lon)),
                _ => Err(invalid(format!("invalid coordinate in LineString: {c}"))),
            }
        })
        .collect::<IngestResult<Vec<_>>>()?;

    Ok(RoadSegment::new(roadway_id, total_lanes, speed_limit, oneway, coords)?.with_mile_posts(bmp, emp))
}
