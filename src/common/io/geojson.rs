use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{BuildError, BuildResult};

/// A GeoJSON FeatureCollection as read from disk, properties left untyped.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCollection {
    pub(crate) features: Vec<RawFeature>,
}

/// One source feature: an attribute bag plus its geometry exactly as written.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawFeature {
    #[serde(default)]
    pub(crate) properties: Option<Map<String, Value>>,
    pub(crate) geometry: Value,
}

impl RawFeature {
    /// Look up a property, treating JSON null as absent.
    pub(crate) fn property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(name).filter(|v| !v.is_null())
    }
}

/// Reads a GeoJSON FeatureCollection file into memory.
pub(crate) fn read_feature_collection(path: &Path) -> Result<Vec<RawFeature>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open GeoJSON file: {}", path.display()))?;
    let collection: RawCollection = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse GeoJSON file: {}", path.display()))?;
    Ok(collection.features)
}

/// Parse a GeoJSON Polygon or MultiPolygon geometry into a geo::MultiPolygon.
/// A Polygon becomes a single-part MultiPolygon.
pub(crate) fn parse_areal_geometry(geometry: &Value) -> BuildResult<MultiPolygon<f64>> {
    let kind = geometry.get("type").and_then(Value::as_str).unwrap_or("null");
    let coords = geometry.get("coordinates").and_then(Value::as_array);

    match (kind, coords) {
        ("Polygon", Some(rings)) => Ok(MultiPolygon(vec![parse_polygon_coords(rings)?])),
        ("MultiPolygon", Some(parts)) => parts.iter()
            .map(|part| part.as_array()
                .ok_or_else(|| BuildError::invalid("coordinates", part))
                .and_then(|rings| parse_polygon_coords(rings)))
            .collect::<BuildResult<Vec<_>>>()
            .map(MultiPolygon),
        ("Polygon" | "MultiPolygon", None) => Err(BuildError::invalid("coordinates", "missing")),
        (other, _) => Err(BuildError::UnsupportedGeometry { kind: other.to_string() }),
    }
}

/// Parse GeoJSON polygon coordinates: [exterior, hole, hole, ...].
fn parse_polygon_coords(rings: &[Value]) -> BuildResult<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| BuildError::invalid("coordinates", ring))
            .and_then(|points| parse_ring_coords(points))
    });

    let exterior = match rings.next() {
        Some(ring) => ring?,
        None => LineString(Vec::new()),
    };
    let interiors = rings.collect::<BuildResult<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring (exterior or interior) from GeoJSON coordinates.
/// Format: [[x, y], [x, y], ...]
fn parse_ring_coords(coords: &[Value]) -> BuildResult<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());

    for pair in coords {
        let (x, y) = match pair.as_array().map(Vec::as_slice) {
            Some([x, y, ..]) => (x.as_f64(), y.as_f64()),
            _ => (None, None),
        };
        match (x, y) {
            (Some(x), Some(y)) => points.push(Coord { x, y }),
            _ => return Err(BuildError::invalid("coordinates", pair)),
        }
    }

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}
