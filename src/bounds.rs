use std::path::Path;

use ahash::AHashMap;
use anyhow::Result;
use geo::{BoundingRect, MultiPolygon, Polygon, Rect};
use log::{info, warn};
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::common::write_script_var;
use crate::district::District;
use crate::geom::{merge_rects, rect_to_array};

/// Flat lookup from district key ("CA12") or state key ("CA") to
/// `[min_lon, min_lat, max_lon, max_lat]`, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundsLookup {
    entries: Vec<(String, [f64; 4])>,
}

impl BoundsLookup {
    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, key: &str) -> Option<&[f64; 4]> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, bbox)| bbox)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64; 4])> {
        self.entries.iter().map(|(k, bbox)| (k.as_str(), bbox))
    }

    /// Write as `var bboxes = {...}` for the map page to include.
    pub fn write_script(&self, path: &Path) -> Result<()> {
        write_script_var(path, "bboxes", self)
    }
}

impl Serialize for BoundsLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, bbox) in &self.entries {
            map.serialize_entry(key, bbox)?;
        }
        map.end()
    }
}

/// Per-district boxes keyed by `state + number`, then per-state boxes keyed by
/// `state`, each state box being the envelope of its districts' boxes.
pub fn aggregate_bounds(districts: &[District]) -> BoundsLookup {
    let mut entries: Vec<(String, [f64; 4])> = Vec::with_capacity(districts.len());
    let mut positions: AHashMap<String, usize> = AHashMap::new();
    let mut state_order: Vec<&str> = Vec::new();
    let mut state_boxes: AHashMap<&str, Vec<Polygon<f64>>> = AHashMap::new();

    for district in districts {
        let Some(rect) = district.shape.bounding_rect() else {
            warn!("[bounds] {} has empty geometry, no bounding box", district.props.key());
            continue;
        };
        let key = district.props.key();
        match positions.get(&key) {
            Some(&at) => {
                warn!("[bounds] duplicate district key {}, keeping the later box", key);
                entries[at].1 = rect_to_array(&rect);
            }
            None => {
                positions.insert(key.clone(), entries.len());
                entries.push((key, rect_to_array(&rect)));
            }
        }

        let state = district.props.state.as_str();
        state_boxes.entry(state)
            .or_insert_with(|| { state_order.push(state); Vec::new() })
            .push(rect.to_polygon());
    }

    let districts_boxed = entries.len();
    for state in state_order {
        let boxes = MultiPolygon(state_boxes.remove(state).unwrap_or_default());
        if let Some(rect) = envelope(&boxes) {
            entries.push((state.to_string(), rect_to_array(&rect)));
        }
    }

    info!("[bounds] {} district boxes, {} state boxes", districts_boxed, entries.len() - districts_boxed);
    BoundsLookup { entries }
}

/// Envelope of a collection of polygons.
fn envelope(polygons: &MultiPolygon<f64>) -> Option<Rect<f64>> {
    polygons.0.iter()
        .filter_map(|polygon| polygon.bounding_rect())
        .reduce(merge_rects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;
    use serde_json::{json, Value};

    use crate::district::DistrictProps;

    fn district(state: &str, number: &str, shape: MultiPolygon<f64>) -> District {
        District {
            props: DistrictProps {
                state: state.into(),
                state_name: state.into(),
                number: number.into(),
                label_pt_lon: None,
                label_pt_lat: None,
                color_index: None,
                group: None,
            },
            geometry: Value::Null,
            shape,
        }
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]])
    }

    fn contains(outer: &[f64; 4], inner: &[f64; 4]) -> bool {
        outer[0] <= inner[0] && outer[1] <= inner[1] && outer[2] >= inner[2] && outer[3] >= inner[3]
    }

    #[test]
    fn district_and_state_keys() {
        let districts = vec![
            district("XX", "01", rect(0.0, 0.0, 1.0, 1.0)),
            district("YY", "00", rect(10.0, 10.0, 11.0, 12.0)),
            district("XX", "02", rect(1.0, -1.0, 3.0, 0.5)),
        ];
        let lookup = aggregate_bounds(&districts);

        let keys: Vec<&str> = lookup.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["XX01", "YY00", "XX02", "XX", "YY"]);
        assert_eq!(lookup.get("XX01"), Some(&[0.0, 0.0, 1.0, 1.0]));
        assert_eq!(lookup.get("XX"), Some(&[0.0, -1.0, 3.0, 1.0]));
        assert_eq!(lookup.get("YY"), lookup.get("YY00"));
    }

    #[test]
    fn state_box_is_minimal_cover() {
        let districts = vec![
            district("XX", "01", rect(-5.0, 2.0, -1.0, 4.0)),
            district("XX", "02", rect(-2.0, 0.0, 0.0, 3.0)),
            district("XX", "03", MultiPolygon(vec![
                polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
                polygon![(x: 4.0, y: 4.0), (x: 6.0, y: 4.0), (x: 6.0, y: 7.0)],
            ])),
        ];
        let lookup = aggregate_bounds(&districts);
        let state = lookup.get("XX").unwrap();
        for key in ["XX01", "XX02", "XX03"] {
            assert!(contains(state, lookup.get(key).unwrap()));
        }
        assert_eq!(state, &[-5.0, 0.0, 6.0, 7.0]);
    }

    #[test]
    fn repeated_district_key_keeps_last_box() {
        let districts = vec![
            district("XX", "01", rect(0.0, 0.0, 1.0, 1.0)),
            district("XX", "02", rect(1.0, 0.0, 2.0, 1.0)),
            district("XX", "01", rect(5.0, 5.0, 6.0, 6.0)),
        ];
        let lookup = aggregate_bounds(&districts);

        let keys: Vec<&str> = lookup.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["XX01", "XX02", "XX"]);
        assert_eq!(lookup.get("XX01"), Some(&[5.0, 5.0, 6.0, 6.0]));
        assert_eq!(lookup.get("XX"), Some(&[0.0, 0.0, 6.0, 6.0]));

        let text = serde_json::to_string(&lookup).unwrap();
        assert_eq!(text.matches("\"XX01\"").count(), 1);
    }

    #[test]
    fn empty_geometry_is_skipped() {
        let districts = vec![district("XX", "01", MultiPolygon(vec![]))];
        assert!(aggregate_bounds(&districts).is_empty());
    }

    #[test]
    fn serializes_as_ordered_object() {
        let lookup = aggregate_bounds(&[district("XX", "01", rect(0.0, 0.0, 1.0, 2.0))]);
        assert_eq!(serde_json::to_value(&lookup).unwrap(), json!({
            "XX01": [0.0, 0.0, 1.0, 2.0],
            "XX": [0.0, 0.0, 1.0, 2.0],
        }));
        let text = serde_json::to_string(&lookup).unwrap();
        assert!(text.find("XX01").unwrap() < text.find("\"XX\"").unwrap());
    }
}
