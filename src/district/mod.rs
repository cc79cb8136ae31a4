mod label;
mod normalize;

use geo::{MultiPolygon, Point};
use serde::Serialize;
use serde_json::Value;

pub use label::{ordinal, place_label, title_long, title_short, Label, LabelProps};
pub(crate) use normalize::{normalize_primary, normalize_replacement, Normalizer};

/// District number used for a state's single at-large seat.
pub const AT_LARGE: &str = "00";

/// Which kind of map feature a record renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Boundary,
    Label,
}

/// Canonical properties of a district boundary feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictProps {
    /// USPS abbreviation.
    pub state: String,
    pub state_name: String,
    /// Two-character district number; "00" for at-large.
    pub number: String,
    /// Source interior point, used only if pole-of-inaccessibility placement fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_pt_lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_pt_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
}

impl DistrictProps {
    /// Lookup key for this district, e.g. "CA12".
    pub fn key(&self) -> String {
        format!("{}{}", self.state, self.number)
    }

    #[inline] pub fn is_at_large(&self) -> bool { self.number == AT_LARGE }

    /// The recorded fallback label point, if both coordinates were captured.
    pub fn fallback_point(&self) -> Option<Point<f64>> {
        match (self.label_pt_lon, self.label_pt_lat) {
            (Some(lon), Some(lat)) => Some(Point::new(lon, lat)),
            _ => None,
        }
    }
}

/// One congressional district: canonical properties plus its boundary.
#[derive(Debug, Clone)]
pub struct District {
    pub props: DistrictProps,
    /// Geometry exactly as it appeared in the source, re-emitted untouched.
    pub geometry: Value,
    /// Parsed copy of `geometry` for adjacency, placement and bounds.
    pub shape: MultiPolygon<f64>,
}

/// Borrowed GeoJSON feature used when writing the map artifact.
#[derive(Debug, Serialize)]
pub struct FeatureRef<'a, P: Serialize, G: Serialize> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: &'a P,
    pub geometry: G,
}

impl District {
    /// View this district as a GeoJSON boundary feature.
    pub fn feature(&self) -> FeatureRef<'_, DistrictProps, &Value> {
        FeatureRef { kind: "Feature", properties: &self.props, geometry: &self.geometry }
    }
}
