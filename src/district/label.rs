use geo::Point;
use log::debug;
use serde::Serialize;

use crate::district::{District, DistrictProps, FeatureRef, Group};
use crate::error::{BuildError, BuildResult};
use crate::geom::{pole_of_inaccessibility, Placement};

const AT_LARGE_TITLE: &str = "At Large";

/// Properties of a label point: the district's canonical properties without the
/// fallback coordinates, plus display titles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelProps {
    pub state: String,
    pub state_name: String,
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_index: Option<u32>,
    /// e.g. "CA 12" or "AK At Large".
    pub title_short: String,
    /// e.g. "California's 12th Congressional District".
    pub title_long: String,
    pub group: Group,
}

/// A point feature marking where a district's name is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub props: LabelProps,
    pub point: Point<f64>,
}

/// GeoJSON Point geometry.
#[derive(Debug, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [f64; 2],
}

impl Label {
    /// View this label as a GeoJSON point feature.
    pub fn feature(&self) -> FeatureRef<'_, LabelProps, PointGeometry> {
        FeatureRef {
            kind: "Feature",
            properties: &self.props,
            geometry: PointGeometry { kind: "Point", coordinates: [self.point.x(), self.point.y()] },
        }
    }
}

/// Turns 1 into "1st", 12 into "12th", 23 into "23rd".
pub fn ordinal(number: u32) -> String {
    let suffix = match (number % 100, number % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{number}{suffix}")
}

/// Integer value of a non-at-large district number, without padding.
fn district_value(props: &DistrictProps) -> BuildResult<u32> {
    props.number.parse().map_err(|_| BuildError::invalid("number", &props.number))
}

/// Short title: "{state} {number}" or "{state} At Large".
pub fn title_short(props: &DistrictProps) -> BuildResult<String> {
    if props.is_at_large() { return Ok(format!("{} {AT_LARGE_TITLE}", props.state)) }
    Ok(format!("{} {}", props.state, district_value(props)?))
}

/// Long title: "{state_name}'s {ordinal} Congressional District".
pub fn title_long(props: &DistrictProps) -> BuildResult<String> {
    let which = if props.is_at_large() {
        AT_LARGE_TITLE.to_string()
    } else {
        ordinal(district_value(props)?)
    };
    Ok(format!("{}'s {which} Congressional District", props.state_name))
}

/// Compute the label for a colored district and tag the district as a boundary.
///
/// The anchor is the pole of inaccessibility of the district's geometry. When the
/// search fails, the source interior point recorded at normalization is used
/// instead. When that is missing too, the district cannot be labelled and the
/// run is aborted.
pub fn place_label(district: &mut District, precision: f64) -> BuildResult<Label> {
    let point = match pole_of_inaccessibility(&district.shape, precision) {
        Placement::Interior(point) => point,
        Placement::Failed => {
            let fallback = district.props.fallback_point()
                .ok_or_else(|| BuildError::NoLabelAnchor { key: district.props.key() })?;
            debug!("[label] {}: pole search failed, using source interior point", district.props.key());
            fallback
        }
    };

    // Owned copies: later edits to either feature never reach the other.
    let props = district.props.clone();
    let label = Label {
        props: LabelProps {
            title_short: title_short(&props)?,
            title_long: title_long(&props)?,
            state: props.state,
            state_name: props.state_name,
            number: props.number,
            color_index: props.color_index,
            group: Group::Label,
        },
        point,
    };

    district.props.group = Some(Group::Boundary);
    Ok(label)
}
