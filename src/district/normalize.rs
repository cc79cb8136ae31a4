use log::{info, warn};
use serde_json::Value;

use crate::common::{parse_areal_geometry, RawFeature};
use crate::config::BuildConfig;
use crate::district::{District, DistrictProps, AT_LARGE};
use crate::error::{BuildError, BuildResult};
use crate::states::StateTable;

/// Maps raw census records from either source onto the canonical district schema.
pub(crate) struct Normalizer<'a> {
    states: &'a StateTable,
    config: &'a BuildConfig,
}

impl<'a> Normalizer<'a> {
    pub(crate) fn new(states: &'a StateTable, config: &'a BuildConfig) -> Self {
        Self { states, config }
    }

    /// Normalize one nationwide record. Returns `Ok(None)` for records that are
    /// filtered out: non-district areas and the state supplied by the replacement source.
    pub(crate) fn primary(&self, index: usize, feature: RawFeature) -> BuildResult<Option<District>> {
        let fields = &self.config.primary_fields;

        let number = feature.property(&fields.district)
            .map(text_value)
            .ok_or_else(|| BuildError::missing(&fields.district, index))?;
        if number == self.config.non_district { return Ok(None) }

        let code = feature.property(&fields.state_code)
            .ok_or_else(|| BuildError::missing(&fields.state_code, index))
            .and_then(|v| code_value(v).ok_or_else(|| BuildError::invalid(&fields.state_code, v)))?;
        if code == self.config.replaced_state { return Ok(None) }

        let state = self.states.resolve(code)?;

        // Territories encode their at-large seat as "98".
        let number = if number == self.config.at_large_alias { AT_LARGE.to_string() } else { number };

        let label_pt_lon = self.coordinate(&feature, &fields.interior_lon, index);
        let label_pt_lat = self.coordinate(&feature, &fields.interior_lat, index);

        let shape = parse_areal_geometry(&feature.geometry)?;
        Ok(Some(District {
            props: DistrictProps {
                state: state.usps.clone(),
                state_name: state.name.clone(),
                number,
                label_pt_lon,
                label_pt_lat,
                color_index: None,
                group: None,
            },
            geometry: feature.geometry,
            shape,
        }))
    }

    /// Normalize one record of the replacement source. These carry only a bare
    /// district number and always belong to the replaced state.
    pub(crate) fn replacement(&self, index: usize, feature: RawFeature) -> BuildResult<District> {
        let field = &self.config.replacement_district;
        let state = self.states.resolve(self.config.replaced_state)?;

        let raw = feature.property(field)
            .map(text_value)
            .ok_or_else(|| BuildError::missing(field, index))?;
        let number = if raw.chars().count() == 1 { format!("0{raw}") } else { raw };

        let shape = parse_areal_geometry(&feature.geometry)?;
        Ok(District {
            props: DistrictProps {
                state: state.usps.clone(),
                state_name: state.name.clone(),
                number,
                label_pt_lon: None,
                label_pt_lat: None,
                color_index: None,
                group: None,
            },
            geometry: feature.geometry,
            shape,
        })
    }

    /// Parse a fallback coordinate; unusable values are recorded as absent.
    fn coordinate(&self, feature: &RawFeature, field: &str, index: usize) -> Option<f64> {
        let value = feature.property(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }.filter(|x| x.is_finite());

        if parsed.is_none() {
            warn!("[normalize] feature {index}: ignoring unparseable {field} value {value}");
        }
        parsed
    }
}

/// Normalize every nationwide record, dropping the filtered ones.
pub(crate) fn normalize_primary(normalizer: &Normalizer, features: Vec<RawFeature>) -> BuildResult<Vec<District>> {
    let total = features.len();
    let mut districts = Vec::with_capacity(total);
    for (index, feature) in features.into_iter().enumerate() {
        if let Some(district) = normalizer.primary(index, feature)? {
            districts.push(district);
        }
    }
    info!("[normalize] primary: kept {} of {} records", districts.len(), total);
    Ok(districts)
}

/// Normalize every replacement record.
pub(crate) fn normalize_replacement(normalizer: &Normalizer, features: Vec<RawFeature>) -> BuildResult<Vec<District>> {
    let districts = features.into_iter().enumerate()
        .map(|(index, feature)| normalizer.replacement(index, feature))
        .collect::<BuildResult<Vec<_>>>()?;
    info!("[normalize] replacement: {} records", districts.len());
    Ok(districts)
}

/// Read a code or identifier property as text, accepting bare numbers.
fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read a numeric state code from "06", "6" or 6.
fn code_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
