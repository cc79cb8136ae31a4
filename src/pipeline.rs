use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::bounds::{aggregate_bounds, BoundsLookup};
use crate::color::{assign_color_indices, ColoringService};
use crate::common::{read_feature_collection, FeatureStreamWriter};
use crate::config::BuildConfig;
use crate::district::{normalize_primary, normalize_replacement, place_label, District, Label, Normalizer};
use crate::states::StateTable;

/// Counts reported at the end of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub districts: usize,
    pub colors: usize,
    pub features: usize,
    pub bboxes: usize,
}

/// Load, normalize and merge both sources into one district list.
pub fn load_districts(config: &BuildConfig, states: &StateTable) -> Result<Vec<District>> {
    let normalizer = Normalizer::new(states, config);

    let primary = read_feature_collection(&config.primary)?;
    info!("[load] {} features from {}", primary.len(), config.primary.display());
    let mut districts = normalize_primary(&normalizer, primary)
        .with_context(|| format!("Failed to normalize {}", config.primary.display()))?;

    let replacement = read_feature_collection(&config.replacement)?;
    info!("[load] {} features from {}", replacement.len(), config.replacement.display());
    districts.extend(normalize_replacement(&normalizer, replacement)
        .with_context(|| format!("Failed to normalize {}", config.replacement.display()))?);

    Ok(districts)
}

/// Label every district, tagging each as a boundary. Aborts on the first
/// district that cannot be labelled.
pub fn place_labels(districts: &mut [District], precision: f64) -> Result<Vec<Label>> {
    let labels = districts.iter_mut()
        .map(|district| place_label(district, precision))
        .collect::<Result<Vec<_>, _>>()?;
    info!("[label] placed {} labels", labels.len());
    Ok(labels)
}

/// Stream each district's label followed by its boundary to `path`.
pub fn write_map(path: &Path, districts: &[District], labels: &[Label]) -> Result<usize> {
    let mut writer = FeatureStreamWriter::create(path)?;
    for (district, label) in districts.iter().zip(labels) {
        writer.write_feature(&label.feature())?;
        writer.write_feature(&district.feature())?;
    }
    let (_, count) = writer.finish()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("[write] {} features to {}", count, path.display());
    Ok(count)
}

/// Run the whole build: reference table, normalization, coloring, labels,
/// bounding boxes and the three output artifacts.
pub fn run(config: &BuildConfig, coloring: &dyn ColoringService) -> Result<BuildSummary> {
    let states = StateTable::from_json_file(&config.states)?;
    info!("[states] {} states from {}", states.len(), config.states.display());
    states.write_script(&config.states_out)?;

    let mut districts = load_districts(config, &states)?;
    let colors = assign_color_indices(&mut districts, coloring)?;

    let labels = place_labels(&mut districts, config.label_precision)?;
    let bounds: BoundsLookup = aggregate_bounds(&districts);

    let features = write_map(&config.map_out, &districts, &labels)?;
    bounds.write_script(&config.bboxes_out)?;

    Ok(BuildSummary { districts: districts.len(), colors, features, bboxes: bounds.len() })
}
