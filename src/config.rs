use std::path::PathBuf;

/// Property names read from the nationwide census source.
#[derive(Debug, Clone)]
pub struct PrimaryFields {
    pub state_code: String,
    pub district: String,
    pub interior_lon: String,
    pub interior_lat: String,
}

impl Default for PrimaryFields {
    fn default() -> Self {
        Self {
            state_code: "STATEFP".to_string(),
            district: "CD116FP".to_string(),
            interior_lon: "INTPTLON".to_string(),
            interior_lat: "INTPTLAT".to_string(),
        }
    }
}

/// Inputs, outputs and dataset constants for one build run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Nationwide district boundaries (TIGER-derived GeoJSON).
    pub primary: PathBuf,
    /// Revised boundaries for the superseded state.
    pub replacement: PathBuf,
    /// State code / abbreviation / name records.
    pub states: PathBuf,

    pub states_out: PathBuf,
    pub map_out: PathBuf,
    pub bboxes_out: PathBuf,

    /// State whose primary records are dropped in favour of the replacement source.
    pub replaced_state: u32,
    /// District code marking area (usually water) outside any district.
    pub non_district: String,
    /// District code used by the island territories for their at-large seat.
    pub at_large_alias: String,

    pub primary_fields: PrimaryFields,
    /// District number property in the replacement source.
    pub replacement_district: String,

    /// Precision passed to the pole-of-inaccessibility search, in source units.
    pub label_precision: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            primary: PathBuf::from("data/congressional_districts.geojson"),
            replacement: PathBuf::from("data/congressional_districts_nc.geojson"),
            states: PathBuf::from("states.json"),
            states_out: PathBuf::from("example/states.js"),
            map_out: PathBuf::from("data/map.geojson"),
            bboxes_out: PathBuf::from("data/bboxes.js"),
            replaced_state: 37,
            non_district: "ZZ".to_string(),
            at_large_alias: "98".to_string(),
            primary_fields: PrimaryFields::default(),
            replacement_district: "DISTRICT".to_string(),
            label_precision: 0.01,
        }
    }
}
