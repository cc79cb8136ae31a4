use std::{fs::File, io::BufReader, path::Path};

use ahash::AHashMap;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::write_script_var;
use crate::error::{BuildError, BuildResult};

/// One row of the state reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateInfo {
    /// Numeric FIPS code, e.g. 6 for California.
    #[serde(rename = "FIPS", deserialize_with = "deserialize_code")]
    pub fips: u32,
    /// Two-letter USPS abbreviation.
    #[serde(rename = "USPS")]
    pub usps: String,
    #[serde(rename = "Name")]
    pub name: String,
}

/// Accept a FIPS code written either as a JSON number or as a (possibly zero-padded) string.
fn deserialize_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code { Number(u32), Text(String) }

    match Code::deserialize(deserializer)? {
        Code::Number(n) => Ok(n),
        Code::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Lookup from numeric state code to abbreviation and display name.
///
/// A table loaded from JSON keeps its source records so the script artifact
/// reproduces them as given, extra columns and zero-padded codes included.
#[derive(Debug, Clone, Default)]
pub struct StateTable {
    rows: Vec<StateInfo>,
    source: Option<Vec<Value>>,
    index: AHashMap<u32, usize>,
}

impl StateTable {
    pub fn new(rows: Vec<StateInfo>) -> Self {
        let index = rows.iter().enumerate().map(|(i, row)| (row.fips, i)).collect();
        Self { rows, source: None, index }
    }

    /// Build from raw JSON records, each carrying at least `FIPS`, `USPS` and `Name`.
    pub fn from_values(source: Vec<Value>) -> serde_json::Result<Self> {
        let rows = source.iter()
            .map(StateInfo::deserialize)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { source: Some(source), ..Self::new(rows) })
    }

    /// Load the reference table from a JSON array of `{FIPS, USPS, Name}` records.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open state table: {}", path.display()))?;
        let source: Vec<Value> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse state table: {}", path.display()))?;
        Self::from_values(source)
            .with_context(|| format!("Invalid state record in {}", path.display()))
    }

    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    #[inline] pub fn rows(&self) -> &[StateInfo] { &self.rows }

    /// Resolve a state code; an unknown code is fatal for the run.
    pub fn resolve(&self, code: u32) -> BuildResult<&StateInfo> {
        self.index.get(&code)
            .map(|&i| &self.rows[i])
            .ok_or(BuildError::UnknownState { code })
    }

    /// Write the table as `var states = [...]` for the map page to include.
    pub fn write_script(&self, path: &Path) -> Result<()> {
        match &self.source {
            Some(source) => write_script_var(path, "states", source),
            None => write_script_var(path, "states", &self.rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn source() -> Vec<Value> {
        serde_json::from_str(r#"[
            { "FIPS": 6, "USPS": "CA", "Name": "California" },
            { "FIPS": "37", "USPS": "NC", "Name": "North Carolina" },
            { "FIPS": "02", "USPS": "AK", "Name": "Alaska", "Region": "West", "Seats": 1 }
        ]"#).unwrap()
    }

    fn table() -> StateTable {
        StateTable::from_values(source()).unwrap()
    }

    fn read_back(path: &Path) -> Value {
        let text = std::fs::read_to_string(path).unwrap();
        let json = text.trim_start_matches("var states = ").trim_end().trim_end_matches(';');
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn resolves_numeric_and_string_codes() {
        let t = table();
        assert_eq!(t.len(), 3);
        assert_eq!(t.resolve(6).unwrap().usps, "CA");
        assert_eq!(t.resolve(37).unwrap().name, "North Carolina");
        assert_eq!(t.resolve(2).unwrap().usps, "AK");
    }

    #[test]
    fn unknown_code_is_an_error() {
        assert_eq!(table().resolve(99), Err(BuildError::UnknownState { code: 99 }));
    }

    #[test]
    fn missing_column_is_an_error() {
        assert!(StateTable::from_values(vec![json!({ "FIPS": 6, "USPS": "CA" })]).is_err());
    }

    #[test]
    fn script_echoes_source_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example/states.js");
        table().write_script(&path).unwrap();

        let echoed = read_back(&path);
        assert_eq!(echoed, Value::Array(source()));
        assert_eq!(echoed[1]["FIPS"], json!("37"));
        assert_eq!(echoed[2]["Region"], json!("West"));
    }

    #[test]
    fn built_table_writes_typed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.js");
        StateTable::new(vec![StateInfo { fips: 6, usps: "CA".into(), name: "California".into() }])
            .write_script(&path).unwrap();
        assert_eq!(read_back(&path), json!([{ "FIPS": 6, "USPS": "CA", "Name": "California" }]));
    }
}
