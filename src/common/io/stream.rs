use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::common::ensure_parent_dir;

const HEADER: &str = "{\n\"type\": \"FeatureCollection\",\n\"features\": [\n";
const FOOTER: &str = "\n]\n}";

/// Writes a FeatureCollection one feature at a time, so that only a single
/// serialized feature is ever held in memory.
pub(crate) struct FeatureStreamWriter<W: Write> {
    writer: W,
    written: usize,
}

impl FeatureStreamWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write the collection header.
    pub(crate) fn create(path: &Path) -> Result<Self> {
        ensure_parent_dir(path)?;
        let file = File::create(path)
            .with_context(|| format!("Failed to create feature file: {}", path.display()))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> FeatureStreamWriter<W> {
    pub(crate) fn new(mut writer: W) -> Result<Self> {
        writer.write_all(HEADER.as_bytes())?;
        Ok(Self { writer, written: 0 })
    }

    /// Append one feature, pretty-printed with two-space indentation.
    pub(crate) fn write_feature<T: Serialize>(&mut self, feature: &T) -> Result<()> {
        if self.written > 0 {
            self.writer.write_all(b",\n")?;
        }
        serde_json::to_writer_pretty(&mut self.writer, feature)
            .context("Failed to serialize feature")?;
        self.written += 1;
        Ok(())
    }

    /// Write the footer and flush; returns the inner writer and the feature count.
    pub(crate) fn finish(mut self) -> Result<(W, usize)> {
        self.writer.write_all(FOOTER.as_bytes())?;
        self.writer.flush()?;
        Ok((self.writer, self.written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn empty_collection_is_valid_json() {
        let (out, count) = FeatureStreamWriter::new(Vec::new()).unwrap().finish().unwrap();
        assert_eq!(count, 0);
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["type"], "FeatureCollection");
        assert_eq!(parsed["features"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn features_are_comma_separated_in_order() {
        let mut writer = FeatureStreamWriter::new(Vec::new()).unwrap();
        writer.write_feature(&json!({ "id": 1 })).unwrap();
        writer.write_feature(&json!({ "id": 2 })).unwrap();
        writer.write_feature(&json!({ "id": 3 })).unwrap();
        let (out, count) = writer.finish().unwrap();
        assert_eq!(count, 3);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(HEADER));
        assert!(text.ends_with(FOOTER));
        assert_eq!(text.matches("},\n{").count(), 2);

        let parsed: Value = serde_json::from_str(&text).unwrap();
        let ids: Vec<i64> = parsed["features"].as_array().unwrap()
            .iter().map(|f| f["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
