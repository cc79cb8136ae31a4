use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::common::ensure_parent_dir;

/// Write `value` as a browser script assigning it to a global: `var <name> = <json>;`.
pub(crate) fn write_script_var<T: Serialize + ?Sized>(path: &Path, name: &str, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create script file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_var(&mut writer, name, value)
        .with_context(|| format!("Failed to write script file: {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

fn write_var<W: Write, T: Serialize + ?Sized>(writer: &mut W, name: &str, value: &T) -> Result<()> {
    write!(writer, "var {name} = ")?;
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writer.write_all(b";\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assigns_pretty_json_to_global() {
        let mut out = Vec::new();
        write_var(&mut out, "bboxes", &json!({ "XX": [0, 1, 2, 3] })).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("var bboxes = {\n  \"XX\": ["));
        assert!(text.ends_with("};\n"));
    }
}
