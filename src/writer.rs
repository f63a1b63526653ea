use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes projected food records as one pretty-printed JSON array
pub struct JsonExporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonExporter<W> {
    pub fn new(writer: W) -> Self {
        JsonExporter { writer }
    }

    /// Serialize `records` with 4-space indentation and a trailing newline
    pub fn write_records(&mut self, records: &[Map<String, Value>]) -> Result<()> {
        {
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer =
                serde_json::Serializer::with_formatter(&mut self.writer, formatter);
            records
                .serialize(&mut serializer)
                .context("Failed to serialize food records")?;
        }
        writeln!(self.writer).context("Failed to write food records")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}

/// Create (or truncate) `path` and write `records` to it
pub fn export_json<P: AsRef<Path>>(path: P, records: &[Map<String, Value>]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut exporter = JsonExporter::new(BufWriter::new(file));
    exporter.write_records(records)?;
    exporter.flush()?;

    info!("wrote {} food records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader;
    use serde_json::json;

    fn projected() -> Vec<Map<String, Value>> {
        vec![
            serde_json::from_value(json!({"fdcId": 1, "description": "Apple", "Protein": 0.3}))
                .unwrap(),
            serde_json::from_value(json!({
                "fdcId": 2,
                "description": "Oats",
                "Energy (Atwater General Factors)": 389.0,
                "Iron, Fe": 4.72
            }))
            .unwrap(),
        ]
    }

    #[test]
    fn test_four_space_indent() {
        let record: Map<String, Value> = serde_json::from_value(json!({"fdcId": 1})).unwrap();
        let mut buffer = Vec::new();
        let mut exporter = JsonExporter::new(&mut buffer);
        exporter.write_records(&[record]).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "[\n    {\n        \"fdcId\": 1\n    }\n]\n");
    }

    #[test]
    fn test_empty_list() {
        let mut buffer = Vec::new();
        JsonExporter::new(&mut buffer).write_records(&[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[]\n");
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("food.json");
        let records = projected();

        export_json(&path, &records).unwrap();
        let reloaded = loader::load(&path).unwrap();

        let expected = Value::Array(records.into_iter().map(Value::Object).collect());
        assert_eq!(reloaded, expected);
    }

    #[test]
    fn test_export_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("food.json");
        std::fs::write(&path, "stale contents that are longer than the new output").unwrap();

        export_json(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }
}
