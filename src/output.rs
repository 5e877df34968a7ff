//! Output formatting and export for engine results.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::overall_score;
use crate::dataset::SchoolRecord;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One exported row per school.
#[derive(Debug, Serialize)]
pub struct SchoolScoreRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub overall_score: f64,
    pub composite_score: Option<f64>,
    pub classification: Option<&'a str>,
}

impl<'a> SchoolScoreRow<'a> {
    pub fn from_record(record: &'a SchoolRecord) -> Self {
        SchoolScoreRow {
            id: &record.id,
            name: &record.name,
            category: record.category.as_str(),
            overall_score: overall_score(record),
            composite_score: record.composite_score,
            classification: record.classification.as_deref(),
        }
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends one row per school to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records(path: &str, records: &[SchoolRecord]) -> Result<usize> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for record in records {
        writer.serialize(SchoolScoreRow::from_record(record))?;
    }
    writer.flush()?;

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fallback_dataset;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&fallback_dataset());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&fallback_dataset()).unwrap();
    }

    #[test]
    fn test_append_records_creates_file() {
        let path = temp_path("school_dashboard_test_create.csv");
        let _ = fs::remove_file(&path);

        let dataset = fallback_dataset();
        let written = append_records(&path, &dataset.schools).unwrap();

        assert_eq!(written, 2);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("pei_edith_silveira"));
        assert!(content.contains("MUITO BOM"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_records_writes_header_once() {
        let path = temp_path("school_dashboard_test_header.csv");
        let _ = fs::remove_file(&path);

        let dataset = fallback_dataset();
        append_records(&path, &dataset.schools).unwrap();
        append_records(&path, &dataset.schools).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("id,")).count();
        assert_eq!(header_count, 1);
        // 1 header + 2 appends of 2 rows
        assert_eq!(content.lines().count(), 5);

        fs::remove_file(&path).unwrap();
    }
}
