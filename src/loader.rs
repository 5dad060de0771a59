//! CSV loading for benchmark result files.
//!
//! The loader returns every row of the file, header included; callers that
//! aggregate are responsible for skipping the header row.

use anyhow::{Context, Result};
use csv::StringRecord;
use std::fs::File;
use std::path::Path;

/// Read all rows of a results CSV.
///
/// Fails if the file cannot be opened or the CSV is malformed (including
/// rows with an inconsistent number of fields).
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<StringRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(file);

    let mut records = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("malformed CSV in {}", path.display()))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_all_rows_including_header() {
        let file = write_csv("mode,rps,loss\nwebhook,100,0.5\nlongpull,100,1.0\n");
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get(0), Some("mode"));
        assert_eq!(records[2].get(0), Some("longpull"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_records("definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("cannot open"));
    }

    #[test]
    fn jagged_rows_are_an_error() {
        let file = write_csv("mode,rps,loss\nwebhook,100\n");
        assert!(load_records(file.path()).is_err());
    }

    #[test]
    fn empty_file_yields_no_rows() {
        let file = write_csv("");
        let records = load_records(file.path()).unwrap();
        assert!(records.is_empty());
    }
}
