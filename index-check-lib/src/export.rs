//! Flat exports of a batch.
//!
//! CSV exports have a `url,indexed,title` header followed by one row per
//! input URL in input order. Quoting is left to [`csv::Writer`].

use crate::error::IndexCheckError;
use crate::types::BatchState;
use csv::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Header row of CSV exports.
pub const CSV_HEADER: &str = "url,indexed,title";

/// Default file name for CSV exports.
pub const DEFAULT_EXPORT_FILE: &str = "indexation_results.csv";

/// Write a batch as CSV to any writer.
pub fn write_csv<W: Write>(batch: &BatchState, writer: W) -> Result<(), IndexCheckError> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER.split(','))?;
    for result in batch {
        csv_writer.write_record([
            result.url.as_str(),
            result.status.as_csv_value(),
            result.title.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render a batch as a CSV string.
pub fn to_csv(batch: &BatchState) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_csv(batch, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Write a batch as CSV to a file, replacing it if it exists.
pub fn write_csv_file<P: AsRef<Path>>(batch: &BatchState, path: P) -> Result<(), IndexCheckError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        IndexCheckError::file_error(
            path.to_string_lossy(),
            format!("Failed to create export file: {}", e),
        )
    })?;
    write_csv(batch, BufWriter::new(file)).map_err(|e| {
        IndexCheckError::file_error(path.to_string_lossy(), format!("Failed to write export: {}", e))
    })
}

/// Render a batch as pretty-printed JSON (an array of results).
pub fn to_json(batch: &BatchState) -> Result<String, IndexCheckError> {
    Ok(serde_json::to_string_pretty(batch)?)
}
