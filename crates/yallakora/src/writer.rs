use crate::types::MatchRecord;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes `matches` to `path` as BOM-prefixed UTF-8 CSV, header row first.
///
/// The file is truncated if it already exists.
pub fn write_matches(matches: &[MatchRecord], path: &Path) -> Result<(), WriterError> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    for record in matches {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Saves `matches`, logging instead of failing. Nothing is written for an empty slice.
///
/// Returns whether the file was written.
pub fn save_to_csv(matches: &[MatchRecord], path: &Path) -> bool {
    if matches.is_empty() {
        log::warn!("No matches found to save.");
        return false;
    }

    match write_matches(matches, path) {
        Ok(()) => {
            log::info!("Data saved to {}", path.display());
            true
        }
        Err(e) => {
            log::error!("Error saving data: {}", e);
            false
        }
    }
}

pub fn read_matches(path: &Path) -> Result<Vec<MatchRecord>, WriterError> {
    let bytes = fs::read(path)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut reader = csv::Reader::from_reader(body);
    let matches = reader
        .deserialize()
        .collect::<Result<Vec<MatchRecord>, _>>()?;
    Ok(matches)
}
