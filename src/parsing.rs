//! File parsing functionality for hare observation data
//!
//! This module handles loading and validating the observations CSV file.

use crate::common::HareObservation;
use std::path::Path;
use thiserror::Error;

/// Columns the input file must provide. Additional columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = ["date", "grid", "sex", "age", "weight", "hindft"];

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] csv::Error),

    #[error("Input file is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Failed to parse record on line {line}: {source}")]
    Record {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

type Result<T> = core::result::Result<T, LoadError>;

/// Loads the hare observations CSV and materializes it in memory.
///
/// This function:
/// - Opens the file and reads the header row
/// - Verifies every required column is present
/// - Deserializes each record by column name
///
/// The file handle is released as soon as the records are materialized.
///
/// # Arguments
/// * `file_path` - Path to the observations CSV file
///
/// # Returns
/// * `Ok(Vec<HareObservation>)` - All records, in file order
/// * `Err(LoadError)` - If the file is unreadable, a required column is
///   absent, or any record fails to parse
pub fn load_observations(file_path: &Path) -> Result<Vec<HareObservation>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(file_path)?;

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut observations = Vec::new();
    for (index, record) in reader.deserialize().enumerate() {
        // Line 1 is the header, so data starts on line 2.
        let observation: HareObservation = record.map_err(|source| LoadError::Record {
            line: index as u64 + 2,
            source,
        })?;
        observations.push(observation);
    }

    Ok(observations)
}
