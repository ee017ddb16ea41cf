//! Transformation of raw observations into juvenile capture records
//!
//! Everything downstream (aggregation, charts, statistics) operates on
//! [`JuvenileRecord`]s only, so the juvenile filter is applied here, before
//! any numbers are computed.

use crate::common::{HareObservation, JuvenileRecord, Sex, Site};
use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Errors that can occur while transforming observations
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Unparseable observation date '{0}'")]
    DateParse(String),
}

type Result<T> = core::result::Result<T, TransformError>;

/// Date formats accepted in the `date` column.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Filters the dataset to juvenile captures and normalizes their fields.
///
/// Records whose age class is not juvenile are dropped. For the records that
/// remain, the date string is parsed into a calendar date (an unparseable
/// date fails the whole run), the capture year is derived, and the raw site
/// and sex codes are mapped to display labels. Missing weight or hind foot
/// measurements are carried through as missing; they never reject a record.
pub fn to_juvenile_records(observations: &[HareObservation]) -> Result<Vec<JuvenileRecord>> {
    let mut juveniles = Vec::new();

    for observation in observations {
        if !is_juvenile(observation.age.as_deref()) {
            continue;
        }

        let date = parse_observation_date(&observation.date)?;
        juveniles.push(JuvenileRecord {
            date,
            year: date.year(),
            site: Site::from_code(&observation.site_code),
            sex: Sex::from_code(observation.sex.as_deref()),
            weight_g: observation.weight,
            hindfoot_mm: observation.hindfoot,
        });
    }

    Ok(juveniles)
}

/// Parses a date cell, accepting ISO and US month/day/year forms.
pub fn parse_observation_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(TransformError::DateParse(value.to_string()))
}

fn is_juvenile(age: Option<&str>) -> bool {
    matches!(age.map(str::trim), Some(code) if code.eq_ignore_ascii_case("j"))
}
