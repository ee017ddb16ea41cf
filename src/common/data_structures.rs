use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A single capture record as it appears in the observations CSV.
///
/// Columns beyond these six are present in the raw export but carry no
/// information this analysis uses; they are skipped during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct HareObservation {
    /// Capture date as recorded in the field sheets
    pub date: String,
    /// Trapping grid (site) code, e.g. "bonrip"
    #[serde(rename = "grid")]
    pub site_code: String,
    /// Sex code ("m"/"f"), absent when undetermined
    pub sex: Option<String>,
    /// Age class code ("j" = juvenile, "a" = adult), absent when unrecorded
    pub age: Option<String>,
    /// Body weight in grams, absent when the animal was not weighed
    #[serde(deserialize_with = "de_opt_f64")]
    pub weight: Option<f64>,
    /// Hind foot length in millimeters, absent when not measured
    #[serde(rename = "hindft", deserialize_with = "de_opt_f64")]
    pub hindfoot: Option<f64>,
}

/// A juvenile capture after transformation: parsed date, derived year,
/// and display labels in place of the raw codes.
#[derive(Debug, Clone, PartialEq)]
pub struct JuvenileRecord {
    pub date: NaiveDate,
    pub year: i32,
    /// `None` when the grid code is not one of the three known sites
    pub site: Option<Site>,
    pub sex: Sex,
    pub weight_g: Option<f64>,
    pub hindfoot_mm: Option<f64>,
}

/// The three Bonanza Creek trapping grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Site {
    Riparian,
    Mature,
    BlackSpruce,
}

impl Site {
    /// All sites in display order.
    pub const ALL: [Site; 3] = [Site::Riparian, Site::Mature, Site::BlackSpruce];

    /// Maps a raw grid code to its site. Unknown codes return `None` so the
    /// record keeps flowing through the pipeline with a missing site.
    pub fn from_code(code: &str) -> Option<Site> {
        match code.trim().to_ascii_lowercase().as_str() {
            "bonrip" => Some(Site::Riparian),
            "bonmat" => Some(Site::Mature),
            "bonbs" => Some(Site::BlackSpruce),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Site::Riparian => "Riparian",
            Site::Mature => "Mature",
            Site::BlackSpruce => "Black Spruce",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sex label of a capture record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    /// Maps a raw sex code to its label. Qualified codes (e.g. "m?") are not
    /// treated as confirmed and fall to `Unknown`, as do absent codes.
    pub fn from_code(code: Option<&str>) -> Sex {
        match code.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
            Some("m") => Sex::Male,
            Some("f") => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deserializes an optional measurement column.
///
/// Empty and "NA" cells are missing values; anything else must parse as a
/// number or the whole run fails (there is no partial-record recovery).
fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("NA") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid numeric value '{value}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bonrip", Some(Site::Riparian))]
    #[case("bonmat", Some(Site::Mature))]
    #[case("bonbs", Some(Site::BlackSpruce))]
    #[case("BONRIP", Some(Site::Riparian))]
    #[case(" bonbs ", Some(Site::BlackSpruce))]
    #[case("bonbs_old", None)]
    #[case("", None)]
    fn test_site_from_code(#[case] code: &str, #[case] expected: Option<Site>) {
        assert_eq!(Site::from_code(code), expected);
    }

    #[rstest]
    #[case(Some("m"), Sex::Male)]
    #[case(Some("f"), Sex::Female)]
    #[case(Some("M"), Sex::Male)]
    #[case(Some(" F "), Sex::Female)]
    #[case(Some("m?"), Sex::Unknown)]
    #[case(Some("f?"), Sex::Unknown)]
    #[case(Some(""), Sex::Unknown)]
    #[case(None, Sex::Unknown)]
    fn test_sex_from_code(#[case] code: Option<&str>, #[case] expected: Sex) {
        assert_eq!(Sex::from_code(code), expected);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Site::BlackSpruce.label(), "Black Spruce");
        assert_eq!(Sex::Unknown.label(), "Unknown");
        assert_eq!(format!("{}", Site::Mature), "Mature");
    }
}
