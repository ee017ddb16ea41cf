//! ASCII summary tables embedded in the report
//!
//! Row types for the by-year and by-sex summaries, formatted with the
//! [`tabled`] crate. Values are pre-formatted into strings so the table
//! layer stays free of numeric policy.

use crate::analysis::descriptive::WeightSummary;
use crate::common::Sex;
use std::collections::BTreeMap;
use tabled::{Table, Tabled};

/// One row of the captures-per-year table
#[derive(Debug, Clone, Tabled)]
pub struct YearCountRow {
    #[tabled(rename = "Year")]
    pub year: i32,
    #[tabled(rename = "Juveniles captured")]
    pub count: usize,
}

/// One row of the per-sex weight summary table
#[derive(Debug, Clone, Tabled)]
pub struct SexSummaryRow {
    #[tabled(rename = "Sex")]
    pub sex: String,
    #[tabled(rename = "Mean weight (g)")]
    pub mean: String,
    #[tabled(rename = "SD (g)")]
    pub sd: String,
    #[tabled(rename = "n")]
    pub n: usize,
}

/// Builds the by-year rows in ascending year order.
pub fn year_count_rows(counts: &BTreeMap<i32, usize>) -> Vec<YearCountRow> {
    counts
        .iter()
        .map(|(&year, &count)| YearCountRow { year, count })
        .collect()
}

/// Builds the per-sex rows. An undefined SD (n < 2) renders as "-".
pub fn sex_summary_rows(summaries: &BTreeMap<Sex, WeightSummary>) -> Vec<SexSummaryRow> {
    summaries
        .iter()
        .map(|(sex, summary)| SexSummaryRow {
            sex: sex.label().to_string(),
            mean: format!("{:.1}", summary.mean),
            sd: if summary.sd.is_nan() {
                "-".to_string()
            } else {
                format!("{:.1}", summary.sd)
            },
            n: summary.n,
        })
        .collect()
}

/// Formats rows as an ASCII table with an optional underlined title.
pub fn format_table<T: Tabled>(rows: &[T], title: Option<&str>) -> String {
    if rows.is_empty() {
        return "No data available".to_string();
    }

    let table = Table::new(rows).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}
