//! Annual capture counts section
//!
//! Counts juvenile captures per trapping year and renders the bar chart.
//! Years without juvenile captures stay absent from the counts; the report
//! calls this out instead of plotting a false zero.

use super::descriptive::count_by_year;
use crate::common::plots::{create_annual_counts_chart, PlotError};
use crate::common::JuvenileRecord;
use std::collections::BTreeMap;
use std::path::Path;

/// Captures per active year with the derived totals the narrative uses.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualCounts {
    pub counts: BTreeMap<i32, usize>,
}

impl AnnualCounts {
    /// Total juvenile captures across all years.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Smallest count among active years. `None` when there are no captures.
    pub fn min_count(&self) -> Option<usize> {
        self.counts.values().copied().min()
    }

    /// Largest count among active years. `None` when there are no captures.
    pub fn max_count(&self) -> Option<usize> {
        self.counts.values().copied().max()
    }

    /// Mean captures per active year. NaN when there are no captures.
    pub fn mean_per_active_year(&self) -> f64 {
        self.total() as f64 / self.counts.len() as f64
    }

    /// First and last active years. `None` when there are no captures.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = *self.counts.keys().next()?;
        let last = *self.counts.keys().next_back()?;
        Some((first, last))
    }
}

/// Counts captures per year over the juvenile record set.
pub fn analyze(records: &[JuvenileRecord]) -> AnnualCounts {
    AnnualCounts {
        counts: count_by_year(records),
    }
}

/// Renders the annual captures bar chart into `output_dir`.
pub fn render_plot(analysis: &AnnualCounts, output_dir: &Path) -> Result<(), PlotError> {
    create_annual_counts_chart(&analysis.counts, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Sex;
    use chrono::NaiveDate;

    fn record(year: i32) -> JuvenileRecord {
        JuvenileRecord {
            date: NaiveDate::from_ymd_opt(year, 8, 1).unwrap(),
            year,
            site: None,
            sex: Sex::Unknown,
            weight_g: None,
            hindfoot_mm: None,
        }
    }

    #[test]
    fn test_analyze_totals() {
        let records: Vec<JuvenileRecord> = [1999, 1999, 1999, 2000, 2005]
            .iter()
            .map(|&y| record(y))
            .collect();

        let analysis = analyze(&records);
        assert_eq!(analysis.total(), 5);
        assert_eq!(analysis.min_count(), Some(1));
        assert_eq!(analysis.max_count(), Some(3));
        assert_eq!(analysis.year_span(), Some((1999, 2005)));
        assert!((analysis.mean_per_active_year() - 5.0 / 3.0).abs() < 1e-12);
        // 2001-2004 saw no juvenile captures and carry no entries.
        assert_eq!(analysis.counts.len(), 3);
    }

    #[test]
    fn test_analyze_empty() {
        let analysis = analyze(&[]);
        assert_eq!(analysis.total(), 0);
        assert_eq!(analysis.min_count(), None);
        assert_eq!(analysis.year_span(), None);
        assert!(analysis.mean_per_active_year().is_nan());
    }
}
