//! Weight comparison by sex section
//!
//! Per-sex weight summaries, the Welch comparison of male and female mean
//! weights with its Cohen's d effect size, and the faceted distribution
//! chart.

use super::descriptive::{weight_summary_by_sex, weights_for_sex, WeightSummary};
use super::inference::{cohens_d, welch_t_test, InferenceError, TwoSampleTest};
use crate::common::plots::{create_weight_distribution_chart, PlotError};
use crate::common::{JuvenileRecord, Sex};
use std::collections::BTreeMap;
use std::path::Path;

/// Result of the weight-by-sex section.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightComparison {
    /// Summary per sex label present in the data, Unknown included
    pub summaries: BTreeMap<Sex, WeightSummary>,
    /// Welch test of male vs female mean weight
    pub test: TwoSampleTest,
    /// Cohen's d between the male and female groups
    pub effect_size: f64,
}

impl WeightComparison {
    /// Male minus female mean weight, in grams.
    pub fn mean_difference(&self) -> f64 {
        self.test.mean_a - self.test.mean_b
    }
}

/// Compares male and female juvenile weights.
///
/// Missing weights are dropped per group before testing; fewer than two
/// usable values in either group makes the section undefined and fails the
/// run.
pub fn analyze(records: &[JuvenileRecord]) -> Result<WeightComparison, InferenceError> {
    let males = weights_for_sex(records, Sex::Male);
    let females = weights_for_sex(records, Sex::Female);

    let test = welch_t_test(&males, &females, Sex::Male.label(), Sex::Female.label())?;
    let effect_size = cohens_d(&males, &females, Sex::Male.label(), Sex::Female.label())?;

    Ok(WeightComparison {
        summaries: weight_summary_by_sex(records),
        test,
        effect_size,
    })
}

/// Renders the faceted weight distribution chart into `output_dir`.
pub fn render_plot(records: &[JuvenileRecord], output_dir: &Path) -> Result<(), PlotError> {
    create_weight_distribution_chart(records, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(sex: Sex, weight: Option<f64>) -> JuvenileRecord {
        JuvenileRecord {
            date: NaiveDate::from_ymd_opt(1999, 8, 1).unwrap(),
            year: 1999,
            site: None,
            sex,
            weight_g: weight,
            hindfoot_mm: None,
        }
    }

    #[test]
    fn test_analyze() {
        let records = vec![
            record(Sex::Male, Some(900.0)),
            record(Sex::Male, Some(1000.0)),
            record(Sex::Male, Some(1100.0)),
            record(Sex::Female, Some(800.0)),
            record(Sex::Female, Some(850.0)),
            record(Sex::Female, Some(900.0)),
            record(Sex::Female, None),
            record(Sex::Unknown, Some(700.0)),
        ];

        let comparison = analyze(&records).unwrap();

        assert_eq!(comparison.test.n_a, 3);
        // The record with a missing weight contributes nothing to the test.
        assert_eq!(comparison.test.n_b, 3);
        assert!((comparison.mean_difference() - 150.0).abs() < 1e-12);
        assert!(comparison.test.t > 0.0);
        assert!(comparison.effect_size > 0.0);

        // Summaries cover every label present, Unknown included.
        assert_eq!(comparison.summaries.len(), 3);
        assert_eq!(comparison.summaries[&Sex::Female].n, 3);
    }

    #[test]
    fn test_insufficient_group_fails_the_section() {
        let records = vec![
            record(Sex::Male, Some(900.0)),
            record(Sex::Female, Some(800.0)),
            record(Sex::Female, Some(850.0)),
        ];

        let result = analyze(&records);
        match result {
            Err(InferenceError::InsufficientData { group, n }) => {
                assert_eq!(group, "Male");
                assert_eq!(n, 1);
            }
            other => panic!("expected insufficient data, got {other:?}"),
        }
    }
}
