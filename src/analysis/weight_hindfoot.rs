//! Weight vs hind foot length section
//!
//! Ordinary least squares fit of weight on hind foot length, the Pearson
//! correlation computed independently on the same pairs, and the scatter
//! chart with the fitted line.

use super::descriptive::weight_hindfoot_pairs;
use super::inference::{linear_fit, pearson_r, Correlation, InferenceError, LinearFit};
use crate::common::plots::{create_weight_hindfoot_chart, PlotError};
use crate::common::JuvenileRecord;
use std::path::Path;

/// Group label used in error messages for this section.
const PAIR_GROUP: &str = "weight/hind foot pairs";

/// Result of the weight vs hind foot section.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightHindfootAnalysis {
    pub fit: LinearFit,
    pub correlation: Correlation,
    /// (hind foot mm, weight g) pairs the fit was computed on
    pub pairs: Vec<(f64, f64)>,
}

/// Fits weight as a linear function of hind foot length.
///
/// Only records with both measurements present enter the fit. The Pearson
/// correlation and its significance test run independently on the same
/// filtered pairs.
pub fn analyze(records: &[JuvenileRecord]) -> Result<WeightHindfootAnalysis, InferenceError> {
    let pairs = weight_hindfoot_pairs(records);
    let (hindfoot, weight): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();

    let fit = linear_fit(&hindfoot, &weight, PAIR_GROUP)?;
    let correlation = pearson_r(&hindfoot, &weight, PAIR_GROUP)?;

    Ok(WeightHindfootAnalysis {
        fit,
        correlation,
        pairs,
    })
}

/// Renders the scatter chart with the fitted line into `output_dir`.
pub fn render_plot(
    analysis: &WeightHindfootAnalysis,
    output_dir: &Path,
) -> Result<(), PlotError> {
    create_weight_hindfoot_chart(
        &analysis.pairs,
        analysis.fit.slope,
        analysis.fit.intercept,
        output_dir,
    )
}
