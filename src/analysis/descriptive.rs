//! Descriptive aggregation over juvenile capture records
//!
//! Two independent reductions: captures per year and per-sex weight
//! summaries. Both are pure functions of the transformed record set and are
//! recomputed on every run.

use crate::common::{JuvenileRecord, Sex};
use std::collections::BTreeMap;

/// Mean, sample standard deviation, and sample size for one group's weights.
///
/// `n` counts only the non-missing weights, and it is the denominator basis
/// for both the mean and the SD. With fewer than two values the sample SD is
/// undefined and reported as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSummary {
    pub mean: f64,
    pub sd: f64,
    pub n: usize,
}

/// Counts juvenile captures per year.
///
/// Years in which no juveniles were captured are simply absent from the map;
/// they are never zero-filled. The result is ordered by year.
pub fn count_by_year(records: &[JuvenileRecord]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.year).or_insert(0) += 1;
    }
    counts
}

/// Summarizes weights for each sex label present in the record set.
///
/// Missing weights are excluded from the computation; a record with no
/// weight still belongs to its group but contributes nothing to `n`, the
/// mean, or the SD. Groups whose every weight is missing are omitted.
pub fn weight_summary_by_sex(records: &[JuvenileRecord]) -> BTreeMap<Sex, WeightSummary> {
    let mut grouped: BTreeMap<Sex, Vec<f64>> = BTreeMap::new();
    for record in records {
        if let Some(weight) = record.weight_g {
            grouped.entry(record.sex).or_default().push(weight);
        }
    }

    grouped
        .into_iter()
        .map(|(sex, weights)| (sex, summarize(&weights)))
        .collect()
}

/// Collects the non-missing weights for one sex.
pub fn weights_for_sex(records: &[JuvenileRecord], sex: Sex) -> Vec<f64> {
    records
        .iter()
        .filter(|r| r.sex == sex)
        .filter_map(|r| r.weight_g)
        .collect()
}

/// Collects the (hind foot, weight) pairs where both measurements exist.
pub fn weight_hindfoot_pairs(records: &[JuvenileRecord]) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| match (r.hindfoot_mm, r.weight_g) {
            (Some(hindfoot), Some(weight)) => Some((hindfoot, weight)),
            _ => None,
        })
        .collect()
}

fn summarize(values: &[f64]) -> WeightSummary {
    WeightSummary {
        mean: mean(values),
        sd: sample_variance(values).sqrt(),
        n: values.len(),
    }
}

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with the n-1 denominator. NaN for fewer than two values.
pub fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }

    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    ss / (n - 1) as f64
}
