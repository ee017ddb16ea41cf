//! Report assembly
//!
//! Substitutes the computed scalars into fixed prose, rounded to three
//! significant digits, embeds the summary tables, and writes the document.
//! There is no decision logic here; every value is inserted one-to-one.

use crate::analysis::{AnnualCounts, WeightComparison, WeightHindfootAnalysis};
use crate::common::plots::{ANNUAL_COUNTS_PNG, WEIGHT_DISTRIBUTION_PNG, WEIGHT_HINDFOOT_PNG};
use crate::common::tables::{format_table, sex_summary_rows, year_count_rows};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the rendered report
pub const REPORT_TXT: &str = "juvenile-hare-report.txt";

/// Significant digits used for every interpolated value
const SIG_DIGITS: u32 = 3;

/// Renders the full report text.
pub fn render_report(
    annual: &AnnualCounts,
    weights: &WeightComparison,
    regression: &WeightHindfootAnalysis,
) -> String {
    let (first_year, last_year) = annual.year_span().unwrap_or((0, 0));
    let year_table = format_table(&year_count_rows(&annual.counts), None);
    let sex_table = format_table(&sex_summary_rows(&weights.summaries), None);

    format!(
        "Juvenile Snowshoe Hare Report\n\
         =============================\n\
         \n\
         Annual juvenile captures\n\
         ------------------------\n\
         A total of {total} juvenile hares were captured across {active_years} trapping\n\
         years between {first_year} and {last_year}. Annual captures ranged from {min_count}\n\
         to {max_count}, with a mean of {mean_count} juveniles per trapping year. Years\n\
         missing from the table saw no juvenile captures at all; they are omitted\n\
         rather than reported as zero. See {annual_png}.\n\
         \n\
         {year_table}\n\
         \n\
         Juvenile weight by sex\n\
         ----------------------\n\
         Mean weight was {mean_male} g for males (n = {n_male}) and {mean_female} g for\n\
         females (n = {n_female}), a male-female difference of {difference} g. The\n\
         unequal-variance comparison of means gives t({df}) = {t}, p {p_test},\n\
         with a standardized effect size (Cohen's d) of {effect_size}.\n\
         See {distribution_png}.\n\
         \n\
         {sex_table}\n\
         \n\
         Weight and hind foot length\n\
         ---------------------------\n\
         Ordinary least squares regression on the {pairs} captures with both\n\
         measurements gives weight = {slope} g/mm x hind foot length {intercept_sign} {intercept} g\n\
         (R^2 = {r_squared}, p {p_fit}). Independently, Pearson's r between weight\n\
         and hind foot length is {r} (p {p_r}). See {scatter_png}.\n",
        total = annual.total(),
        active_years = annual.counts.len(),
        first_year = first_year,
        last_year = last_year,
        min_count = annual.min_count().unwrap_or(0),
        max_count = annual.max_count().unwrap_or(0),
        mean_count = fmt_sig(annual.mean_per_active_year(), SIG_DIGITS),
        annual_png = ANNUAL_COUNTS_PNG,
        year_table = year_table,
        mean_male = fmt_sig(weights.test.mean_a, SIG_DIGITS),
        n_male = weights.test.n_a,
        mean_female = fmt_sig(weights.test.mean_b, SIG_DIGITS),
        n_female = weights.test.n_b,
        difference = fmt_sig(weights.mean_difference(), SIG_DIGITS),
        df = fmt_sig(weights.test.df, SIG_DIGITS),
        t = fmt_sig(weights.test.t, SIG_DIGITS),
        p_test = fmt_p(weights.test.p_value),
        effect_size = fmt_sig(weights.effect_size, SIG_DIGITS),
        distribution_png = WEIGHT_DISTRIBUTION_PNG,
        sex_table = sex_table,
        pairs = regression.fit.n,
        slope = fmt_sig(regression.fit.slope, SIG_DIGITS),
        intercept_sign = if regression.fit.intercept < 0.0 { "-" } else { "+" },
        intercept = fmt_sig(regression.fit.intercept.abs(), SIG_DIGITS),
        r_squared = fmt_sig(regression.fit.r_squared, SIG_DIGITS),
        p_fit = fmt_p(regression.fit.p_value),
        r = fmt_sig(regression.correlation.r, SIG_DIGITS),
        p_r = fmt_p(regression.correlation.p_value),
        scatter_png = WEIGHT_HINDFOOT_PNG,
    )
}

/// Writes the rendered report into `output_dir` and returns its path.
pub fn write_report(
    annual: &AnnualCounts,
    weights: &WeightComparison,
    regression: &WeightHindfootAnalysis,
    output_dir: &Path,
) -> std::io::Result<PathBuf> {
    let output_path = output_dir.join(REPORT_TXT);
    fs::write(&output_path, render_report(annual, weights, regression))?;
    Ok(output_path)
}

/// Formats a value to a fixed number of significant digits, without
/// scientific notation.
fn fmt_sig(value: f64, digits: u32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits as i32 - 1 - magnitude).max(0) as usize;
    format!("{value:.decimals$}")
}

/// Formats a p-value with its comparator, floored at "< 0.001".
fn fmt_p(p: f64) -> String {
    if p < 0.001 {
        "< 0.001".to_string()
    } else {
        format!("= {}", fmt_sig(p, SIG_DIGITS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::descriptive::WeightSummary;
    use crate::analysis::inference::{Correlation, LinearFit, TwoSampleTest};
    use crate::common::Sex;
    use rstest::rstest;
    use std::collections::BTreeMap;

    #[rstest]
    #[case(855.389, "855")]
    #[case(9.5802, "9.58")]
    #[case(0.021312, "0.0213")]
    #[case(-2.709, "-2.71")]
    #[case(1236.7, "1237")]
    #[case(0.0, "0")]
    fn test_fmt_sig(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(fmt_sig(value, 3), expected);
    }

    #[test]
    fn test_fmt_p_floor() {
        assert_eq!(fmt_p(0.0004), "< 0.001");
        assert_eq!(fmt_p(0.0), "< 0.001");
        assert_eq!(fmt_p(0.021312), "= 0.0213");
        assert_eq!(fmt_p(0.45), "= 0.450");
    }

    fn fixture() -> (AnnualCounts, WeightComparison, WeightHindfootAnalysis) {
        let mut counts = BTreeMap::new();
        counts.insert(1999, 126);
        counts.insert(2000, 84);

        let mut summaries = BTreeMap::new();
        summaries.insert(
            Sex::Male,
            WeightSummary {
                mean: 945.9,
                sd: 333.2,
                n: 163,
            },
        );
        summaries.insert(
            Sex::Female,
            WeightSummary {
                mean: 855.4,
                sd: 292.3,
                n: 200,
            },
        );

        let annual = AnnualCounts { counts };
        let weights = WeightComparison {
            summaries,
            test: TwoSampleTest {
                t: 2.7096,
                df: 325.02,
                p_value: 0.007093,
                mean_a: 945.9,
                mean_b: 855.4,
                n_a: 163,
                n_b: 200,
            },
            effect_size: 0.2904,
        };
        let regression = WeightHindfootAnalysis {
            fit: LinearFit {
                slope: 9.5234,
                intercept: -279.3,
                r_squared: 0.2988,
                p_value: 0.0000001,
                n: 249,
            },
            correlation: Correlation {
                r: 0.5466,
                t: 10.26,
                p_value: 0.0000001,
                n: 249,
            },
            pairs: vec![(120.0, 900.0)],
        };

        (annual, weights, regression)
    }

    #[test]
    fn test_render_report_interpolates_values() {
        let (annual, weights, regression) = fixture();
        let report = render_report(&annual, &weights, &regression);

        assert!(report.contains("A total of 210 juvenile hares"));
        assert!(report.contains("between 1999 and 2000"));
        assert!(report.contains("omitted\nrather than reported as zero"));
        assert!(report.contains("946 g for males (n = 163)"));
        assert!(report.contains("t(325) = 2.71, p = 0.00709"));
        assert!(report.contains("(Cohen's d) of 0.290"));
        assert!(report.contains("weight = 9.52 g/mm x hind foot length - 279 g"));
        assert!(report.contains("R^2 = 0.299, p < 0.001"));
        assert!(report.contains("Pearson's r between weight\nand hind foot length is 0.547 (p < 0.001)"));
        assert!(report.contains(ANNUAL_COUNTS_PNG));
        assert!(report.contains(WEIGHT_DISTRIBUTION_PNG));
        assert!(report.contains(WEIGHT_HINDFOOT_PNG));
        // Tables are embedded.
        assert!(report.contains("126"));
        assert!(report.contains("Mean weight (g)"));
    }

    #[test]
    fn test_render_report_is_deterministic() {
        let (annual, weights, regression) = fixture();
        let first = render_report(&annual, &weights, &regression);
        let second = render_report(&annual, &weights, &regression);
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_report() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (annual, weights, regression) = fixture();

        let path = write_report(&annual, &weights, &regression, temp_dir.path()).unwrap();
        assert_eq!(path, temp_dir.path().join(REPORT_TXT));
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Juvenile Snowshoe Hare Report"));
    }
}
