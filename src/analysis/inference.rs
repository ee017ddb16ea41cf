//! Inferential statistics over juvenile measurements
//!
//! Deterministic f64 kernels: an unequal-variance two-sample comparison of
//! means with a pooled-variance effect size, an ordinary least squares fit,
//! and a Pearson correlation with its significance test. p-values come from
//! the Student's t distribution supplied by [`statrs`]; nothing here is
//! randomized or resampled, so identical input yields identical output.

use super::descriptive::{mean, sample_variance};
use statrs::distribution::{ContinuousCDF, StudentsT};
use thiserror::Error;

/// Errors that can occur while computing a statistic
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Group '{group}' has {n} usable values; at least 2 are required")]
    InsufficientData { group: String, n: usize },

    #[error("Degenerate test distribution: {0}")]
    Degenerate(String),
}

type Result<T> = core::result::Result<T, InferenceError>;

/// Result of an unpaired two-sample comparison of means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoSampleTest {
    /// Test statistic; positive when the first group's mean is larger
    pub t: f64,
    /// Welch–Satterthwaite degrees of freedom
    pub df: f64,
    /// Two-sided p-value
    pub p_value: f64,
    pub mean_a: f64,
    pub mean_b: f64,
    pub n_a: usize,
    pub n_b: usize,
}

/// Result of an ordinary least squares fit of y on x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Two-sided p-value for the slope
    pub p_value: f64,
    pub n: usize,
}

/// Pearson correlation coefficient with its significance test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub r: f64,
    pub t: f64,
    /// Two-sided p-value
    pub p_value: f64,
    pub n: usize,
}

/// Unequal-variance (Welch) two-sample t test for a difference of means.
///
/// Swapping the groups flips the sign of the statistic and leaves the
/// degrees of freedom and p-value unchanged.
pub fn welch_t_test(a: &[f64], b: &[f64], label_a: &str, label_b: &str) -> Result<TwoSampleTest> {
    require_group(a, label_a)?;
    require_group(b, label_b)?;

    let (n_a, n_b) = (a.len(), b.len());
    let (mean_a, mean_b) = (mean(a), mean(b));
    let (var_a, var_b) = (sample_variance(a), sample_variance(b));

    let sem_a = var_a / n_a as f64;
    let sem_b = var_b / n_b as f64;
    let se = (sem_a + sem_b).sqrt();
    let t = (mean_a - mean_b) / se;

    // Welch–Satterthwaite approximation
    let df = (sem_a + sem_b) * (sem_a + sem_b)
        / (sem_a * sem_a / (n_a as f64 - 1.0) + sem_b * sem_b / (n_b as f64 - 1.0));

    Ok(TwoSampleTest {
        t,
        df,
        p_value: two_sided_p(t, df)?,
        mean_a,
        mean_b,
        n_a,
        n_b,
    })
}

/// Cohen's d standardized mean difference, using the pooled variance.
pub fn cohens_d(a: &[f64], b: &[f64], label_a: &str, label_b: &str) -> Result<f64> {
    require_group(a, label_a)?;
    require_group(b, label_b)?;

    let (n_a, n_b) = (a.len() as f64, b.len() as f64);
    let pooled_variance =
        ((n_a - 1.0) * sample_variance(a) + (n_b - 1.0) * sample_variance(b)) / (n_a + n_b - 2.0);
    if pooled_variance <= 0.0 {
        return Err(InferenceError::Degenerate(
            "pooled variance is zero".to_string(),
        ));
    }

    Ok((mean(a) - mean(b)) / pooled_variance.sqrt())
}

/// Ordinary least squares fit of y on x.
///
/// Reports the slope, intercept, coefficient of determination, and the
/// two-sided p-value of the slope (t distribution with n-2 df).
pub fn linear_fit(x: &[f64], y: &[f64], label: &str) -> Result<LinearFit> {
    let n = x.len();
    debug_assert_eq!(n, y.len());
    if n < 3 {
        return Err(InferenceError::InsufficientData {
            group: label.to_string(),
            n,
        });
    }

    let (sxx, syy, sxy) = centered_sums(x, y);
    if sxx == 0.0 {
        return Err(InferenceError::Degenerate(
            "predictor has zero variance".to_string(),
        ));
    }

    let slope = sxy / sxx;
    let intercept = mean(y) - slope * mean(x);
    let sse = syy - slope * sxy;
    let r_squared = if syy == 0.0 { 1.0 } else { 1.0 - sse / syy };

    let df = (n - 2) as f64;
    let slope_se = ((sse / df) / sxx).sqrt();
    let t = slope / slope_se;

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
        p_value: two_sided_p(t, df)?,
        n,
    })
}

/// Pearson's r between x and y, with the t-based significance test.
pub fn pearson_r(x: &[f64], y: &[f64], label: &str) -> Result<Correlation> {
    let n = x.len();
    debug_assert_eq!(n, y.len());
    if n < 3 {
        return Err(InferenceError::InsufficientData {
            group: label.to_string(),
            n,
        });
    }

    let (sxx, syy, sxy) = centered_sums(x, y);
    if sxx == 0.0 || syy == 0.0 {
        return Err(InferenceError::Degenerate(
            "a variable has zero variance".to_string(),
        ));
    }

    let r = sxy / (sxx * syy).sqrt();
    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();

    Ok(Correlation {
        r,
        t,
        p_value: two_sided_p(t, df)?,
        n,
    })
}

/// Centered sums of squares and cross products for paired data.
fn centered_sums(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    let (mx, my) = (mean(x), mean(y));
    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mx;
        let dy = yi - my;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    (sxx, syy, sxy)
}

/// Two-sided p-value for a t statistic with the given degrees of freedom.
fn two_sided_p(t: f64, df: f64) -> Result<f64> {
    if t.is_infinite() {
        return Ok(0.0);
    }
    if !t.is_finite() || !df.is_finite() {
        return Err(InferenceError::Degenerate(format!(
            "non-finite statistic (t = {t}, df = {df})"
        )));
    }

    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| InferenceError::Degenerate(e.to_string()))?;
    Ok(2.0 * (1.0 - dist.cdf(t.abs())))
}

fn require_group(values: &[f64], label: &str) -> Result<()> {
    if values.len() < 2 {
        return Err(InferenceError::InsufficientData {
            group: label.to_string(),
            n: values.len(),
        });
    }
    Ok(())
}
