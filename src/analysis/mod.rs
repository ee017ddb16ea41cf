//! Domain-specific analysis modules
//!
//! This module contains the analysis logic behind each report section:
//! - Annual juvenile capture counts
//! - Weight comparison by sex
//! - Weight vs hind foot length regression
//!
//! `descriptive` and `inference` hold the shared statistical kernels the
//! section modules are built from.

pub mod annual_counts;
pub mod descriptive;
pub mod inference;
pub mod weight_by_sex;
pub mod weight_hindfoot;

// Re-export the section results for convenience
pub use annual_counts::AnnualCounts;
pub use inference::InferenceError;
pub use weight_by_sex::WeightComparison;
pub use weight_hindfoot::WeightHindfootAnalysis;
