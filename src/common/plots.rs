//! Plotting infrastructure for the report's chart artifacts
//!
//! This module renders the three charts embedded in the report using the
//! [`plotters`] crate. Charts are saved as PNG files with fixed 1200x800
//! resolution. All functions are pure consumers of already-computed data;
//! the only numbers produced here are the cosmetic quartile boxes, mean
//! markers, and fitted-line endpoints the charts display.

use crate::analysis::descriptive::mean;
use crate::common::{JuvenileRecord, Sex, Site};
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// File name of the annual captures bar chart
pub const ANNUAL_COUNTS_PNG: &str = "annual-juvenile-counts.png";

/// File name of the faceted weight distribution chart
pub const WEIGHT_DISTRIBUTION_PNG: &str = "juvenile-weight-distribution.png";

/// File name of the weight vs hind foot scatter chart
pub const WEIGHT_HINDFOOT_PNG: &str = "weight-vs-hindfoot.png";

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Sex groups shown on the distribution chart, in display order.
const SEX_GROUPS: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Unknown];

/// Creates the bar chart of juvenile captures per year
///
/// Years without juvenile captures carry no bar at all; the chart never
/// fabricates a zero-height bar for them.
///
/// # Arguments
/// * `counts` - Captures per active year, ordered by year
/// * `output_dir` - Directory where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If the counts are empty or rendering failed
pub fn create_annual_counts_chart(
    counts: &BTreeMap<i32, usize>,
    output_dir: &Path,
) -> Result<()> {
    if counts.is_empty() {
        return Err(PlotError::InvalidData(
            "Annual counts cannot be empty".to_string(),
        ));
    }

    let first_year = *counts.keys().next().unwrap();
    let last_year = *counts.keys().next_back().unwrap();
    let max_count = counts.values().copied().max().unwrap() as u32;
    let y_max = max_count + max_count / 10 + 1;

    let output_path = output_dir.join(ANNUAL_COUNTS_PNG);
    let drawing_area = BitMapBackend::new(&output_path, (1200, 800)).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart_context = ChartBuilder::on(&drawing_area)
        .caption("Annual Juvenile Hare Captures", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d((first_year..last_year + 1).into_segmented(), 0u32..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart_context
        .configure_mesh()
        .x_desc("Year")
        .x_label_style(("sans-serif", 30))
        .y_desc("Juvenile hares captured")
        .y_label_style(("sans-serif", 30))
        .label_style(("sans-serif", 20))
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(year) | SegmentValue::Exact(year) => year.to_string(),
            SegmentValue::Last => String::new(),
        })
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart_context
        .draw_series(
            Histogram::vertical(&chart_context)
                .style(BLUE.mix(0.6).filled())
                .margin(10)
                .data(counts.iter().map(|(&year, &count)| (year, count as u32))),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Creates the per-site faceted weight distribution chart
///
/// One facet per trapping site, quartile boxes per sex group, and a mean
/// marker overlaid on each box. Records without a mapped site or without a
/// weight cannot be placed on this chart and are skipped.
///
/// # Arguments
/// * `records` - The juvenile capture records
/// * `output_dir` - Directory where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If no record carries both a site and a weight, or
///   rendering failed
pub fn create_weight_distribution_chart(
    records: &[JuvenileRecord],
    output_dir: &Path,
) -> Result<()> {
    let mut by_site: BTreeMap<Site, BTreeMap<Sex, Vec<f64>>> = BTreeMap::new();
    for record in records {
        if let (Some(site), Some(weight)) = (record.site, record.weight_g) {
            by_site
                .entry(site)
                .or_default()
                .entry(record.sex)
                .or_default()
                .push(weight);
        }
    }

    let all_weights: Vec<f64> = by_site
        .values()
        .flat_map(|groups| groups.values().flatten().copied())
        .collect();
    if all_weights.is_empty() {
        return Err(PlotError::InvalidData(
            "No record carries both a site and a weight".to_string(),
        ));
    }

    let w_min = all_weights.iter().copied().fold(f64::INFINITY, f64::min);
    let w_max = all_weights
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let padding = ((w_max - w_min) * 0.1).max(1.0);
    let y_range = (w_min - padding) as f32..(w_max + padding) as f32;

    let output_path = output_dir.join(WEIGHT_DISTRIBUTION_PNG);
    let drawing_area = BitMapBackend::new(&output_path, (1200, 800)).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let facets = drawing_area.split_evenly((1, Site::ALL.len()));
    for (facet, site) in facets.iter().zip(Site::ALL) {
        let mut chart_context = ChartBuilder::on(facet)
            .caption(site.label(), ("sans-serif", 30))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(
                (0..SEX_GROUPS.len() as i32).into_segmented(),
                y_range.clone(),
            )
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart_context
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Sex")
            .y_desc("Weight (g)")
            .label_style(("sans-serif", 18))
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => SEX_GROUPS
                    .get(*index as usize)
                    .map(|sex| sex.label().to_string())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        let Some(groups) = by_site.get(&site) else {
            continue;
        };

        for (index, sex) in SEX_GROUPS.iter().enumerate() {
            let Some(weights) = groups.get(sex) else {
                continue;
            };

            let quartiles = Quartiles::new(weights);
            chart_context
                .draw_series(std::iter::once(
                    Boxplot::new_vertical(SegmentValue::CenterOf(index as i32), &quartiles)
                        .width(40)
                        .whisker_width(0.5)
                        .style(&BLUE),
                ))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;

            chart_context
                .draw_series(std::iter::once(Cross::new(
                    (SegmentValue::CenterOf(index as i32), mean(weights) as f32),
                    8,
                    RED.filled(),
                )))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
    }

    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Creates the weight vs hind foot length scatter chart with a fitted line
///
/// The line is drawn from the slope and intercept handed in; no fitting
/// happens here.
///
/// # Arguments
/// * `pairs` - (hind foot length, weight) pairs with both fields present
/// * `slope` - Slope of the fitted line, grams per millimeter
/// * `intercept` - Intercept of the fitted line, grams
/// * `output_dir` - Directory where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If the pairs are empty or rendering failed
pub fn create_weight_hindfoot_chart(
    pairs: &[(f64, f64)],
    slope: f64,
    intercept: f64,
    output_dir: &Path,
) -> Result<()> {
    if pairs.is_empty() {
        return Err(PlotError::InvalidData(
            "Measurement pairs cannot be empty".to_string(),
        ));
    }

    let x_min = pairs.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let x_max = pairs
        .iter()
        .map(|(x, _)| *x)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_min = pairs.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let y_max = pairs
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);
    let x_pad = ((x_max - x_min) * 0.05).max(1.0);
    let y_pad = ((y_max - y_min) * 0.05).max(1.0);

    let output_path = output_dir.join(WEIGHT_HINDFOOT_PNG);
    let drawing_area = BitMapBackend::new(&output_path, (1200, 800)).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart_context = ChartBuilder::on(&drawing_area)
        .caption("Juvenile Weight vs Hind Foot Length", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(
            (x_min - x_pad)..(x_max + x_pad),
            (y_min - y_pad)..(y_max + y_pad),
        )
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart_context
        .configure_mesh()
        .x_desc("Hind foot length (mm)")
        .x_label_style(("sans-serif", 30))
        .y_desc("Weight (g)")
        .y_label_style(("sans-serif", 30))
        .label_style(("sans-serif", 20))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart_context
        .draw_series(
            pairs
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BLUE.mix(0.5).filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let line_x = [x_min, x_max];
    chart_context
        .draw_series(LineSeries::new(
            line_x.iter().map(|&x| (x, slope * x + intercept)),
            RED.stroke_width(2),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(site: Option<Site>, sex: Sex, weight: Option<f64>) -> JuvenileRecord {
        JuvenileRecord {
            date: NaiveDate::from_ymd_opt(1999, 8, 1).unwrap(),
            year: 1999,
            site,
            sex,
            weight_g: weight,
            hindfoot_mm: None,
        }
    }

    #[test]
    fn test_annual_counts_chart_rejects_empty_input() {
        let temp_dir = std::env::temp_dir();
        let result = create_annual_counts_chart(&BTreeMap::new(), &temp_dir);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    fn test_weight_distribution_chart_rejects_unplottable_records() {
        let temp_dir = std::env::temp_dir();

        // No records at all.
        let result = create_weight_distribution_chart(&[], &temp_dir);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));

        // Records exist but none carries both a site and a weight.
        let records = vec![
            record(None, Sex::Male, Some(900.0)),
            record(Some(Site::Riparian), Sex::Female, None),
        ];
        let result = create_weight_distribution_chart(&records, &temp_dir);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    fn test_weight_hindfoot_chart_rejects_empty_input() {
        let temp_dir = std::env::temp_dir();
        let result = create_weight_hindfoot_chart(&[], 1.0, 0.0, &temp_dir);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_render_annual_counts_chart() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut counts = BTreeMap::new();
        counts.insert(1999, 126);
        counts.insert(2000, 84);
        counts.insert(2002, 18);

        create_annual_counts_chart(&counts, temp_dir.path()).unwrap();
        assert!(temp_dir.path().join(ANNUAL_COUNTS_PNG).exists());
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_render_weight_distribution_chart() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut records = Vec::new();
        for site in Site::ALL {
            for (sex, base) in [(Sex::Male, 900.0), (Sex::Female, 850.0)] {
                for offset in 0..5 {
                    records.push(record(Some(site), sex, Some(base + offset as f64 * 40.0)));
                }
            }
        }

        create_weight_distribution_chart(&records, temp_dir.path()).unwrap();
        assert!(temp_dir.path().join(WEIGHT_DISTRIBUTION_PNG).exists());
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_render_weight_hindfoot_chart() {
        let temp_dir = tempfile::tempdir().unwrap();

        let pairs = vec![
            (120.0, 900.0),
            (125.0, 960.0),
            (130.0, 1010.0),
            (135.0, 1080.0),
        ];

        create_weight_hindfoot_chart(&pairs, 9.5, -230.0, temp_dir.path()).unwrap();
        assert!(temp_dir.path().join(WEIGHT_HINDFOOT_PNG).exists());
    }
}
