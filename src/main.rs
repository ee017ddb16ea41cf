mod analysis;
mod common;
mod parsing;
mod report;
mod transform;

use analysis::{annual_counts, weight_by_sex, weight_hindfoot};
use argh::FromArgs;
use indicatif::ProgressBar;
use parsing::load_observations;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use transform::to_juvenile_records;

/// Generate the juvenile snowshoe hare report from a captures CSV.
#[derive(FromArgs, Debug)]
struct Args {
    /// path to the hare observations CSV file
    #[argh(positional)]
    input: PathBuf,

    /// directory the report and charts are written to (default: current directory)
    #[argh(option, default = "PathBuf::from(\".\")")]
    out_dir: PathBuf,
}

/// Errors that can occur while generating the report
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Loading error: {0}")]
    Load(#[from] parsing::LoadError),

    #[error("Transform error: {0}")]
    Transform(#[from] transform::TransformError),

    #[error("Statistics error: {0}")]
    Inference(#[from] analysis::InferenceError),

    #[error("Plot error: {0}")]
    Plot(#[from] common::PlotError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, AnalysisError>;

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    // Check if input file exists
    if !args.input.exists() {
        eprintln!("Error: Input file does not exist: {}", args.input.display());
        std::process::exit(1);
    }
    std::fs::create_dir_all(&args.out_dir)?;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));

    // Load the observations and keep only the juvenile captures
    spinner.set_message("Loading observations");
    let observations = load_observations(&args.input)?;

    spinner.set_message("Selecting juvenile captures");
    let juveniles = to_juvenile_records(&observations)?;

    // Annual capture counts and bar chart
    spinner.set_message("Counting captures per year");
    let annual = annual_counts::analyze(&juveniles);
    annual_counts::render_plot(&annual, &args.out_dir)?;

    // Weight comparison by sex and distribution chart
    spinner.set_message("Comparing weights by sex");
    let weights = weight_by_sex::analyze(&juveniles)?;
    weight_by_sex::render_plot(&juveniles, &args.out_dir)?;

    // Weight vs hind foot regression and scatter chart
    spinner.set_message("Fitting weight on hind foot length");
    let regression = weight_hindfoot::analyze(&juveniles)?;
    weight_hindfoot::render_plot(&regression, &args.out_dir)?;

    // Assemble the report
    spinner.set_message("Writing report");
    let report_path = report::write_report(&annual, &weights, &regression, &args.out_dir)?;
    spinner.finish_and_clear();

    println!(
        "Loaded {} observations, {} juvenile captures",
        observations.len(),
        juveniles.len()
    );
    println!("Charts written to {}", args.out_dir.display());
    println!("Report written to {}", report_path.display());

    Ok(())
}
