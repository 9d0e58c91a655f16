//! Imputation CLI.
//!
//! Loads a CSV dataset, fills the requested column from nearest-neighbour
//! references, and writes the completed dataset back out.

mod io;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use juniper::Imputer;

#[derive(Parser, Debug)]
#[command(name = "impute")]
#[command(about = "Fill missing values from the nearest known coordinates")]
struct Args {
    /// Input CSV file with latitude, longitude, and the target column
    file: PathBuf,

    /// Where to write the completed dataset
    #[arg(short, long)]
    output: PathBuf,

    /// Column to impute
    #[arg(short, long)]
    column: String,

    /// Retain an imputed_loc column tracing each row's effective coordinate
    #[arg(long)]
    keep_coordinate: bool,

    /// Print the completeness report as JSON on stdout
    #[arg(long)]
    report_json: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Juniper Imputation");
    info!("File: {}", args.file.display());

    let mut dataset = io::read_dataset(&args.file)?;

    let pb = ProgressBar::new(dataset.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let report = Imputer::new(&args.column)
        .keep_coordinate_trace(args.keep_coordinate)
        .impute_with_progress(&mut dataset, |done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        })
        .with_context(|| format!("Imputation of column `{}` failed", args.column))?;
    pb.finish_and_clear();

    info!("Imputation complete: {}", report);
    if args.report_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    io::write_dataset(&args.output, &dataset)?;

    Ok(())
}
