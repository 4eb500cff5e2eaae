//! Gable CLI binary.
//!
//! Command-line interface for training, serving, and inspecting Gable price
//! models.

mod integration;

use clap::{Parser, Subcommand, ValueEnum};
use gable::{ArtifactBundle, ModelKind, PipelineConfig, Record, TrainConfig};
use integration::dataset::load_training_frame;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gable")]
#[command(about = "Gable: property price estimation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model from a CSV of historical records
    Train {
        /// Path to the training CSV
        #[arg(long)]
        data: PathBuf,

        /// Where to write the artifact bundle
        #[arg(long, default_value = "bundle.json")]
        out: PathBuf,

        /// Estimator to train
        #[arg(long, value_enum, default_value_t = ModelArg::Stack)]
        model: ModelArg,

        /// Polynomial expansion degree for numeric attributes
        #[arg(long, default_value = "2")]
        degree: u32,

        /// Fraction of rows held out for evaluation
        #[arg(long, default_value = "0.2")]
        holdout: f64,

        /// Seed for the holdout shuffle
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Predict a price with a trained bundle
    Predict {
        /// Path to the artifact bundle
        #[arg(long, default_value = "bundle.json")]
        bundle: PathBuf,

        /// Full record as JSON, e.g. '{"name":"Bungalow","area":2000,"landOptions":"Suburban"}'
        #[arg(long, conflicts_with_all = ["name", "area", "land"])]
        record: Option<String>,

        /// Property type
        #[arg(long)]
        name: Option<String>,

        /// Area
        #[arg(long)]
        area: Option<f64>,

        /// Land options
        #[arg(long)]
        land: Option<String>,
    },

    /// Inspect a persisted bundle
    Inspect {
        /// Path to the artifact bundle
        #[arg(long, default_value = "bundle.json")]
        bundle: PathBuf,
    },
}

/// Estimator choice on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    /// Ridge-stabilized linear regression
    Linear,
    /// Gradient-boosted stumps
    Boost,
    /// Stacking ensemble
    Stack,
}

impl From<ModelArg> for ModelKind {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Linear => Self::Linear,
            ModelArg::Boost => Self::BoostedStumps,
            ModelArg::Stack => Self::Stacking,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            data,
            out,
            model,
            degree,
            holdout,
            seed,
        } => train(&data, &out, model, degree, holdout, seed),
        Commands::Predict {
            bundle,
            record,
            name,
            area,
            land,
        } => predict(&bundle, record.as_deref(), name, area, land),
        Commands::Inspect { bundle } => inspect(&bundle),
    }
}

fn train(
    data: &Path,
    out: &Path,
    model: ModelArg,
    degree: u32,
    holdout: f64,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = PipelineConfig {
        degree,
        holdout_fraction: holdout,
        seed,
        ..Default::default()
    };
    let df = load_training_frame(data, &pipeline)?;
    tracing::info!(rows = df.height(), path = %data.display(), "loaded training data");

    let config = TrainConfig {
        pipeline,
        model: model.into(),
    };
    let outcome = gable::train(&df, &config)?;

    for warning in &outcome.warnings {
        println!("Warning: {}", warning);
    }
    println!("Model: {}", outcome.bundle.regressor);
    println!("Holdout evaluation: {}", outcome.report);

    outcome.bundle.save(out)?;
    println!("Saved bundle to {}", out.display());
    Ok(())
}

fn predict(
    bundle_path: &Path,
    record_json: Option<&str>,
    name: Option<String>,
    area: Option<f64>,
    land: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = ArtifactBundle::load(bundle_path)?;

    let record = match record_json {
        Some(json) => serde_json::from_str(json)?,
        None => {
            let mut record = Record::new();
            if let Some(name) = name {
                record.set("name", name);
            }
            if let Some(area) = area {
                record.set("area", area);
            }
            if let Some(land) = land {
                record.set("landOptions", land);
            }
            record
        }
    };

    let prediction = gable::predict_price(&bundle, &record)?;
    for warning in &prediction.warnings {
        println!("Warning: {}", warning);
    }
    println!("Predicted price: {:.2}", prediction.price);
    Ok(())
}

fn inspect(bundle_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = ArtifactBundle::load(bundle_path)?;
    let pipeline = &bundle.pipeline;

    println!("Bundle: {}", bundle_path.display());
    println!("  Format version: {}", bundle.format_version);
    println!("  Created at:     {}", bundle.created_at.to_rfc3339());
    println!("  Model:          {}", bundle.regressor);

    println!("\nSchema ({} columns):", pipeline.registry().len());
    for (i, column) in pipeline.registry().columns().iter().enumerate() {
        println!("  {:>3}  {}", i, column);
    }

    println!("\nCategorical vocabularies:");
    for vocab in pipeline.encoder().vocabularies() {
        println!(
            "  {}: reference='{}', encoded={:?}",
            vocab.attribute(),
            vocab.reference(),
            vocab.encoded_values()
        );
    }

    println!(
        "\nNumeric scalers (polynomial degree {}):",
        pipeline.numeric().degree()
    );
    for scaler in pipeline.numeric().scalers() {
        println!(
            "  {}: mean={:.6}, scale={:.6}",
            scaler.column, scaler.mean, scaler.scale
        );
    }

    Ok(())
}
