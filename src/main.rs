//! @ai:module:intent CLI for scoring recognition output against labels
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rec_metrics::{
    format_report, EvalConfig, Evaluator, OutputFormat, PairLoader, PairLoaderTrait,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rec-eval")]
#[command(about = "Score text-recognition predictions against ground-truth labels")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a JSON-lines file of prediction/label records
    Eval {
        /// Path to records file (one {"prediction", "label"} object per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Metric to use (RecMetric or RecFullMetric)
        #[arg(short, long)]
        metric: Option<String>,

        /// Primary indicator to highlight
        #[arg(long)]
        main_indicator: Option<String>,

        /// Records per batch
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Minimum stripped label length for the long strata
        #[arg(long)]
        long_word_min_len: Option<usize>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "rec-eval.toml")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

struct EvalArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    metric: Option<String>,
    main_indicator: Option<String>,
    batch_size: Option<usize>,
    long_word_min_len: Option<usize>,
    format: Format,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rec_metrics=info".parse()?)
                .add_directive("rec_eval=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            input,
            config,
            metric,
            main_indicator,
            batch_size,
            long_word_min_len,
            format,
        } => evaluate(EvalArgs {
            input,
            config,
            metric,
            main_indicator,
            batch_size,
            long_word_min_len,
            format,
        }),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Run an evaluation and print the cumulative report
/// @ai:effects fs:read, io:stdout
fn evaluate(args: EvalArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;

    if let Some(metric) = args.metric {
        config.metric.name = metric;
    }
    if let Some(indicator) = args.main_indicator {
        config.metric.main_indicator = Some(indicator);
    }
    if let Some(batch_size) = args.batch_size {
        config.run.batch_size = batch_size;
    }
    if let Some(min_len) = args.long_word_min_len {
        config.metric.long_word_min_len = min_len;
    }

    let mut metric = config
        .metric
        .build()
        .context("Failed to build metric from configuration")?;

    let records = PairLoader::new()
        .load(&args.input)
        .with_context(|| format!("Failed to load records from {}", args.input.display()))?;

    if records.is_empty() {
        tracing::warn!("No records found in {}", args.input.display());
    }

    let report = Evaluator::new(config.run.batch_size)
        .run(metric.as_mut(), &records)
        .context("Evaluation failed")?;

    println!(
        "{}",
        format_report(&report, metric.main_indicator(), args.format.into())
    );
    Ok(())
}

/// @ai:intent Load config from path or fall back to defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<EvalConfig> {
    match path {
        Some(path) => EvalConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EvalConfig::default()),
    }
}

/// @ai:intent Write the default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    EvalConfig::default()
        .save(&output)
        .with_context(|| format!("Failed to write config to {}", output.display()))?;
    tracing::info!("Configuration written to {}", output.display());
    Ok(())
}
