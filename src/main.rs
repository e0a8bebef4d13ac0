//! @ai:module:intent CLI for the ApacheBench result analyzer
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use perf_analyzer::{
    metrics::{ComparisonAggregator, ComparisonAggregatorTrait, Grouping, ResultSet},
    report::{JsonReporter, JsonReporterTrait, ReportGenerator, TextReporterTrait},
    AnalyzerConfig, ResultLoader, ResultLoaderTrait,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "perf-analyzer")]
#[command(about = "Analyzes ApacheBench results and generates comparison reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse result files and write the report, CSV and JSON (default)
    Analyze(AnalyzeArgs),

    /// Regenerate the text report and CSV from a previously exported JSON file
    Report {
        /// Path to performance_results.json
        #[arg(short, long)]
        results: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (defaults to the directory of the JSON file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "analyzer.toml")]
        output: PathBuf,
    },
}

#[derive(Args, Default)]
struct AnalyzeArgs {
    /// Directory containing <test-name>_results.txt files
    #[arg(short = 'd', long)]
    results_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (defaults to the results directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print the report to stdout
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("perf_analyzer=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Analyze(AnalyzeArgs::default())) {
        Commands::Analyze(args) => analyze(args),
        Commands::Report {
            results,
            config,
            output,
        } => regenerate(results, config, output),
        Commands::Init { output } => init_config(output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// @ai:intent Load result files and write all reports
/// @ai:effects fs:read, fs:write
fn analyze(args: AnalyzeArgs) -> Result<()> {
    let config = AnalyzerConfig::load_or_default(args.config.as_deref())?;
    let results_dir = args
        .results_dir
        .unwrap_or_else(|| config.paths.results_dir.clone());
    let output_dir = args.output.unwrap_or_else(|| results_dir.clone());

    tracing::info!("Loading results from {}", results_dir.display());

    let loader = ResultLoader::new(&config.paths.result_suffix);
    let results = loader.load_required(&results_dir)?;

    write_reports(&config, &results, &output_dir, args.quiet, true)
}

/// @ai:intent Rebuild the text report and CSV from an exported JSON result set
/// @ai:post the JSON file itself is left untouched
/// @ai:effects fs:read, fs:write
fn regenerate(
    results_path: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = AnalyzerConfig::load_or_default(config.as_deref())?;
    let results = JsonReporter::new()
        .load(&results_path)
        .with_context(|| format!("Failed to load {}", results_path.display()))?;

    let output_dir = output.unwrap_or_else(|| {
        results_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });

    write_reports(&config, &results, &output_dir, false, false)
}

/// @ai:intent Compare results, print the report and write the exports
/// @ai:effects io, fs:write
fn write_reports(
    config: &AnalyzerConfig,
    results: &ResultSet,
    output_dir: &Path,
    quiet: bool,
    export_json: bool,
) -> Result<()> {
    let aggregator = ComparisonAggregator::new(Grouping::from_config(config));
    let now = chrono::Local::now().naive_local();

    let Some(comparison) = aggregator.compare(results, now) else {
        anyhow::bail!("No test results loaded!");
    };

    let generator = ReportGenerator::new(config);

    if !quiet {
        println!("{}", generator.text().render(&comparison));
    }

    let generated = if export_json {
        generator.generate_all(results, &comparison, output_dir)?
    } else {
        generator.generate_summaries(results, &comparison, output_dir)?
    };

    if !quiet {
        println!();
        println!("Report saved to: {}", generated.report.display());
    }

    Ok(())
}

/// @ai:intent Write the default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = AnalyzerConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}
