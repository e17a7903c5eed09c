//! Flow-model compiler CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate a file of model lines
//! cargo run --bin flowmodel-cli -- check models.txt
//!
//! # Lift interface models from a JSON request
//! cargo run --bin flowmodel-cli -- lift request.json --config model.yaml --format json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use flowmodel_ir::config::{ModelConfig, ValidatedConfig};
use flowmodel_ir::pipeline::{LiftRequest, PipelineReport};
use flowmodel_ir::{InMemoryClassHierarchy, ModelPipeline};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "flowmodel-cli")]
#[command(
    about = "Library flow-model compiler: validate model lines and lift interface models",
    long_about = None
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate every line of a model file
    Check {
        /// Model file, one record per line
        file: PathBuf,

        /// YAML config (schema v1)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Collect observations and lift interface models
    Lift {
        /// JSON lift request
        file: PathBuf,

        /// YAML config (schema v1)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let outcome = match cli.command {
        Commands::Check { file, config } => check(&file, config.as_deref()),
        Commands::Lift {
            file,
            config,
            format,
        } => lift(&file, config.as_deref(), format),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool, json: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&Path>) -> flowmodel_ir::Result<ValidatedConfig> {
    match path {
        Some(path) => Ok(ModelConfig::from_yaml(path)?),
        None => Ok(ValidatedConfig::default()),
    }
}

/// Returns `Ok(false)` when any line was rejected
fn check(file: &Path, config: Option<&Path>) -> flowmodel_ir::Result<bool> {
    let config = load_config(config)?;
    let content = std::fs::read_to_string(file)?;
    let lines: Vec<&str> = content.lines().collect();

    let pipeline = ModelPipeline::from_config(InMemoryClassHierarchy::new(), &config)?;
    let report = pipeline.ingest_batch(&file.display().to_string(), &lines);

    for rejected in &report.rejected {
        match rejected.line_number {
            Some(n) => println!("{}:{}: {}", rejected.source, n, rejected.reason),
            None => println!("{}: {}", rejected.source, rejected.reason),
        }
    }
    println!(
        "{} accepted, {} rejected",
        report.accepted.len(),
        report.rejected.len()
    );
    Ok(report.is_clean())
}

/// Returns `Ok(false)` when any line was rejected
fn lift(file: &Path, config: Option<&Path>, format: OutputFormat) -> flowmodel_ir::Result<bool> {
    let config = load_config(config)?;
    let request = LiftRequest::from_json(&std::fs::read_to_string(file)?)?;

    let pipeline = ModelPipeline::from_config(request.hierarchy()?, &config)?;
    let report = pipeline.run(&request.work()?);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }
    Ok(report.rejected.is_empty())
}

fn print_text(report: &PipelineReport) {
    for interface in &report.interfaces {
        let result = &interface.result;
        println!("# {}", interface.interface);
        for model in &result.lifted {
            println!("{}", model.to_annotated());
        }
        for candidate in &result.spurious {
            println!("{}", candidate.report());
        }
        if result.is_deferred() {
            let pending: Vec<&str> = result.pending.iter().map(String::as_str).collect();
            println!("# pending: {}", pending.join(", "));
        }
    }
    for rejected in &report.rejected {
        eprintln!("rejected [{}] {}: {}", rejected.source, rejected.line, rejected.reason);
    }

    let stats = &report.stats;
    eprintln!(
        "{} interfaces, {} lifted, {} spurious, {} deferred, {} rejected",
        stats.interfaces, stats.lifted, stats.spurious, stats.deferred, stats.rejected
    );
}
