//! VQB command line interface
//!
//! Runs the analyzer and the performance predictor in-process and prints
//! the results as JSON.
//!
//! Usage:
//!   vqb analyze "SELECT * FROM users WHERE id = 1"
//!   vqb predict "SELECT ..." --history history.json
//!   vqb report --visual query.json
//!   vqb build query.json

mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::VqbConfig;
use logging::LoggingConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};
use vqb_analyzer::QueryAnalyzer;
use vqb_core::{QueryReport, TrainingSample, VisualQuery};
use vqb_predictor::{PerformancePredictor, PredictorConfig};

#[derive(Parser)]
#[command(name = "vqb", version)]
#[command(about = "Analyze SQL statements and predict their execution time")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true, env = "VQB_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the structural analysis of a SQL statement
    Analyze { sql: String },
    /// Predict the execution time of a SQL statement
    Predict {
        sql: String,
        /// JSON array of past executions to train on
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Print analysis, prediction and suggestions for one statement
    Report {
        /// SQL statement; takes precedence over `--visual` unless empty
        #[arg(long)]
        sql: Option<String>,
        /// Visual query JSON file to convert to SQL first
        #[arg(long)]
        visual: Option<PathBuf>,
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Print the SQL for a visual query JSON file
    Build { path: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = VqbConfig::resolve(cli.config.as_deref())?;
    let _log_guard = logging::init(LoggingConfig::from_settings(&config.logging, cli.verbose))?;

    let analyzer = QueryAnalyzer::with_config(config.analyzer.clone());

    match cli.command {
        Command::Analyze { sql } => {
            print_json(&analyzer.analyze(&sql), cli.pretty)?;
        }
        Command::Predict { sql, history } => {
            let analysis = analyzer.analyze(&sql);
            let predictor = load_predictor(&config.predictor, history.as_deref())?;
            print_json(&predictor.predict(&analysis)?, cli.pretty)?;
        }
        Command::Report {
            sql,
            visual,
            history,
        } => {
            // An empty statement counts as missing
            let sql = match (sql.filter(|sql| !sql.is_empty()), visual) {
                (Some(sql), _) => sql,
                (None, Some(path)) => read_visual_query(&path)?.to_sql(),
                (None, None) => VisualQuery::new().to_sql(),
            };
            let analysis = analyzer.analyze(&sql);
            let predictor = load_predictor(&config.predictor, history.as_deref())?;
            let prediction = predictor.predict(&analysis)?;
            print_json(&QueryReport::new(sql, analysis, prediction), cli.pretty)?;
        }
        Command::Build { path } => {
            println!("{}", read_visual_query(&path)?.to_sql());
        }
    }

    Ok(())
}

/// Builds a predictor for one invocation, trained on the history file when
/// given and on the synthetic set otherwise.
fn load_predictor(config: &PredictorConfig, history: Option<&Path>) -> Result<PerformancePredictor> {
    let mut predictor = PerformancePredictor::with_config(config.clone());

    match history {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read training history: {}", path.display()))?;
            let samples = TrainingSample::list_from_json(&json)
                .with_context(|| format!("Invalid training history: {}", path.display()))?;
            let summary = predictor
                .train(&samples)
                .with_context(|| format!("Failed to train on {}", path.display()))?;
            tracing::info!(
                history = %path.display(),
                samples = summary.samples,
                synthetic = summary.synthetic,
                discarded = summary.discarded,
                "Loaded training history"
            );
        }
        None => {
            predictor.ensure_trained()?;
        }
    }

    Ok(predictor)
}

fn read_visual_query(path: &Path) -> Result<VisualQuery> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read visual query: {}", path.display()))?;
    VisualQuery::from_json(&json)
        .with_context(|| format!("Invalid visual query: {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
