//! Command line argument parsing using clap.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mayday - multi-label triage for disaster-response messages
#[derive(Parser, Debug, Clone)]
#[command(name = "mayday")]
#[command(about = "Train and serve a multi-label disaster-message classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct MaydayArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl MaydayArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train the classification pipeline and write its artifact
    Train(TrainArgs),

    /// Serve the dashboard and inference endpoints
    Serve(ServeArgs),

    /// Classify a single message with a trained pipeline
    Classify(ClassifyArgs),
}

/// Arguments for the training batch job
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Path to the SQLite corpus database
    #[arg(short, long, value_name = "DATABASE")]
    pub database: PathBuf,

    /// Corpus table name (default: first table in the database)
    #[arg(short, long)]
    pub table: Option<String>,

    /// Fail unless the corpus has exactly this many category columns
    #[arg(long, value_name = "N")]
    pub expect_categories: Option<usize>,

    /// Output path for the trained pipeline artifact
    #[arg(short, long, value_name = "MODEL")]
    pub model: PathBuf,

    /// Fraction of the corpus held out for evaluation
    #[arg(long, default_value = "0.2")]
    pub test_size: f64,

    /// Random seed for the holdout and cross-validation splits
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of cross-validation folds in the grid search
    #[arg(long, default_value = "5")]
    pub folds: usize,
}

/// Arguments for the HTTP service
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Path to the SQLite corpus database
    #[arg(short, long, value_name = "DATABASE")]
    pub database: PathBuf,

    /// Corpus table name (default: first table in the database)
    #[arg(short, long)]
    pub table: Option<String>,

    /// Path to the trained pipeline artifact
    #[arg(short, long, value_name = "MODEL")]
    pub model: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    pub addr: SocketAddr,
}

/// Arguments for one-shot classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Path to the trained pipeline artifact
    #[arg(short, long, value_name = "MODEL")]
    pub model: PathBuf,

    /// The message to classify
    #[arg(value_name = "QUERY")]
    pub query: String,
}
