//! Mayday CLI binary.

use std::process;

use clap::Parser;
use mayday::cli::{args::*, commands::*};
use tracing::Level;
use tracing_subscriber::fmt;

fn main() {
    // Parse command line arguments using clap
    let args = MaydayArgs::parse();

    // Map verbosity onto the tracing subscriber
    let level = match args.verbosity() {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    fmt().with_max_level(level).with_target(false).init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
