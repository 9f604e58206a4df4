//! incgraph CLI - include-graph analysis from the command line.
//!
//! Reads a GraphML include graph, reports its structure, annotates it for
//! Gephi, or extracts its largest strongly connected component.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use incgraph::AnalysisConfig;
use tracing_subscriber::EnvFilter;

mod cli;

/// incgraph: structural analysis of source include graphs.
#[derive(Parser)]
#[command(name = "incgraph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Analysis configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write component, color and label attributes onto every node
    Annotate {
        /// Input GraphML file
        input: PathBuf,

        /// Output GraphML file
        output: PathBuf,

        /// Number of most-included nodes to label (overrides the config file)
        #[arg(long)]
        label_top: Option<usize>,
    },

    /// Print structural statistics
    Stats {
        /// Input GraphML file
        input: PathBuf,

        /// Emit the statistics as JSON
        #[arg(long)]
        json: bool,

        /// Length of each ranking (overrides the config file)
        #[arg(long)]
        top: Option<usize>,

        /// Stop counting cycles after this many (0 disables the limit)
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Stop counting cycles after this many seconds (0 disables the limit)
        #[arg(long)]
        cycle_timeout: Option<u64>,
    },

    /// Write the subgraph induced by the largest strongly connected component
    ExtractScc {
        /// Input GraphML file
        input: PathBuf,

        /// Output GraphML file
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = load_config(cli.config).and_then(|config| match cli.command {
        Commands::Annotate {
            input,
            output,
            label_top,
        } => cli::annotate::run(&input, &output, &config, label_top),
        Commands::Stats {
            input,
            json,
            top,
            max_cycles,
            cycle_timeout,
        } => {
            let overrides = cli::stats::Overrides {
                top,
                max_cycles,
                cycle_timeout,
            };
            cli::stats::run(&input, &config, overrides, json)
        }
        Commands::ExtractScc { input, output } => cli::extract::run(&input, &output),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<AnalysisConfig, incgraph::Error> {
    match path {
        Some(path) => AnalysisConfig::load(&path),
        None => Ok(AnalysisConfig::default()),
    }
}
