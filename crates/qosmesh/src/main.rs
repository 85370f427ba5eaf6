//! QosMesh - QoS-aware path selection
//!
//! Command-line front end for the ant-colony path optimizer.

use anyhow::Result;
use clap::{Parser, Subcommand};
use qosmesh::commands::{self, RandomPathOptions, SolveOptions};
use qosmesh::config::{Config, LoggingConfig};
use qosmesh_topology::NodeId;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "qosmesh")]
#[command(about = "Multi-objective QoS path selection with ant-colony optimization")]
struct Args {
    /// Configuration file (YAML)
    #[arg(short, long, global = true, env = "QOSMESH_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find a low-cost path between two nodes
    Solve {
        /// Topology file (YAML)
        #[arg(short, long)]
        topology: PathBuf,

        #[arg(short, long)]
        source: NodeId,

        #[arg(short = 'T', long)]
        target: NodeId,

        /// Ants per iteration
        #[arg(long)]
        ants: Option<usize>,

        #[arg(long)]
        iterations: Option<usize>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Cost weights as `delay,reliability,bandwidth`
        #[arg(long)]
        weights: Option<String>,
    },

    /// Build a random baseline path between two nodes
    RandomPath {
        /// Topology file (YAML)
        #[arg(short, long)]
        topology: PathBuf,

        #[arg(short, long)]
        source: NodeId,

        #[arg(short = 'T', long)]
        target: NodeId,

        /// Maximum number of nodes on the path
        #[arg(long)]
        max_length: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write a default configuration file
    InitConfig,
}

fn init_logging(logging: &LoggingConfig, debug: bool) {
    let level = if debug { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let command = match args.command {
        Command::InitConfig => {
            let config = Config::create_default(args.config)?;
            println!("Wrote default configuration to {}", config.config_path().display());
            return Ok(());
        }
        command => command,
    };

    let config = Config::load_or_default(args.config)?;
    init_logging(&config.logging, args.debug);
    info!("Using configuration from {}", config.config_path().display());

    let output = match command {
        Command::Solve {
            topology,
            source,
            target,
            ants,
            iterations,
            seed,
            weights,
        } => {
            let weights = weights.as_deref().map(commands::parse_weights).transpose()?;
            commands::run_solve(
                &config,
                &SolveOptions {
                    topology,
                    source,
                    target,
                    ants,
                    iterations,
                    seed,
                    weights,
                },
            )?
        }
        Command::RandomPath {
            topology,
            source,
            target,
            max_length,
            seed,
        } => commands::run_random_path(
            &config,
            &RandomPathOptions {
                topology,
                source,
                target,
                max_length,
                seed,
            },
        )?,
        Command::InitConfig => return Ok(()),
    };

    print!("{}", output);
    Ok(())
}
