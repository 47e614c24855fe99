mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "enlarge", about = "Image zoom geometry and animation tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Widget config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the enlarged target box and the alignment transform
    Target(commands::target::TargetArgs),
    /// Evaluate the drag mapping and release decision for vertical offsets
    Drag(commands::drag::DragArgs),
    /// Run a scripted zoom session through the spring engine
    Simulate(commands::simulate::SimulateArgs),
    /// Print or save the default widget config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = commands::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Target(args) => commands::target::run(args, &config),
        Commands::Drag(args) => commands::drag::run(args, &config),
        Commands::Simulate(args) => commands::simulate::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
