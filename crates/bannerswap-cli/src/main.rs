mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bannerswap", about = "Banner detection and logo replacement tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show frame-sequence metadata
    Info(commands::info::InfoArgs),
    /// Detect the banner in every frame and save the corner track
    Detect(commands::detect::DetectArgs),
    /// Stabilize a saved corner track
    Stabilize(commands::stabilize::StabilizeArgs),
    /// Run the full detect/stabilize/composite pipeline
    Run(commands::run::RunArgs),
    /// Print or save a default pipeline config
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

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Detect(args) => commands::detect::run(args),
        Commands::Stabilize(args) => commands::stabilize::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
