//! freqgate CLI - run the frequency-selective noise gate over WAV files.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "freqgate")]
#[command(author, version, about = "Frequency-selective noise gate", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gate an audio file
    Process(commands::process::ProcessArgs),

    /// Report hop-by-hop detection statistics for an audio file
    Analyze(commands::analyze::AnalyzeArgs),

    /// List the gate's parameters
    Params(commands::params::ParamsArgs),

    /// List, show and save presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
