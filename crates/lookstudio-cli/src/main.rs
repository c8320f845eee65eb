mod commands;
mod progress;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lookstudio", about = "Edit photos with text instructions using Gemini")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Studio config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit an image with a prompt or a style preset
    Edit(commands::edit::EditArgs),
    /// List the available style presets
    Styles,
    /// Show image file metadata and whether it can be edited
    Info(commands::info::InfoArgs),
    /// Print or save the default studio config
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
        Commands::Edit(args) => commands::edit::run(args, &config),
        Commands::Styles => commands::styles::run(&config),
        Commands::Info(args) => commands::info::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
