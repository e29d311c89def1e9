use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use stocktrack_core::StockConfig;

mod prompt;
mod render;
mod shell;

use prompt::TermPrompter;
use shell::Shell;

/// Stocktrack - terminal inventory tracker with admin and viewer accounts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (default: stocktrack.json, used only if present)
    #[arg(short, long, value_name = "FILE", default_value = "stocktrack.json")]
    config: PathBuf,

    /// Directory holding inventory.json, users.json and the log file
    #[arg(short, long, value_name = "DIR", env = "STOCKTRACK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive session (default)
    Run,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = StockConfig::from_file_or_default(&cli.config)
        .with_context(|| format!("failed to read config {}", cli.config.display()))?;
    if let Some(data_dir) = &cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Init { force } => init_config(&cli.config, &config, force),
        Commands::Run => run(config, cli.verbose),
    }
}

fn init_config(path: &Path, config: &StockConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
    }
    config
        .to_file(path)
        .with_context(|| format!("failed to write config {}", path.display()))?;

    println!("Wrote configuration to {}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn run(config: StockConfig, verbose: bool) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!("failed to create data directory {}", config.data_dir.display())
    })?;
    init_logging(&config.log_path(), verbose)?;

    tracing::info!(
        version = stocktrack_core::VERSION,
        data_dir = %config.data_dir.display(),
        "session started"
    );

    let mut shell = Shell::new(TermPrompter::new(), config);
    match shell.run() {
        Ok(()) => {}
        // Closed stdin ends the session like Exit
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            tracing::info!("input closed");
        }
        Err(e) => return Err(e).context("terminal I/O failed"),
    }

    tracing::info!("session ended");
    Ok(())
}

/// Send logs to an append-mode file so they stay off the interactive screen.
fn init_logging(path: &Path, verbose: bool) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
