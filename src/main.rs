//! tabwatch - active-tab monitoring coordinator.
//!
//! Main entry point for the tabwatch binary.

mod app;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::AppConfig;

/// tabwatch CLI.
#[derive(Parser)]
#[command(name = "tabwatch")]
#[command(about = "Active-tab monitoring coordinator with analysis and research surfaces")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    config: PathBuf,

    /// Persist state to this file (overrides the config file)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the coordinator in the foreground (default)
    Run,

    /// Run a scripted browsing session against the simulated host
    Demo,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;
    if cli.state_file.is_some() {
        config.state_file = cli.state_file;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let app = App::start(config).await?;
            info!("tabwatch running; press Ctrl-C to stop");
            tokio::signal::ctrl_c().await?;
            info!("Shutting down");
            app.shutdown().await
        }
        Commands::Demo => {
            let app = App::start(config).await?;
            app.run_demo().await?;
            app.shutdown().await
        }
    }
}
