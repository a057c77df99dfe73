use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use studyhall::config::Config;

#[derive(Parser)]
#[command(name = "studyhall")]
#[command(about = "Gamified study-tools REST backend")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to studyhall.toml in the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write a starter studyhall.toml configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from("studyhall.toml"));

    match cli.command {
        Some(Commands::Init { force }) => {
            Config::write_default(&config_path, force)?;
            println!("Wrote {}", config_path.display());
            Ok(())
        }
        Some(Commands::Serve { port }) => {
            let mut config = Config::load(&config_path)?;
            if let Some(port) = port {
                config.server.port = port;
            }
            studyhall::server::serve(config)
        }
        None => {
            let config = Config::load(&config_path)?;
            studyhall::server::serve(config)
        }
    }
}
