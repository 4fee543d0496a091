//! Tidings - Activity digest aggregator
//!
//! Main entry point for the Tidings CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tidings::config::{self, ClientsConfig};
use tidings::{digest, logging};

/// Tidings - config-driven activity digest for GitHub repos and Matrix rooms
#[derive(Parser, Debug)]
#[command(name = "tidings")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ./clients.toml, then ~/.config/tidings/clients.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch from all configured clients and print the digest (default)
    Digest,

    /// Validate the configuration without fetching anything
    Check,
}

#[tokio::main]
async fn main() {
    if let Err(e) = logging::init() {
        eprintln!("Warning: {}", e);
    }

    let cli = Cli::parse();

    let config_path = config::resolve_config_path(cli.config);
    let clients_config = match ClientsConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Invalid configuration is fatal before any fetch begins
    if let Err(e) = config::validate_config_result(&clients_config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    match cli.command.unwrap_or(Commands::Digest) {
        Commands::Check => {
            println!(
                "Configuration OK: {} clients in {}",
                clients_config.clients.len(),
                config_path.display()
            );
        }
        Commands::Digest => match digest::run(&clients_config).await {
            Ok(report) => print!("{}", report),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
    }
}
