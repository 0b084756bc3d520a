//! Symbiosis swap terminal - Main executable
//!
//! Interactive console client that quotes and executes token swaps through
//! the Symbiosis aggregator and keeps a local history of every attempt.
use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use log::{error, info};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use symbiosis_swap_terminal::{create_application, Config, Router, ServiceContainer, SwapPresenter};

#[derive(Parser, Debug)]
#[command(version, about = "Terminal token swaps through the Symbiosis aggregator")]
struct Args {
    /// Network to start on (ethereum, bsc, polygon, ...)
    #[arg(long)]
    network: Option<String>,

    /// Start in testnet mode
    #[arg(long)]
    testnet: bool,

    /// Path of the transaction history file
    #[arg(long)]
    history: Option<PathBuf>,

    /// Wallet to connect on demand
    #[arg(long)]
    wallet: Option<String>,
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!(
        "Starting Symbiosis swap terminal v{}",
        symbiosis_swap_terminal::VERSION
    );

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(network) = args.network {
        config.default_network = network;
    }
    if args.testnet {
        config.testnet = true;
    }
    if let Some(history) = args.history {
        config.history_path = history;
    }
    if args.wallet.is_some() {
        config.wallet_id = args.wallet;
    }

    let services = ServiceContainer::new(config)?;
    let (controller, router) = create_application(&services);

    controller.reload_catalog().await?;
    controller.show_form().await?;
    info!("Type 'help' for the list of commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match router.handle_line(&line).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => error!("Command failed: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    info!("Bye");
    Ok(())
}
