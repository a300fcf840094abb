use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod error;
mod keys;
mod objects;
mod program;
mod rpc;
mod tx;

use cli::{Cli, Command};
use config::Config;
use keys::Keyring;
use rpc::RpcClient;

#[tokio::main]
async fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let cli = Cli::parse();
	let config = Config::load()?;

	// Both identities are derived up front so a missing or bad mnemonic
	// fails before any network traffic, whichever command was asked for.
	let keyring = Keyring::from_config(&config.keys)?;

	let rpc_url = commands::resolve_rpc(&cli, &config);
	tracing::debug!(%rpc_url, network = cli.network.as_str(), "resolved endpoint");
	let client = RpcClient::new(&rpc_url, Duration::from_secs(config.network.timeout_secs))?;

	match &cli.command {
		Command::Coin { command } => {
			commands::coin::run(&client, &config.program, &keyring, command).await
		}
		Command::Pool { command } => {
			commands::pool::run(&client, &config.program, &keyring, command).await
		}
		Command::Stake { command } => {
			commands::stake::run(&client, &config.program, &keyring, command).await
		}
		Command::Keys { command } => {
			commands::keys::run(&keyring, command);
			Ok(())
		}
	}
}
