pub mod coin;
pub mod keys;
pub mod pool;
pub mod stake;

use crate::cli::Cli;
use crate::config::Config;
use crate::objects::ExecutionResult;

/// Resolve the RPC URL from CLI flag or config.
pub fn resolve_rpc(cli: &Cli, config: &Config) -> String {
	cli.rpc_url
		.clone()
		.unwrap_or_else(|| config.rpc_url(cli.network.as_str()).to_owned())
}

/// Uniform result block printed after every successful submission.
pub fn print_outcome(label: &str, outcome: &ExecutionResult) {
	println!("{label} executed.");
	println!("  Digest: {}", outcome.digest);
	for id in &outcome.created {
		println!("  Created: {id}");
	}
}
