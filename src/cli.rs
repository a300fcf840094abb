use clap::{Parser, Subcommand, ValueEnum};

use crate::objects::ObjectId;
use crate::program;

#[derive(Parser)]
#[command(
	name = "embr-ops",
	about = "Operations CLI for the EMBR token and its staking program.",
	version
)]
pub struct Cli {
	/// Network to connect to.
	#[arg(long, default_value = "testnet", global = true)]
	pub network: Network,

	/// Override RPC endpoint URL.
	#[arg(long, global = true)]
	pub rpc_url: Option<String>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Clone, ValueEnum)]
pub enum Network {
	Testnet,
	Mainnet,
}

impl Network {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Testnet => "testnet",
			Self::Mainnet => "mainnet",
		}
	}
}

#[derive(Subcommand)]
pub enum Command {
	/// Split, move, and inspect EMBR coins.
	Coin {
		#[command(subcommand)]
		command: CoinCommand,
	},

	/// Fund and drain the game liquidity pool.
	Pool {
		#[command(subcommand)]
		command: PoolCommand,
	},

	/// Stake EMBR and manage stake positions.
	Stake {
		#[command(subcommand)]
		command: StakeCommand,
	},

	/// Inspect the locally derived identities.
	Keys {
		#[command(subcommand)]
		command: KeysCommand,
	},
}

// -- Coin subcommands --

#[derive(Subcommand)]
pub enum CoinCommand {
	/// Cut fixed-size pieces off an admin coin.
	Split {
		/// Number of pieces to cut.
		#[arg(long, default_value_t = program::DEFAULT_SPLIT_PIECES)]
		pieces: u16,
	},

	/// Transfer a whole admin coin to the player address.
	Transfer,

	/// Show the player's aggregate EMBR balance.
	Balance,
}

// -- Pool subcommands --

#[derive(Subcommand)]
pub enum PoolCommand {
	/// Deposit an admin coin into the liquidity pool.
	Fund,

	/// Withdraw the fixed amount from the pool to the admin address.
	Withdraw,
}

// -- Stake subcommands --

#[derive(Subcommand)]
pub enum StakeCommand {
	/// Stake a player coin for the fixed duration.
	Enter,

	/// Redeem a stake receipt and claim the reward.
	Exit {
		/// Object id of the stake receipt to redeem.
		#[arg(long)]
		receipt: ObjectId,
	},

	/// List the stake receipts held by the player.
	Receipts,

	/// Register the staking rule on the config object (admin action).
	AddRule,
}

// -- Keys subcommands --

#[derive(Subcommand)]
pub enum KeysCommand {
	/// Print the derived admin and player addresses.
	Show,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
		Cli::try_parse_from(args.iter().copied())
	}

	#[test]
	fn every_operation_has_a_spelling() {
		assert!(matches!(
			parse(&["embr-ops", "coin", "split"]).unwrap().command,
			Command::Coin { command: CoinCommand::Split { pieces: 5 } }
		));
		assert!(matches!(
			parse(&["embr-ops", "coin", "transfer"]).unwrap().command,
			Command::Coin { command: CoinCommand::Transfer }
		));
		assert!(matches!(
			parse(&["embr-ops", "coin", "balance"]).unwrap().command,
			Command::Coin { command: CoinCommand::Balance }
		));
		assert!(matches!(
			parse(&["embr-ops", "pool", "fund"]).unwrap().command,
			Command::Pool { command: PoolCommand::Fund }
		));
		assert!(matches!(
			parse(&["embr-ops", "pool", "withdraw"]).unwrap().command,
			Command::Pool { command: PoolCommand::Withdraw }
		));
		assert!(matches!(
			parse(&["embr-ops", "stake", "enter"]).unwrap().command,
			Command::Stake { command: StakeCommand::Enter }
		));
		assert!(matches!(
			parse(&["embr-ops", "stake", "receipts"]).unwrap().command,
			Command::Stake { command: StakeCommand::Receipts }
		));
		assert!(matches!(
			parse(&["embr-ops", "stake", "add-rule"]).unwrap().command,
			Command::Stake { command: StakeCommand::AddRule }
		));
		assert!(matches!(
			parse(&["embr-ops", "keys", "show"]).unwrap().command,
			Command::Keys { command: KeysCommand::Show }
		));
	}

	#[test]
	fn split_accepts_a_piece_count() {
		let cli = parse(&["embr-ops", "coin", "split", "--pieces", "3"]).unwrap();
		assert!(matches!(
			cli.command,
			Command::Coin { command: CoinCommand::Split { pieces: 3 } }
		));
	}

	#[test]
	fn exit_requires_a_receipt_id() {
		assert!(parse(&["embr-ops", "stake", "exit"]).is_err());

		let receipt = format!("0x{}", "7e".repeat(32));
		let cli = parse(&["embr-ops", "stake", "exit", "--receipt", &receipt]).unwrap();
		match cli.command {
			Command::Stake { command: StakeCommand::Exit { receipt: parsed } } => {
				assert_eq!(parsed.to_string(), receipt);
			}
			_ => panic!("parsed into the wrong command"),
		}

		assert!(parse(&["embr-ops", "stake", "exit", "--receipt", "0x123"]).is_err());
	}

	#[test]
	fn unknown_commands_are_rejected() {
		assert!(parse(&["embr-ops"]).is_err());
		assert!(parse(&["embr-ops", "mint"]).is_err());
		assert!(parse(&["embr-ops", "coin", "mint"]).is_err());
		assert!(parse(&["embr-ops", "stake", "exit", "--receipt"]).is_err());
	}

	#[test]
	fn network_flag_is_global() {
		let cli = parse(&["embr-ops", "coin", "balance", "--network", "mainnet"]).unwrap();
		assert_eq!(cli.network.as_str(), "mainnet");

		let cli = parse(&["embr-ops", "pool", "fund"]).unwrap();
		assert_eq!(cli.network.as_str(), "testnet");
	}
}
