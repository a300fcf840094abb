use anyhow::Result;
use tracing::info;

use crate::cli::CoinCommand;
use crate::commands::print_outcome;
use crate::config::ProgramConfig;
use crate::error::OpsError;
use crate::keys::Keyring;
use crate::objects::{first_matching_coin, Balance, ExecutionResult};
use crate::program;
use crate::rpc::ChainClient;
use crate::tx::ProgramTransaction;

pub async fn run(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
	cmd: &CoinCommand,
) -> Result<()> {
	match cmd {
		CoinCommand::Split { pieces } => {
			let outcome = split(client, program_cfg, keyring, *pieces).await?;
			print_outcome("Split", &outcome);
		}
		CoinCommand::Transfer => {
			let outcome = transfer_to_player(client, program_cfg, keyring).await?;
			print_outcome("Transfer", &outcome);
		}
		CoinCommand::Balance => {
			let balance = player_balance(client, program_cfg, keyring).await?;
			println!("Coin type: {}", balance.coin_type);
			println!("  Objects: {}", balance.coin_object_count);
			println!("  Balance: {}", balance.total_balance);
		}
	}
	Ok(())
}

/// Cut `pieces` chunks of the fixed size off the first admin coin that can
/// afford one chunk, transferring each piece back to the admin.
pub async fn split(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
	pieces: u16,
) -> Result<ExecutionResult, OpsError> {
	let admin = keyring.admin.address();
	let objects = client.owned_objects(admin, None).await?;
	let coin_type = program::coin_object_type(&program_cfg.token_package);
	let coin = first_matching_coin(&objects, &coin_type, program::COIN_CHUNK, admin)?;
	info!(coin = %coin.object_id, pieces, "splitting coin");

	let mut tx = ProgramTransaction::new();
	let source = tx.object(coin.object_id)?;
	for _ in 0..pieces {
		let piece = tx.split_coin(source, program::COIN_CHUNK)?;
		tx.transfer_object(piece, admin)?;
	}
	client.execute(&tx, &keyring.admin).await
}

/// Move the first admin coin of the EMBR type to the player, whole.
pub async fn transfer_to_player(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
) -> Result<ExecutionResult, OpsError> {
	let admin = keyring.admin.address();
	let objects = client.owned_objects(admin, None).await?;
	let coin_type = program::coin_object_type(&program_cfg.token_package);
	// Any coin of the right type will do here, regardless of balance.
	let coin = first_matching_coin(&objects, &coin_type, 0, admin)?;
	info!(coin = %coin.object_id, "transferring coin to player");

	let mut tx = ProgramTransaction::new();
	let coin_arg = tx.object(coin.object_id)?;
	tx.transfer_object(coin_arg, keyring.player.address())?;
	client.execute(&tx, &keyring.admin).await
}

/// Aggregate EMBR balance held by the player. Read-only.
pub async fn player_balance(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
) -> Result<Balance, OpsError> {
	let token = program::token_type(&program_cfg.token_package);
	client.balance(keyring.player.address(), &token).await
}
