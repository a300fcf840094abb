use anyhow::Result;
use tracing::info;

use crate::cli::StakeCommand;
use crate::commands::print_outcome;
use crate::config::ProgramConfig;
use crate::error::OpsError;
use crate::keys::Keyring;
use crate::objects::{first_matching_coin, ExecutionResult, ObjectId, OwnedObject};
use crate::program;
use crate::rpc::ChainClient;
use crate::tx::ProgramTransaction;

pub async fn run(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
	cmd: &StakeCommand,
) -> Result<()> {
	match cmd {
		StakeCommand::Enter => {
			let outcome = enter(client, program_cfg, keyring).await?;
			print_outcome("Stake", &outcome);
		}
		StakeCommand::Exit { receipt } => {
			let outcome = exit(client, program_cfg, keyring, *receipt).await?;
			print_outcome("Unstake", &outcome);
		}
		StakeCommand::Receipts => {
			let receipts = receipts(client, program_cfg, keyring).await?;
			if receipts.is_empty() {
				println!("No stake receipts held by {}.", keyring.player.address());
			} else {
				for (index, receipt) in receipts.iter().enumerate() {
					println!("#{}  id={}", index + 1, receipt.object_id);
				}
				println!("\n{} receipt(s) total.", receipts.len());
			}
		}
		StakeCommand::AddRule => {
			let outcome = add_rule(client, program_cfg, keyring).await?;
			print_outcome("Add rule", &outcome);
		}
	}
	Ok(())
}

/// Stake the player's first EMBR coin for the fixed duration. The receipt
/// minted by the call goes back to the player.
pub async fn enter(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
) -> Result<ExecutionResult, OpsError> {
	let player = keyring.player.address();
	let objects = client.owned_objects(player, None).await?;
	let coin_type = program::coin_object_type(&program_cfg.token_package);
	let coin = first_matching_coin(&objects, &coin_type, 0, player)?;
	info!(coin = %coin.object_id, days = program::STAKE_DURATION_DAYS, "staking coin");

	let mut tx = ProgramTransaction::new();
	let coin_arg = tx.object(coin.object_id)?;
	let pool = tx.shared_object(program_cfg.liquidity_pool, true)?;
	let clock = tx.shared_object(program::clock_id(), false)?;
	let config = tx.shared_object(program_cfg.staking_config, false)?;
	let days = tx.pure_u64(program::STAKE_DURATION_DAYS)?;
	let receipt = tx.program_call(
		program_cfg.staking_package,
		program::STAKING_MODULE,
		program::STAKE_FN,
		vec![coin_arg, pool, clock, config, days],
	)?;
	tx.transfer_object(receipt, player)?;
	tx.set_gas_budget(program::STAKE_GAS_BUDGET);
	client.execute(&tx, &keyring.player).await
}

/// Redeem the given stake receipt; principal plus reward goes back to the
/// player as a fresh coin.
pub async fn exit(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
	receipt: ObjectId,
) -> Result<ExecutionResult, OpsError> {
	let player = keyring.player.address();
	info!(%receipt, "unstaking");

	let mut tx = ProgramTransaction::new();
	let receipt_arg = tx.object(receipt)?;
	let clock = tx.shared_object(program::clock_id(), false)?;
	let reward = tx.program_call(
		program_cfg.staking_package,
		program::STAKING_MODULE,
		program::UNSTAKE_FN,
		vec![receipt_arg, clock],
	)?;
	tx.transfer_object(reward, player)?;
	client.execute(&tx, &keyring.player).await
}

/// Stake receipts currently owned by the player, filtered server-side by
/// the receipt type.
pub async fn receipts(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
) -> Result<Vec<OwnedObject>, OpsError> {
	let receipt_tag = program::receipt_type(&program_cfg.staking_package);
	client.owned_objects(keyring.player.address(), Some(&receipt_tag)).await
}

/// Register the staking rule on the config object. Admin action; the rule
/// parameters are fixed at compile time.
pub async fn add_rule(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
) -> Result<ExecutionResult, OpsError> {
	info!(days = program::STAKE_DURATION_DAYS, apy_bps = program::RULE_APY_BPS, "adding staking rule");

	let mut tx = ProgramTransaction::new();
	let cap = tx.object(program_cfg.admin_cap)?;
	let config = tx.shared_object(program_cfg.staking_config, true)?;
	let days = tx.pure_u64(program::STAKE_DURATION_DAYS)?;
	let apy = tx.pure_u16(program::RULE_APY_BPS)?;
	let min_stake = tx.pure_u64(program::RULE_MIN_STAKE)?;
	let pool_cap = tx.pure_u64(program::RULE_POOL_CAP)?;
	let clock = tx.shared_object(program::clock_id(), false)?;
	tx.program_call(
		program_cfg.staking_package,
		program::CONFIG_MODULE,
		program::ADD_RULE_FN,
		vec![cap, config, days, apy, min_stake, pool_cap, clock],
	)?;
	client.execute(&tx, &keyring.admin).await
}
