use anyhow::Result;
use tracing::info;

use crate::cli::PoolCommand;
use crate::commands::print_outcome;
use crate::config::ProgramConfig;
use crate::error::OpsError;
use crate::keys::Keyring;
use crate::objects::{first_matching_coin, ExecutionResult};
use crate::program;
use crate::rpc::ChainClient;
use crate::tx::ProgramTransaction;

pub async fn run(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
	cmd: &PoolCommand,
) -> Result<()> {
	match cmd {
		PoolCommand::Fund => {
			let outcome = fund(client, program_cfg, keyring).await?;
			print_outcome("Pool fund", &outcome);
		}
		PoolCommand::Withdraw => {
			let outcome = withdraw(client, program_cfg, keyring).await?;
			print_outcome("Pool withdraw", &outcome);
		}
	}
	Ok(())
}

/// Deposit the first non-empty admin EMBR coin into the liquidity pool.
pub async fn fund(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
) -> Result<ExecutionResult, OpsError> {
	let admin = keyring.admin.address();
	let objects = client.owned_objects(admin, None).await?;
	let coin_type = program::coin_object_type(&program_cfg.token_package);
	let coin = first_matching_coin(&objects, &coin_type, program::POOL_MIN_BALANCE, admin)?;
	info!(coin = %coin.object_id, "funding pool");

	let mut tx = ProgramTransaction::new();
	let pool = tx.shared_object(program_cfg.liquidity_pool, true)?;
	let coin_arg = tx.object(coin.object_id)?;
	tx.program_call(
		program_cfg.staking_package,
		program::STAKING_MODULE,
		program::FUND_POOL_FN,
		vec![pool, coin_arg],
	)?;
	client.execute(&tx, &keyring.admin).await
}

/// Pull the fixed amount out of the pool and hand the coins to the admin.
/// Requires the admin capability object.
pub async fn withdraw(
	client: &dyn ChainClient,
	program_cfg: &ProgramConfig,
	keyring: &Keyring,
) -> Result<ExecutionResult, OpsError> {
	let admin = keyring.admin.address();
	info!(amount = program::POOL_WITHDRAW_AMOUNT, "withdrawing from pool");

	let mut tx = ProgramTransaction::new();
	let cap = tx.object(program_cfg.admin_cap)?;
	let pool = tx.shared_object(program_cfg.liquidity_pool, true)?;
	let amount = tx.pure_u64(program::POOL_WITHDRAW_AMOUNT)?;
	let coins = tx.program_call(
		program_cfg.staking_package,
		program::STAKING_MODULE,
		program::WITHDRAW_FN,
		vec![cap, pool, amount],
	)?;
	tx.transfer_object(coins, admin)?;
	tx.set_gas_budget(program::WITHDRAW_GAS_BUDGET);
	client.execute(&tx, &keyring.admin).await
}
