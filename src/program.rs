//! Names and fixed parameters of the deployed EMBR program.
//!
//! Object ids that differ per deployment live in [`crate::config`]; what is
//! here is the part baked into the published packages themselves.

use crate::objects::ObjectId;

// -- Modules and entry functions --

pub const TOKEN_MODULE: &str = "embr";
pub const TOKEN_STRUCT: &str = "EMBR";

pub const STAKING_MODULE: &str = "staking";
pub const CONFIG_MODULE: &str = "config";

pub const FUND_POOL_FN: &str = "fund_pool";
pub const STAKE_FN: &str = "stake";
pub const UNSTAKE_FN: &str = "unstake";
pub const WITHDRAW_FN: &str = "withdraw";
pub const ADD_RULE_FN: &str = "add_rule";

pub const RECEIPT_STRUCT: &str = "StakeReceipt";

/// Chain-wide clock object, shared and read-only for user transactions.
pub const CLOCK_OBJECT_ID: &str =
	"0x0000000000000000000000000000000000000000000000000000000000000006";

// -- Fixed amounts --

/// Size of each piece cut by `coin split`, and the smallest coin the split
/// source must hold.
pub const COIN_CHUNK: u64 = 10_000;
/// Default number of pieces for `coin split`.
pub const DEFAULT_SPLIT_PIECES: u16 = 5;
/// Smallest coin accepted as a pool deposit.
pub const POOL_MIN_BALANCE: u64 = 1;

/// Lock-up length passed to `stake` and registered by `add_rule`.
pub const STAKE_DURATION_DAYS: u64 = 90;
pub const STAKE_GAS_BUDGET: u64 = 100_000_000;

/// Amount pulled by `pool withdraw`, in base units.
pub const POOL_WITHDRAW_AMOUNT: u64 = 299_000_000_000;
pub const WITHDRAW_GAS_BUDGET: u64 = 10_000_000;

// Rule parameters registered on the staking config object.
pub const RULE_APY_BPS: u16 = 1_000;
pub const RULE_MIN_STAKE: u64 = 1_000_000_000;
pub const RULE_POOL_CAP: u64 = 1_000_000_000_000_000;

// -- Type composition --

/// Fully qualified EMBR type tag, e.g. `0x..::embr::EMBR`.
pub fn token_type(token_package: &ObjectId) -> String {
	format!("{token_package}::{TOKEN_MODULE}::{TOKEN_STRUCT}")
}

/// Object type of a coin holding EMBR.
pub fn coin_object_type(token_package: &ObjectId) -> String {
	format!("0x2::coin::Coin<{}>", token_type(token_package))
}

/// Object type of a stake receipt.
pub fn receipt_type(staking_package: &ObjectId) -> String {
	format!("{staking_package}::{STAKING_MODULE}::{RECEIPT_STRUCT}")
}

pub fn clock_id() -> ObjectId {
	CLOCK_OBJECT_ID.parse().expect("clock object id is valid hex")
}
