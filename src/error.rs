use thiserror::Error;

use crate::objects::Address;

/// Failures surfaced by the operations library.
///
/// Handlers return these instead of panicking on a missing object or a
/// rejected transaction; the binary decides exit status uniformly at the
/// top level.
#[derive(Error, Debug)]
pub enum OpsError {
	#[error("invalid mnemonic for the {role} identity: {message}")]
	Mnemonic { role: &'static str, message: String },

	#[error("key derivation failed: {0}")]
	Key(String),

	#[error("no coin of type {coin_type} with balance >= {min_balance} owned by {owner}")]
	NoMatchingCoin {
		coin_type: String,
		min_balance: u64,
		owner: Address,
	},

	#[error("invalid address or object id: {0}")]
	InvalidId(String),

	#[error("rpc {method} failed: {message}")]
	Rpc { method: String, message: String },

	#[error("http request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("transaction failed on-chain: {0}")]
	Execution(String),

	#[error("transaction too large: {count} {kind} exceed the u16 index space")]
	TxTooLarge { kind: &'static str, count: usize },

	#[error("could not encode transaction: {0}")]
	Encode(String),
}
