use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::objects::ObjectId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	pub network: NetworkConfig,
	pub program: ProgramConfig,
	pub keys: KeysConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
	pub testnet_rpc: String,
	pub mainnet_rpc: String,
	/// Per-request timeout applied to every RPC call.
	pub timeout_secs: u64,
}

/// Object ids of the published packages and their singleton objects.
/// These vary per deployment; the defaults point at the current testnet
/// publication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
	pub token_package: ObjectId,
	pub staking_package: ObjectId,
	pub liquidity_pool: ObjectId,
	pub staking_config: ObjectId,
	pub admin_cap: ObjectId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysConfig {
	pub admin_mnemonic: String,
	pub player_mnemonic: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			network: NetworkConfig {
				testnet_rpc: "https://testnet-rpc.embr.games".into(),
				mainnet_rpc: "https://rpc.embr.games".into(),
				timeout_secs: 30,
			},
			program: ProgramConfig {
				token_package: builtin_id(
					"0xd137bd0f77bf14cafc1f40a3d03c61a77a7eaf5681e7868c9251fb0b8b56818c",
				),
				staking_package: builtin_id(
					"0xa58f38758cc7c2e66d76393387610369fdf747bd64ab4e5489ab569c4b833d10",
				),
				liquidity_pool: builtin_id(
					"0x3081a2cd715a2917ba207e8ebcd047ee053a1940c19e0cb2c848a4ce69f1c341",
				),
				staking_config: builtin_id(
					"0xc3f942f312572dae132cf7c7aaa2cab6147ff825cac0837b7164dffe5a1e2147",
				),
				admin_cap: builtin_id(
					"0x6f3f15cc2cc8d6044c8de01bb9b8ec161a313f34ac1e41d5b574632e08bad319",
				),
			},
			keys: KeysConfig {
				admin_mnemonic: String::new(),
				player_mnemonic: String::new(),
			},
		}
	}
}

fn builtin_id(hex: &str) -> ObjectId {
	hex.parse().expect("compiled-in object id is valid hex")
}

impl Config {
	/// Directory where CLI state is stored (~/.embr-ops/).
	pub fn dir() -> PathBuf {
		dirs::home_dir()
			.expect("could not determine home directory")
			.join(".embr-ops")
	}

	/// Path to the config file.
	pub fn path() -> PathBuf {
		Self::dir().join("config.toml")
	}

	/// Load config from disk. On first run the default file is written out
	/// so there is something to edit the mnemonics into.
	pub fn load() -> anyhow::Result<Self> {
		let path = Self::path();
		if path.exists() {
			let content = std::fs::read_to_string(&path)?;
			Ok(toml::from_str(&content)?)
		} else {
			let config = Self::default();
			config.save()?;
			Ok(config)
		}
	}

	/// Persist the current config to disk, creating the directory if needed.
	pub fn save(&self) -> anyhow::Result<()> {
		let path = Self::path();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, toml::to_string_pretty(self)?)?;
		Ok(())
	}

	/// Return the RPC URL for the given network name.
	pub fn rpc_url(&self, network: &str) -> &str {
		match network {
			"mainnet" => &self.network.mainnet_rpc,
			_ => &self.network.testnet_rpc,
		}
	}
}
