use bip32::{DerivationPath, Mnemonic, XPrv};
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer};
use sha2::{Digest, Sha256};

use crate::config::KeysConfig;
use crate::error::OpsError;
use crate::objects::Address;

/// Hardened BIP-44 path used for both identities.
const DERIVATION_PATH: &str = "m/44'/0'/0'";

/// Scheme flag prefixed to the public key when hashing into an address,
/// and to signatures on the wire.
pub const ED25519_FLAG: u8 = 0x00;

/// A signing identity derived from a mnemonic phrase.
pub struct Identity {
	keypair: Keypair,
	address: Address,
}

impl Identity {
	/// Derive the identity deterministically: BIP-39 phrase to seed, BIP-32
	/// derivation, then the derived key bytes hashed into an ed25519 seed.
	pub fn from_mnemonic(role: &'static str, phrase: &str) -> Result<Self, OpsError> {
		let phrase = phrase.trim();
		if phrase.is_empty() {
			return Err(OpsError::Mnemonic {
				role,
				message: "phrase is empty; set it in the config file".into(),
			});
		}
		let mnemonic = Mnemonic::new(phrase, Default::default())
			.map_err(|e| OpsError::Mnemonic { role, message: e.to_string() })?;
		let seed = mnemonic.to_seed("");
		let path: DerivationPath = DERIVATION_PATH
			.parse()
			.map_err(|e: bip32::Error| OpsError::Key(e.to_string()))?;
		let derived = XPrv::derive_from_path(&seed, &path)
			.map_err(|e| OpsError::Key(e.to_string()))?;

		let digest = Sha256::digest(derived.to_bytes());
		let mut seed_bytes = [0u8; 32];
		seed_bytes.copy_from_slice(&digest);

		let secret = SecretKey::from_bytes(&seed_bytes)
			.map_err(|e| OpsError::Key(e.to_string()))?;
		let public = PublicKey::from(&secret);
		let address = address_from_public_key(&public);
		Ok(Self { keypair: Keypair { secret, public }, address })
	}

	pub fn address(&self) -> Address {
		self.address
	}

	/// 64-byte ed25519 signature over `message`.
	pub fn sign(&self, message: &[u8]) -> [u8; 64] {
		self.keypair.sign(message).to_bytes()
	}

	/// Wire envelope for a signed message: the scheme flag, the signature,
	/// then the public key the node checks against the sender address.
	pub fn signature_envelope(&self, message: &[u8]) -> Vec<u8> {
		let mut envelope = Vec::with_capacity(1 + 64 + 32);
		envelope.push(ED25519_FLAG);
		envelope.extend_from_slice(&self.sign(message));
		envelope.extend_from_slice(&self.public_key_bytes());
		envelope
	}

	pub fn public_key_bytes(&self) -> [u8; 32] {
		self.keypair.public.to_bytes()
	}
}

/// Address = SHA-256 over the scheme flag followed by the raw public key.
fn address_from_public_key(public: &PublicKey) -> Address {
	let mut hasher = Sha256::new();
	hasher.update([ED25519_FLAG]);
	hasher.update(public.to_bytes());
	Address::from_bytes(hasher.finalize().into())
}

/// Both identities the tool operates with, derived eagerly at startup so a
/// bad phrase fails before any command runs.
pub struct Keyring {
	pub admin: Identity,
	pub player: Identity,
}

impl Keyring {
	pub fn from_config(keys: &KeysConfig) -> Result<Self, OpsError> {
		Ok(Self {
			admin: Identity::from_mnemonic("admin", &keys.admin_mnemonic)?,
			player: Identity::from_mnemonic("player", &keys.player_mnemonic)?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ed25519_dalek::{Signature, Verifier};

	const PHRASE_A: &str =
		"abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
	const PHRASE_B: &str =
		"legal winner thank year wave sausage worth useful legal winner thank yellow";

	#[test]
	fn derivation_is_deterministic() {
		let first = Identity::from_mnemonic("admin", PHRASE_A).unwrap();
		let second = Identity::from_mnemonic("admin", PHRASE_A).unwrap();
		assert_eq!(first.address(), second.address());
		assert_eq!(first.public_key_bytes(), second.public_key_bytes());
	}

	#[test]
	fn distinct_phrases_yield_distinct_identities() {
		let a = Identity::from_mnemonic("admin", PHRASE_A).unwrap();
		let b = Identity::from_mnemonic("player", PHRASE_B).unwrap();
		assert_ne!(a.address(), b.address());
	}

	#[test]
	fn address_is_prefixed_hex() {
		let identity = Identity::from_mnemonic("admin", PHRASE_A).unwrap();
		let shown = identity.address().to_string();
		assert!(shown.starts_with("0x"));
		assert_eq!(shown.len(), 66);
	}

	#[test]
	fn empty_and_malformed_phrases_are_rejected() {
		assert!(matches!(
			Identity::from_mnemonic("admin", "  "),
			Err(OpsError::Mnemonic { role: "admin", .. })
		));
		assert!(matches!(
			Identity::from_mnemonic("player", "not a valid mnemonic phrase at all"),
			Err(OpsError::Mnemonic { role: "player", .. })
		));
	}

	#[test]
	fn signatures_verify_against_the_public_key() {
		let identity = Identity::from_mnemonic("admin", PHRASE_A).unwrap();
		let message = b"embr ops signing check";
		let sig_bytes = identity.sign(message);
		let sig = Signature::try_from(&sig_bytes[..]).unwrap();
		let public = PublicKey::from_bytes(&identity.public_key_bytes()).unwrap();
		assert!(public.verify(message, &sig).is_ok());
	}

	#[test]
	fn signature_envelope_is_flag_signature_then_public_key() {
		let identity = Identity::from_mnemonic("admin", PHRASE_A).unwrap();
		let message = b"embr ops envelope check";
		let envelope = identity.signature_envelope(message);

		assert_eq!(envelope.len(), 97);
		assert_eq!(envelope[0], ED25519_FLAG);
		assert_eq!(envelope[65..], identity.public_key_bytes()[..]);

		// The middle 64 bytes are a valid signature over the message by
		// the key at the tail.
		let sig = Signature::try_from(&envelope[1..65]).unwrap();
		let public = PublicKey::from_bytes(&envelope[65..]).unwrap();
		assert!(public.verify(message, &sig).is_ok());
	}

	#[test]
	fn keyring_derives_both_roles() {
		let keys = KeysConfig {
			admin_mnemonic: PHRASE_A.to_owned(),
			player_mnemonic: PHRASE_B.to_owned(),
		};
		let keyring = Keyring::from_config(&keys).unwrap();
		assert_ne!(keyring.admin.address(), keyring.player.address());
	}
}
