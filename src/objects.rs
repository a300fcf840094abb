use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OpsError;

// -- Identifiers --

/// 32-byte account address, displayed as 0x-prefixed hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address([u8; 32]);

impl Address {
	pub fn from_bytes(bytes: [u8; 32]) -> Self {
		Self(bytes)
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

impl fmt::Debug for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl FromStr for Address {
	type Err = OpsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(parse_hex_32(s)?))
	}
}

impl From<Address> for String {
	fn from(address: Address) -> Self {
		address.to_string()
	}
}

impl TryFrom<String> for Address {
	type Error = OpsError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

/// 32-byte object id. Same wire shape as an address, kept distinct so a
/// package id cannot be passed where a recipient is expected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ObjectId([u8; 32]);

impl fmt::Display for ObjectId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

impl fmt::Debug for ObjectId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl FromStr for ObjectId {
	type Err = OpsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(parse_hex_32(s)?))
	}
}

impl From<ObjectId> for String {
	fn from(id: ObjectId) -> Self {
		id.to_string()
	}
}

impl TryFrom<String> for ObjectId {
	type Error = OpsError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

fn parse_hex_32(s: &str) -> Result<[u8; 32], OpsError> {
	let hex_part = s.strip_prefix("0x").unwrap_or(s);
	if hex_part.len() != 64 {
		return Err(OpsError::InvalidId(format!(
			"expected 64 hex characters, got {} in {s:?}",
			hex_part.len()
		)));
	}
	let bytes = hex::decode(hex_part).map_err(|e| OpsError::InvalidId(format!("{s:?}: {e}")))?;
	let mut out = [0u8; 32];
	out.copy_from_slice(&bytes);
	Ok(out)
}

// -- Wire structures --

/// One object from a `getOwnedObjects` response. `balance` is only present
/// for coin objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedObject {
	pub object_id: ObjectId,
	#[serde(rename = "type")]
	pub type_tag: String,
	#[serde(default)]
	pub balance: Option<u64>,
}

/// Aggregate coin balance for one owner and coin type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
	pub coin_type: String,
	pub coin_object_count: u32,
	pub total_balance: u64,
}

/// Outcome of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
	pub digest: String,
	pub status: ExecutionStatus,
	#[serde(default)]
	pub created: Vec<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatus {
	pub status: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl ExecutionStatus {
	pub fn is_success(&self) -> bool {
		self.status == "success"
	}
}

// -- Selection --

/// Pick the first object whose type matches `coin_type` exactly and whose
/// balance meets `min_balance`. Order is whatever the node returned; there
/// is no tie-breaking beyond first match.
pub fn first_matching_coin<'a>(
	objects: &'a [OwnedObject],
	coin_type: &str,
	min_balance: u64,
	owner: Address,
) -> Result<&'a OwnedObject, OpsError> {
	objects
		.iter()
		.find(|obj| obj.type_tag == coin_type && obj.balance.unwrap_or(0) >= min_balance)
		.ok_or_else(|| OpsError::NoMatchingCoin {
			coin_type: coin_type.to_owned(),
			min_balance,
			owner,
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn id(byte: u8) -> ObjectId {
		format!("0x{}", hex::encode([byte; 32])).parse().unwrap()
	}

	fn coin(byte: u8, balance: Option<u64>) -> OwnedObject {
		OwnedObject {
			object_id: id(byte),
			type_tag: "0x2::coin::Coin<0xaa::embr::EMBR>".to_owned(),
			balance,
		}
	}

	#[test]
	fn address_parses_with_and_without_prefix() {
		let bare = "11".repeat(32);
		let with_prefix: Address = format!("0x{bare}").parse().unwrap();
		let without_prefix: Address = bare.parse().unwrap();
		assert_eq!(with_prefix, without_prefix);
		assert_eq!(with_prefix.to_string(), format!("0x{bare}"));
	}

	#[test]
	fn address_rejects_bad_input() {
		assert!("0x1234".parse::<Address>().is_err());
		assert!("zz".repeat(32).parse::<Address>().is_err());
		assert!("".parse::<Address>().is_err());
	}

	#[test]
	fn object_id_round_trips_through_serde_string() {
		let original = id(0x5c);
		let json = serde_json::to_string(&original).unwrap();
		assert_eq!(json, format!("\"{original}\""));
		let back: ObjectId = serde_json::from_str(&json).unwrap();
		assert_eq!(back, original);
	}

	#[test]
	fn owned_object_deserializes_from_node_json() {
		let raw = format!(
			r#"{{"objectId":"0x{}","type":"0x2::coin::Coin<0xaa::embr::EMBR>","balance":50000}}"#,
			"ab".repeat(32)
		);
		let obj: OwnedObject = serde_json::from_str(&raw).unwrap();
		assert_eq!(obj.object_id, id(0xab));
		assert_eq!(obj.balance, Some(50_000));

		// Non-coin objects carry no balance field at all.
		let raw = format!(r#"{{"objectId":"0x{}","type":"0xbb::staking::StakeReceipt"}}"#, "01".repeat(32));
		let obj: OwnedObject = serde_json::from_str(&raw).unwrap();
		assert_eq!(obj.balance, None);
	}

	#[test]
	fn first_match_wins() {
		let owner = Address::from_bytes([9; 32]);
		let objects = vec![coin(1, Some(20_000)), coin(2, Some(90_000))];
		let picked = first_matching_coin(&objects, &objects[0].type_tag, 10_000, owner).unwrap();
		assert_eq!(picked.object_id, id(1));
	}

	#[test]
	fn selection_skips_thin_and_balanceless_objects() {
		let owner = Address::from_bytes([9; 32]);
		let objects = vec![coin(1, Some(500)), coin(2, None), coin(3, Some(10_000))];
		let picked = first_matching_coin(&objects, &objects[0].type_tag, 10_000, owner).unwrap();
		assert_eq!(picked.object_id, id(3));
	}

	#[test]
	fn selection_reports_missing_coin() {
		let owner = Address::from_bytes([9; 32]);
		let err = first_matching_coin(&[], "0x2::coin::Coin<0xaa::embr::EMBR>", 1, owner).unwrap_err();
		match err {
			OpsError::NoMatchingCoin { min_balance, .. } => assert_eq!(min_balance, 1),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn execution_status_success_flag() {
		let ok = ExecutionStatus { status: "success".into(), error: None };
		assert!(ok.is_success());
		let failed = ExecutionStatus { status: "failure".into(), error: Some("abort 7".into()) };
		assert!(!failed.is_success());
	}
}
