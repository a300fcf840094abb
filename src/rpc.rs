use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::OpsError;
use crate::keys::Identity;
use crate::objects::{Address, Balance, ExecutionResult, OwnedObject};
use crate::tx::ProgramTransaction;

/// Read and submission surface of the chain.
///
/// Handlers talk to this trait rather than to a concrete client, so tests
/// can substitute an in-memory double and inspect exactly what would have
/// been sent.
#[async_trait]
pub trait ChainClient: Send + Sync {
	/// All objects owned by `owner`. A `struct_type` restricts the query
	/// server-side to objects of that exact type.
	async fn owned_objects(
		&self,
		owner: Address,
		struct_type: Option<&str>,
	) -> Result<Vec<OwnedObject>, OpsError>;

	/// Aggregate balance of `coin_type` held by `owner`.
	async fn balance(&self, owner: Address, coin_type: &str) -> Result<Balance, OpsError>;

	/// Sign the transaction with `signer`, submit it, and wait for the
	/// execution outcome. A rejected transaction is an error.
	async fn execute(
		&self,
		tx: &ProgramTransaction,
		signer: &Identity,
	) -> Result<ExecutionResult, OpsError>;
}

/// JSON-RPC client for a fullnode endpoint.
pub struct RpcClient {
	http: reqwest::Client,
	url: String,
}

impl RpcClient {
	/// Every request carries `timeout` so a hung node cannot block the
	/// process indefinitely.
	pub fn new(url: &str, timeout: Duration) -> Result<Self, OpsError> {
		let http = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self { http, url: url.to_owned() })
	}

	async fn call(&self, method: &str, params: Value) -> Result<Value, OpsError> {
		let body = json!({
			"id": 1,
			"jsonrpc": "2.0",
			"method": method,
			"params": params
		});

		let resp: Value = self.http.post(&self.url).json(&body).send().await?.json().await?;
		unwrap_rpc_result(method, resp)
	}
}

/// Pull `result` out of a JSON-RPC envelope. A non-null `error` member wins
/// over any `result`.
fn unwrap_rpc_result(method: &str, resp: Value) -> Result<Value, OpsError> {
	if let Some(err) = resp.get("error") {
		if !err.is_null() {
			return Err(OpsError::Rpc { method: method.to_owned(), message: err.to_string() });
		}
	}
	resp.get("result").cloned().ok_or_else(|| OpsError::Rpc {
		method: method.to_owned(),
		message: "response carries no result".into(),
	})
}

fn malformed(method: &str, err: serde_json::Error) -> OpsError {
	OpsError::Rpc { method: method.to_owned(), message: format!("malformed response: {err}") }
}

/// A transaction the chain rejected is an error carrying the node's reason.
fn confirm_execution(outcome: ExecutionResult) -> Result<ExecutionResult, OpsError> {
	if outcome.status.is_success() {
		return Ok(outcome);
	}
	let reason = outcome.status.error.unwrap_or_else(|| "no failure reason given".into());
	Err(OpsError::Execution(reason))
}

#[async_trait]
impl ChainClient for RpcClient {
	async fn owned_objects(
		&self,
		owner: Address,
		struct_type: Option<&str>,
	) -> Result<Vec<OwnedObject>, OpsError> {
		let filter = match struct_type {
			Some(tag) => json!({ "structType": tag, "owner": owner }),
			None => Value::Null,
		};
		let result = self.call("getOwnedObjects", json!([owner, filter])).await?;

		let data = result.get("data").cloned().unwrap_or(Value::Array(Vec::new()));
		let objects: Vec<OwnedObject> =
			serde_json::from_value(data).map_err(|e| malformed("getOwnedObjects", e))?;
		debug!(%owner, count = objects.len(), "fetched owned objects");
		Ok(objects)
	}

	async fn balance(&self, owner: Address, coin_type: &str) -> Result<Balance, OpsError> {
		let result = self.call("getBalance", json!([owner, coin_type])).await?;
		serde_json::from_value(result).map_err(|e| malformed("getBalance", e))
	}

	async fn execute(
		&self,
		tx: &ProgramTransaction,
		signer: &Identity,
	) -> Result<ExecutionResult, OpsError> {
		let tx_bytes = tx.to_signing_bytes()?;
		let envelope = signer.signature_envelope(&tx_bytes);

		debug!(
			inputs = tx.inputs().len(),
			commands = tx.commands().len(),
			gas_budget = ?tx.gas_budget(),
			"submitting transaction"
		);
		let params = json!([BASE64.encode(&tx_bytes), BASE64.encode(&envelope)]);
		let result = self.call("executeTransaction", params).await?;

		let outcome: ExecutionResult =
			serde_json::from_value(result).map_err(|e| malformed("executeTransaction", e))?;
		let outcome = confirm_execution(outcome)?;
		debug!(digest = %outcome.digest, "transaction executed");
		Ok(outcome)
	}
}
