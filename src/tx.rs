//! In-memory transaction construction.
//!
//! A transaction is a flat list of inputs plus an ordered list of commands
//! that reference those inputs (or the results of earlier commands) by
//! index. Indices are u16 on the wire, so the builder refuses growth past
//! that space instead of wrapping. Handlers build one transaction per
//! invocation, then hand it to the client for signing and submission.

use serde::{Deserialize, Serialize};

use crate::error::OpsError;
use crate::objects::{Address, ObjectId};

/// Reference to a transaction input or to the result of an earlier command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arg {
	Input(u16),
	Result(u16),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Input {
	/// Object owned by the sender, locked for the duration of the call.
	Object(ObjectId),
	/// Shared object; `mutable` must match the entry function signature.
	SharedObject { id: ObjectId, mutable: bool },
	Pure(PureValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PureValue {
	U16(u16),
	U64(u64),
	Address(Address),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
	SplitCoin { coin: Arg, amount: u64 },
	TransferObject { object: Arg, recipient: Arg },
	ProgramCall {
		package: ObjectId,
		module: String,
		function: String,
		args: Vec<Arg>,
	},
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramTransaction {
	inputs: Vec<Input>,
	commands: Vec<Command>,
	gas_budget: Option<u64>,
}

impl ProgramTransaction {
	pub fn new() -> Self {
		Self::default()
	}

	// -- Inputs --

	pub fn object(&mut self, id: ObjectId) -> Result<Arg, OpsError> {
		self.push_input(Input::Object(id))
	}

	pub fn shared_object(&mut self, id: ObjectId, mutable: bool) -> Result<Arg, OpsError> {
		self.push_input(Input::SharedObject { id, mutable })
	}

	pub fn pure_u16(&mut self, value: u16) -> Result<Arg, OpsError> {
		self.push_input(Input::Pure(PureValue::U16(value)))
	}

	pub fn pure_u64(&mut self, value: u64) -> Result<Arg, OpsError> {
		self.push_input(Input::Pure(PureValue::U64(value)))
	}

	pub fn pure_address(&mut self, value: Address) -> Result<Arg, OpsError> {
		self.push_input(Input::Pure(PureValue::Address(value)))
	}

	fn push_input(&mut self, input: Input) -> Result<Arg, OpsError> {
		let index = u16::try_from(self.inputs.len()).map_err(|_| OpsError::TxTooLarge {
			kind: "inputs",
			count: self.inputs.len() + 1,
		})?;
		self.inputs.push(input);
		Ok(Arg::Input(index))
	}

	// -- Commands --

	/// Cut `amount` off the coin referenced by `coin`; the piece is the
	/// command result.
	pub fn split_coin(&mut self, coin: Arg, amount: u64) -> Result<Arg, OpsError> {
		self.push_command(Command::SplitCoin { coin, amount })
	}

	pub fn transfer_object(&mut self, object: Arg, recipient: Address) -> Result<(), OpsError> {
		let recipient = self.pure_address(recipient)?;
		self.push_command(Command::TransferObject { object, recipient })?;
		Ok(())
	}

	pub fn program_call(
		&mut self,
		package: ObjectId,
		module: &str,
		function: &str,
		args: Vec<Arg>,
	) -> Result<Arg, OpsError> {
		self.push_command(Command::ProgramCall {
			package,
			module: module.to_owned(),
			function: function.to_owned(),
			args,
		})
	}

	fn push_command(&mut self, command: Command) -> Result<Arg, OpsError> {
		let index = u16::try_from(self.commands.len()).map_err(|_| OpsError::TxTooLarge {
			kind: "commands",
			count: self.commands.len() + 1,
		})?;
		self.commands.push(command);
		Ok(Arg::Result(index))
	}

	pub fn set_gas_budget(&mut self, budget: u64) {
		self.gas_budget = Some(budget);
	}

	// -- Accessors --

	pub fn inputs(&self) -> &[Input] {
		&self.inputs
	}

	pub fn commands(&self) -> &[Command] {
		&self.commands
	}

	pub fn gas_budget(&self) -> Option<u64> {
		self.gas_budget
	}

	/// Canonical byte encoding, signed as-is by the sender.
	pub fn to_signing_bytes(&self) -> Result<Vec<u8>, OpsError> {
		bcs::to_bytes(self).map_err(|e| OpsError::Encode(e.to_string()))
	}
}
