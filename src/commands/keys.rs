use crate::cli::KeysCommand;
use crate::keys::Keyring;

/// Purely local; prints what the configured mnemonics derive to.
pub fn run(keyring: &Keyring, cmd: &KeysCommand) {
	match cmd {
		KeysCommand::Show => {
			println!("Admin address:  {}", keyring.admin.address());
			println!("Player address: {}", keyring.player.address());
		}
	}
}
