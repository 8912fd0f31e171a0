// --- std ---
use std::fmt::{Debug, Formatter, Result as FmtResult};
// --- crates.io ---
use subcryptor::{
	schnorrkel::{self, ExpansionMode, Keypair, MiniSecretKey},
	SIGNING_CTX,
};
// --- subgov ---
use crate::{
	error::{CryptoError, SignatureError, SubgovResult},
	r#type::*,
};

/// Mini secret of the well-known `//Alice` development account.
pub const DEV_SEED: &str = "0xe5be9a5092b81bca64be81d212e7f2f9eba183bb7a90954f7b76361f6edb5c0a";

#[derive(Clone)]
pub struct Signer {
	keypair: Keypair,
}
impl Signer {
	pub fn from_seed(seed: &str) -> SubgovResult<Self> {
		let keypair = MiniSecretKey::from_bytes(&hex2bytes(seed)?)
			.map_err(|_| CryptoError::from(SignatureError::BytesLengthMismatch))?
			.expand_to_keypair(ExpansionMode::Ed25519);

		tracing::trace!(
			"Public key: {}",
			bytes2hex(&keypair.public.to_bytes())
		);

		Ok(Self { keypair })
	}

	pub fn dev() -> SubgovResult<Self> {
		Self::from_seed(DEV_SEED)
	}

	pub fn account_id(&self) -> AccountId {
		self.keypair.public.to_bytes()
	}

	pub fn sign(&self, payload: &[u8]) -> [u8; 64] {
		let context = schnorrkel::signing_context(SIGNING_CTX);

		self.keypair.sign(context.bytes(payload)).to_bytes()
	}
}
impl Debug for Signer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Signer({})", bytes2hex(&self.account_id()))
	}
}
