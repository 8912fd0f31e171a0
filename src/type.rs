// --- std ---
use std::convert::TryFrom;
// --- subgov ---
use crate::error::{Error, SubgovResult};

pub type Bytes = Vec<u8>;

pub type Id = u64;
pub type SubscriptionId = String;

pub type BlockNumber = u32;
pub type Hash = [u8; 32];
pub type AccountId = [u8; 32];
pub type Index = u32;
pub type Version = u32;
pub type Balance = u128;

pub fn hex2bytes(hex: &str) -> SubgovResult<Bytes> {
	array_bytes::hex2bytes(hex).map_err(|e| Error::Hex(format!("`{}`: {:?}", hex, e)))
}

pub fn hex2array(hex: &str) -> SubgovResult<[u8; 32]> {
	let bytes = hex2bytes(hex)?;

	<[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
		Error::Hex(format!(
			"`{}`: expected `32` bytes but found `{}`",
			hex,
			bytes.len()
		))
	})
}

pub fn bytes2hex(bytes: &[u8]) -> String {
	array_bytes::bytes2hex("0x", bytes)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hex_helpers_accept_prefixed_input() {
		assert_eq!(hex2bytes("0x0102ff").unwrap(), vec![1, 2, 255]);
		assert_eq!(bytes2hex(&[1, 2, 255]), "0x0102ff");
	}

	#[test]
	fn hex2array_rejects_wrong_length() {
		assert!(matches!(hex2array("0x0102"), Err(Error::Hex(_))));
		assert_eq!(hex2array(&format!("0x{}", "11".repeat(32))).unwrap(), [0x11; 32]);
	}
}
