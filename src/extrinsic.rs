// --- crates.io ---
use parity_scale_codec::{Compact, Encode, Output};
use serde_json::Value;
// --- subgov ---
use crate::{
	error::SubgovResult,
	r#type::{hex2array, AccountId, Balance, Bytes, Hash, Index, Version},
};

pub struct SignedPayload<'a>(pub &'a [u8], pub &'a Extra, pub &'a AdditionalSigned);
impl<'a> SignedPayload<'a> {
	pub fn using_encoded<R, F>(&self, f: F) -> R
	where
		F: FnOnce(&[u8]) -> R,
	{
		let mut payload = self.0.to_vec();

		self.1.encode_to(&mut payload);
		self.2.encode_to(&mut payload);

		if payload.len() > 256 {
			f(&subhasher::blake2_256(&payload))
		} else {
			f(&payload)
		}
	}
}

pub struct Extrinsic {
	pub signature: Option<(MultiAddress, MultiSignature, Extra)>,
	pub call: Bytes,
}
impl Extrinsic {
	pub fn hex_encode(&self) -> String {
		array_bytes::bytes2hex("0x", &Encode::encode(self))
	}
}
impl Encode for Extrinsic {
	fn encode(&self) -> Vec<u8> {
		const V4: u8 = 4;

		let mut body = vec![];

		match self.signature.as_ref() {
			Some(s) => {
				body.push(V4 | 0b1000_0000);
				s.encode_to(&mut body);
			}
			None => {
				body.push(V4 & 0b0111_1111);
			}
		}
		body.extend_from_slice(&self.call);

		body.encode()
	}
}

// Era, Nonce, TransactionPayment, CheckMetadataHash
#[derive(Clone, Debug)]
pub struct Extra {
	pub era: Era,
	pub nonce: Compact<Index>,
	pub tip: Compact<Balance>,
	pub metadata_hash_mode: Option<u8>,
}
impl Extra {
	pub fn new(nonce: Index, tip: Balance, check_metadata_hash: bool) -> Self {
		Self {
			era: Era::Immortal,
			nonce: Compact(nonce),
			tip: Compact(tip),
			metadata_hash_mode: if check_metadata_hash { Some(0) } else { None },
		}
	}
}
impl Encode for Extra {
	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		self.era.encode_to(dest);
		self.nonce.encode_to(dest);
		self.tip.encode_to(dest);

		if let Some(mode) = self.metadata_hash_mode {
			mode.encode_to(dest);
		}
	}
}

// SpecVersion, TxVersion, Genesis, Era, CheckMetadataHash
#[derive(Clone, Debug)]
pub struct AdditionalSigned {
	pub spec_version: Version,
	pub transaction_version: Version,
	pub genesis_hash: Hash,
	pub era_block_hash: Hash,
	pub check_metadata_hash: bool,
}
impl Encode for AdditionalSigned {
	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		self.spec_version.encode_to(dest);
		self.transaction_version.encode_to(dest);
		self.genesis_hash.encode_to(dest);
		self.era_block_hash.encode_to(dest);

		if self.check_metadata_hash {
			<Option<Hash>>::None.encode_to(dest);
		}
	}
}

/// Only immortal transactions are produced.
#[derive(Clone, Debug, Encode)]
pub enum Era {
	Immortal,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode)]
pub enum MultiAddress {
	#[codec(index = 0)]
	Id(AccountId),
}

#[derive(Clone, Debug, PartialEq, Eq, Encode)]
pub enum MultiSignature {
	#[codec(index = 1)]
	Sr25519([u8; 64]),
}

/// Notification of `author_submitAndWatchExtrinsic`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtrinsicStatus {
	Future,
	Ready,
	Broadcast,
	InBlock(Hash),
	Retracted(Hash),
	FinalityTimeout(Hash),
	Finalized(Hash),
	Usurped(Hash),
	Dropped,
	Invalid,
	Unknown(String),
}
impl ExtrinsicStatus {
	pub fn from_json(status: &Value) -> SubgovResult<Self> {
		if let Some(status) = status.as_str() {
			return Ok(match status {
				"future" => Self::Future,
				"ready" => Self::Ready,
				"dropped" => Self::Dropped,
				"invalid" => Self::Invalid,
				_ => Self::Unknown(status.into()),
			});
		}

		let hash_of = |field: &str| -> SubgovResult<Option<Hash>> {
			status[field].as_str().map(hex2array).transpose()
		};

		Ok(if status.get("broadcast").is_some() {
			Self::Broadcast
		} else if let Some(hash) = hash_of("inBlock")? {
			Self::InBlock(hash)
		} else if let Some(hash) = hash_of("retracted")? {
			Self::Retracted(hash)
		} else if let Some(hash) = hash_of("finalityTimeout")? {
			Self::FinalityTimeout(hash)
		} else if let Some(hash) = hash_of("finalized")? {
			Self::Finalized(hash)
		} else if let Some(hash) = hash_of("usurped")? {
			Self::Usurped(hash)
		} else {
			Self::Unknown(status.to_string())
		})
	}

	/// Block the extrinsic landed in.
	pub fn included_in(&self) -> Option<Hash> {
		match self {
			Self::InBlock(hash) | Self::Finalized(hash) => Some(*hash),
			_ => None,
		}
	}

	/// The pool gave up on the extrinsic.
	pub fn is_rejection(&self) -> bool {
		matches!(
			self,
			Self::Dropped | Self::Invalid | Self::Usurped(_) | Self::FinalityTimeout(_)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn unsigned_extrinsic_is_length_prefixed() {
		let extrinsic = Extrinsic {
			signature: None,
			call: vec![0, 1, 2],
		};

		assert_eq!(extrinsic.encode(), vec![4 << 2, 4, 0, 1, 2]);
	}

	#[test]
	fn signed_extrinsic_carries_address_signature_and_extra() {
		let extrinsic = Extrinsic {
			signature: Some((
				MultiAddress::Id([1; 32]),
				MultiSignature::Sr25519([2; 64]),
				Extra::new(3, 0, true),
			)),
			call: vec![9, 9],
		};
		let encoded = extrinsic.encode();
		// length(2), version(1), address(33), signature(65), extra(4), call(2)
		let body = &encoded[2..];

		assert_eq!(encoded.len(), 2 + 1 + 33 + 65 + 4 + 2);
		assert_eq!(body[0], 0x84);
		assert_eq!(body[1], 0);
		assert_eq!(body[34], 1);
		assert_eq!(&body[99..], &[0, 3 << 2, 0, 0, 9, 9][..]);
	}

	#[test]
	fn additional_signed_appends_metadata_hash_only_when_checked() {
		let mut additional = AdditionalSigned {
			spec_version: 1,
			transaction_version: 2,
			genesis_hash: [3; 32],
			era_block_hash: [3; 32],
			check_metadata_hash: false,
		};

		assert_eq!(additional.encode().len(), 4 + 4 + 32 + 32);

		additional.check_metadata_hash = true;

		assert_eq!(additional.encode().last(), Some(&0));
		assert_eq!(additional.encode().len(), 4 + 4 + 32 + 32 + 1);
	}

	#[test]
	fn watch_notifications_are_parsed() {
		let hash = format!("0x{}", "ab".repeat(32));

		assert_eq!(
			ExtrinsicStatus::from_json(&json!("ready")).unwrap(),
			ExtrinsicStatus::Ready
		);
		assert_eq!(
			ExtrinsicStatus::from_json(&json!({ "broadcast": ["peer"] })).unwrap(),
			ExtrinsicStatus::Broadcast
		);
		assert_eq!(
			ExtrinsicStatus::from_json(&json!({ "inBlock": hash }))
				.unwrap()
				.included_in(),
			Some([0xab; 32])
		);
		assert!(ExtrinsicStatus::from_json(&json!("invalid"))
			.unwrap()
			.is_rejection());
		assert!(ExtrinsicStatus::from_json(&json!({ "usurped": hash }))
			.unwrap()
			.is_rejection());
	}
}
