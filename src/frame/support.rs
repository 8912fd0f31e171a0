// --- crates.io ---
use parity_scale_codec::{Decode, Encode, EncodeLike, Error as CodecError, Input, Output};
// --- subgov ---
use crate::r#type::{AccountId, BlockNumber, Hash};

/// Position of `frame_system` in every runtime's origin caller enum.
pub const SYSTEM_ORIGIN_INDEX: u8 = 0;

/// A call reference, either inlined or pointing at a noted preimage.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub enum Bounded {
	#[codec(index = 0)]
	Legacy { hash: Hash },
	#[codec(index = 1)]
	Inline(Vec<u8>),
	#[codec(index = 2)]
	Lookup { hash: Hash, len: u32 },
}
impl Bounded {
	pub fn lookup(call: &[u8]) -> Self {
		Self::Lookup {
			hash: subhasher::blake2_256(call),
			len: call.len() as _,
		}
	}

	/// Hash identifying the call no matter how it is referenced.
	pub fn identity_hash(&self) -> Hash {
		match self {
			Self::Legacy { hash } => *hash,
			Self::Inline(call) => subhasher::blake2_256(call),
			Self::Lookup { hash, .. } => *hash,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
pub enum DispatchTime {
	#[codec(index = 0)]
	At(BlockNumber),
	#[codec(index = 1)]
	After(BlockNumber),
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub enum RawOrigin {
	#[codec(index = 0)]
	Root,
	#[codec(index = 1)]
	Signed(AccountId),
	#[codec(index = 2)]
	None,
}

/// The runtime's origin caller.
///
/// Only the system origin is decoded structurally, the other pallets' origins are expected to be
/// unit variants such as the custom governance origins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PalletsOrigin {
	System(RawOrigin),
	Other { pallet: u8, variant: u8 },
}
impl PalletsOrigin {
	pub fn root() -> Self {
		Self::System(RawOrigin::Root)
	}
}
impl Encode for PalletsOrigin {
	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		match self {
			Self::System(raw_origin) => {
				dest.push_byte(SYSTEM_ORIGIN_INDEX);
				raw_origin.encode_to(dest);
			}
			Self::Other { pallet, variant } => {
				dest.push_byte(*pallet);
				dest.push_byte(*variant);
			}
		}
	}
}
impl EncodeLike for PalletsOrigin {}
impl Decode for PalletsOrigin {
	fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
		match input.read_byte()? {
			SYSTEM_ORIGIN_INDEX => Ok(Self::System(RawOrigin::decode(input)?)),
			pallet => Ok(Self::Other {
				pallet,
				variant: input.read_byte()?,
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identity_hash_covers_every_reference_kind() {
		let call = vec![21, 5, 7, 0, 0, 0];
		let hash = subhasher::blake2_256(&call);

		assert_eq!(Bounded::Inline(call.clone()).identity_hash(), hash);
		assert_eq!(Bounded::lookup(&call).identity_hash(), hash);
		assert_eq!(Bounded::Legacy { hash }.identity_hash(), hash);
	}

	#[test]
	fn lookup_records_call_length() {
		assert!(matches!(Bounded::lookup(&[0; 40]), Bounded::Lookup { len: 40, .. }));
	}

	#[test]
	fn origins_encode_as_pallet_then_variant() {
		assert_eq!(PalletsOrigin::root().encode(), vec![0, 0]);
		assert_eq!(
			PalletsOrigin::decode(&mut &[22u8, 3][..]).unwrap(),
			PalletsOrigin::Other {
				pallet: 22,
				variant: 3
			}
		);

		let signed = PalletsOrigin::System(RawOrigin::Signed([7; 32]));

		assert_eq!(PalletsOrigin::decode(&mut &*signed.encode()).unwrap(), signed);
	}
}
