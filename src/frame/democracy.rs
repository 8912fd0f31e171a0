// --- crates.io ---
use parity_scale_codec::Encode;
// --- subgov ---
use crate::{
	client::{self, ChainClient},
	error::SubgovResult,
	r#type::{BlockNumber, Bytes, Hash},
	runtime::Pallet,
	storage,
};

pub type ReferendumIndex = u32;

pub const FAST_TRACK: u8 = 7;

pub fn referendum_count_key(democracy: &Pallet) -> Bytes {
	storage::storage_value_key(&democracy.name, "ReferendumCount")
}

pub async fn referendum_count<C>(client: &C, democracy: &Pallet) -> SubgovResult<ReferendumIndex>
where
	C: ChainClient,
{
	Ok(client::decode_storage(client, &referendum_count_key(democracy))
		.await?
		.unwrap_or_default())
}

pub fn fast_track(
	democracy: &Pallet,
	proposal_hash: &Hash,
	voting_period: BlockNumber,
	delay: BlockNumber,
) -> Bytes {
	(
		democracy.index,
		FAST_TRACK,
		proposal_hash,
		voting_period,
		delay,
	)
		.encode()
}
