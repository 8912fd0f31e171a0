// --- crates.io ---
use parity_scale_codec::{Compact, Decode, Encode};
use substorager::StorageHasher;
// --- subgov ---
use crate::{
	client::ChainClient,
	error::SubgovResult,
	r#type::{Bytes, Hash},
	runtime::Pallet,
	storage,
};

pub type MemberCount = u32;

pub const PROPOSE: u8 = 2;

pub fn members_key(collective: &Pallet) -> Bytes {
	storage::storage_value_key(&collective.name, "Members")
}

pub fn proposal_of_key(collective: &Pallet, proposal_hash: &Hash) -> Bytes {
	storage::storage_map_key(
		&collective.name,
		"ProposalOf",
		&StorageHasher::Identity,
		proposal_hash,
	)
}

/// Size of the collective, read from the length prefix of its member list.
pub async fn members_count<C>(client: &C, collective: &Pallet) -> SubgovResult<MemberCount>
where
	C: ChainClient,
{
	match client.storage(&members_key(collective)).await? {
		Some(members) => Ok(<Compact<MemberCount>>::decode(&mut &*members)?.0),
		None => Ok(0),
	}
}

/// Whether `proposal_hash` is waiting for votes.
pub async fn is_proposed<C>(
	client: &C,
	collective: &Pallet,
	proposal_hash: &Hash,
) -> SubgovResult<bool>
where
	C: ChainClient,
{
	Ok(client
		.storage(&proposal_of_key(collective, proposal_hash))
		.await?
		.is_some())
}

pub fn propose(collective: &Pallet, threshold: MemberCount, proposal: &[u8]) -> Bytes {
	let mut call = vec![collective.index, PROPOSE];

	Compact(threshold).encode_to(&mut call);
	call.extend_from_slice(proposal);
	Compact(proposal.len() as u32).encode_to(&mut call);

	call
}
