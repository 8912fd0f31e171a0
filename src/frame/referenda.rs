// --- crates.io ---
use parity_scale_codec::{Decode, Encode};
use substorager::StorageHasher;
// --- subgov ---
use crate::{
	client::{self, ChainClient},
	error::SubgovResult,
	frame::support::{Bounded, DispatchTime, PalletsOrigin},
	r#type::{AccountId, Balance, BlockNumber, Bytes},
	runtime::RuntimeProfile,
	storage,
};

pub type ReferendumIndex = u32;
pub type TrackId = u16;

pub const SUBMIT: u8 = 0;
pub const NUDGE_REFERENDUM: u8 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub enum ReferendumInfo {
	Ongoing(ReferendumStatus),
	Approved(BlockNumber, Option<Deposit>, Option<Deposit>),
	Rejected(BlockNumber, Option<Deposit>, Option<Deposit>),
	Cancelled(BlockNumber, Option<Deposit>, Option<Deposit>),
	TimedOut(BlockNumber, Option<Deposit>, Option<Deposit>),
	Killed(BlockNumber),
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct ReferendumStatus {
	pub track: TrackId,
	pub origin: PalletsOrigin,
	pub proposal: Bounded,
	pub enactment: DispatchTime,
	pub submitted: BlockNumber,
	pub submission_deposit: Deposit,
	pub decision_deposit: Option<Deposit>,
	pub deciding: Option<DecidingStatus>,
	pub tally: Tally,
	pub in_queue: bool,
	/// `(when, (scheduled block, scheduled index))`.
	pub alarm: Option<(BlockNumber, (BlockNumber, u32))>,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct Deposit {
	pub who: AccountId,
	pub amount: Balance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
pub struct DecidingStatus {
	pub since: BlockNumber,
	pub confirming: Option<BlockNumber>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Encode, Decode)]
pub struct Tally {
	pub ayes: Balance,
	pub nays: Balance,
	pub support: Balance,
}

pub fn referendum_info_for_key(runtime: &RuntimeProfile, index: ReferendumIndex) -> Bytes {
	storage::storage_map_key(
		&runtime.referenda.name,
		"ReferendumInfoFor",
		&StorageHasher::Blake2_128Concat,
		&index.encode(),
	)
}

pub fn referendum_count_key(runtime: &RuntimeProfile) -> Bytes {
	storage::storage_value_key(&runtime.referenda.name, "ReferendumCount")
}

pub async fn referendum_info_for<C>(
	client: &C,
	index: ReferendumIndex,
) -> SubgovResult<Option<ReferendumInfo>>
where
	C: ChainClient,
{
	client::decode_storage(client, &referendum_info_for_key(client.runtime(), index)).await
}

pub async fn referendum_count<C>(client: &C) -> SubgovResult<ReferendumIndex>
where
	C: ChainClient,
{
	Ok(
		client::decode_storage(client, &referendum_count_key(client.runtime()))
			.await?
			.unwrap_or_default(),
	)
}

pub fn submit(
	runtime: &RuntimeProfile,
	origin: &PalletsOrigin,
	proposal: &Bounded,
	enactment: DispatchTime,
) -> Bytes {
	(runtime.referenda.index, SUBMIT, origin, proposal, enactment).encode()
}

pub fn nudge_referendum(runtime: &RuntimeProfile, index: ReferendumIndex) -> Bytes {
	(runtime.referenda.index, NUDGE_REFERENDUM, index).encode()
}

/// Referendum index of an encoded `nudge_referendum` call, `None` for any other call.
pub fn decode_nudge_referendum(pallet_index: u8, call: &[u8]) -> Option<ReferendumIndex> {
	let mut input = call;

	match <(u8, u8, ReferendumIndex)>::decode(&mut input) {
		Ok((pallet, NUDGE_REFERENDUM, index)) if pallet == pallet_index && input.is_empty() => {
			Some(index)
		}
		_ => None,
	}
}
