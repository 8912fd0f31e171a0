// --- crates.io ---
use parity_scale_codec::{Decode, Encode};
use substorager::StorageHasher;
// --- subgov ---
use crate::{
	client::{self, ChainClient},
	error::SubgovResult,
	r#type::{AccountId, Balance, Bytes, Index},
	runtime::RuntimeProfile,
	storage,
};

pub type RefCount = u32;

#[derive(Clone, Debug, Default, PartialEq, Eq, Encode, Decode)]
pub struct AccountInfo {
	pub nonce: Index,
	pub consumers: RefCount,
	pub providers: RefCount,
	pub sufficients: RefCount,
	pub data: AccountData,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Encode, Decode)]
pub struct AccountData {
	pub free: Balance,
	pub reserved: Balance,
	pub frozen: Balance,
	pub flags: u128,
}

pub fn account_key(runtime: &RuntimeProfile, account_id: &AccountId) -> Bytes {
	storage::storage_map_key(
		&runtime.system.name,
		"Account",
		&StorageHasher::Blake2_128Concat,
		account_id,
	)
}

pub async fn account<C>(client: &C, account_id: &AccountId) -> SubgovResult<Option<AccountInfo>>
where
	C: ChainClient,
{
	client::decode_storage(client, &account_key(client.runtime(), account_id)).await
}
