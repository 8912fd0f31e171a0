// --- subgov ---
use crate::{
	client::{self, ChainClient},
	error::SubgovResult,
	r#type::{Balance, Bytes},
	runtime::RuntimeProfile,
	storage,
};

pub fn total_issuance_key(runtime: &RuntimeProfile) -> Bytes {
	storage::storage_value_key(&runtime.balances.name, "TotalIssuance")
}

pub async fn total_issuance<C>(client: &C) -> SubgovResult<Balance>
where
	C: ChainClient,
{
	Ok(
		client::decode_storage(client, &total_issuance_key(client.runtime()))
			.await?
			.unwrap_or_default(),
	)
}
