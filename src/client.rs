// --- crates.io ---
use async_trait::async_trait;
use parity_scale_codec::Decode;
// --- subgov ---
use crate::{
	error::SubgovResult,
	frame::system,
	r#type::*,
	runtime::RuntimeProfile,
	signer::Signer,
};

/// Everything the governance procedures need from a node.
///
/// Storage writes go through `dev_setStorage` and are not transactional: whatever was read
/// before is overwritten, so callers must not run two procedures against the same chain at once.
#[async_trait]
pub trait ChainClient: Send + Sync {
	fn runtime(&self) -> &RuntimeProfile;

	async fn block_number(&self) -> SubgovResult<BlockNumber>;

	async fn storage(&self, key: &[u8]) -> SubgovResult<Option<Bytes>>;

	async fn storage_keys(&self, prefix: &[u8]) -> SubgovResult<Vec<Bytes>>;

	/// Applies the changes in order, `None` clears the key.
	async fn set_storage(&self, changes: Vec<(Bytes, Option<Bytes>)>) -> SubgovResult<()>;

	async fn new_block(&self, count: u32) -> SubgovResult<()>;

	/// Resolves once the extrinsic is in a block, or with the reason the pool refused it.
	async fn submit_and_watch(
		&self,
		call: &[u8],
		signer: &Signer,
		nonce: Index,
	) -> SubgovResult<Inclusion>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inclusion {
	pub block_hash: Hash,
	pub block_number: BlockNumber,
}

pub async fn decode_storage<C, T>(client: &C, key: &[u8]) -> SubgovResult<Option<T>>
where
	C: ChainClient,
	T: Decode,
{
	match client.storage(key).await? {
		Some(value) => Ok(Some(T::decode(&mut &*value)?)),
		None => Ok(None),
	}
}

/// Signs calls with an explicit nonce so that submissions can follow each other without waiting
/// for the pool to catch up.
pub struct Submitter<'a, C> {
	client: &'a C,
	signer: Signer,
	nonce: Index,
}
impl<'a, C> Submitter<'a, C>
where
	C: ChainClient,
{
	pub async fn new(client: &'a C, signer: Signer) -> SubgovResult<Submitter<'a, C>> {
		let account_id = signer.account_id();
		let account = system::account(client, &account_id).await?;

		if let Some(account) = &account {
			tracing::info!(
				"Signer `{}` has nonce `{}` and free balance `{}`",
				bytes2hex(&account_id),
				account.nonce,
				account.data.free
			);
		} else {
			tracing::warn!("Signer `{}` has no account", bytes2hex(&account_id));
		}

		Ok(Self {
			client,
			signer,
			nonce: account.map(|account| account.nonce).unwrap_or_default(),
		})
	}

	pub async fn submit(&mut self, call: &[u8]) -> SubgovResult<Inclusion> {
		let nonce = self.nonce;

		self.nonce += 1;

		self.client
			.submit_and_watch(call, &self.signer, nonce)
			.await
	}
}
