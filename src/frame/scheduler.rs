// --- crates.io ---
use parity_scale_codec::{Decode, Encode};
use substorager::StorageHasher;
// --- subgov ---
use crate::{
	client::{self, ChainClient},
	error::SubgovResult,
	frame::support::{Bounded, PalletsOrigin},
	r#type::{bytes2hex, BlockNumber, Bytes},
	runtime::RuntimeProfile,
	storage,
};

pub type TaskName = [u8; 32];
pub type TaskAddress = (BlockNumber, u32);
pub type Period = (BlockNumber, u32);
pub type Agenda = Vec<Option<Scheduled>>;

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct Scheduled {
	pub maybe_id: Option<TaskName>,
	pub priority: u8,
	pub call: Bounded,
	pub maybe_periodic: Option<Period>,
	pub origin: PalletsOrigin,
}

/// An agenda as found on chain, with the raw key and value it was read from.
///
/// Origins are only partially understood, so the agenda is moved around as `raw`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgendaEntry {
	pub key: Bytes,
	pub raw: Bytes,
	pub agenda: Agenda,
}

pub fn agenda_prefix(runtime: &RuntimeProfile) -> Bytes {
	storage::storage_value_key(&runtime.scheduler.name, "Agenda")
}

pub fn agenda_key(runtime: &RuntimeProfile, block_number: BlockNumber) -> Bytes {
	storage::storage_map_key(
		&runtime.scheduler.name,
		"Agenda",
		&StorageHasher::Twox64Concat,
		&block_number.encode(),
	)
}

pub fn lookup_key(runtime: &RuntimeProfile, task_name: &TaskName) -> Bytes {
	storage::storage_map_key(
		&runtime.scheduler.name,
		"Lookup",
		&StorageHasher::Twox64Concat,
		task_name,
	)
}

pub async fn agenda<C>(client: &C) -> SubgovResult<Vec<AgendaEntry>>
where
	C: ChainClient,
{
	let mut entries = vec![];

	for key in client
		.storage_keys(&agenda_prefix(client.runtime()))
		.await?
	{
		let raw = match client.storage(&key).await? {
			Some(raw) => raw,
			None => continue,
		};
		let mut input = &*raw;
		let agenda = match Agenda::decode(&mut input) {
			Ok(agenda) => agenda,
			Err(e) => {
				tracing::warn!("Skipping undecodable agenda `{}`: {}", bytes2hex(&key), e);

				continue;
			}
		};

		if !input.is_empty() {
			tracing::warn!(
				"Agenda `{}` has `{}` trailing bytes",
				bytes2hex(&key),
				input.len()
			);
		}

		entries.push(AgendaEntry { key, raw, agenda });
	}

	Ok(entries)
}

pub async fn lookup<C>(client: &C, task_name: &TaskName) -> SubgovResult<Option<TaskAddress>>
where
	C: ChainClient,
{
	client::decode_storage(client, &lookup_key(client.runtime(), task_name)).await
}

#[cfg(test)]
pub mod tests {
	use super::*;
	use crate::mock::MockChain;
	use parity_scale_codec::Compact;

	/// A task whose origin carries a payload, like `Parachain(2000)`, which only decodes as its
	/// leading `(pallet, variant)` pair.
	pub fn parachain_origin_task(call: Bounded) -> Bytes {
		let mut task = vec![1];

		Scheduled {
			maybe_id: None,
			priority: 63,
			call,
			maybe_periodic: None,
			origin: PalletsOrigin::Other {
				pallet: 19,
				variant: 0,
			},
		}
		.encode_to(&mut task);
		2000u32.encode_to(&mut task);

		task
	}

	pub fn raw_agenda(tasks: &[Bytes]) -> Bytes {
		let mut agenda = Compact(tasks.len() as u32).encode();

		for task in tasks {
			agenda.extend_from_slice(task);
		}

		agenda
	}

	#[async_std::test]
	async fn agenda_keeps_the_raw_value() {
		let chain = MockChain::new(1);
		let raw = raw_agenda(&[parachain_origin_task(Bounded::Inline(vec![1]))]);

		chain.insert_raw(agenda_key(&chain.runtime, 30), raw.clone());

		let entries = agenda(&chain).await.unwrap();

		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].raw, raw);
		assert_eq!(entries[0].agenda.len(), 1);
	}

	#[async_std::test]
	async fn undecodable_agenda_is_skipped() {
		let chain = MockChain::new(1);
		let task = parachain_origin_task(Bounded::Inline(vec![1]));

		chain.insert_raw(
			agenda_key(&chain.runtime, 30),
			raw_agenda(&[task.clone(), task]),
		);
		chain.insert(agenda_key(&chain.runtime, 40), Agenda::new());

		let entries = agenda(&chain).await.unwrap();

		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].key, agenda_key(&chain.runtime, 40));
	}
}
