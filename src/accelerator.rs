//! Pushes a referendum through decision and enactment on a development chain.
//!
//! The referendum record is overwritten so that the next scheduler pass confirms it, then the
//! scheduler's own tasks are moved next to the head so that two blocks are enough to see the
//! proposal enacted.

// --- std ---
use std::fmt::{Display, Formatter, Result as FmtResult};
// --- crates.io ---
use parity_scale_codec::Encode;
// --- subgov ---
use crate::{
	client::{ChainClient, Submitter},
	config::ProposalSource,
	error::{Error, SubgovResult},
	frame::{
		balances, preimage,
		referenda::{self, DecidingStatus, ReferendumIndex, ReferendumInfo, ReferendumStatus, Tally},
		scheduler::{self, AgendaEntry, TaskAddress},
		support::{Bounded, DispatchTime, PalletsOrigin},
		utility,
	},
	r#type::*,
	runtime::RuntimeProfile,
	signer::Signer,
};

/// Selects the scheduled task to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskMatcher {
	/// The referendum alarm, an inline `nudge_referendum(index)`.
	NudgeReferendum { pallet: u8, index: ReferendumIndex },
	/// Any task whose call has this identity hash.
	CallHash(Hash),
}
impl TaskMatcher {
	pub fn nudge_referendum(runtime: &RuntimeProfile, index: ReferendumIndex) -> Self {
		Self::NudgeReferendum {
			pallet: runtime.referenda.index,
			index,
		}
	}

	pub fn matches(&self, call: &Bounded) -> bool {
		match (self, call) {
			(Self::NudgeReferendum { pallet, index }, Bounded::Inline(call)) => {
				referenda::decode_nudge_referendum(*pallet, call) == Some(*index)
			}
			(Self::NudgeReferendum { .. }, _) => false,
			(Self::CallHash(hash), call) => &call.identity_hash() == hash,
		}
	}
}
impl Display for TaskMatcher {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::NudgeReferendum { index, .. } => write!(f, "nudge_referendum({})", index),
			Self::CallHash(hash) => write!(f, "call {}", bytes2hex(hash)),
		}
	}
}

pub async fn run<C>(client: &C, proposal: &ProposalSource) -> SubgovResult<()>
where
	C: ChainClient,
{
	let index = match proposal {
		ProposalSource::Index(index) => *index,
		ProposalSource::Encoded(call) => submit_proposal(client, Signer::dev()?, call).await?,
	};

	tracing::info!(
		"[#{}]: Referendum `{}`",
		client.block_number().await?,
		index
	);

	accelerate(client, index).await
}

/// Notes `call` as a preimage and submits it as a root referendum, both in one batch.
pub async fn submit_proposal<C>(
	client: &C,
	signer: Signer,
	call: &[u8],
) -> SubgovResult<ReferendumIndex>
where
	C: ChainClient,
{
	let runtime = client.runtime();
	let index = referenda::referendum_count(client).await?;
	let proposal = Bounded::lookup(call);
	let batch = utility::batch_all(
		runtime,
		&[
			preimage::note_preimage(runtime, call),
			referenda::submit(runtime, &PalletsOrigin::root(), &proposal, DispatchTime::At(0)),
		],
	);

	tracing::info!(
		"Submitting referendum `{}` for call `{}`",
		index,
		bytes2hex(&proposal.identity_hash())
	);

	let inclusion = Submitter::new(client, signer).await?.submit(&batch).await?;

	if referenda::referendum_info_for(client, index).await?.is_none() {
		return Err(Error::Dispatch(format!(
			"failed to submit referenda: block `#{}` has no referendum `{}`",
			inclusion.block_number, index
		)));
	}

	Ok(index)
}

pub async fn accelerate<C>(client: &C, index: ReferendumIndex) -> SubgovResult<()>
where
	C: ChainClient,
{
	let runtime = client.runtime();
	let total_issuance = balances::total_issuance(client).await?;
	let status = match referenda::referendum_info_for(client, index).await? {
		Some(ReferendumInfo::Ongoing(status)) => status,
		Some(_) => return Err(Error::ReferendumNotOngoing(index)),
		None => return Err(Error::ReferendumNotFound(index)),
	};
	let key = referenda::referendum_info_for_key(runtime, index);
	let call_hash = status.proposal.identity_hash();
	let block_number = client.block_number().await?;
	let status = fast_forwarded(status, block_number, total_issuance);

	tracing::info!(
		"`SetStorage` fast referendum `{}` at `{}`",
		index,
		bytes2hex(&key)
	);

	client
		.set_storage(vec![(key, Some(ReferendumInfo::Ongoing(status).encode()))])
		.await?;

	relocate(client, 1, &TaskMatcher::nudge_referendum(runtime, index)).await?;
	fast_forward(client).await?;
	relocate(client, 1, &TaskMatcher::CallHash(call_hash)).await?;
	fast_forward(client).await
}

/// `status` as it would look if the referendum had been confirming since the previous block with
/// every token in favour.
pub fn fast_forwarded(
	mut status: ReferendumStatus,
	block_number: BlockNumber,
	total_issuance: Balance,
) -> ReferendumStatus {
	let previous = block_number.saturating_sub(1);
	let next = block_number.saturating_add(1);
	let votes = total_issuance.saturating_sub(1);

	status.enactment = DispatchTime::After(0);
	status.deciding = Some(DecidingStatus {
		since: previous,
		confirming: Some(previous),
	});
	status.tally = Tally {
		ayes: votes,
		nays: 0,
		support: votes,
	};
	status.alarm = Some((next, (next, 0)));

	status
}

/// Moves the first agenda holding a matching task `block_offset` blocks past the head.
///
/// The whole agenda is moved, and the task's lookup entry follows it.
pub async fn relocate<C>(
	client: &C,
	block_offset: BlockNumber,
	matcher: &TaskMatcher,
) -> SubgovResult<TaskAddress>
where
	C: ChainClient,
{
	let runtime = client.runtime();
	let block_number = client.block_number().await?;
	let target = block_number + block_offset;

	for AgendaEntry { key, raw, agenda } in scheduler::agenda(client).await? {
		let scheduled = match agenda
			.iter()
			.flatten()
			.find(|scheduled| matcher.matches(&scheduled.call))
		{
			Some(scheduled) => scheduled,
			None => continue,
		};

		tracing::info!("`Rescheduling` `{}` to `#{}`", matcher, target);

		client
			.set_storage(vec![
				(key, None),
				(scheduler::agenda_key(runtime, target), Some(raw)),
			])
			.await?;

		if let Some(task_name) = scheduled.maybe_id {
			let address = scheduler::lookup(client, &task_name).await?;

			tracing::debug!(
				"Checking lookup `{}`: `{:?}`",
				bytes2hex(&task_name),
				address
			);

			if address.is_some() {
				client
					.set_storage(vec![(
						scheduler::lookup_key(runtime, &task_name),
						Some((target, 0u32).encode()),
					)])
					.await?;

				tracing::debug!("Updated lookup to `({}, 0)`", target);
			}
		}

		return Ok((target, 0));
	}

	Err(Error::NoScheduledCall {
		matcher: matcher.to_string(),
		block_number,
	})
}

async fn fast_forward<C>(client: &C) -> SubgovResult<()>
where
	C: ChainClient,
{
	tracing::info!(
		"`Fast forward` `1` to `#{}`",
		client.block_number().await? + 1
	);

	client.new_block(1).await
}
