// --- subgov ---
use crate::{
	client::{ChainClient, Inclusion, Submitter},
	error::{Error, SubgovResult},
	frame::{
		collective::{self, MemberCount},
		democracy, proxy,
	},
	r#type::*,
	runtime::{Pallet, RuntimeProfile},
	signer::Signer,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyConfig {
	pub real: AccountId,
	/// Name of the proxy type, resolved through the runtime profile.
	pub proxy_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastTrack {
	pub proposal_hash: Hash,
	pub voting_period: BlockNumber,
	pub enactment_period: BlockNumber,
	/// `None` and `Some(0)` both mean three fifths of the collective.
	pub threshold: Option<MemberCount>,
	pub proxy: Option<ProxyConfig>,
}

/// Three fifths of the collective, rounded up.
pub fn collective_threshold(members: MemberCount) -> MemberCount {
	(3 * members + 4) / 5
}

/// The `fast_track` call the collective votes on.
pub fn proposal(democracy: &Pallet, fast_track: &FastTrack) -> Bytes {
	democracy::fast_track(
		democracy,
		&fast_track.proposal_hash,
		fast_track.voting_period,
		fast_track.enactment_period,
	)
}

/// `propose(threshold, fast_track(..))`, dispatched through `proxy` when one is configured.
pub fn build_call(
	runtime: &RuntimeProfile,
	fast_track: &FastTrack,
	threshold: MemberCount,
) -> SubgovResult<Bytes> {
	let call = collective::propose(
		runtime.collective()?,
		threshold,
		&proposal(runtime.democracy()?, fast_track),
	);

	match &fast_track.proxy {
		Some(ProxyConfig { real, proxy_type }) => {
			let proxy_type = proxy_type
				.as_deref()
				.map(|name| runtime.proxy_type_index(name))
				.transpose()?;

			Ok(proxy::proxy(runtime, real, proxy_type, &call))
		}
		None => Ok(call),
	}
}

/// Proposes the fast-track and checks that it took effect.
///
/// Below two votes the collective dispatches the proposal at once, so a new democracy referendum
/// is expected. Otherwise the proposal must now be open in the collective.
pub async fn fast_track<C>(
	client: &C,
	signer: Signer,
	fast_track: &FastTrack,
) -> SubgovResult<Inclusion>
where
	C: ChainClient,
{
	let runtime = client.runtime();
	let democracy = runtime.democracy()?;
	let collective = runtime.collective()?;
	let threshold = match fast_track.threshold.filter(|threshold| *threshold > 0) {
		Some(threshold) => threshold,
		None => {
			let members = collective::members_count(client, collective).await?;

			tracing::info!("`{}` has `{}` members", collective.name, members);

			if members == 0 {
				return Err(Error::EmptyCollective(collective.name.clone()));
			}

			collective_threshold(members)
		}
	};
	let call = build_call(runtime, fast_track, threshold)?;
	let proposal_hash = subhasher::blake2_256(proposal(democracy, fast_track));
	let executes = threshold < 2;
	let referendum_count = democracy::referendum_count(client, democracy).await?;

	if !executes && collective::is_proposed(client, collective, &proposal_hash).await? {
		return Err(Error::Dispatch(format!(
			"`{}` already has proposal `{}`",
			collective.name,
			bytes2hex(&proposal_hash)
		)));
	}

	tracing::info!(
		"Fast tracking `{}` with threshold `{}` (voting `{}`, enactment `{}`)",
		bytes2hex(&fast_track.proposal_hash),
		threshold,
		fast_track.voting_period,
		fast_track.enactment_period
	);

	let inclusion = Submitter::new(client, signer).await?.submit(&call).await?;
	let took_effect = if executes {
		democracy::referendum_count(client, democracy).await? > referendum_count
	} else {
		collective::is_proposed(client, collective, &proposal_hash).await?
	};

	if !took_effect {
		return Err(Error::Dispatch(format!(
			"fast track included in block `#{}` but {}",
			inclusion.block_number,
			if executes {
				"no democracy referendum was started"
			} else {
				"no collective proposal was opened"
			}
		)));
	}

	tracing::info!(
		"Fast track included in `#{}` `{}`",
		inclusion.block_number,
		bytes2hex(&inclusion.block_hash)
	);

	Ok(inclusion)
}
