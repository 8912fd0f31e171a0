// --- std ---
use std::{convert::TryFrom, path::PathBuf};
// --- crates.io ---
use clap::Args;
// --- subgov ---
use crate::{
	error::{Error, SubgovResult},
	fast_track::{FastTrack, ProxyConfig},
	frame::referenda::ReferendumIndex,
	r#type::*,
	runtime::RuntimeProfile,
	signer::{Signer, DEV_SEED},
};

#[derive(Clone, Debug, Args)]
pub struct NetworkOptions {
	/// Websocket endpoint of the node.
	#[arg(long, env = "SUBGOV_URL", default_value = "ws://127.0.0.1:9944")]
	pub url: String,
	/// JSON runtime profile to use instead of the built-in Polkadot layout.
	#[arg(long)]
	pub runtime_profile: Option<PathBuf>,
}
impl NetworkOptions {
	pub async fn runtime(&self) -> SubgovResult<RuntimeProfile> {
		match &self.runtime_profile {
			Some(path) => RuntimeProfile::load(path).await,
			None => Ok(RuntimeProfile::default()),
		}
	}
}

#[derive(Clone, Debug, Args)]
pub struct AccelerateOptions {
	#[command(flatten)]
	pub network: NetworkOptions,
	/// Index of an ongoing referendum.
	#[arg(long)]
	pub proposal_index: Option<ReferendumIndex>,
	/// Hex encoded call to submit as a new root referendum first.
	#[arg(long)]
	pub encoded_proposal: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProposalSource {
	Index(ReferendumIndex),
	Encoded(Bytes),
}

#[derive(Clone, Debug)]
pub struct AccelerateConfig {
	pub network: NetworkOptions,
	pub proposal: ProposalSource,
}
impl TryFrom<AccelerateOptions> for AccelerateConfig {
	type Error = Error;

	fn try_from(options: AccelerateOptions) -> SubgovResult<Self> {
		let proposal = match (options.proposal_index, options.encoded_proposal) {
			(Some(_), Some(_)) => {
				return Err(Error::Usage(
					"--encoded-proposal not compatible with --proposal-index".into(),
				))
			}
			(None, None) => {
				return Err(Error::Usage(
					"Missing --encoded-proposal or --proposal-index".into(),
				))
			}
			(Some(index), None) => ProposalSource::Index(index),
			(None, Some(call)) => ProposalSource::Encoded(hex2bytes(&call)?),
		};

		Ok(Self {
			network: options.network,
			proposal,
		})
	}
}

#[derive(Clone, Debug, Args)]
pub struct FastTrackOptions {
	#[command(flatten)]
	pub network: NetworkOptions,
	/// Hex sr25519 seed of the signing account.
	#[arg(long, visible_alias = "account")]
	pub account_priv_key: Option<String>,
	/// Sign with the sr25519 `//Alice` development key. This is not Moonbeam's ethereum `Alith`
	/// key, 20 byte account chains are not supported.
	#[arg(long, alias = "alice")]
	pub alith: bool,
	/// Hex account id being proxied.
	#[arg(long)]
	pub proxy: Option<String>,
	/// Proxy type to force, by name.
	#[arg(long)]
	pub proxy_type: Option<String>,
	/// Hash of the democracy proposal.
	#[arg(long)]
	pub proposal: String,
	/// Number of blocks of the voting period.
	#[arg(long)]
	pub voting: BlockNumber,
	/// Number of blocks of the enactment period.
	#[arg(long)]
	pub enactment: BlockNumber,
	#[arg(short, long)]
	pub collective_threshold: Option<u32>,
}

#[derive(Debug)]
pub struct FastTrackConfig {
	pub network: NetworkOptions,
	pub signer: Signer,
	pub fast_track: FastTrack,
}
impl TryFrom<FastTrackOptions> for FastTrackConfig {
	type Error = Error;

	fn try_from(options: FastTrackOptions) -> SubgovResult<Self> {
		let FastTrackOptions {
			network,
			account_priv_key,
			alith,
			proxy,
			proxy_type,
			proposal,
			voting,
			enactment,
			collective_threshold,
		} = options;
		let seed = match (account_priv_key, alith) {
			(Some(_), true) => {
				return Err(Error::Usage(
					"--alith not compatible with --account-priv-key".into(),
				))
			}
			(None, false) => {
				return Err(Error::Usage("Missing --account-priv-key or --alith".into()))
			}
			(Some(seed), false) => seed,
			(None, true) => DEV_SEED.into(),
		};
		let proxy = match proxy {
			Some(real) => Some(ProxyConfig {
				real: hex2array(&real)?,
				proxy_type,
			}),
			None => None,
		};

		Ok(Self {
			network,
			signer: Signer::from_seed(&seed)?,
			fast_track: FastTrack {
				proposal_hash: hex2array(&proposal)?,
				voting_period: voting,
				enactment_period: enactment,
				threshold: collective_threshold,
				proxy,
			},
		})
	}
}
