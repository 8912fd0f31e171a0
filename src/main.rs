pub mod accelerator;
pub mod client;
pub mod config;
pub mod error;
pub mod extrinsic;
pub mod fast_track;
pub mod frame;
#[cfg(test)]
mod mock;
pub mod node;
pub mod r#type;
pub mod rpc;
pub mod runtime;
pub mod signer;
pub mod storage;
pub mod websocket;

// --- std ---
use std::{convert::TryFrom, env, process};
// --- crates.io ---
use clap::{Parser, Subcommand};
// --- subgov ---
use crate::{
	config::{
		AccelerateConfig, AccelerateOptions, FastTrackConfig, FastTrackOptions, NetworkOptions,
	},
	error::{Error, SubgovResult},
	node::Node,
};

#[derive(Debug, Parser)]
#[command(version, about = "Governance shortcuts for development chains")]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Pass and enact a referendum within two blocks.
	Accelerate(AccelerateOptions),
	/// Propose a democracy fast-track through the technical collective.
	FastTrack(FastTrackOptions),
}

#[async_std::main]
async fn main() {
	if env::var("RUST_LOG").is_err() {
		env::set_var("RUST_LOG", "subgov=info");
	}
	pretty_env_logger::init_timed();

	match run(Cli::parse()).await {
		Ok(()) => (),
		Err(Error::Usage(message)) => eprintln!("{}", message),
		Err(e) => {
			eprintln!("Error: {}", e);

			process::exit(1);
		}
	}
}

async fn run(cli: Cli) -> SubgovResult<()> {
	match cli.command {
		Command::Accelerate(options) => {
			let AccelerateConfig { network, proposal } = AccelerateConfig::try_from(options)?;
			let node = connect(&network).await?;
			let result = accelerator::run(&node, &proposal).await;

			node.disconnect().await;

			result
		}
		Command::FastTrack(options) => {
			let FastTrackConfig {
				network,
				signer,
				fast_track,
			} = FastTrackConfig::try_from(options)?;
			let node = connect(&network).await?;
			let result = fast_track::fast_track(&node, signer, &fast_track)
				.await
				.map(drop);

			node.disconnect().await;

			result
		}
	}
}

async fn connect(network: &NetworkOptions) -> SubgovResult<Node> {
	Node::init(&network.url, network.runtime().await?).await
}
