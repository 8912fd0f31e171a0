pub mod polkadot;

// --- std ---
use std::{collections::BTreeMap, path::Path};
// --- crates.io ---
use serde::{Deserialize, Serialize};
// --- subgov ---
use crate::error::{Error, SubgovResult};

/// A pallet as seen from the outside: its storage prefix and its index in the runtime call enum.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pallet {
	pub name: String,
	pub index: u8,
}
impl Pallet {
	pub fn new(name: impl Into<String>, index: u8) -> Self {
		Self {
			name: name.into(),
			index,
		}
	}
}

/// Layout of the connected runtime.
///
/// Storage keys are derived from the pallet names, calls are encoded with the pallet indices.
/// Both must match the runtime the node is running.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeProfile {
	pub system: Pallet,
	pub balances: Pallet,
	pub scheduler: Pallet,
	pub preimage: Pallet,
	pub referenda: Pallet,
	pub utility: Pallet,
	pub proxy: Pallet,
	/// Absent on runtimes governed by referenda only.
	#[serde(default)]
	pub democracy: Option<Pallet>,
	/// Collective that proposes the fast-track and whose members size the default threshold.
	#[serde(default)]
	pub collective: Option<Pallet>,
	pub proxy_types: BTreeMap<String, u8>,
	/// Whether the runtime carries the `CheckMetadataHash` signed extension.
	pub check_metadata_hash: bool,
}
impl RuntimeProfile {
	pub async fn load(path: impl AsRef<Path>) -> SubgovResult<Self> {
		let path = path.as_ref();

		tracing::info!("Loading runtime profile from `{}`", path.display());

		Self::from_json(&async_std::fs::read(path).await?)
	}

	pub fn from_json(json: &[u8]) -> SubgovResult<Self> {
		Ok(serde_json::from_slice(json)?)
	}

	pub fn democracy(&self) -> SubgovResult<&Pallet> {
		self.democracy
			.as_ref()
			.ok_or_else(|| Error::Usage("Runtime profile has no `democracy` pallet".into()))
	}

	pub fn collective(&self) -> SubgovResult<&Pallet> {
		self.collective
			.as_ref()
			.ok_or_else(|| Error::Usage("Runtime profile has no `collective` pallet".into()))
	}

	pub fn proxy_type_index(&self, name: &str) -> SubgovResult<u8> {
		self.proxy_types.get(name).copied().ok_or_else(|| {
			Error::Usage(format!(
				"Unknown proxy type `{}`, expected one of `{:?}`",
				name,
				self.proxy_types.keys().collect::<Vec<_>>()
			))
		})
	}
}
impl Default for RuntimeProfile {
	fn default() -> Self {
		polkadot::profile()
	}
}
