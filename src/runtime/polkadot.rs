// --- subgov ---
use crate::runtime::{Pallet, RuntimeProfile};

/// Polkadot relay chain under OpenGov, which has neither `Democracy` nor a technical collective.
pub fn profile() -> RuntimeProfile {
	RuntimeProfile {
		system: Pallet::new("System", 0),
		balances: Pallet::new("Balances", 5),
		scheduler: Pallet::new("Scheduler", 1),
		preimage: Pallet::new("Preimage", 10),
		referenda: Pallet::new("Referenda", 21),
		utility: Pallet::new("Utility", 26),
		proxy: Pallet::new("Proxy", 29),
		democracy: None,
		collective: None,
		proxy_types: [
			("Any", 0),
			("NonTransfer", 1),
			("Governance", 2),
			("Staking", 3),
			("CancelProxy", 6),
			("Auction", 7),
			("NominationPools", 8),
		]
		.iter()
		.map(|(name, index)| ((*name).to_owned(), *index))
		.collect(),
		check_metadata_hash: true,
	}
}
