// --- crates.io ---
use parity_scale_codec::{Compact, Encode};
// --- subgov ---
use crate::{r#type::Bytes, runtime::RuntimeProfile};

pub const BATCH_ALL: u8 = 2;

/// Dispatches every call or none of them.
pub fn batch_all(runtime: &RuntimeProfile, calls: &[Bytes]) -> Bytes {
	let mut batch = vec![runtime.utility.index, BATCH_ALL];

	Compact(calls.len() as u32).encode_to(&mut batch);

	for call in calls {
		batch.extend_from_slice(call);
	}

	batch
}
