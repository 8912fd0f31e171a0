// --- crates.io ---
use parity_scale_codec::Encode;
// --- subgov ---
use crate::{r#type::Bytes, runtime::RuntimeProfile};

pub const NOTE_PREIMAGE: u8 = 0;

pub fn note_preimage(runtime: &RuntimeProfile, call: &[u8]) -> Bytes {
	(runtime.preimage.index, NOTE_PREIMAGE, call).encode()
}
