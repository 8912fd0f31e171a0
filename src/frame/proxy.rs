// --- crates.io ---
use parity_scale_codec::Encode;
// --- subgov ---
use crate::{
	extrinsic::MultiAddress,
	r#type::{AccountId, Bytes},
	runtime::RuntimeProfile,
};

pub const PROXY: u8 = 0;

/// Dispatches `call` as `real`, optionally restricted to one proxy type.
pub fn proxy(
	runtime: &RuntimeProfile,
	real: &AccountId,
	force_proxy_type: Option<u8>,
	call: &[u8],
) -> Bytes {
	let mut proxy = (
		runtime.proxy.index,
		PROXY,
		MultiAddress::Id(*real),
		force_proxy_type,
	)
		.encode();

	proxy.extend_from_slice(call);

	proxy
}
