//! JSON-RPC request builders, one function per node method.

// --- crates.io ---
use serde_json::{json, Value};
// --- subgov ---
use crate::r#type::Id;

pub fn rpc(id: Id, method: &str, params: Value) -> Value {
	json!({
		"jsonrpc": "2.0",
		"id": id,
		"method": method,
		"params": params,
	})
}

pub mod author {
	use super::*;

	pub fn submit_and_watch_extrinsic_with_id(extrinsic: &str, id: Id) -> Value {
		rpc(id, "author_submitAndWatchExtrinsic", json!([extrinsic]))
	}

	pub fn unwatch_extrinsic_with_id(subscription_id: &str, id: Id) -> Value {
		rpc(id, "author_unwatchExtrinsic", json!([subscription_id]))
	}
}

pub mod chain {
	use super::*;

	pub fn get_block_hash_with_id(block_number: u32, id: Id) -> Value {
		rpc(id, "chain_getBlockHash", json!([block_number]))
	}

	pub fn get_header_with_id(block_hash: Option<&str>, id: Id) -> Value {
		match block_hash {
			Some(block_hash) => rpc(id, "chain_getHeader", json!([block_hash])),
			None => rpc(id, "chain_getHeader", json!([])),
		}
	}
}

pub mod state {
	use super::*;

	pub fn get_storage_with_id(key: &str, id: Id) -> Value {
		rpc(id, "state_getStorage", json!([key]))
	}

	pub fn get_keys_paged_with_id(
		prefix: &str,
		count: u32,
		start_key: Option<&str>,
		id: Id,
	) -> Value {
		rpc(id, "state_getKeysPaged", json!([prefix, count, start_key]))
	}

	pub fn get_runtime_version_with_id(id: Id) -> Value {
		rpc(id, "state_getRuntimeVersion", json!([]))
	}
}

/// Development namespace served by chopsticks and dev nodes.
pub mod dev {
	use super::*;

	/// Each change is `[key, value]`, a `null` value clears the key.
	pub fn set_storage_with_id(changes: &[(String, Option<String>)], id: Id) -> Value {
		let changes = changes
			.iter()
			.map(|(key, value)| json!([key, value]))
			.collect::<Vec<_>>();

		rpc(id, "dev_setStorage", json!([changes]))
	}

	pub fn new_block_with_id(count: u32, id: Id) -> Value {
		rpc(id, "dev_newBlock", json!([{ "count": count }]))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn set_storage_clears_keys_with_null() {
		let request = dev::set_storage_with_id(
			&[
				("0x01".into(), None),
				("0x02".into(), Some("0x0304".into())),
			],
			7,
		);

		assert_eq!(request["id"], 7);
		assert_eq!(request["method"], "dev_setStorage");
		assert_eq!(
			request["params"],
			json!([[["0x01", null], ["0x02", "0x0304"]]])
		);
	}

	#[test]
	fn keys_paged_starts_without_a_start_key() {
		assert_eq!(
			state::get_keys_paged_with_id("0xaa", 100, None, 1)["params"],
			json!(["0xaa", 100, null])
		);
	}
}
