// --- crates.io ---
use substorager::StorageHasher;
// --- subgov ---
use crate::r#type::Bytes;

/// Key of a plain storage value, also the iteration prefix of a map.
pub fn storage_value_key(prefix: &str, item: &str) -> Bytes {
	substorager::storage_key(prefix, item)
}

pub fn storage_map_key(prefix: &str, item: &str, hasher: &StorageHasher, key: &[u8]) -> Bytes {
	substorager::storage_map_key(prefix, item, (hasher, key))
}
