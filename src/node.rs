// --- crates.io ---
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
// --- subgov ---
use crate::{
	client::{ChainClient, Inclusion},
	error::{Error, JsonError, SubgovResult},
	extrinsic::*,
	r#type::*,
	rpc::{author, chain, dev, state},
	runtime::RuntimeProfile,
	signer::Signer,
	websocket::{self, Websocket},
};

const KEYS_PAGE_SIZE: u32 = 512;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Versions {
	spec_version: Version,
	transaction_version: Version,
}

/// A connection to a node serving the `dev` RPC namespace.
#[derive(Debug)]
pub struct Node {
	pub uri: String,
	pub websocket: Websocket,
	pub genesis_hash: Hash,
	pub versions: Versions,
	pub runtime: RuntimeProfile,
}
impl Node {
	pub async fn init(uri: impl Into<String>, runtime: RuntimeProfile) -> SubgovResult<Self> {
		let uri = uri.into();
		let websocket = Websocket::connect(&uri).await?;
		let mut node = Self {
			uri,
			websocket,
			genesis_hash: Default::default(),
			versions: Versions {
				spec_version: 0,
				transaction_version: 0,
			},
			runtime,
		};

		match node.fetch_chain_constants().await {
			Ok(()) => Ok(node),
			Err(e) => {
				node.disconnect().await;

				Err(e)
			}
		}
	}

	async fn fetch_chain_constants(&mut self) -> SubgovResult<()> {
		let genesis_hash = self
			.rpc("chain_getBlockHash", |id| chain::get_block_hash_with_id(0, id))
			.await?;

		self.genesis_hash = hex2array(
			genesis_hash
				.as_str()
				.ok_or(JsonError::ExpectedStr("chain_getBlockHash"))?,
		)?;
		self.versions = serde_json::from_value(
			self.rpc("state_getRuntimeVersion", state::get_runtime_version_with_id)
				.await?,
		)?;

		tracing::info!(
			"Connected to `{}` (genesis `{}`, spec `{}`, transaction `{}`)",
			self.uri,
			bytes2hex(&self.genesis_hash),
			self.spec_version(),
			self.transaction_version()
		);

		Ok(())
	}

	pub async fn disconnect(self) {
		self.websocket.disconnect().await;
	}

	pub fn spec_version(&self) -> Version {
		self.versions.spec_version
	}

	pub fn transaction_version(&self) -> Version {
		self.versions.transaction_version
	}

	pub fn genesis_hash(&self) -> Hash {
		self.genesis_hash
	}

	/// Sends one request and waits for its answer.
	async fn rpc<F>(&self, method: &str, request: F) -> SubgovResult<Value>
	where
		F: FnOnce(Id) -> Value,
	{
		let rpc_id = self.websocket.rpc_id().await;

		self.websocket
			.send(request(rpc_id).to_string())
			.await?;

		rpc_result(method, self.websocket.take_rpc_result_of(rpc_id).await?)
	}

	pub fn extrinsic(&self, call: &[u8], signer: &Signer, nonce: Index, tip: Balance) -> String {
		let extra = Extra::new(nonce, tip, self.runtime.check_metadata_hash);
		let additional_signed = AdditionalSigned {
			spec_version: self.spec_version(),
			transaction_version: self.transaction_version(),
			genesis_hash: self.genesis_hash(),
			era_block_hash: self.genesis_hash(),
			check_metadata_hash: self.runtime.check_metadata_hash,
		};
		let signature = SignedPayload(call, &extra, &additional_signed)
			.using_encoded(|payload| signer.sign(payload));
		let extrinsic = Extrinsic {
			signature: Some((
				MultiAddress::Id(signer.account_id()),
				MultiSignature::Sr25519(signature),
				extra,
			)),
			call: call.to_vec(),
		};

		extrinsic.hex_encode()
	}

	async fn block_number_of(&self, block_hash: Option<&str>) -> SubgovResult<BlockNumber> {
		let header = self
			.rpc("chain_getHeader", |id| chain::get_header_with_id(block_hash, id))
			.await?;
		let number = header["number"]
			.as_str()
			.ok_or(JsonError::ExpectedStr("chain_getHeader.number"))?;

		BlockNumber::from_str_radix(number.trim_start_matches("0x"), 16)
			.map_err(|e| Error::Hex(format!("`{}`: {}", number, e)))
	}

	async fn watch_extrinsic(&self, subscription_id: &str) -> SubgovResult<Hash> {
		loop {
			let notification = self.websocket.take_subscription_of(subscription_id).await?;
			let status = ExtrinsicStatus::from_json(&notification["params"]["result"])?;

			tracing::info!("`ExtrinsicStatus({})`: `{:?}`", subscription_id, status);

			if let Some(block_hash) = status.included_in() {
				return Ok(block_hash);
			}
			if status.is_rejection() {
				return Err(Error::Dispatch(format!("extrinsic {:?}", status)));
			}
		}
	}

	async fn unwatch_extrinsic(&self, subscription_id: &str) {
		if let Err(e) = self
			.rpc("author_unwatchExtrinsic", |id| {
				author::unwatch_extrinsic_with_id(subscription_id, id)
			})
			.await
		{
			tracing::debug!("Failed to unwatch `{}`: {}", subscription_id, e);
		}

		self.websocket.remove_subscription(subscription_id).await;
	}
}
#[async_trait]
impl ChainClient for Node {
	fn runtime(&self) -> &RuntimeProfile {
		&self.runtime
	}

	async fn block_number(&self) -> SubgovResult<BlockNumber> {
		self.block_number_of(None).await
	}

	async fn storage(&self, key: &[u8]) -> SubgovResult<Option<Bytes>> {
		let key = bytes2hex(key);
		let value = self
			.rpc("state_getStorage", |id| state::get_storage_with_id(&key, id))
			.await?;

		value.as_str().map(hex2bytes).transpose()
	}

	async fn storage_keys(&self, prefix: &[u8]) -> SubgovResult<Vec<Bytes>> {
		let prefix = bytes2hex(prefix);
		let mut keys = vec![];
		let mut start_key = None::<String>;

		loop {
			let page = serde_json::from_value::<Vec<String>>(
				self.rpc("state_getKeysPaged", |id| {
					state::get_keys_paged_with_id(&prefix, KEYS_PAGE_SIZE, start_key.as_deref(), id)
				})
				.await?,
			)?;
			let last_page = page.len() < KEYS_PAGE_SIZE as usize;

			start_key = page.last().cloned();

			for key in &page {
				keys.push(hex2bytes(key)?);
			}

			if last_page {
				return Ok(keys);
			}
		}
	}

	async fn set_storage(&self, changes: Vec<(Bytes, Option<Bytes>)>) -> SubgovResult<()> {
		let changes = changes
			.iter()
			.map(|(key, value)| (bytes2hex(key), value.as_deref().map(bytes2hex)))
			.collect::<Vec<_>>();

		self.rpc("dev_setStorage", |id| dev::set_storage_with_id(&changes, id))
			.await?;

		Ok(())
	}

	async fn new_block(&self, count: u32) -> SubgovResult<()> {
		let block_hash = self
			.rpc("dev_newBlock", |id| dev::new_block_with_id(count, id))
			.await?;

		tracing::debug!("New head `{}`", block_hash);

		Ok(())
	}

	async fn submit_and_watch(
		&self,
		call: &[u8],
		signer: &Signer,
		nonce: Index,
	) -> SubgovResult<Inclusion> {
		let extrinsic = self.extrinsic(call, signer, nonce, 0);

		tracing::trace!("Extrinsic: {}", extrinsic);

		let subscription = self
			.rpc("author_submitAndWatchExtrinsic", |id| {
				author::submit_and_watch_extrinsic_with_id(&extrinsic, id)
			})
			.await
			.map_err(|e| match e {
				Error::Rpc { message, .. } => Error::Dispatch(message),
				e => e,
			})?;
		let subscription_id =
			websocket::subscription_id(&subscription).ok_or(JsonError::ExpectedSubscriptionId)?;

		let watched = self.watch_extrinsic(&subscription_id).await;

		self.unwatch_extrinsic(&subscription_id).await;

		let block_hash = watched?;
		let block_number = self
			.block_number_of(Some(&bytes2hex(&block_hash)))
			.await?;

		Ok(Inclusion {
			block_hash,
			block_number,
		})
	}
}

fn rpc_result(method: &str, mut response: Value) -> SubgovResult<Value> {
	if let Some(error) = response.get("error") {
		return Err(Error::Rpc {
			method: method.into(),
			message: error["message"]
				.as_str()
				.map(|message| match error["data"].as_str() {
					Some(data) => format!("{}: {}", message, data),
					None => message.into(),
				})
				.unwrap_or_else(|| error.to_string()),
		});
	}

	Ok(response["result"].take())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mock::MockNode;
	use serde_json::json;

	#[async_std::test]
	async fn included_extrinsic_is_unwatched() {
		let server = MockNode::dev_chain(json!({ "inBlock": format!("0x{}", "22".repeat(32)) })).await;
		let node = Node::init(&server.url, RuntimeProfile::default()).await.unwrap();

		assert_eq!(node.spec_version(), 1_000_000);
		assert_eq!(node.genesis_hash(), [0x11; 32]);

		let inclusion = node
			.submit_and_watch(&[0, 0], &Signer::dev().unwrap(), 0)
			.await
			.unwrap();

		assert_eq!(
			inclusion,
			Inclusion {
				block_hash: [0x22; 32],
				block_number: 8
			}
		);
		assert!(!node.websocket.subscriptions.lock().await.contains_key("watch"));

		node.disconnect().await;

		assert_eq!(
			server.closed().await,
			vec![
				"chain_getBlockHash",
				"state_getRuntimeVersion",
				"author_submitAndWatchExtrinsic",
				"author_unwatchExtrinsic",
				"chain_getHeader"
			]
		);
	}

	#[async_std::test]
	async fn invalid_extrinsic_is_unwatched() {
		let server = MockNode::dev_chain(json!("invalid")).await;
		let node = Node::init(&server.url, RuntimeProfile::default()).await.unwrap();

		assert!(matches!(
			node.submit_and_watch(&[0, 0], &Signer::dev().unwrap(), 0).await,
			Err(Error::Dispatch(_))
		));
		assert_eq!(
			server.methods().last().map(String::as_str),
			Some("author_unwatchExtrinsic")
		);

		node.disconnect().await;
		server.closed().await;
	}

	#[async_std::test]
	async fn failed_init_closes_the_connection() {
		let server = MockNode::spawn(|request| {
			vec![json!({
				"jsonrpc": "2.0",
				"id": request["id"],
				"error": { "code": -32601, "message": "Method not found" }
			})]
		})
		.await;

		assert!(matches!(
			Node::init(&server.url, RuntimeProfile::default()).await,
			Err(Error::Rpc { .. })
		));
		assert_eq!(server.closed().await, vec!["chain_getBlockHash"]);
	}

	#[test]
	fn rpc_errors_carry_message_and_data() {
		let response = json!({
			"id": 1,
			"error": { "code": 1010, "message": "Invalid Transaction", "data": "Inability to pay some fees" }
		});

		match rpc_result("author_submitAndWatchExtrinsic", response) {
			Err(Error::Rpc { method, message }) => {
				assert_eq!(method, "author_submitAndWatchExtrinsic");
				assert_eq!(message, "Invalid Transaction: Inability to pay some fees");
			}
			r => panic!("unexpected {:?}", r),
		}
	}

	#[test]
	fn rpc_result_takes_the_result_field() {
		assert_eq!(
			rpc_result("state_getStorage", json!({ "id": 1, "result": null })).unwrap(),
			Value::Null
		);
		assert_eq!(
			rpc_result("chain_getBlockHash", json!({ "id": 1, "result": "0x00" })).unwrap(),
			json!("0x00")
		);
	}
}
