// --- std ---
use std::{
	collections::BTreeMap,
	sync::{Arc, Mutex},
	time::Duration,
};
// --- crates.io ---
use async_std::{
	net::TcpListener,
	task::{self, JoinHandle},
};
use async_trait::async_trait;
use async_tungstenite::tungstenite::Message;
use futures::{SinkExt, StreamExt};
use parity_scale_codec::Encode;
use serde_json::{json, Value};
// --- subgov ---
use crate::{
	client::{ChainClient, Inclusion},
	error::SubgovResult,
	frame::{balances, collective, referenda, scheduler, system},
	r#type::*,
	runtime::RuntimeProfile,
	signer::Signer,
};

pub type SubmitHook = Box<dyn Fn(&mut MockState, &[u8]) -> SubgovResult<()> + Send + Sync>;

#[derive(Debug, Default)]
pub struct MockState {
	pub block_number: BlockNumber,
	pub storage: BTreeMap<Bytes, Bytes>,
	pub set_storage_calls: Vec<Vec<(Bytes, Option<Bytes>)>>,
	/// `(signer, nonce, call)` of every submission.
	pub submitted: Vec<(AccountId, Index, Bytes)>,
}

/// An in-memory chain. Blocks only bump the height, the runtime is emulated by `on_submit`.
pub struct MockChain {
	pub runtime: RuntimeProfile,
	pub state: Mutex<MockState>,
	pub on_submit: Option<SubmitHook>,
}
impl MockChain {
	pub fn new(block_number: BlockNumber) -> Self {
		Self {
			runtime: RuntimeProfile::default(),
			state: Mutex::new(MockState {
				block_number,
				..Default::default()
			}),
			on_submit: None,
		}
	}

	pub fn with_runtime(mut self, runtime: RuntimeProfile) -> Self {
		self.runtime = runtime;

		self
	}

	pub fn with_on_submit(
		mut self,
		on_submit: impl Fn(&mut MockState, &[u8]) -> SubgovResult<()> + Send + Sync + 'static,
	) -> Self {
		self.on_submit = Some(Box::new(on_submit));

		self
	}

	pub fn insert(&self, key: Bytes, value: impl Encode) {
		self.insert_raw(key, value.encode());
	}

	pub fn insert_raw(&self, key: Bytes, value: Bytes) {
		self.state.lock().unwrap().storage.insert(key, value);
	}

	pub fn get(&self, key: &[u8]) -> Option<Bytes> {
		self.state.lock().unwrap().storage.get(key).cloned()
	}

	pub fn block_number_now(&self) -> BlockNumber {
		self.state.lock().unwrap().block_number
	}

	pub fn set_total_issuance(&self, total_issuance: Balance) {
		self.insert(balances::total_issuance_key(&self.runtime), total_issuance);
	}

	pub fn set_referendum(&self, index: referenda::ReferendumIndex, info: referenda::ReferendumInfo) {
		self.insert(referenda::referendum_info_for_key(&self.runtime, index), info);
	}

	pub fn set_referendum_count(&self, count: referenda::ReferendumIndex) {
		self.insert(referenda::referendum_count_key(&self.runtime), count);
	}

	pub fn set_agenda(&self, block_number: BlockNumber, agenda: scheduler::Agenda) {
		self.insert(scheduler::agenda_key(&self.runtime, block_number), agenda);
	}

	pub fn set_lookup(&self, task_name: &scheduler::TaskName, address: scheduler::TaskAddress) {
		self.insert(scheduler::lookup_key(&self.runtime, task_name), address);
	}

	pub fn set_members(&self, members: Vec<AccountId>) {
		self.insert(
			collective::members_key(self.runtime.collective().unwrap()),
			members,
		);
	}

	pub fn set_account(&self, account_id: &AccountId, account: system::AccountInfo) {
		self.insert(system::account_key(&self.runtime, account_id), account);
	}
}
#[async_trait]
impl ChainClient for MockChain {
	fn runtime(&self) -> &RuntimeProfile {
		&self.runtime
	}

	async fn block_number(&self) -> SubgovResult<BlockNumber> {
		Ok(self.block_number_now())
	}

	async fn storage(&self, key: &[u8]) -> SubgovResult<Option<Bytes>> {
		Ok(self.get(key))
	}

	async fn storage_keys(&self, prefix: &[u8]) -> SubgovResult<Vec<Bytes>> {
		Ok(self
			.state
			.lock()
			.unwrap()
			.storage
			.keys()
			.filter(|key| key.starts_with(prefix))
			.cloned()
			.collect())
	}

	async fn set_storage(&self, changes: Vec<(Bytes, Option<Bytes>)>) -> SubgovResult<()> {
		let mut state = self.state.lock().unwrap();

		for (key, value) in changes.iter().cloned() {
			match value {
				Some(value) => state.storage.insert(key, value),
				None => state.storage.remove(&key),
			};
		}

		state.set_storage_calls.push(changes);

		Ok(())
	}

	async fn new_block(&self, count: u32) -> SubgovResult<()> {
		self.state.lock().unwrap().block_number += count;

		Ok(())
	}

	async fn submit_and_watch(
		&self,
		call: &[u8],
		signer: &Signer,
		nonce: Index,
	) -> SubgovResult<Inclusion> {
		let mut state = self.state.lock().unwrap();

		state
			.submitted
			.push((signer.account_id(), nonce, call.to_vec()));

		if let Some(on_submit) = &self.on_submit {
			on_submit(&mut *state, call)?;
		}

		state.block_number += 1;

		Ok(Inclusion {
			block_hash: [0; 32],
			block_number: state.block_number,
		})
	}
}

/// A websocket node answering each request with whatever `respond` returns, usually the
/// response followed by subscription notifications.
pub struct MockNode {
	pub url: String,
	pub requests: Arc<Mutex<Vec<Value>>>,
	handle: JoinHandle<()>,
}
impl MockNode {
	pub async fn spawn(respond: impl Fn(&Value) -> Vec<Value> + Send + 'static) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let url = format!("ws://{}", listener.local_addr().unwrap());
		let requests = Arc::new(Mutex::new(vec![]));
		let requests_cloned = requests.clone();
		let handle = task::spawn(async move {
			let (stream, _) = listener.accept().await.unwrap();
			let mut websocket = async_tungstenite::accept_async(stream).await.unwrap();

			while let Some(Ok(msg)) = websocket.next().await {
				let request = match msg {
					Message::Text(text) => serde_json::from_str::<Value>(&text).unwrap(),
					Message::Close(_) => break,
					_ => continue,
				};
				let responses = respond(&request);

				requests_cloned.lock().unwrap().push(request);

				for response in responses {
					if websocket
						.send(Message::Text(response.to_string()))
						.await
						.is_err()
					{
						return;
					}
				}
			}
		});

		Self {
			url,
			requests,
			handle,
		}
	}

	/// A dev chain at block `#8` with no storage, extrinsics reach `status` after `ready`.
	pub async fn dev_chain(status: Value) -> Self {
		Self::spawn(move |request| {
			let id = request["id"].clone();
			let result = |result: Value| json!({ "jsonrpc": "2.0", "id": id, "result": result });

			match request["method"].as_str().unwrap_or_default() {
				"chain_getBlockHash" => vec![result(json!(format!("0x{}", "11".repeat(32))))],
				"state_getRuntimeVersion" => vec![result(json!({
					"specName": "polkadot",
					"specVersion": 1_000_000,
					"transactionVersion": 26
				}))],
				"chain_getHeader" => vec![result(json!({ "number": "0x8" }))],
				"author_submitAndWatchExtrinsic" => vec![
					result(json!("watch")),
					notification("watch", json!("ready")),
					notification("watch", status.clone()),
				],
				"author_unwatchExtrinsic" => vec![result(json!(true))],
				_ => vec![result(Value::Null)],
			}
		})
		.await
	}

	pub fn methods(&self) -> Vec<String> {
		methods_of(&self.requests)
	}

	/// Resolves once the client has dropped the connection, with every method it called.
	pub async fn closed(self) -> Vec<String> {
		let Self {
			requests, handle, ..
		} = self;

		async_std::future::timeout(Duration::from_secs(5), handle)
			.await
			.expect("connection still open");

		methods_of(&requests)
	}
}

fn methods_of(requests: &Mutex<Vec<Value>>) -> Vec<String> {
	requests
		.lock()
		.unwrap()
		.iter()
		.filter_map(|request| request["method"].as_str().map(Into::into))
		.collect()
}

fn notification(subscription: &str, result: Value) -> Value {
	json!({
		"jsonrpc": "2.0",
		"method": "author_extrinsicUpdate",
		"params": { "subscription": subscription, "result": result }
	})
}
