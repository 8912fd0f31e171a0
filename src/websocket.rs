// --- std ---
use std::{
	collections::{HashMap, VecDeque},
	time::Duration,
};
// --- crates.io ---
use async_std::{
	channel::{self, Sender},
	sync::{Arc, Mutex},
	task::{self, JoinHandle},
};
use async_tungstenite::{async_std as tungstenite_async_std, tungstenite::Message};
use futures::{
	future::{self, Either},
	pin_mut, SinkExt, StreamExt,
};
use serde_json::Value;
// --- subgov ---
use crate::{
	error::{Error, SubgovResult, WebsocketError},
	r#type::*,
};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

type RpcResults = Arc<Mutex<HashMap<Id, Value>>>;
type Subscriptions = Arc<Mutex<HashMap<SubscriptionId, VecDeque<Value>>>>;

#[derive(Debug)]
pub struct Websocket {
	pub handle: Mutex<Option<JoinHandle<()>>>,
	pub sender: Sender<String>,
	pub rpc_id: RpcId,
	pub rpc_results: RpcResults,
	pub subscriptions: Subscriptions,
	pub closed: Arc<Mutex<Option<String>>>,
}
impl Websocket {
	pub async fn connect(uri: &str) -> SubgovResult<Self> {
		tracing::info!("`Websocket` starting a new connection to `{}`", uri);

		let (client_sender, node_receiver) = channel::unbounded::<String>();
		let rpc_results: RpcResults = Arc::new(Mutex::new(HashMap::new()));
		let subscriptions: Subscriptions = Arc::new(Mutex::new(HashMap::new()));
		let closed = Arc::new(Mutex::new(None));
		let (websocket, _) = tungstenite_async_std::connect_async(uri)
			.await
			.map_err(WebsocketError::from)?;
		let (mut write, mut read) = websocket.split();
		let rpc_results_cloned = rpc_results.clone();
		let subscriptions_cloned = subscriptions.clone();
		let closed_cloned = closed.clone();
		let handle = task::spawn(async move {
			let pump = async {
				let mut read_future = read.next();

				loop {
					let recv_future = node_receiver.recv();

					pin_mut!(recv_future);

					match future::select(recv_future, read_future).await {
						Either::Left((msg, read_future_continue)) => {
							let msg = msg.map_err(|_| WebsocketError::AlreadyClosed)?;
							tracing::trace!("{}", msg);

							write
								.send(Message::Text(msg))
								.await
								.map_err(WebsocketError::from)?;

							read_future = read_future_continue;
						}
						Either::Right((msg, _)) => {
							let msg = match msg {
								Some(msg) => msg.map_err(WebsocketError::from)?,
								None => break,
							};
							let msg = match msg {
								Message::Text(text) => serde_json::from_str::<Value>(&text)?,
								Message::Binary(bytes) => serde_json::from_slice::<Value>(&bytes)?,
								Message::Close(_) => break,
								_ => {
									read_future = read.next();

									continue;
								}
							};
							tracing::trace!("{}", msg);

							route(msg, &rpc_results_cloned, &subscriptions_cloned).await;

							read_future = read.next();
						}
					}
				}

				Ok::<_, Error>(())
			};
			let reason = match pump.await {
				Ok(()) => "closed by node".to_owned(),
				Err(e) => e.to_string(),
			};

			tracing::debug!("`Websocket` stopped: {}", reason);

			*closed_cloned.lock().await = Some(reason);
		});

		Ok(Self {
			handle: Mutex::new(Some(handle)),
			sender: client_sender,
			rpc_id: RpcId(Mutex::new(1)),
			rpc_results,
			subscriptions,
			closed,
		})
	}

	pub async fn disconnect(self) {
		tracing::info!("`Websocket` disconnecting");

		self.sender.close();

		if let Some(handle) = self.handle.into_inner() {
			handle.cancel().await;
		}
	}

	pub async fn check_connection(&self) -> SubgovResult<()> {
		match self.closed.lock().await.as_ref() {
			Some(reason) => Err(WebsocketError::Closed(reason.to_owned()).into()),
			None => Ok(()),
		}
	}

	pub async fn send(&self, msg: impl Into<String>) -> SubgovResult<()> {
		Ok(self
			.sender
			.send(msg.into())
			.await
			.map_err(|_| WebsocketError::AlreadyClosed)?)
	}

	pub async fn rpc_id(&self) -> Id {
		self.rpc_id.get().await
	}

	pub async fn try_take_rpc_result_of(&self, rpc_id: Id) -> Option<Value> {
		self.rpc_results.lock().await.remove(&rpc_id)
	}

	pub async fn take_rpc_result_of(&self, rpc_id: Id) -> SubgovResult<Value> {
		loop {
			if let Some(rpc_result) = self.try_take_rpc_result_of(rpc_id).await {
				return Ok(rpc_result);
			}

			self.check_connection().await?;

			task::sleep(POLL_INTERVAL).await;
		}
	}

	/// Drops whatever is still queued for `subscription_id`.
	pub async fn remove_subscription(&self, subscription_id: &str) {
		self.subscriptions.lock().await.remove(subscription_id);
	}

	pub async fn try_take_subscription_of(&self, subscription_id: &str) -> Option<Value> {
		self.subscriptions
			.lock()
			.await
			.get_mut(subscription_id)
			.and_then(VecDeque::pop_front)
	}

	pub async fn take_subscription_of(&self, subscription_id: &str) -> SubgovResult<Value> {
		loop {
			if let Some(subscription) = self.try_take_subscription_of(subscription_id).await {
				return Ok(subscription);
			}

			self.check_connection().await?;

			task::sleep(POLL_INTERVAL).await;
		}
	}
}

/// Notifications are queued under their subscription id even before the subscribe call has been
/// answered, the node may send them in either order.
async fn route(
	msg: Value,
	rpc_results: &Mutex<HashMap<Id, Value>>,
	subscriptions: &Mutex<HashMap<SubscriptionId, VecDeque<Value>>>,
) {
	if let Some(rpc_id) = msg["id"].as_u64() {
		rpc_results.lock().await.insert(rpc_id, msg);
	} else if let Some(subscription_id) = subscription_id(&msg["params"]["subscription"]) {
		subscriptions
			.lock()
			.await
			.entry(subscription_id)
			.or_default()
			.push_back(msg);
	} else {
		tracing::warn!("Dropping unroutable message `{}`", msg);
	}
}

/// Nodes answer with either string or numeric subscription ids.
pub fn subscription_id(value: &Value) -> Option<SubscriptionId> {
	value
		.as_str()
		.map(Into::into)
		.or_else(|| value.as_u64().map(|id| id.to_string()))
}

#[derive(Debug)]
pub struct RpcId(Mutex<Id>);
impl RpcId {
	pub async fn get(&self) -> Id {
		let mut mutex = self.0.lock().await;
		let id = *mutex;

		if id == Id::max_value() {
			*mutex = 1;
		} else {
			*mutex += 1;
		}

		id
	}
}
