// --- crates.io ---
use thiserror::Error as ThisError;
// --- subgov ---
use crate::{frame::referenda::ReferendumIndex, r#type::BlockNumber};

pub type SubgovResult<T> = Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
	#[error("{0}")]
	Usage(String),
	#[error("Referendum `{0}` not found")]
	ReferendumNotFound(ReferendumIndex),
	#[error("Referendum `{0}` is not ongoing")]
	ReferendumNotOngoing(ReferendumIndex),
	#[error("No scheduled call found for `{matcher}` at block `#{block_number}`")]
	NoScheduledCall {
		matcher: String,
		block_number: BlockNumber,
	},
	#[error("Collective `{0}` has no members")]
	EmptyCollective(String),
	#[error("Dispatch error: {0}")]
	Dispatch(String),
	#[error("Rpc `{method}` failed: {message}")]
	Rpc { method: String, message: String },
	#[error("Invalid hex {0}")]
	Hex(String),
	#[error("Websocket error: {0}")]
	Websocket(#[from] WebsocketError),
	#[error("Crypto error: {0}")]
	Crypto(#[from] CryptoError),
	#[error("Json error: {0}")]
	Json(#[from] JsonError),
	#[error("Serde json error: {0}")]
	SerdeJson(#[from] serde_json::Error),
	#[error("Codec error: {0}")]
	Codec(#[from] parity_scale_codec::Error),
	#[error("Io error: {0}")]
	Io(#[from] std::io::Error),
}

#[derive(Debug, ThisError)]
pub enum WebsocketError {
	#[error("Tungstenite error: {0}")]
	Tungstenite(#[from] async_tungstenite::tungstenite::Error),
	#[error("Connection closed: {0}")]
	Closed(String),
	#[error("Channel already closed")]
	AlreadyClosed,
}

#[derive(Debug, ThisError)]
pub enum CryptoError {
	#[error("Invalid seed")]
	Signature(#[from] SignatureError),
}
#[derive(Debug, ThisError)]
pub enum SignatureError {
	#[error(
		"`MiniSecret` expected `32` length seed due to \
		`Analogous to ed25519 secret key as 32 bytes, see RFC8032.`"
	)]
	BytesLengthMismatch,
}

#[derive(Debug, ThisError)]
pub enum JsonError {
	#[error("Expected `str` at `{0}`")]
	ExpectedStr(&'static str),
	#[error("Expected subscription id")]
	ExpectedSubscriptionId,
}
