//! The pluggable JSON codec contract.
//!
//! The framework never serializes arbitrary values itself; everything
//! crossing the transport boundary goes through this narrow dumps/loads
//! contract, so applications can swap the codec without touching the
//! dispatch pipeline.

use ampoule_exception::{Error, Result};

/// Narrow dumps/loads contract consumed by the dispatcher and the local
/// gateway.
pub trait JsonCodec: Send + Sync {
	fn dumps(&self, value: &serde_json::Value) -> Result<String>;
	fn loads(&self, raw: &str) -> Result<serde_json::Value>;
}

/// Default codec backed by `serde_json`.
///
/// # Examples
///
/// ```
/// use ampoule_http::{JsonCodec, SerdeJsonCodec};
/// use serde_json::json;
///
/// let codec = SerdeJsonCodec;
/// let raw = codec.dumps(&json!({"status": "OK"})).unwrap();
/// assert_eq!(codec.loads(&raw).unwrap(), json!({"status": "OK"}));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
	fn dumps(&self, value: &serde_json::Value) -> Result<String> {
		serde_json::to_string(value)
			.map_err(|err| Error::internal(format!("Failed to encode body: {err}")))
	}

	fn loads(&self, raw: &str) -> Result<serde_json::Value> {
		serde_json::from_str(raw)
			.map_err(|err| Error::value(format!("Body is not valid JSON: {err}")))
	}
}
