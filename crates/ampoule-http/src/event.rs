//! Transport event and reply shapes.
//!
//! These mirror the API-gateway proxy contract: the inbound event
//! carries the matched path template (`resource`), multi-value headers
//! and query parameters, and the raw path-parameter strings; the
//! outbound reply flattens to single-value headers, a numeric status
//! code, and an optional body string.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::multimap::MultiValueMap;

/// The inbound transport event.
///
/// # Examples
///
/// ```
/// use ampoule_http::LambdaEvent;
///
/// let event: LambdaEvent = serde_json::from_value(serde_json::json!({
///     "httpMethod": "GET",
///     "resource": "/health",
///     "path": "/health",
/// }))
/// .unwrap();
/// assert_eq!(event.http_method, "GET");
/// assert!(!event.is_base64_encoded);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaEvent {
	pub http_method: String,
	/// The matched path template.
	pub resource: String,
	/// The literal request path.
	pub path: String,
	#[serde(default)]
	pub multi_value_headers: MultiValueMap,
	#[serde(default)]
	pub multi_value_query_string_parameters: MultiValueMap,
	#[serde(default)]
	pub path_parameters: HashMap<String, String>,
	#[serde(default)]
	pub body: Option<String>,
	#[serde(default)]
	pub is_base64_encoded: bool,
}

/// The outbound transport reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayReply {
	pub headers: HashMap<String, String>,
	pub status_code: u16,
	pub body: Option<String>,
}
