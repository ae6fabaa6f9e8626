//! The internal request shape.
//!
//! A [`Request`] is built by the dispatcher from the transport event;
//! the raw event and the invocation context ride along uninterpreted,
//! available to handler code that needs them.

use std::collections::HashMap;

use http::Method;

use crate::multimap::MultiValueMap;

/// An inbound request, decoded from the transport event.
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	/// The matched path template, e.g. `/users/{user_id}`.
	pub resource: String,
	/// The literal path, e.g. `/users/42`.
	pub path: String,
	pub headers: MultiValueMap,
	pub query_parameters: MultiValueMap,
	/// Raw path-parameter strings as extracted by the transport layer.
	pub path_parameters: HashMap<String, String>,
	pub body: Option<String>,
	/// The raw transport event, passed through uninterpreted.
	pub event: serde_json::Value,
	pub context: InvocationContext,
}

/// The invocation context handed over by the hosting platform.
///
/// Purely informational: the framework reads nothing from it and
/// enforces no deadline. `remaining_time_in_millis` is a point-in-time
/// figure for handler code that wants to budget its own work.
#[derive(Debug, Clone)]
pub struct InvocationContext {
	pub function_name: String,
	pub function_version: String,
	pub invoked_function_arn: String,
	pub memory_limit_in_mb: u32,
	pub request_id: String,
	pub log_group_name: String,
	pub log_stream_name: String,
	remaining_time_in_millis: u64,
}

impl InvocationContext {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		function_name: impl Into<String>,
		function_version: impl Into<String>,
		invoked_function_arn: impl Into<String>,
		memory_limit_in_mb: u32,
		request_id: impl Into<String>,
		log_group_name: impl Into<String>,
		log_stream_name: impl Into<String>,
		remaining_time_in_millis: u64,
	) -> Self {
		Self {
			function_name: function_name.into(),
			function_version: function_version.into(),
			invoked_function_arn: invoked_function_arn.into(),
			memory_limit_in_mb,
			request_id: request_id.into(),
			log_group_name: log_group_name.into(),
			log_stream_name: log_stream_name.into(),
			remaining_time_in_millis,
		}
	}

	pub fn remaining_time_in_millis(&self) -> u64 {
		self.remaining_time_in_millis
	}
}
