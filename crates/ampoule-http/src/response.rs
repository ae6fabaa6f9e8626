//! Response representation and handler-reply normalization.

use std::collections::HashMap;

use http::StatusCode;

/// A response body: either a structured JSON value (serialized by the
/// codec at the transport boundary) or raw text passed through
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
	Json(serde_json::Value),
	Text(String),
}

/// An outbound response.
///
/// Created once per dispatch: by a handler's reply, by a middleware
/// returning early, or by an error responder. Outer middleware may add
/// headers after the continuation returns; bodies set by inner layers
/// are not expected to be rewritten by outer layers.
///
/// # Examples
///
/// ```
/// use ampoule_http::Response;
/// use http::StatusCode;
/// use serde_json::json;
///
/// let response = Response::json(json!({"status": "OK"}));
/// assert_eq!(response.status, StatusCode::OK);
/// ```
#[derive(Debug, Clone)]
pub struct Response {
	pub body: Option<Body>,
	/// Single-valued: the reply shape the transport accepts has one
	/// value per header.
	pub headers: HashMap<String, String>,
	pub status: StatusCode,
}

impl Response {
	pub fn new(body: Option<Body>, status: StatusCode) -> Self {
		Self {
			body,
			headers: HashMap::new(),
			status,
		}
	}

	/// A 200 response with a JSON body.
	pub fn json(body: serde_json::Value) -> Self {
		Self::new(Some(Body::Json(body)), StatusCode::OK)
	}

	/// A 200 response with a raw text body, passed through uncoded.
	pub fn text(body: impl Into<String>) -> Self {
		Self::new(Some(Body::Text(body.into())), StatusCode::OK)
	}

	/// An empty-bodied response.
	pub fn empty(status: StatusCode) -> Self {
		Self::new(None, status)
	}

	pub fn with_status(mut self, status: StatusCode) -> Self {
		self.status = status;
		self
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}
}

/// What a handler returns, before normalization.
///
/// Handlers may return a full [`Response`], positional parts, a bare
/// JSON value, raw text, or nothing; [`Reply::into_response`] applies
/// the normalization rule uniformly.
#[derive(Debug, Clone)]
pub enum Reply {
	Response(Response),
	/// Positional (body, headers, status) parts.
	Parts {
		body: serde_json::Value,
		headers: HashMap<String, String>,
		status: StatusCode,
	},
	Json(serde_json::Value),
	Text(String),
	Empty,
}

impl Reply {
	/// Normalize to a [`Response`]: a response passes through; parts
	/// spread positionally; anything else becomes the body with default
	/// headers and status.
	///
	/// # Examples
	///
	/// ```
	/// use ampoule_http::Reply;
	/// use http::StatusCode;
	/// use serde_json::json;
	///
	/// let response = Reply::Json(json!({"status": "OK"})).into_response();
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.headers.is_empty());
	/// ```
	pub fn into_response(self) -> Response {
		match self {
			Reply::Response(response) => response,
			Reply::Parts {
				body,
				headers,
				status,
			} => Response {
				body: Some(Body::Json(body)),
				headers,
				status,
			},
			Reply::Json(value) => Response::json(value),
			Reply::Text(value) => Response::text(value),
			Reply::Empty => Response::empty(StatusCode::OK),
		}
	}
}

impl From<Response> for Reply {
	fn from(response: Response) -> Self {
		Reply::Response(response)
	}
}

impl From<serde_json::Value> for Reply {
	fn from(value: serde_json::Value) -> Self {
		Reply::Json(value)
	}
}

impl From<(serde_json::Value, HashMap<String, String>, StatusCode)> for Reply {
	fn from(
		(body, headers, status): (serde_json::Value, HashMap<String, String>, StatusCode),
	) -> Self {
		Reply::Parts {
			body,
			headers,
			status,
		}
	}
}
