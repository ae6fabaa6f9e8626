//! Local gateway harness.
//!
//! Stands in for the hosting platform in tests and local development:
//! takes a concrete URL, recovers the matched template and path
//! captures with the route matcher, synthesizes the transport event
//! and a stub invocation context, and runs the app's full dispatch
//! pipeline. Responses come back decoded.

use std::collections::HashMap;

use ampoule_apps::App;
use ampoule_exception::Result;
use ampoule_http::{
	GatewayReply, InvocationContext, JsonCodec, LambdaEvent, Method, MultiValueMap,
	SerdeJsonCodec, StatusCode,
};
use ampoule_routers::RouteMatcher;
use uuid::Uuid;

/// A decoded reply from the harness.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
	pub status: StatusCode,
	pub headers: HashMap<String, String>,
	pub body: Option<String>,
}

impl GatewayResponse {
	/// The body decoded as JSON.
	pub fn json(&self) -> Result<serde_json::Value> {
		let raw = self.body.as_deref().unwrap_or("null");
		SerdeJsonCodec.loads(raw)
	}
}

/// Drives an [`App`] through its transport contract from plain URLs.
///
/// # Examples
///
/// ```
/// use ampoule_apps::App;
/// use ampoule_http::{PathParams, Reply, Request};
/// use ampoule_exception::Result;
/// use ampoule_testing::Gateway;
/// use serde_json::json;
///
/// fn health(_request: &Request, _params: &PathParams) -> Result<Reply> {
///     Ok(Reply::Json(json!({"status": "OK"})))
/// }
///
/// let mut app = App::new("demo");
/// app.get("/health", health).unwrap();
///
/// let gateway = Gateway::new(app);
/// let response = gateway.get("/health");
/// assert_eq!(response.status.as_u16(), 200);
/// ```
pub struct Gateway {
	app: App,
	matcher: RouteMatcher,
}

impl Gateway {
	pub fn new(app: App) -> Self {
		let matcher = RouteMatcher::new(app.routes().paths());
		Self { app, matcher }
	}

	pub fn app(&self) -> &App {
		&self.app
	}

	pub fn get(&self, url: &str) -> GatewayResponse {
		self.request(Method::GET, url, None, &[])
	}

	pub fn delete(&self, url: &str) -> GatewayResponse {
		self.request(Method::DELETE, url, None, &[])
	}

	pub fn post(&self, url: &str, body: Option<&str>) -> GatewayResponse {
		self.request(Method::POST, url, body, &[])
	}

	pub fn put(&self, url: &str, body: Option<&str>) -> GatewayResponse {
		self.request(Method::PUT, url, body, &[])
	}

	pub fn patch(&self, url: &str, body: Option<&str>) -> GatewayResponse {
		self.request(Method::PATCH, url, body, &[])
	}

	/// Synthesize the transport event for `url` and dispatch it.
	///
	/// A URL no template matches is forwarded with the literal path as
	/// its resource, so unknown URLs produce the same not-found reply a
	/// deployment would.
	pub fn request(
		&self,
		method: Method,
		url: &str,
		body: Option<&str>,
		headers: &[(&str, &str)],
	) -> GatewayResponse {
		let path = url.split_once('?').map_or(url, |(path, _)| path);
		let (resource, path_parameters, query_parameters) = match self.matcher.match_url(url) {
			Ok(matched) => (matched.route, matched.path_params, matched.query_params),
			Err(_) => (path.to_string(), HashMap::new(), MultiValueMap::new()),
		};

		let mut multi_value_headers = MultiValueMap::new();
		for (name, value) in headers {
			multi_value_headers.add(*name, *value);
		}

		let event = LambdaEvent {
			http_method: method.to_string(),
			resource,
			path: path.to_string(),
			multi_value_headers,
			multi_value_query_string_parameters: query_parameters,
			path_parameters,
			body: body.map(str::to_string),
			is_base64_encoded: false,
		};
		decode(self.app.handle(&event, stub_context()))
	}
}

fn decode(reply: GatewayReply) -> GatewayResponse {
	GatewayResponse {
		status: StatusCode::from_u16(reply.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
		headers: reply.headers,
		body: reply.body,
	}
}

fn stub_context() -> InvocationContext {
	InvocationContext::new(
		"local-function",
		"$LATEST",
		"arn:aws:lambda:local:000000000000:function:local-function",
		128,
		Uuid::new_v4().to_string(),
		"/aws/lambda/local-function",
		"local",
		300_000,
	)
}
