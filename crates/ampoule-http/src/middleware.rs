//! Middleware seam and the synchronous call chain.
//!
//! A middleware wraps the dispatch of a request: it receives the
//! request and a continuation, and must call the continuation exactly
//! once to proceed. Not calling it short-circuits the chain with the
//! middleware's own response; returning `Err` routes to the error
//! handler registry. Calling it more than once is a caller bug and its
//! behavior is unspecified.
//!
//! Chains compose outermost-first: application middleware in
//! registration order, then the route's resource middleware, ending in
//! the terminal (argument building plus handler invocation).

use std::sync::Arc;

use ampoule_exception::Result;
use indexmap::IndexMap;

use crate::request::Request;
use crate::response::Response;

/// Middleware trait. Uses composition: each middleware decides whether
/// and how to forward the request to the rest of the chain.
///
/// Implemented for closures as well:
///
/// ```
/// use ampoule_http::{CallChain, Middleware, Request, Response};
/// use ampoule_exception::Result;
///
/// fn tag_response(request: Request, chain: &CallChain<'_>) -> Result<Response> {
///     let response = chain.call(request)?;
///     Ok(response.with_header("logged", "middleware-executed"))
/// }
///
/// let middleware: &dyn Middleware = &tag_response;
/// ```
pub trait Middleware: Send + Sync {
	fn process(&self, request: Request, chain: &CallChain<'_>) -> Result<Response>;
}

impl<F> Middleware for F
where
	F: for<'a> Fn(Request, &CallChain<'a>) -> Result<Response> + Send + Sync,
{
	fn process(&self, request: Request, chain: &CallChain<'_>) -> Result<Response> {
		self(request, chain)
	}
}

/// The continuation handed to each middleware.
///
/// Calling [`CallChain::call`] runs the remaining middleware and
/// finally the terminal. The chain owns no state; it borrows the
/// middleware slice and the terminal for the duration of one dispatch.
pub struct CallChain<'a> {
	middlewares: &'a [Arc<dyn Middleware>],
	terminal: &'a (dyn Fn(Request) -> Result<Response> + Sync),
}

impl<'a> CallChain<'a> {
	pub fn new(
		middlewares: &'a [Arc<dyn Middleware>],
		terminal: &'a (dyn Fn(Request) -> Result<Response> + Sync),
	) -> Self {
		Self {
			middlewares,
			terminal,
		}
	}

	/// Run the rest of the chain with `request`.
	pub fn call(&self, request: Request) -> Result<Response> {
		match self.middlewares.split_first() {
			Some((outer, rest)) => outer.process(
				request,
				&CallChain {
					middlewares: rest,
					terminal: self.terminal,
				},
			),
			None => (self.terminal)(request),
		}
	}
}

/// Registered middleware, keyed by resource name, in registration
/// order. Registration order is invocation order, outermost first.
#[derive(Clone, Default)]
pub struct MiddlewareRegistry {
	registered: IndexMap<String, Vec<Arc<dyn Middleware>>>,
}

impl MiddlewareRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, resource: impl Into<String>, middleware: Arc<dyn Middleware>) {
		self.registered
			.entry(resource.into())
			.or_default()
			.push(middleware);
	}

	/// Middleware for one resource, registration order.
	pub fn for_resource(&self, resource: &str) -> &[Arc<dyn Middleware>] {
		self.registered
			.get(resource)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	/// The chain for one dispatch: application middleware outermost,
	/// then the route's resource middleware. When the route belongs to
	/// the application itself the sequence appears once.
	pub fn chain_for(&self, application: &str, resource: &str) -> Vec<Arc<dyn Middleware>> {
		let mut chain: Vec<Arc<dyn Middleware>> = self.for_resource(application).to_vec();
		if resource != application {
			chain.extend(self.for_resource(resource).iter().cloned());
		}
		chain
	}

	/// Adopt another registry's sequences wholesale, keyed by resource.
	/// A sequence already present under the same key is replaced.
	pub fn merge(&mut self, other: &MiddlewareRegistry) {
		for (resource, middlewares) in &other.registered {
			self.registered.insert(resource.clone(), middlewares.clone());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::multimap::MultiValueMap;
	use crate::request::InvocationContext;
	use crate::response::Body;
	use http::{Method, StatusCode};
	use serde_json::json;
	use std::collections::HashMap;
	use std::sync::Mutex;

	fn request() -> Request {
		Request {
			method: Method::GET,
			resource: "/health".to_string(),
			path: "/health".to_string(),
			headers: MultiValueMap::new(),
			query_parameters: MultiValueMap::new(),
			path_parameters: HashMap::new(),
			body: None,
			event: serde_json::Value::Null,
			context: InvocationContext::new(
				"test",
				"1",
				"arn:test",
				128,
				"request-1",
				"log-group",
				"log-stream",
				30_000,
			),
		}
	}

	fn terminal(request: Request) -> Result<Response> {
		// Surfaces the request the chain forwarded, header effects included.
		let injected = request
			.headers
			.get_first("custom-injected-header")
			.unwrap_or("absent")
			.to_string();
		Ok(Response::json(json!({ "injected": injected })))
	}

	#[test]
	fn empty_chain_invokes_terminal_directly() {
		let middlewares: Vec<Arc<dyn Middleware>> = Vec::new();
		let chain = CallChain::new(&middlewares, &terminal);
		let response = chain.call(request()).unwrap();
		assert_eq!(response.status, StatusCode::OK);
	}

	#[test]
	fn middleware_can_mutate_request_before_forwarding() {
		let middlewares: Vec<Arc<dyn Middleware>> =
			vec![Arc::new(|mut request: Request, chain: &CallChain<'_>| {
				request.headers.add("custom-injected-header", "hello there");
				chain.call(request)
			})];
		let chain = CallChain::new(&middlewares, &terminal);
		let response = chain.call(request()).unwrap();
		assert_eq!(
			response.body,
			Some(Body::Json(json!({"injected": "hello there"})))
		);
	}

	#[test]
	fn post_continuation_header_effects_apply_innermost_to_outermost() {
		let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
		let outer_order = order.clone();
		let inner_order = order.clone();
		let middlewares: Vec<Arc<dyn Middleware>> = vec![
			Arc::new(
				move |request: Request, chain: &CallChain<'_>| -> Result<Response> {
					let response = chain.call(request)?;
					outer_order.lock().unwrap().push("outer");
					Ok(response.with_header("outer", "1"))
				},
			),
			Arc::new(
				move |request: Request, chain: &CallChain<'_>| -> Result<Response> {
					let response = chain.call(request)?;
					inner_order.lock().unwrap().push("inner");
					Ok(response.with_header("inner", "1"))
				},
			),
		];
		let chain = CallChain::new(&middlewares, &terminal);
		let response = chain.call(request()).unwrap();
		assert!(response.headers.contains_key("outer"));
		assert!(response.headers.contains_key("inner"));
		assert_eq!(*order.lock().unwrap(), vec!["inner", "outer"]);
	}

	#[test]
	fn middleware_can_short_circuit_without_calling_continuation() {
		let middlewares: Vec<Arc<dyn Middleware>> = vec![Arc::new(
			|_request: Request, _chain: &CallChain<'_>| -> Result<Response> {
				Ok(Response::empty(StatusCode::TOO_MANY_REQUESTS))
			},
		)];
		let chain = CallChain::new(&middlewares, &terminal);
		let response = chain.call(request()).unwrap();
		assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
		assert!(response.body.is_none());
	}

	#[test]
	fn chain_for_places_application_middleware_outermost() {
		let mut registry = MiddlewareRegistry::new();
		registry.register(
			"app",
			Arc::new(|request: Request, chain: &CallChain<'_>| chain.call(request)),
		);
		registry.register(
			"users",
			Arc::new(|request: Request, chain: &CallChain<'_>| chain.call(request)),
		);
		assert_eq!(registry.chain_for("app", "users").len(), 2);
		assert_eq!(registry.chain_for("app", "app").len(), 1);
		assert_eq!(registry.chain_for("app", "orders").len(), 1);
	}

	#[test]
	fn merge_adopts_other_registries_sequences() {
		let mut parent = MiddlewareRegistry::new();
		let mut child = MiddlewareRegistry::new();
		child.register(
			"users",
			Arc::new(|request: Request, chain: &CallChain<'_>| chain.call(request)),
		);
		parent.merge(&child);
		assert_eq!(parent.for_resource("users").len(), 1);
	}
}
