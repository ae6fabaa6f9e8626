//! The dispatcher: one transport event in, one transport reply out.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use ampoule_exception::{Error, Result};
use ampoule_http::{
	Body, CallChain, GatewayReply, InvocationContext, JsonCodec, LambdaEvent, Method,
	MiddlewareRegistry, Request, Response,
};
use ampoule_routers::{ArgumentBuilder, RouteTable};
use tracing::{debug, error};

use crate::context;
use crate::errors::ErrorHandlerRegistry;

/// Runs one event through decode, resolve, middleware, handler, and
/// error mapping. Borrowed from the application's registries per call;
/// holds no state of its own beyond the argument builder.
///
/// Dispatch is total: every event produces a reply, with failures
/// routed through the error handler registry rather than surfaced to
/// the transport.
pub struct Dispatcher<'a> {
	name: &'a str,
	routes: &'a RouteTable,
	middleware: &'a MiddlewareRegistry,
	errors: &'a ErrorHandlerRegistry,
	arguments: ArgumentBuilder,
	codec: &'a dyn JsonCodec,
}

impl<'a> Dispatcher<'a> {
	pub fn new(
		name: &'a str,
		routes: &'a RouteTable,
		middleware: &'a MiddlewareRegistry,
		errors: &'a ErrorHandlerRegistry,
		codec: &'a dyn JsonCodec,
	) -> Self {
		Self {
			name,
			routes,
			middleware,
			errors,
			arguments: ArgumentBuilder::new(),
			codec,
		}
	}

	pub fn dispatch(&self, event: &LambdaEvent, context: InvocationContext) -> GatewayReply {
		let response = match self.build_request(event, context) {
			Ok(request) => {
				// The context spans resolution, the chain, and error
				// mapping; torn down when the guard drops.
				let _guard = context::enter(request.clone());
				match self.run(request) {
					Ok(response) => response,
					Err((scope, error)) => {
						debug!(scope = %scope, message = %error.message(), "dispatch failed");
						self.errors.respond(&scope, &error)
					}
				}
			}
			Err(error) => {
				debug!(message = %error.message(), "event could not be decoded");
				self.errors.respond(self.name, &error)
			}
		};
		self.serialize(response)
	}

	/// The fallible half of dispatch. Failures carry the scope whose
	/// error handlers should respond: the application's until a route
	/// is resolved, the owning resource's afterwards.
	fn run(&self, request: Request) -> std::result::Result<Response, (String, Error)> {
		let route = self
			.routes
			.resolve(&request.resource, &request.method)
			.map_err(|error| (self.name.to_string(), error))?;

		let middlewares = self.middleware.chain_for(self.name, &route.resource);
		let terminal = |request: Request| -> Result<Response> {
			let params = self.arguments.build(&route, &request.path_parameters)?;
			context::refresh(&request);
			Ok(route.handler.call(&request, &params)?.into_response())
		};
		let chain = CallChain::new(&middlewares, &terminal);

		chain
			.call(request)
			.map_err(|error| (route.resource.clone(), error))
	}

	fn build_request(&self, event: &LambdaEvent, context: InvocationContext) -> Result<Request> {
		let method = event
			.http_method
			.parse::<Method>()
			.map_err(|_| Error::value(format!("'{}' is not a valid HTTP method", event.http_method)))?;
		let body = match &event.body {
			Some(encoded) if event.is_base64_encoded => Some(decode_body(encoded)?),
			other => other.clone(),
		};
		Ok(Request {
			method,
			resource: event.resource.clone(),
			path: event.path.clone(),
			headers: event.multi_value_headers.clone(),
			query_parameters: event.multi_value_query_string_parameters.clone(),
			path_parameters: event.path_parameters.clone(),
			body,
			event: serde_json::to_value(event).unwrap_or(serde_json::Value::Null),
			context,
		})
	}

	fn serialize(&self, response: Response) -> GatewayReply {
		let Response {
			body,
			headers,
			status,
		} = response;
		let body = match body {
			None => None,
			Some(Body::Text(text)) => Some(text),
			Some(Body::Json(value)) => match self.codec.dumps(&value) {
				Ok(encoded) => Some(encoded),
				Err(encode_error) => {
					error!(message = %encode_error.message(), "failed to encode response body");
					return fallback_reply(self.errors.respond(self.name, &encode_error));
				}
			},
		};
		GatewayReply {
			headers,
			status_code: status.as_u16(),
			body,
		}
	}
}

fn decode_body(encoded: &str) -> Result<String> {
	let bytes = BASE64
		.decode(encoded)
		.map_err(|_| Error::value("Request body is not valid base64"))?;
	String::from_utf8(bytes).map_err(|_| Error::value("Request body is not valid UTF-8"))
}

/// Last-resort serialization, bypassing the pluggable codec so a codec
/// that cannot encode its own error response does not recurse.
fn fallback_reply(response: Response) -> GatewayReply {
	let Response {
		body,
		headers,
		status,
	} = response;
	let body = match body {
		None => None,
		Some(Body::Text(text)) => Some(text),
		Some(Body::Json(value)) => serde_json::to_string(&value).ok(),
	};
	GatewayReply {
		headers,
		status_code: status.as_u16(),
		body,
	}
}
