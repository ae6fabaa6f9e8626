//! The application: the composition root and transport entry point.

use std::collections::HashMap;
use std::sync::Arc;

use ampoule_dispatch::{Dispatcher, ErrorHandlerRegistry, ErrorResponder};
use ampoule_exception::{ErrorKey, Result};
use ampoule_http::{
	GatewayReply, InvocationContext, JsonCodec, LambdaEvent, Method, Middleware, RouteHandler,
	SerdeJsonCodec,
};
use ampoule_routers::RouteTable;
use tracing::info;

use crate::resource::Resource;

/// An application: a root [`Resource`] plus the codec, with mounted
/// resources folded in.
///
/// Mounting merges the resource's routes, parsers, middleware, and
/// error handlers into the app. Parser-tag collisions resolve in the
/// app's favor; route collisions resolve in the mounted resource's
/// favor, last mount wins.
///
/// # Examples
///
/// ```
/// use ampoule_apps::App;
/// use ampoule_http::{PathParams, Reply, Request};
/// use ampoule_exception::Result;
/// use serde_json::json;
///
/// fn health(_request: &Request, _params: &PathParams) -> Result<Reply> {
///     Ok(Reply::Json(json!({"status": "OK"})))
/// }
///
/// let mut app = App::new("demo");
/// app.get("/health", health).unwrap();
/// ```
pub struct App {
	base: Resource,
	codec: Arc<dyn JsonCodec>,
}

impl App {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: Resource::new(name),
			codec: Arc::new(SerdeJsonCodec),
		}
	}

	/// Swap the JSON codec used at the transport boundary.
	pub fn with_codec(mut self, codec: Arc<dyn JsonCodec>) -> Self {
		self.codec = codec;
		self
	}

	pub fn name(&self) -> &str {
		self.base.name()
	}

	pub fn routes(&self) -> &RouteTable {
		self.base.routes()
	}

	pub fn codec(&self) -> &dyn JsonCodec {
		self.codec.as_ref()
	}

	pub fn get(&mut self, path: &str, handler: impl RouteHandler + 'static) -> Result<()> {
		self.base.get(path, handler)
	}

	pub fn post(&mut self, path: &str, handler: impl RouteHandler + 'static) -> Result<()> {
		self.base.post(path, handler)
	}

	pub fn put(&mut self, path: &str, handler: impl RouteHandler + 'static) -> Result<()> {
		self.base.put(path, handler)
	}

	pub fn patch(&mut self, path: &str, handler: impl RouteHandler + 'static) -> Result<()> {
		self.base.patch(path, handler)
	}

	pub fn delete(&mut self, path: &str, handler: impl RouteHandler + 'static) -> Result<()> {
		self.base.delete(path, handler)
	}

	pub fn route(
		&mut self,
		path: &str,
		methods: &[Method],
		handler: impl RouteHandler + 'static,
	) -> Result<()> {
		self.base.route(path, methods, handler)
	}

	pub fn register(
		&mut self,
		path: &str,
		methods: &[Method],
		handler: Arc<dyn RouteHandler>,
		metadata: HashMap<String, serde_json::Value>,
	) -> Result<()> {
		self.base.register(path, methods, handler, metadata)
	}

	/// Application-wide middleware: wraps every route, including those
	/// of mounted resources, outside any resource middleware.
	pub fn middleware(&mut self, middleware: impl Middleware + 'static) {
		self.base.middleware(middleware);
	}

	pub fn parser(&mut self, tag: &str, parser: ampoule_routers::Parser) -> Result<()> {
		self.base.parser(tag, parser)
	}

	pub fn error_handler(&mut self, keys: &[ErrorKey], responder: ErrorResponder) {
		self.base.error_handler(keys, responder);
	}

	/// Mount a resource, folding its registries into the app's.
	pub fn register_resource(&mut self, resource: Resource) {
		info!(app = %self.base.name(), resource = %resource.name(), "mounting resource");
		self.base.routes.merge(&resource.routes);
		self.base.parsers.merge(&resource.parsers);
		self.base.middleware.merge(&resource.middleware);
		self.base.errors.merge(&resource.errors);
	}

	/// Dispatch one transport event. Never fails; every outcome is a
	/// reply.
	pub fn handle(&self, event: &LambdaEvent, context: InvocationContext) -> GatewayReply {
		Dispatcher::new(
			self.base.name(),
			&self.base.routes,
			&self.base.middleware,
			&self.base.errors,
			self.codec.as_ref(),
		)
		.dispatch(event, context)
	}
}
