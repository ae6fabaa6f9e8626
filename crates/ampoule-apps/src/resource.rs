//! A mountable group of routes with its own parsers, middleware, and
//! error handlers.

use std::collections::HashMap;
use std::sync::Arc;

use ampoule_dispatch::{ErrorHandlerRegistry, ErrorResponder};
use ampoule_exception::{ErrorKey, Result};
use ampoule_http::{Method, Middleware, MiddlewareRegistry, RouteHandler};
use ampoule_routers::{KeywordParser, RouteTable};

/// A named bundle of routes, built standalone and mounted onto an
/// [`App`](crate::App) (or used directly as an app's own base).
///
/// Custom parsers must be registered before any route that names their
/// tag; parser tags resolve when the route is registered.
///
/// # Examples
///
/// ```
/// use ampoule_apps::Resource;
/// use ampoule_http::{PathParams, Reply, Request};
/// use ampoule_exception::Result;
/// use serde_json::json;
///
/// fn list_users(_request: &Request, _params: &PathParams) -> Result<Reply> {
///     Ok(Reply::Json(json!([])))
/// }
///
/// let mut users = Resource::new("users");
/// users.get("/users", list_users).unwrap();
/// ```
pub struct Resource {
	name: String,
	pub(crate) routes: RouteTable,
	pub(crate) parsers: KeywordParser,
	pub(crate) middleware: MiddlewareRegistry,
	pub(crate) errors: ErrorHandlerRegistry,
}

impl Resource {
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			routes: RouteTable::new(&name),
			parsers: KeywordParser::new(),
			middleware: MiddlewareRegistry::new(),
			errors: ErrorHandlerRegistry::new(&name),
			name,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn routes(&self) -> &RouteTable {
		&self.routes
	}

	pub fn get(&mut self, path: &str, handler: impl RouteHandler + 'static) -> Result<()> {
		self.route(path, &[Method::GET], handler)
	}

	pub fn post(&mut self, path: &str, handler: impl RouteHandler + 'static) -> Result<()> {
		self.route(path, &[Method::POST], handler)
	}

	pub fn put(&mut self, path: &str, handler: impl RouteHandler + 'static) -> Result<()> {
		self.route(path, &[Method::PUT], handler)
	}

	pub fn patch(&mut self, path: &str, handler: impl RouteHandler + 'static) -> Result<()> {
		self.route(path, &[Method::PATCH], handler)
	}

	pub fn delete(&mut self, path: &str, handler: impl RouteHandler + 'static) -> Result<()> {
		self.route(path, &[Method::DELETE], handler)
	}

	/// Register one handler for several methods on a path.
	pub fn route(
		&mut self,
		path: &str,
		methods: &[Method],
		handler: impl RouteHandler + 'static,
	) -> Result<()> {
		self.register(path, methods, Arc::new(handler), HashMap::new())
	}

	/// The full registration form, with shared handler and metadata.
	pub fn register(
		&mut self,
		path: &str,
		methods: &[Method],
		handler: Arc<dyn RouteHandler>,
		metadata: HashMap<String, serde_json::Value>,
	) -> Result<()> {
		for method in methods {
			self.routes.register(
				path,
				method.clone(),
				handler.clone(),
				metadata.clone(),
				&self.parsers,
			)?;
		}
		Ok(())
	}

	/// Attach middleware to every route in this resource. Registration
	/// order is invocation order, outermost first.
	pub fn middleware(&mut self, middleware: impl Middleware + 'static) {
		self.middleware.register(&self.name, Arc::new(middleware));
	}

	/// Register a custom keyword parser. Fails if the tag is taken.
	pub fn parser(
		&mut self,
		tag: &str,
		parser: ampoule_routers::Parser,
	) -> Result<()> {
		self.parsers.register(tag, parser)
	}

	/// Register an error responder for this resource's routes.
	pub fn error_handler(&mut self, keys: &[ErrorKey], responder: ErrorResponder) {
		self.errors.register(keys, responder);
	}
}
