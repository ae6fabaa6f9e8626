//! Route table: compilation, storage, resolution, and merging.

use std::collections::HashMap;
use std::sync::Arc;

use ampoule_exception::{Error, Result};
use ampoule_http::{Method, RouteHandler};
use indexmap::IndexMap;
use tracing::debug;

use crate::parsers::{KeywordParser, Parser};
use crate::route::Route;

/// Nested route storage: normalized path → method → route.
///
/// Registration compiles the template and resolves every variable's
/// parser up front; resolution is an exact-match double lookup because
/// the production transport hands over an already-matched template.
///
/// Within one table, (path, method) identity is last-registration-wins,
/// silently: re-registering replaces the earlier route.
///
/// # Examples
///
/// ```
/// use ampoule_routers::{KeywordParser, RouteTable};
/// use ampoule_http::{Method, PathParams, Reply, Request};
/// use ampoule_exception::Result;
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// fn health(_request: &Request, _params: &PathParams) -> Result<Reply> {
///     Ok(Reply::Json(json!({"status": "OK"})))
/// }
///
/// let parsers = KeywordParser::new();
/// let mut table = RouteTable::new("app");
/// table
///     .register("/health", Method::GET, std::sync::Arc::new(health), HashMap::new(), &parsers)
///     .unwrap();
///
/// let route = table.resolve("/health", &Method::GET).unwrap();
/// assert_eq!(route.path, "/health");
/// ```
pub struct RouteTable {
	name: String,
	routes: IndexMap<String, IndexMap<Method, Arc<Route>>>,
}

impl RouteTable {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			routes: IndexMap::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Compile and store a route. Fails if a template variable names an
	/// unregistered parser tag.
	pub fn register(
		&mut self,
		path: &str,
		method: Method,
		handler: Arc<dyn RouteHandler>,
		metadata: HashMap<String, serde_json::Value>,
		parsers: &KeywordParser,
	) -> Result<()> {
		let route = self.build_route(path, method, handler, metadata, parsers)?;
		debug!(path = %route.path, method = %route.method, resource = %route.resource, "registered route");
		self.routes
			.entry(route.path.clone())
			.or_default()
			.insert(route.method.clone(), Arc::new(route));
		Ok(())
	}

	fn build_route(
		&self,
		path: &str,
		method: Method,
		handler: Arc<dyn RouteHandler>,
		metadata: HashMap<String, serde_json::Value>,
		parsers: &KeywordParser,
	) -> Result<Route> {
		let mut normalized: Vec<String> = Vec::new();
		let mut variables: Vec<(String, Parser)> = Vec::new();
		for segment in path.split('/') {
			if let Some(placeholder) = segment
				.strip_prefix('{')
				.and_then(|rest| rest.strip_suffix('}'))
			{
				let (name, parser) = Self::build_variable(placeholder, parsers)?;
				normalized.push(format!("{{{name}}}"));
				variables.push((name, parser));
			} else {
				normalized.push(segment.to_string());
			}
		}
		Ok(Route {
			resource: self.name.clone(),
			path: normalized.join("/"),
			method,
			variables,
			handler,
			metadata,
		})
	}

	/// Resolve a `{name}` or `{name:tag}` placeholder. Untagged
	/// variables get the identity string parser.
	fn build_variable(placeholder: &str, parsers: &KeywordParser) -> Result<(String, Parser)> {
		match placeholder.split_once(':') {
			None => Ok((placeholder.to_string(), parsers.get("str")?)),
			Some((name, tag)) => Ok((name.to_string(), parsers.get(tag)?)),
		}
	}

	/// Exact-match double lookup. "Route not found" when no path entry
	/// exists; "method not allowed" when the path exists but not for
	/// this method, never the reverse.
	pub fn resolve(&self, resource: &str, method: &Method) -> Result<Arc<Route>> {
		let defined = self
			.routes
			.get(resource)
			.ok_or_else(|| Error::route_not_found(resource))?;
		defined
			.get(method)
			.cloned()
			.ok_or_else(|| Error::method_not_allowed(resource, method))
	}

	/// Merge another table in: per-(path, method) overwrite union, the
	/// incoming (child) entry winning on collision.
	pub fn merge(&mut self, other: &RouteTable) {
		for (path, methods) in &other.routes {
			let entry = self.routes.entry(path.clone()).or_default();
			for (method, route) in methods {
				entry.insert(method.clone(), route.clone());
			}
		}
	}

	/// All registered templates, for the harness matcher.
	pub fn paths(&self) -> Vec<String> {
		self.routes.keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.routes.values().map(IndexMap::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}
