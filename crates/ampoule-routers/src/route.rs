//! Compiled route definition.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ampoule_http::{Method, RouteHandler};

use crate::parsers::Parser;

/// A compiled binding of (path template, method) to a handler.
///
/// Immutable once built. `path` is the normalized template: parser tags
/// are stripped from placeholders, so `/users/{id:uuid}` and
/// `/users/{id}` are the same route identity. `variables` keeps the
/// template's declared order, which is the order parameters are parsed
/// and bound in.
#[derive(Clone)]
pub struct Route {
	/// Name of the resource that registered this route.
	pub resource: String,
	/// Normalized path template.
	pub path: String,
	pub method: Method,
	/// Template variables in declared order, each with its parser.
	pub variables: Vec<(String, Parser)>,
	pub handler: Arc<dyn RouteHandler>,
	/// Opaque registration metadata, uninterpreted by the framework.
	pub metadata: HashMap<String, serde_json::Value>,
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("resource", &self.resource)
			.field("path", &self.path)
			.field("method", &self.method)
			.field(
				"variables",
				&self
					.variables
					.iter()
					.map(|(name, _)| name.as_str())
					.collect::<Vec<_>>(),
			)
			.finish_non_exhaustive()
	}
}
