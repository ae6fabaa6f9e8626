//! The route handler seam.

use ampoule_exception::Result;

use crate::params::PathParams;
use crate::request::Request;
use crate::response::Reply;

/// A route handler: the innermost layer of a dispatch.
///
/// Handlers receive the request (as forwarded by any middleware) and
/// the parsed path parameters, in template-declared order. The reply is
/// normalized to a response by the dispatcher.
///
/// Implemented for plain functions and closures:
///
/// ```
/// use ampoule_http::{PathParams, Reply, Request, RouteHandler};
/// use ampoule_exception::Result;
/// use serde_json::json;
///
/// fn health(_request: &Request, _params: &PathParams) -> Result<Reply> {
///     Ok(Reply::Json(json!({"status": "OK"})))
/// }
///
/// let handler: &dyn RouteHandler = &health;
/// ```
pub trait RouteHandler: Send + Sync {
	fn call(&self, request: &Request, params: &PathParams) -> Result<Reply>;
}

impl<F> RouteHandler for F
where
	F: Fn(&Request, &PathParams) -> Result<Reply> + Send + Sync,
{
	fn call(&self, request: &Request, params: &PathParams) -> Result<Reply> {
		self(request, params)
	}
}
