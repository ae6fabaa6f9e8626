//! Error-to-response mapping.
//!
//! An error climbing out of a handler or middleware is matched against
//! registered responders by walking its candidate keys (custom tags
//! first, then the kind's generalization chain), checking the owning
//! resource's scope before the application scope at each step. Errors
//! nothing claims fall through to a default JSON body.

use std::collections::HashMap;
use std::sync::Arc;

use ampoule_exception::{Error, ErrorKey};
use ampoule_http::Response;
use serde_json::json;
use tracing::debug;

/// Maps one matched error to a full response.
pub type ErrorResponder = Arc<dyn Fn(&Error) -> Response + Send + Sync>;

/// Error responders, keyed by scope (application or resource name) and
/// then by [`ErrorKey`].
///
/// # Examples
///
/// ```
/// use ampoule_dispatch::ErrorHandlerRegistry;
/// use ampoule_exception::{Error, ErrorKey, ErrorKind};
/// use ampoule_http::Response;
/// use http::StatusCode;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let mut registry = ErrorHandlerRegistry::new("app");
/// registry.register(
///     &[ErrorKey::tag("teapot")],
///     Arc::new(|error: &Error| {
///         Response::json(json!({"message": error.message()}))
///             .with_status(StatusCode::IM_A_TEAPOT)
///     }),
/// );
///
/// let error = Error::new(ErrorKind::Value, "short and stout").with_tag("teapot");
/// assert_eq!(registry.respond("app", &error).status, StatusCode::IM_A_TEAPOT);
/// ```
#[derive(Clone)]
pub struct ErrorHandlerRegistry {
	name: String,
	handlers: HashMap<String, HashMap<ErrorKey, ErrorResponder>>,
}

impl ErrorHandlerRegistry {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			handlers: HashMap::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Register a responder at application scope for each given key.
	pub fn register(&mut self, keys: &[ErrorKey], responder: ErrorResponder) {
		let name = self.name.clone();
		self.register_scoped(name, keys, responder);
	}

	/// Register a responder under an explicit scope.
	pub fn register_scoped(
		&mut self,
		scope: impl Into<String>,
		keys: &[ErrorKey],
		responder: ErrorResponder,
	) {
		let scoped = self.handlers.entry(scope.into()).or_default();
		for key in keys {
			scoped.insert(key.clone(), responder.clone());
		}
	}

	/// Adopt another registry's responders under their own scopes.
	/// On a scope-and-key collision the existing responder wins.
	pub fn merge(&mut self, other: &ErrorHandlerRegistry) {
		for (scope, responders) in &other.handlers {
			let scoped = self.handlers.entry(scope.clone()).or_default();
			for (key, responder) in responders {
				scoped.entry(key.clone()).or_insert_with(|| responder.clone());
			}
		}
	}

	/// Map `error` to a response. For each candidate key in order, the
	/// `scope` registry is consulted before the application registry;
	/// the first responder found wins.
	pub fn respond(&self, scope: &str, error: &Error) -> Response {
		for key in error.candidate_keys() {
			for owner in [scope, self.name.as_str()] {
				if let Some(responder) = self.handlers.get(owner).and_then(|s| s.get(&key)) {
					return responder(error);
				}
			}
		}
		debug!(kind = ?error.kind(), message = %error.message(), "no responder matched, using default");
		default_response(error)
	}
}

/// The fallback body: always a `message`, plus a machine-readable
/// `code` when the error carries one.
fn default_response(error: &Error) -> Response {
	let body = match error.code() {
		Some(code) => json!({"message": error.message(), "code": code.code}),
		None => json!({"message": error.message()}),
	};
	Response::json(body).with_status(error.status())
}
