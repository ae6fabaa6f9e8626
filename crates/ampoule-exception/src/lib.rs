//! # Ampoule Exception
//!
//! Error model for the ampoule framework.
//!
//! Every failure inside the framework is an [`Error`]: a message plus an
//! [`ErrorKind`] drawn from a closed set, optionally carrying a structured
//! [`ErrorCode`] and an ordered list of custom tags. Custom tags let
//! application code participate in error-handler lookup without the
//! framework reflecting over concrete types: an error tagged
//! `["confused", "custom"]` is caught by a handler registered for either
//! tag, most specific first, before falling back to the handler for its
//! kind.
//!
//! ## Status resolution
//!
//! Each kind carries a default HTTP status. Kinds without a dedicated
//! status resolve through a small static table
//! (internal → 500, value → 400, not-implemented → 501), walked most
//! specific first, mirroring how the dispatcher's default error responder
//! picks a status for errors nobody registered a handler for.

use http::StatusCode;
use serde::Serialize;
use thiserror::Error as ThisError;

/// Framework-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of error kinds the framework understands.
///
/// Each kind maps to a default HTTP status; handlers may be registered
/// per kind (or per custom tag) to override the produced response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Unclassified server-side failure. The universal fallback kind.
	Internal,
	/// A value failed to parse or validate. Client error.
	Value,
	/// Functionality that is recognized but not implemented.
	NotImplemented,
	/// Malformed or incomplete request.
	BadRequest,
	/// Missing or invalid credentials.
	Unauthorized,
	/// Authenticated but not permitted.
	Forbidden,
	/// The requested resource does not exist.
	NotFound,
	/// The path exists but not for the requested method.
	MethodNotAllowed,
}

/// Static fallback table for kinds that do not carry a dedicated HTTP
/// status. Walked most-specific-first via [`ErrorKind::candidates`].
const DEFAULT_STATUSES: [(ErrorKind, StatusCode); 3] = [
	(ErrorKind::Value, StatusCode::BAD_REQUEST),
	(ErrorKind::NotImplemented, StatusCode::NOT_IMPLEMENTED),
	(ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR),
];

impl ErrorKind {
	/// The candidate chain for this kind, most specific first. Every
	/// chain terminates in [`ErrorKind::Internal`], the universal kind.
	pub fn candidates(self) -> &'static [ErrorKind] {
		match self {
			ErrorKind::Internal => &[ErrorKind::Internal],
			ErrorKind::Value => &[ErrorKind::Value, ErrorKind::Internal],
			ErrorKind::NotImplemented => &[ErrorKind::NotImplemented, ErrorKind::Internal],
			ErrorKind::BadRequest => &[ErrorKind::BadRequest, ErrorKind::Internal],
			ErrorKind::Unauthorized => &[ErrorKind::Unauthorized, ErrorKind::Internal],
			ErrorKind::Forbidden => &[ErrorKind::Forbidden, ErrorKind::Internal],
			ErrorKind::NotFound => &[ErrorKind::NotFound, ErrorKind::Internal],
			ErrorKind::MethodNotAllowed => &[ErrorKind::MethodNotAllowed, ErrorKind::Internal],
		}
	}

	/// Default HTTP status for this kind.
	///
	/// # Examples
	///
	/// ```
	/// use ampoule_exception::ErrorKind;
	/// use http::StatusCode;
	///
	/// assert_eq!(ErrorKind::NotFound.status(), StatusCode::NOT_FOUND);
	/// assert_eq!(ErrorKind::Value.status(), StatusCode::BAD_REQUEST);
	/// ```
	pub fn status(self) -> StatusCode {
		match self {
			ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
			ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
			ErrorKind::Forbidden => StatusCode::FORBIDDEN,
			ErrorKind::NotFound => StatusCode::NOT_FOUND,
			ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
			kind => Self::native_status(kind),
		}
	}

	/// Resolve a status through the static fallback table, walking the
	/// candidate chain most-specific-first.
	fn native_status(kind: ErrorKind) -> StatusCode {
		for candidate in kind.candidates() {
			if let Some((_, status)) = DEFAULT_STATUSES.iter().find(|(k, _)| k == candidate) {
				return *status;
			}
		}
		StatusCode::INTERNAL_SERVER_ERROR
	}
}

/// A machine-readable error code paired with a human-readable message.
///
/// Surfaced in error response bodies so API clients can branch on
/// `code` without parsing `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorCode {
	pub code: String,
	pub message: String,
}

impl ErrorCode {
	pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			message: message.into(),
		}
	}
}

/// Key under which an error handler is registered.
///
/// `Kind` keys match the built-in taxonomy; `Tag` keys match the custom
/// tags an application attaches to its own errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKey {
	Kind(ErrorKind),
	Tag(String),
}

impl ErrorKey {
	pub fn tag(tag: impl Into<String>) -> Self {
		ErrorKey::Tag(tag.into())
	}
}

impl From<ErrorKind> for ErrorKey {
	fn from(kind: ErrorKind) -> Self {
		ErrorKey::Kind(kind)
	}
}

/// The framework error type.
///
/// # Examples
///
/// ```
/// use ampoule_exception::{Error, ErrorKind};
/// use http::StatusCode;
///
/// let error = Error::new(ErrorKind::NotFound, "User not found");
/// assert_eq!(error.status(), StatusCode::NOT_FOUND);
/// assert_eq!(error.to_string(), "User not found");
/// ```
///
/// Custom tags participate in handler lookup most-specific-first:
///
/// ```
/// use ampoule_exception::{Error, ErrorKey, ErrorKind};
///
/// let error = Error::new(ErrorKind::Internal, "I'm a confused teapot")
///     .with_tag("confused")
///     .with_tag("custom");
/// let keys: Vec<ErrorKey> = error.candidate_keys().collect();
/// assert_eq!(keys[0], ErrorKey::tag("confused"));
/// assert_eq!(keys[1], ErrorKey::tag("custom"));
/// assert_eq!(keys[2], ErrorKey::Kind(ErrorKind::Internal));
/// ```
#[derive(Debug, Clone, ThisError)]
#[error("{message}")]
pub struct Error {
	kind: ErrorKind,
	message: String,
	code: Option<ErrorCode>,
	tags: Vec<String>,
	status: Option<StatusCode>,
}

impl Error {
	pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
		Self {
			kind,
			message: message.into(),
			code: None,
			tags: Vec::new(),
			status: None,
		}
	}

	/// Shorthand for an [`ErrorKind::Internal`] error.
	pub fn internal(message: impl Into<String>) -> Self {
		Self::new(ErrorKind::Internal, message)
	}

	/// Shorthand for an [`ErrorKind::Value`] error.
	pub fn value(message: impl Into<String>) -> Self {
		Self::new(ErrorKind::Value, message)
	}

	/// Attach a structured code. The code's message becomes the error
	/// message.
	pub fn with_code(mut self, code: ErrorCode) -> Self {
		self.message = code.message.clone();
		self.code = Some(code);
		self
	}

	/// Append a custom tag. Tags are consulted in the order they were
	/// attached, so add the most specific tag first.
	pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
		self.tags.push(tag.into());
		self
	}

	/// Override the status the default responder would pick for this
	/// error's kind.
	pub fn with_status(mut self, status: StatusCode) -> Self {
		self.status = Some(status);
		self
	}

	pub fn kind(&self) -> ErrorKind {
		self.kind
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn code(&self) -> Option<&ErrorCode> {
		self.code.as_ref()
	}

	pub fn tags(&self) -> &[String] {
		&self.tags
	}

	/// The HTTP status for this error: the explicit override if one was
	/// set, otherwise the kind's default.
	pub fn status(&self) -> StatusCode {
		self.status.unwrap_or_else(|| self.kind.status())
	}

	/// Handler-lookup keys for this error, most specific first: custom
	/// tags in attachment order, then the kind, then the universal
	/// [`ErrorKind::Internal`] key.
	pub fn candidate_keys(&self) -> impl Iterator<Item = ErrorKey> + '_ {
		self.tags
			.iter()
			.map(|tag| ErrorKey::Tag(tag.clone()))
			.chain(
				self.kind
					.candidates()
					.iter()
					.map(|kind| ErrorKey::Kind(*kind)),
			)
	}
}

// Framework error codes. Constructors rather than an enum so call sites
// read as what went wrong, not how it is encoded.
impl Error {
	pub fn route_not_found(resource: &str) -> Self {
		Self::new(ErrorKind::NotFound, "").with_code(ErrorCode::new(
			"ROUTE_NOT_FOUND",
			format!("No route defined for resource {resource}"),
		))
	}

	pub fn method_not_allowed(resource: &str, method: &http::Method) -> Self {
		Self::new(ErrorKind::MethodNotAllowed, "").with_code(ErrorCode::new(
			"METHOD_NOT_ALLOWED",
			format!("No route defined for resource {resource} and method {method}"),
		))
	}

	pub fn parser_not_registered(tag: &str) -> Self {
		Self::new(ErrorKind::Internal, "").with_code(ErrorCode::new(
			"PARSER_NOT_REGISTERED",
			format!("Parser '{tag}' is not registered"),
		))
	}

	pub fn parser_already_exists(tag: &str) -> Self {
		Self::new(ErrorKind::Internal, "").with_code(ErrorCode::new(
			"PARSER_ALREADY_EXISTS",
			format!("Parser '{tag}' is already registered"),
		))
	}

	pub fn not_in_request() -> Self {
		Self::new(ErrorKind::Internal, "").with_code(ErrorCode::new(
			"NOT_IN_REQUEST",
			"Not currently within a request",
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(ErrorKind::BadRequest, StatusCode::BAD_REQUEST)]
	#[case(ErrorKind::Unauthorized, StatusCode::UNAUTHORIZED)]
	#[case(ErrorKind::Forbidden, StatusCode::FORBIDDEN)]
	#[case(ErrorKind::NotFound, StatusCode::NOT_FOUND)]
	#[case(ErrorKind::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED)]
	#[case(ErrorKind::Value, StatusCode::BAD_REQUEST)]
	#[case(ErrorKind::NotImplemented, StatusCode::NOT_IMPLEMENTED)]
	#[case(ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR)]
	fn kind_status(#[case] kind: ErrorKind, #[case] status: StatusCode) {
		assert_eq!(kind.status(), status);
	}

	#[test]
	fn explicit_status_wins_over_kind_default() {
		let error = Error::new(ErrorKind::Internal, "teapot").with_status(StatusCode::IM_A_TEAPOT);
		assert_eq!(error.status(), StatusCode::IM_A_TEAPOT);
	}

	#[test]
	fn code_message_becomes_error_message() {
		let error = Error::route_not_found("/missing");
		assert_eq!(error.to_string(), "No route defined for resource /missing");
		assert_eq!(error.code().unwrap().code, "ROUTE_NOT_FOUND");
	}

	#[test]
	fn candidate_keys_walk_tags_then_kind_then_internal() {
		let error = Error::new(ErrorKind::NotFound, "gone").with_tag("missing_user");
		let keys: Vec<ErrorKey> = error.candidate_keys().collect();
		assert_eq!(
			keys,
			vec![
				ErrorKey::tag("missing_user"),
				ErrorKey::Kind(ErrorKind::NotFound),
				ErrorKey::Kind(ErrorKind::Internal),
			]
		);
	}

	#[test]
	fn internal_kind_is_not_duplicated_in_candidates() {
		let error = Error::internal("boom");
		let keys: Vec<ErrorKey> = error.candidate_keys().collect();
		assert_eq!(keys, vec![ErrorKey::Kind(ErrorKind::Internal)]);
	}
}
