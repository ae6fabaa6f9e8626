//! # Ampoule
//!
//! A minimalist serverless web framework.
//!
//! Ampoule turns an API-gateway proxy event into a handler call and a
//! reply: routes are registered on an [`App`] (directly or via mounted
//! [`Resource`]s), path parameters are converted by keyword parsers,
//! middleware wraps the handler in registration order, and every error
//! is mapped to a JSON response by the error handler registry.
//!
//! ## Quick start
//!
//! ```
//! use ampoule::{App, PathParams, Reply, Request, Result};
//! use serde_json::json;
//!
//! fn health(_request: &Request, _params: &PathParams) -> Result<Reply> {
//!     Ok(Reply::Json(json!({"status": "OK"})))
//! }
//!
//! let mut app = App::new("demo");
//! app.get("/health", health).unwrap();
//! ```
//!
//! The app's `handle` method is the transport entry point; in tests,
//! `ampoule-testing`'s local gateway drives the same pipeline from
//! plain URLs.

pub mod apps;
pub mod dispatch;
pub mod exception;
pub mod http;
pub mod routers;

pub use ampoule_apps::{App, Resource};
pub use ampoule_dispatch::{current, ErrorHandlerRegistry, ErrorResponder};
pub use ampoule_exception::{Error, ErrorCode, ErrorKey, ErrorKind, Result};
pub use ampoule_http::{
	Body, CallChain, GatewayReply, InvocationContext, JsonCodec, LambdaEvent, Method, Middleware,
	MultiValueMap, ParamValue, PathParams, Reply, Request, Response, RouteHandler, SerdeJsonCodec,
	StatusCode,
};
pub use ampoule_routers::{KeywordParser, Parser, RouteMatcher, RouteTable};
