//! # Ampoule HTTP
//!
//! Request/response vocabulary for the ampoule framework.
//!
//! This crate defines everything a dispatch pipeline passes around:
//! the multi-value map used for headers and query parameters, the
//! [`Request`] and [`Response`] types, the [`RouteHandler`] and
//! [`Middleware`] trait seams with the synchronous [`CallChain`], the
//! narrow [`JsonCodec`] contract, and the transport event/reply shapes
//! ([`LambdaEvent`], [`GatewayReply`]).

pub mod codec;
pub mod event;
pub mod handler;
pub mod middleware;
pub mod multimap;
pub mod params;
pub mod request;
pub mod response;

pub use codec::{JsonCodec, SerdeJsonCodec};
pub use event::{GatewayReply, LambdaEvent};
pub use handler::RouteHandler;
pub use middleware::{CallChain, Middleware, MiddlewareRegistry};
pub use multimap::MultiValueMap;
pub use params::{ParamValue, PathParams};
pub use request::{InvocationContext, Request};
pub use response::{Body, Reply, Response};

// The HTTP vocabulary used throughout the framework.
pub use http::{Method, StatusCode};
