//! # Ampoule Routers
//!
//! Route registry and path machinery for the ampoule framework.
//!
//! ## Architecture
//!
//! ```text
//! template ──► RouteTable (build: split, resolve parsers) ──► Route
//!                  │
//!                  ├─ resolve(resource, method)   exact-match double lookup
//!                  └─ paths() ──► RouteMatcher    harness-only URL matching
//!
//! raw path params ──► ArgumentBuilder ──► PathParams (declared order)
//! ```
//!
//! The production dispatch path never matches URLs: the transport hands
//! over an already-matched template identifier, so resolution is a pair
//! of map lookups. [`RouteMatcher`] exists for the local test harness,
//! which has no gateway in front of it.

pub mod args;
pub mod matcher;
pub mod parsers;
pub mod route;
pub mod table;

pub use args::ArgumentBuilder;
pub use matcher::{RouteMatch, RouteMatcher};
pub use parsers::{KeywordParser, Parser};
pub use route::Route;
pub use table::RouteTable;
