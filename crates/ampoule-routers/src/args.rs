//! Typed handler-argument construction from raw path parameters.

use std::collections::HashMap;

use ampoule_exception::{Error, Result};
use ampoule_http::PathParams;

use crate::route::Route;

/// Builds the typed [`PathParams`] a handler receives by running each
/// of the route's parsers over the raw string captures, in declaration
/// order.
///
/// A raw parameter missing for a declared variable is an internal
/// error: the transport matched the template, so every variable must
/// have a capture. A parser failure is the user's, and surfaces as a
/// client error.
#[derive(Debug, Default)]
pub struct ArgumentBuilder;

impl ArgumentBuilder {
	pub fn new() -> Self {
		Self
	}

	pub fn build(&self, route: &Route, raw: &HashMap<String, String>) -> Result<PathParams> {
		let mut params = PathParams::new();
		for (name, parser) in &route.variables {
			let value = raw
				.get(name)
				.ok_or_else(|| Error::internal(format!("Missing path parameter '{name}'")))?;
			params.insert(name.clone(), parser(value)?);
		}
		Ok(params)
	}
}
