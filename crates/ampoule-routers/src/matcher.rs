//! URL-to-template matching for transports without a managed router.
//!
//! The production gateway delivers events whose `resource` field is the
//! already-matched template; this matcher exists for transports (and
//! the test gateway) that only have a concrete URL and need the
//! template recovered from it.

use std::collections::HashMap;

use ampoule_exception::{Error, Result};
use ampoule_http::MultiValueMap;
use percent_encoding::percent_decode_str;

/// Outcome of matching a concrete URL against the registered templates.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
	/// The matched path template, e.g. `/users/{user_id}`.
	pub route: String,
	/// Raw string captures for each `{name}` segment.
	pub path_params: HashMap<String, String>,
	/// Decoded query parameters, multi-valued.
	pub query_params: MultiValueMap,
}

/// Matches concrete URLs against a fixed set of path templates.
///
/// Templates are tried in lexical order and the first match wins, so
/// when `/users/me` and `/users/{user_id}` both match a URL the
/// literal template is preferred only by accident of sort order.
///
/// # Examples
///
/// ```
/// use ampoule_routers::RouteMatcher;
///
/// let matcher = RouteMatcher::new(vec![
///     "/health".to_string(),
///     "/users/{user_id}".to_string(),
/// ]);
/// let matched = matcher.match_url("/users/42?verbose=true").unwrap();
/// assert_eq!(matched.route, "/users/{user_id}");
/// assert_eq!(matched.path_params["user_id"], "42");
/// assert_eq!(matched.query_params.get_first("verbose"), Some("true"));
/// ```
#[derive(Debug, Clone)]
pub struct RouteMatcher {
	templates: Vec<String>,
}

impl RouteMatcher {
	pub fn new(mut templates: Vec<String>) -> Self {
		templates.sort();
		Self { templates }
	}

	pub fn match_url(&self, url: &str) -> Result<RouteMatch> {
		let (path, query) = match url.split_once('?') {
			Some((path, query)) => (path, Some(query)),
			None => (url, None),
		};
		let path = normalize(path);

		for template in &self.templates {
			if let Some(path_params) = match_template(template, path) {
				return Ok(RouteMatch {
					route: template.clone(),
					path_params,
					query_params: query.map(parse_query).unwrap_or_default(),
				});
			}
		}
		Err(Error::route_not_found(url))
	}
}

/// A single trailing slash is not significant, except on the root path.
fn normalize(path: &str) -> &str {
	match path.strip_suffix('/') {
		Some("") | None => path,
		Some(stripped) => stripped,
	}
}

fn match_template(template: &str, path: &str) -> Option<HashMap<String, String>> {
	let template_segments: Vec<&str> = template.split('/').collect();
	let path_segments: Vec<&str> = path.split('/').collect();
	if template_segments.len() != path_segments.len() {
		return None;
	}

	let mut captures = HashMap::new();
	for (expected, actual) in template_segments.iter().zip(&path_segments) {
		match expected.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
			Some(name) => {
				captures.insert(name.to_string(), actual.to_string());
			}
			None if expected == actual => {}
			None => return None,
		}
	}
	Some(captures)
}

fn parse_query(query: &str) -> MultiValueMap {
	let mut params = MultiValueMap::new();
	for pair in query.split('&').filter(|pair| !pair.is_empty()) {
		let (key, value) = match pair.split_once('=') {
			Some((key, value)) => (key, value),
			None => (pair, ""),
		};
		params.add(decode(key), decode(value));
	}
	params
}

fn decode(component: &str) -> String {
	let unplussed = component.replace('+', " ");
	percent_decode_str(&unplussed).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn matcher() -> RouteMatcher {
		RouteMatcher::new(vec![
			"/".to_string(),
			"/health".to_string(),
			"/users/{user_id}".to_string(),
			"/path/{key}/has/{value}/params".to_string(),
		])
	}

	#[rstest]
	#[case("/health", "/health")]
	#[case("/health/", "/health")]
	#[case("/", "/")]
	#[case("/users/42", "/users/{user_id}")]
	fn matches_template(#[case] url: &str, #[case] expected: &str) {
		assert_eq!(matcher().match_url(url).unwrap().route, expected);
	}

	#[rstest]
	#[case("/missing")]
	#[case("/users/42/extra")]
	#[case("/users")]
	fn unmatched_url_is_route_not_found(#[case] url: &str) {
		let error = matcher().match_url(url).unwrap_err();
		assert_eq!(error.message(), format!("No route defined for resource {url}"));
	}

	#[test]
	fn captures_every_variable_segment() {
		let matched = matcher().match_url("/path/alpha/has/beta/params").unwrap();
		assert_eq!(matched.route, "/path/{key}/has/{value}/params");
		assert_eq!(matched.path_params["key"], "alpha");
		assert_eq!(matched.path_params["value"], "beta");
	}

	#[test]
	fn query_values_accumulate_per_key() {
		let matched = matcher()
			.match_url("/health?key=hello&value=world&values=hello&values=world")
			.unwrap();
		assert_eq!(matched.query_params.get("key"), Some(&["hello".to_string()][..]));
		assert_eq!(matched.query_params.get("value"), Some(&["world".to_string()][..]));
		assert_eq!(
			matched.query_params.get("values"),
			Some(&["hello".to_string(), "world".to_string()][..])
		);
	}

	#[test]
	fn query_decoding_handles_escapes_and_blanks() {
		let matched = matcher()
			.match_url("/health?q=hello+world&lang=pt%2DBR&empty=&bare")
			.unwrap();
		assert_eq!(matched.query_params.get_first("q"), Some("hello world"));
		assert_eq!(matched.query_params.get_first("lang"), Some("pt-BR"));
		assert_eq!(matched.query_params.get("empty"), Some(&[String::new()][..]));
		assert_eq!(matched.query_params.get("bare"), Some(&[String::new()][..]));
	}

	#[test]
	fn tie_break_is_lexical() {
		let matcher = RouteMatcher::new(vec![
			"/users/{user_id}".to_string(),
			"/users/me".to_string(),
		]);
		let matched = matcher.match_url("/users/me").unwrap();
		assert_eq!(matched.route, "/users/me");
	}
}
