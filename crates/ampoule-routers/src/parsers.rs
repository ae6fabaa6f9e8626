//! Keyword parsers: typed path-parameter conversion.
//!
//! A path template names a parser by tag (`{user_id:uuid}`); the tag is
//! resolved against this registry when the route is registered, never
//! at request time, so a misspelled tag fails the application at
//! composition rather than on first traffic.

use std::sync::Arc;

use ampoule_exception::{Error, Result};
use ampoule_http::ParamValue;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A path-parameter parser: raw string in, typed value out. A failure
/// is a user input error and maps to a client error response.
pub type Parser = Arc<dyn Fn(&str) -> Result<ParamValue> + Send + Sync>;

fn parse_failure(tag: &str, value: &str) -> Error {
	Error::value(format!("'{value}' is not a valid {tag}"))
}

/// Registry of keyword parsers, preloaded with the built-in tags
/// `str`, `bool`, `int`, `float`, `decimal`, and `uuid`.
///
/// # Examples
///
/// ```
/// use ampoule_routers::KeywordParser;
///
/// let parsers = KeywordParser::new();
/// let parser = parsers.get("int").unwrap();
/// assert_eq!(parser("42").unwrap().as_int(), Some(42));
/// assert!(parser("forty-two").is_err());
/// ```
pub struct KeywordParser {
	parsers: IndexMap<String, Parser>,
}

impl KeywordParser {
	pub fn new() -> Self {
		let mut parsers: IndexMap<String, Parser> = IndexMap::new();
		parsers.insert(
			"str".to_string(),
			Arc::new(|value: &str| Ok(ParamValue::Str(value.to_string()))),
		);
		parsers.insert(
			"bool".to_string(),
			Arc::new(|value: &str| {
				value
					.parse::<bool>()
					.map(ParamValue::Bool)
					.map_err(|_| parse_failure("bool", value))
			}),
		);
		parsers.insert(
			"int".to_string(),
			Arc::new(|value: &str| {
				value
					.parse::<i64>()
					.map(ParamValue::Int)
					.map_err(|_| parse_failure("int", value))
			}),
		);
		parsers.insert(
			"float".to_string(),
			Arc::new(|value: &str| {
				value
					.parse::<f64>()
					.map(ParamValue::Float)
					.map_err(|_| parse_failure("float", value))
			}),
		);
		parsers.insert(
			"decimal".to_string(),
			Arc::new(|value: &str| {
				value
					.parse::<Decimal>()
					.map(ParamValue::Decimal)
					.map_err(|_| parse_failure("decimal", value))
			}),
		);
		parsers.insert(
			"uuid".to_string(),
			Arc::new(|value: &str| {
				value
					.parse::<Uuid>()
					.map(ParamValue::Uuid)
					.map_err(|_| parse_failure("uuid", value))
			}),
		);
		Self { parsers }
	}

	/// Look up a parser by tag. Unknown tags are a registration-time
	/// failure for the route naming them.
	pub fn get(&self, tag: &str) -> Result<Parser> {
		self.parsers
			.get(tag)
			.cloned()
			.ok_or_else(|| Error::parser_not_registered(tag))
	}

	/// Register a parser under a new tag. Registering an existing tag
	/// fails: a tag's meaning never changes once routes may refer to it.
	pub fn register(&mut self, tag: impl Into<String>, parser: Parser) -> Result<()> {
		let tag = tag.into();
		if self.parsers.contains_key(&tag) {
			return Err(Error::parser_already_exists(&tag));
		}
		self.parsers.insert(tag, parser);
		Ok(())
	}

	/// Convenience registration from a plain closure.
	pub fn register_fn<F>(&mut self, tag: impl Into<String>, parser: F) -> Result<()>
	where
		F: Fn(&str) -> Result<ParamValue> + Send + Sync + 'static,
	{
		self.register(tag, Arc::new(parser))
	}

	/// Fold another registry into this one. Parent wins: tags this
	/// registry already defines keep their meaning, consistent with
	/// [`KeywordParser::register`] refusing to overwrite.
	pub fn merge(&mut self, other: &KeywordParser) {
		for (tag, parser) in &other.parsers {
			if !self.parsers.contains_key(tag) {
				self.parsers.insert(tag.clone(), parser.clone());
			}
		}
	}

	pub fn tags(&self) -> impl Iterator<Item = &str> {
		self.parsers.keys().map(String::as_str)
	}
}

impl Default for KeywordParser {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ampoule_exception::ErrorKind;
	use rstest::rstest;

	#[rstest]
	#[case("str", "hello", ParamValue::Str("hello".to_string()))]
	#[case("bool", "true", ParamValue::Bool(true))]
	#[case("int", "-7", ParamValue::Int(-7))]
	#[case("float", "1.5", ParamValue::Float(1.5))]
	fn builtin_parsers_convert(
		#[case] tag: &str,
		#[case] raw: &str,
		#[case] expected: ParamValue,
	) {
		let parsers = KeywordParser::new();
		assert_eq!(parsers.get(tag).unwrap()(raw).unwrap(), expected);
	}

	#[test]
	fn decimal_parser_keeps_precision() {
		let parsers = KeywordParser::new();
		let value = parsers.get("decimal").unwrap()("12.340").unwrap();
		assert_eq!(value.as_decimal().unwrap().to_string(), "12.340");
	}

	#[test]
	fn uuid_parser_rejects_invalid_input_as_value_error() {
		let parsers = KeywordParser::new();
		let error = parsers.get("uuid").unwrap()("not-a-uuid").unwrap_err();
		assert_eq!(error.kind(), ErrorKind::Value);
	}

	#[test]
	fn unknown_tag_lookup_fails() {
		let parsers = KeywordParser::new();
		let error = parsers.get("duration").err().unwrap();
		assert_eq!(error.code().unwrap().code, "PARSER_NOT_REGISTERED");
	}

	#[test]
	fn duplicate_registration_fails() {
		let mut parsers = KeywordParser::new();
		let error = parsers
			.register_fn("int", |value| Ok(ParamValue::Str(value.to_string())))
			.unwrap_err();
		assert_eq!(error.code().unwrap().code, "PARSER_ALREADY_EXISTS");
	}

	#[test]
	fn merge_never_overwrites_parent_tags() {
		let mut parent = KeywordParser::new();
		parent
			.register_fn("list", |value| {
				Ok(ParamValue::Json(serde_json::Value::String(
					value.to_uppercase(),
				)))
			})
			.unwrap();

		let mut child = KeywordParser::new();
		child
			.register_fn("list", |value| {
				Ok(ParamValue::Json(serde_json::Value::String(
					value.to_lowercase(),
				)))
			})
			.unwrap();

		parent.merge(&child);
		let value = parent.get("list").unwrap()("MiXeD").unwrap();
		assert_eq!(
			value.as_json().unwrap(),
			&serde_json::Value::String("MIXED".to_string())
		);
	}

	#[test]
	fn merge_adds_tags_the_parent_lacks() {
		let mut parent = KeywordParser::new();
		let mut child = KeywordParser::new();
		child
			.register_fn("upper", |value| {
				Ok(ParamValue::Str(value.to_uppercase()))
			})
			.unwrap();
		parent.merge(&child);
		assert!(parent.get("upper").is_ok());
	}
}
