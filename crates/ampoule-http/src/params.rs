//! Typed path parameters.
//!
//! Path-template variables are parsed into [`ParamValue`]s at dispatch
//! time, in the order they were declared in the template. Declared order
//! matters: it is the binding order handlers observe, so the template's
//! variable order must match what the handler expects.

use std::fmt;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A parsed path-parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
	Str(String),
	Bool(bool),
	Int(i64),
	Float(f64),
	Decimal(Decimal),
	Uuid(Uuid),
	/// Produced by application-registered parsers.
	Json(serde_json::Value),
}

impl ParamValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			ParamValue::Str(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			ParamValue::Bool(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			ParamValue::Int(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			ParamValue::Float(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_decimal(&self) -> Option<Decimal> {
		match self {
			ParamValue::Decimal(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_uuid(&self) -> Option<Uuid> {
		match self {
			ParamValue::Uuid(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_json(&self) -> Option<&serde_json::Value> {
		match self {
			ParamValue::Json(value) => Some(value),
			_ => None,
		}
	}
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ParamValue::Str(value) => write!(f, "{value}"),
			ParamValue::Bool(value) => write!(f, "{value}"),
			ParamValue::Int(value) => write!(f, "{value}"),
			ParamValue::Float(value) => write!(f, "{value}"),
			ParamValue::Decimal(value) => write!(f, "{value}"),
			ParamValue::Uuid(value) => write!(f, "{value}"),
			ParamValue::Json(value) => write!(f, "{value}"),
		}
	}
}

/// Parsed path parameters in template-declared order.
///
/// # Examples
///
/// ```
/// use ampoule_http::{ParamValue, PathParams};
///
/// let mut params = PathParams::new();
/// params.insert("key", ParamValue::Str("hello".into()));
/// params.insert("value", ParamValue::Str("world".into()));
///
/// assert_eq!(params.get("key").and_then(|v| v.as_str()), Some("hello"));
/// let names: Vec<&str> = params.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, vec!["key", "value"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathParams {
	values: IndexMap<String, ParamValue>,
}

impl PathParams {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
		self.values.insert(name.into(), value);
	}

	pub fn get(&self, name: &str) -> Option<&ParamValue> {
		self.values.get(name)
	}

	/// Shorthand for string parameters, by far the common case.
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.values.get(name).and_then(ParamValue::as_str)
	}

	/// Parameters in template-declared order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.values
			.iter()
			.map(|(name, value)| (name.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}
