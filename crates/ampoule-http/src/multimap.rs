//! Ordered multi-value map.
//!
//! Headers and query parameters can legitimately repeat, so both use the
//! same structure: an insertion-ordered mapping from key to a list of
//! values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered mapping from string key to a list of values.
///
/// # Examples
///
/// ```
/// use ampoule_http::MultiValueMap;
///
/// let mut map = MultiValueMap::new();
/// map.add("values", "hello");
/// map.add("values", "world");
/// assert_eq!(map.get_first("values"), Some("hello"));
/// assert_eq!(map.get("values"), Some(&["hello".to_string(), "world".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiValueMap {
	values: IndexMap<String, Vec<String>>,
}

impl MultiValueMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// All values for `key`, in insertion order.
	pub fn get(&self, key: &str) -> Option<&[String]> {
		self.values.get(key).map(Vec::as_slice)
	}

	/// The first value for `key`.
	pub fn get_first(&self, key: &str) -> Option<&str> {
		self.values
			.get(key)
			.and_then(|values| values.first())
			.map(String::as_str)
	}

	/// Append a single value to `key`.
	pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.values.entry(key.into()).or_default().push(value.into());
	}

	/// Append every value in `values` to `key`.
	pub fn extend(&mut self, key: impl Into<String>, values: impl IntoIterator<Item = String>) {
		self.values.entry(key.into()).or_default().extend(values);
	}

	/// Replace all values for `key`.
	pub fn set(&mut self, key: impl Into<String>, values: Vec<String>) {
		self.values.insert(key.into(), values);
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.values
			.iter()
			.map(|(key, values)| (key.as_str(), values.as_slice()))
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.values.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl From<IndexMap<String, Vec<String>>> for MultiValueMap {
	fn from(values: IndexMap<String, Vec<String>>) -> Self {
		Self { values }
	}
}

impl FromIterator<(String, Vec<String>)> for MultiValueMap {
	fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
		Self {
			values: iter.into_iter().collect(),
		}
	}
}

impl<'a> IntoIterator for &'a MultiValueMap {
	type Item = (&'a String, &'a Vec<String>);
	type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.iter()
	}
}
