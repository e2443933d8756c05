use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single selectable entry returned by a fetcher.
///
/// `value` identifies the option and `label` is what gets displayed and
/// sorted on. Any additional fields supplied by the source are preserved in
/// `extra` and round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
	#[serde(default)]
	pub value: Value,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl SelectOption {
	/// Build an option from a value and display label.
	#[must_use]
	pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: Some(label.into()),
			extra: Map::new(),
		}
	}

	/// Attach an additional field to the option.
	#[must_use]
	pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.extra.insert(name.into(), value.into());
		self
	}

	/// Identity key used for deduplication, or `None` when the option has no value.
	#[must_use]
	pub fn key(&self) -> Option<OptionKey> {
		OptionKey::from_value(&self.value)
	}

	/// Label used for ordering; a missing label compares as the empty string.
	#[must_use]
	pub fn sort_label(&self) -> &str {
		self.label.as_deref().unwrap_or_default()
	}

	/// Look up a field by name, covering `value`, `label` and any extra fields.
	#[must_use]
	pub fn field(&self, name: &str) -> Option<FieldRef<'_>> {
		match name {
			"value" => Some(FieldRef::Json(&self.value)),
			"label" => self.label.as_deref().map(FieldRef::Text),
			other => self.extra.get(other).map(FieldRef::Json),
		}
	}
}

/// Borrowed view of an option field.
#[derive(Debug, Clone, Copy)]
pub enum FieldRef<'a> {
	Text(&'a str),
	Json(&'a Value),
}

impl<'a> FieldRef<'a> {
	/// Return whether any string reachable from this field satisfies `visit`.
	///
	/// Plain strings yield themselves; records yield their string-valued
	/// members. Other JSON types yield nothing.
	pub(crate) fn any_str(self, mut visit: impl FnMut(&'a str) -> bool) -> bool {
		match self {
			FieldRef::Text(text) => visit(text),
			FieldRef::Json(Value::String(text)) => visit(text),
			FieldRef::Json(Value::Object(map)) => map
				.values()
				.filter_map(Value::as_str)
				.any(visit),
			FieldRef::Json(_) => false,
		}
	}
}

/// Canonical identity of an option value.
///
/// Keys are the JSON encoding of the value, so `1` and `"1"` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionKey(String);

impl OptionKey {
	fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Null => None,
			other => Some(Self(other.to_string())),
		}
	}
}

impl fmt::Display for OptionKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
