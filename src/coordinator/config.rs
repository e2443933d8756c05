use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fetch::FetchPayload;

/// Field name the keyword is sent under when an extra payload is configured.
pub const DEFAULT_PAYLOAD_KEY: &str = "keyword";
/// Quiet period before a debounced lookup fires.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Behavioural settings for an [`OptionsCoordinator`](super::OptionsCoordinator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
	/// Key the keyword is placed under when `extra_payload` is present.
	pub payload_key: String,
	/// Extra fields merged into every request payload.
	pub extra_payload: Option<Map<String, Value>>,
	/// Restrict filtering to a single option field.
	pub filter_field: Option<String>,
	/// Debounce window for [`debounced_lookup`](super::OptionsCoordinator::debounced_lookup).
	pub debounce_ms: u64,
}

impl Default for LookupConfig {
	fn default() -> Self {
		Self {
			payload_key: DEFAULT_PAYLOAD_KEY.to_string(),
			extra_payload: None,
			filter_field: None,
			debounce_ms: DEFAULT_DEBOUNCE_MS,
		}
	}
}

impl LookupConfig {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_payload_key(mut self, payload_key: impl Into<String>) -> Self {
		self.payload_key = payload_key.into();
		self
	}

	#[must_use]
	pub fn with_extra_payload(mut self, extra: Map<String, Value>) -> Self {
		self.extra_payload = Some(extra);
		self
	}

	#[must_use]
	pub fn with_filter_field(mut self, field: impl Into<String>) -> Self {
		self.filter_field = Some(field.into());
		self
	}

	#[must_use]
	pub fn with_debounce(mut self, debounce: Duration) -> Self {
		self.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
		self
	}

	#[must_use]
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Build the request payload for `keyword`.
	///
	/// Without an extra payload the keyword is sent as-is. Otherwise the
	/// keyword is placed under `payload_key` and the extra fields are layered
	/// on top, overriding it on a name clash.
	#[must_use]
	pub fn payload_for(&self, keyword: &str) -> FetchPayload {
		let Some(extra) = &self.extra_payload else {
			return FetchPayload::Keyword(keyword.to_string());
		};

		let mut fields = Map::with_capacity(extra.len() + 1);
		fields.insert(self.payload_key.clone(), Value::String(keyword.to_string()));
		for (name, value) in extra {
			fields.insert(name.clone(), value.clone());
		}
		FetchPayload::Fields(fields)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn defaults_match_documented_values() {
		let config = LookupConfig::default();
		assert_eq!(config.payload_key, "keyword");
		assert_eq!(config.debounce(), Duration::from_millis(500));
		assert!(config.filter_field.is_none());
	}

	#[test]
	fn bare_keyword_without_extra_payload() {
		let payload = LookupConfig::default().payload_for("abc");
		assert_eq!(payload, FetchPayload::Keyword("abc".into()));
	}

	#[test]
	fn extra_payload_wraps_keyword() {
		let mut extra = Map::new();
		extra.insert("tenant".into(), json!("acme"));
		let config = LookupConfig::default()
			.with_payload_key("q")
			.with_extra_payload(extra);

		let FetchPayload::Fields(fields) = config.payload_for("abc") else {
			panic!("expected field payload");
		};
		assert_eq!(fields["q"], json!("abc"));
		assert_eq!(fields["tenant"], json!("acme"));
	}

	#[test]
	fn extra_payload_overrides_keyword_on_clash() {
		let mut extra = Map::new();
		extra.insert("keyword".into(), json!("fixed"));
		let config = LookupConfig::default().with_extra_payload(extra);

		assert_eq!(config.payload_for("abc").keyword("keyword"), Some("fixed"));
	}

	#[test]
	fn deserializes_partial_tables() {
		let config: LookupConfig = serde_json::from_value(json!({ "debounce_ms": 120 })).unwrap();
		assert_eq!(config.debounce(), Duration::from_millis(120));
		assert_eq!(config.payload_key, "keyword");
	}
}
