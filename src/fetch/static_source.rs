use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use super::{FetchPayload, OptionFetcher};
use crate::error::FetchError;
use crate::options::KeywordFilter;
use crate::types::SelectOption;

/// Serves a fixed list of options, answering each request with the entries
/// whose value or label contains the keyword.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
	options: Vec<SelectOption>,
	payload_key: String,
	latency: Option<Duration>,
}

impl StaticFetcher {
	/// Create a fetcher over `options`.
	#[must_use]
	pub fn new(options: Vec<SelectOption>) -> Self {
		Self {
			options,
			payload_key: crate::coordinator::DEFAULT_PAYLOAD_KEY.to_string(),
			latency: None,
		}
	}

	/// Load options from a JSON file containing an array of option records.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or does not decode into a
	/// list of options.
	pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FetchError> {
		let contents = fs::read_to_string(path.as_ref())?;
		let options: Vec<SelectOption> = serde_json::from_str(&contents)?;
		Ok(Self::new(options))
	}

	/// Read the keyword from `payload_key` when the payload is a field map.
	#[must_use]
	pub fn with_payload_key(mut self, payload_key: impl Into<String>) -> Self {
		self.payload_key = payload_key.into();
		self
	}

	/// Delay each answer, imitating a network round trip.
	#[must_use]
	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = (!latency.is_zero()).then_some(latency);
		self
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.options.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.options.is_empty()
	}
}

#[async_trait]
impl OptionFetcher for StaticFetcher {
	async fn fetch(&self, payload: FetchPayload) -> Result<Vec<SelectOption>, FetchError> {
		if let Some(latency) = self.latency {
			tokio::time::sleep(latency).await;
		}

		let keyword = payload.keyword(&self.payload_key).unwrap_or_default();
		let found = KeywordFilter::new(keyword, None).apply(&self.options);
		trace!(keyword, found = found.len(), "static source answered");
		Ok(found)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use serde_json::{Map, json};

	use super::*;

	#[tokio::test]
	async fn answers_with_matching_entries() {
		let fetcher = StaticFetcher::new(vec![
			SelectOption::new(1, "Apple"),
			SelectOption::new(2, "Pineapple"),
			SelectOption::new(3, "Banana"),
		]);

		let found = fetcher.fetch(FetchPayload::Keyword("apple".into())).await.unwrap();
		assert_eq!(found.len(), 2);
	}

	#[tokio::test]
	async fn reads_keyword_from_field_payload() {
		let fetcher = StaticFetcher::new(vec![SelectOption::new(1, "Apple")]).with_payload_key("q");
		let mut fields = Map::new();
		fields.insert("q".into(), json!("app"));

		let found = fetcher.fetch(FetchPayload::Fields(fields)).await.unwrap();
		assert_eq!(found.len(), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn latency_delays_the_answer() {
		let fetcher = StaticFetcher::new(vec![SelectOption::new(1, "Apple")])
			.with_latency(Duration::from_millis(250));

		let started = tokio::time::Instant::now();
		fetcher.fetch(FetchPayload::Keyword("a".into())).await.unwrap();
		assert!(started.elapsed() >= Duration::from_millis(250));
	}

	#[test]
	fn loads_options_from_json_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"[{{"value": 1, "label": "One"}}, {{"value": "b", "label": "Two"}}]"#).unwrap();

		let fetcher = StaticFetcher::from_json_file(file.path()).unwrap();
		assert_eq!(fetcher.len(), 2);
	}

	#[test]
	fn rejects_non_list_json() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{"value": 1}}"#).unwrap();

		let err = StaticFetcher::from_json_file(file.path()).unwrap_err();
		assert!(matches!(err, FetchError::Decode(_)));
	}
}
