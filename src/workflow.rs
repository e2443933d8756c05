use anyhow::{Context, Result};
use selectable::{LookupState, OptionsCoordinator, StaticFetcher};
use tracing::{debug, info};

use crate::cli::KeywordReport;
use crate::settings::ResolvedConfig;

/// Replays keywords through a coordinator backed by a static option file.
pub(crate) struct LookupWorkflow {
	coordinator: OptionsCoordinator,
	debounced: bool,
}

impl LookupWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig, debounced: bool) -> Result<Self> {
		let ResolvedConfig {
			lookup,
			source,
			latency,
		} = config;

		let fetcher = StaticFetcher::from_json_file(&source)
			.with_context(|| format!("failed to load options from {}", source.display()))?
			.with_payload_key(lookup.payload_key.clone())
			.with_latency(latency);
		info!(source = %source.display(), options = fetcher.len(), "loaded option source");

		Ok(Self {
			coordinator: OptionsCoordinator::with_fetcher(lookup, fetcher),
			debounced,
		})
	}

	/// Run every keyword and return one report per applied lookup.
	///
	/// In debounced mode the keywords form a single burst, so only the last
	/// one is reported.
	pub(crate) async fn run(&self, keywords: Vec<String>) -> Result<Vec<KeywordReport>> {
		if self.debounced {
			return Ok(self.run_debounced(keywords).await.into_iter().collect());
		}

		let mut reports = Vec::with_capacity(keywords.len());
		for keyword in keywords {
			let outcome = self.coordinator.lookup_now(&keyword).await?;
			debug!(keyword, ?outcome, "lookup finished");
			reports.push(KeywordReport {
				filtered: self.coordinator.filtered_options(),
				outcome: Some(outcome),
				keyword,
			});
		}
		Ok(reports)
	}

	async fn run_debounced(&self, keywords: Vec<String>) -> Option<KeywordReport> {
		let last = keywords.last().cloned()?;
		for keyword in keywords {
			self.coordinator.debounced_lookup(keyword);
		}
		self.coordinator.settle().await;

		Some(KeywordReport {
			keyword: last,
			outcome: None,
			filtered: self.coordinator.filtered_options(),
		})
	}

	pub(crate) fn state(&self) -> LookupState {
		self.coordinator.state()
	}
}
