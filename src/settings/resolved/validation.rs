use super::{ConfigError, ConfigSources, ResolvedConfig};

/// Longest debounce window accepted from configuration.
const MAX_DEBOUNCE_MS: u64 = 60_000;

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if config.lookup.debounce_ms > MAX_DEBOUNCE_MS {
		return Err(ConfigError::invalid(
			"lookup.debounce_ms",
			config.lookup.debounce_ms.to_string(),
			sources.source_for_debounce(),
			format!("must not exceed {MAX_DEBOUNCE_MS}"),
		));
	}

	if config.lookup.payload_key.trim().is_empty() {
		return Err(ConfigError::invalid(
			"lookup.payload_key",
			config.lookup.payload_key.clone(),
			sources.source_for_payload_key(),
			"must not be empty",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;
	use std::time::Duration;

	use selectable::LookupConfig;

	use super::super::SettingSource;
	use super::*;

	fn resolved(lookup: LookupConfig) -> ResolvedConfig {
		ResolvedConfig {
			lookup,
			source: PathBuf::from("options.json"),
			latency: Duration::ZERO,
		}
	}

	#[test]
	fn validation_rejects_long_debounce() {
		let config = resolved(LookupConfig::default().with_debounce(Duration::from_secs(120)));
		let sources = ConfigSources {
			debounce_ms: Some(SettingSource::CliFlag("--debounce-ms")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "lookup.debounce_ms");
		let message = err.to_string();
		assert!(message.contains("120000"));
		assert!(message.contains("CLI flag"));
	}

	#[test]
	fn validation_rejects_empty_payload_key() {
		let config = resolved(LookupConfig::default().with_payload_key(""));
		let sources = ConfigSources {
			payload_key: Some(SettingSource::Environment("SELECTABLE__LOOKUP__PAYLOAD_KEY")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "lookup.payload_key");
		assert!(err.to_string().contains("environment variable"));
	}

	#[test]
	fn defaults_pass_validation() {
		assert!(validate(&resolved(LookupConfig::default()), &ConfigSources::default()).is_ok());
	}
}
