use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use selectable::LookupConfig;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

/// `[lookup]` table as read from configuration files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LookupSection {
	pub(super) payload_key: Option<String>,
	pub(super) extra_payload: Option<Map<String, Value>>,
	pub(super) filter_field: Option<String>,
	pub(super) debounce_ms: Option<u64>,
}

/// `[source]` table describing where options are served from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SourceSection {
	pub(super) path: Option<PathBuf>,
	pub(super) latency_ms: Option<u64>,
}

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	pub(super) lookup: LookupSection,
	pub(super) source: SourceSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(key) = cli.payload_key.clone() {
			self.lookup.payload_key = Some(key);
		}
		if !cli.extra.is_empty() {
			let extra = self.lookup.extra_payload.get_or_insert_with(Map::new);
			for (name, value) in &cli.extra {
				extra.insert(name.clone(), value.clone());
			}
		}
		if let Some(field) = cli.filter_field.clone() {
			self.lookup.filter_field = Some(field);
		}
		if let Some(ms) = cli.debounce_ms {
			self.lookup.debounce_ms = Some(ms);
		}
		if let Some(path) = cli.source.clone() {
			self.source.path = Some(path);
		}
		if let Some(ms) = cli.latency_ms {
			self.source.latency_ms = Some(ms);
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			debounce_ms: detect_source(
				cli.debounce_ms.is_some(),
				self.lookup.debounce_ms.is_some(),
				"SELECTABLE__LOOKUP__DEBOUNCE_MS",
				"--debounce-ms",
				"lookup.debounce_ms",
			),
			payload_key: detect_source(
				cli.payload_key.is_some(),
				self.lookup.payload_key.is_some(),
				"SELECTABLE__LOOKUP__PAYLOAD_KEY",
				"--payload-key",
				"lookup.payload_key",
			),
		};

		let source = self
			.source
			.path
			.context("no option source configured; pass --source or set source.path")?;

		let mut lookup = LookupConfig::default();
		if let Some(key) = self.lookup.payload_key {
			lookup.payload_key = key;
		}
		lookup.extra_payload = self.lookup.extra_payload;
		lookup.filter_field = self.lookup.filter_field.filter(|field| !field.trim().is_empty());
		if let Some(ms) = self.lookup.debounce_ms {
			lookup.debounce_ms = ms;
		}

		let config = ResolvedConfig {
			lookup,
			source,
			latency: Duration::from_millis(self.source.latency_ms.unwrap_or(0)),
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}
