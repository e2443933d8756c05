use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File};
use selectable::app_dirs;

use crate::cli::CliArgs;

/// Build a [`Config`] instance by combining default locations with CLI overrides.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in app_dirs::default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		Environment::with_prefix("selectable")
			.separator("__")
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use clap::Parser;

	use super::*;

	#[test]
	fn explicit_files_are_merged() {
		let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
		writeln!(file, "[lookup]\npayload_key = \"q\"\ndebounce_ms = 250").unwrap();

		let cli = CliArgs::parse_from([
			"selectable",
			"--no-config",
			"--config",
			file.path().to_str().unwrap(),
		]);
		let config = build_config(&cli).unwrap();

		assert_eq!(config.get_string("lookup.payload_key").unwrap(), "q");
		assert_eq!(config.get_int("lookup.debounce_ms").unwrap(), 250);
	}

	#[test]
	fn missing_explicit_file_is_an_error() {
		let cli = CliArgs::parse_from([
			"selectable",
			"--no-config",
			"--config",
			"/nonexistent/selectable-test.toml",
		]);
		assert!(build_config(&cli).is_err());
	}
}
