use anyhow::{Context, Result};

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Load lookup settings from config files, `SELECTABLE__*` variables and CLI
/// flags, then validate them.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let mut raw: RawConfig = build_config(cli)?
		.try_deserialize()
		.with_context(|| format!("invalid lookup settings in {}", describe_origins(cli)))?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli)
}

fn describe_origins(cli: &CliArgs) -> String {
	if cli.config.is_empty() {
		return "default config files or environment".to_string();
	}
	let files: Vec<String> = cli
		.config
		.iter()
		.map(|path| path.display().to_string())
		.collect();
	files.join(", ")
}
