//! Locate configuration for `selectable`.
//!
//! `SELECTABLE_CONFIG_DIR` overrides the platform location reported by the
//! `directories` crate.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const CONFIG_DIR_ENV: &str = "SELECTABLE_CONFIG_DIR";
const CONFIG_FILE: &str = "config.toml";
const LOCAL_CONFIG_FILES: [&str; 2] = [".selectable.toml", "selectable.toml"];

fn override_dir(value: Option<OsString>) -> Option<PathBuf> {
	value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

/// Return the directory holding the user's `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	if let Some(dir) = override_dir(env::var_os(CONFIG_DIR_ENV)) {
		return Ok(dir);
	}

	ProjectDirs::from("io", "selectable", "selectable")
		.map(|dirs| dirs.config_local_dir().to_path_buf())
		.ok_or_else(|| anyhow!("unable to determine the configuration directory"))
}

/// Configuration files consulted by default, lowest precedence first.
#[must_use]
pub fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = get_config_dir() {
		files.push(dir.join(CONFIG_FILE));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.extend(LOCAL_CONFIG_FILES.iter().map(|name| current_dir.join(name)));
	}

	files
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_override_falls_back() {
		assert_eq!(override_dir(Some(OsString::new())), None);
		assert_eq!(override_dir(None), None);
		assert_eq!(
			override_dir(Some(OsString::from("/etc/selectable"))),
			Some(PathBuf::from("/etc/selectable"))
		);
	}

	#[test]
	fn defaults_include_working_directory_variants() {
		let files = default_config_files();
		assert!(files.iter().any(|path| path.ends_with(".selectable.toml")));
		assert!(files.iter().any(|path| path.ends_with("selectable.toml")));
	}
}
