use clap::ValueEnum;
use serde_json::Value;

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

/// Parse a `KEY=VALUE` pair for the request payload.
///
/// Values that parse as JSON keep their type; anything else is sent as a
/// string.
pub(crate) fn parse_extra_field(raw: &str) -> Result<(String, Value), String> {
	let Some((key, value)) = raw.split_once('=') else {
		return Err(format!("expected KEY=VALUE, got `{raw}`"));
	};
	let key = key.trim();
	if key.is_empty() {
		return Err("payload field name must not be empty".to_string());
	}

	let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
	Ok((key.to_string(), value))
}
