use clap::{CommandFactory, Parser};
use serde_json::json;

use super::options::parse_extra_field;
use super::{CliArgs, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn defaults_to_plain_output_without_keywords() {
	let parsed = CliArgs::parse_from(["selectable"]);
	assert_eq!(parsed.output, OutputFormat::Plain);
	assert!(parsed.keywords.is_empty());
	assert!(!parsed.debounced);
	assert_eq!(parsed.verbose, 0);
}

#[test]
fn collects_keywords_and_repeated_flags() {
	let parsed = CliArgs::parse_from([
		"selectable",
		"-vv",
		"--extra",
		"tenant=acme",
		"--extra",
		"limit=20",
		"ap",
		"app",
	]);
	assert_eq!(parsed.verbose, 2);
	assert_eq!(parsed.keywords, vec!["ap", "app"]);
	assert_eq!(
		parsed.extra,
		vec![("tenant".to_string(), json!("acme")), ("limit".to_string(), json!(20))]
	);
}

#[test]
fn extra_field_requires_separator() {
	assert!(parse_extra_field("tenant").is_err());
	assert!(parse_extra_field("=x").is_err());
	assert_eq!(parse_extra_field("flag=true").unwrap().1, json!(true));
}
