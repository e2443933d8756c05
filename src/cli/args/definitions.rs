use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{OutputFormat, parse_extra_field};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `selectable` binary.
#[derive(Parser, Debug)]
#[command(
	name = "selectable",
	version,
	long_version = long_version(),
	about = "Replay keyword lookups against an option source",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "SELECTABLE_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 's',
		long = "source",
		value_name = "FILE",
		help = "JSON file holding the array of options to serve (default: source.path)"
	)]
	pub(crate) source: Option<PathBuf>,
	#[arg(
		long = "latency-ms",
		value_name = "MS",
		help = "Artificial delay added to every fetch (default: 0)"
	)]
	pub(crate) latency_ms: Option<u64>,
	#[arg(
		short = 'k',
		long = "payload-key",
		value_name = "KEY",
		help = "Field carrying the keyword in map payloads (default: keyword)"
	)]
	pub(crate) payload_key: Option<String>,
	#[arg(
		short = 'e',
		long = "extra",
		value_name = "KEY=VALUE",
		value_parser = parse_extra_field,
		action = ArgAction::Append,
		help = "Extra payload field; VALUE is parsed as JSON when possible (default: none)"
	)]
	pub(crate) extra: Vec<(String, serde_json::Value)>,
	#[arg(
		short = 'f',
		long = "filter-field",
		value_name = "FIELD",
		help = "Filter on a single option field instead of value and label (default: none)"
	)]
	pub(crate) filter_field: Option<String>,
	#[arg(
		short = 'd',
		long = "debounce-ms",
		value_name = "MS",
		help = "Debounce window for --debounced (default: 500)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		short = 'D',
		long = "debounced",
		help = "Feed keywords through the debounced entry point (default: disabled)"
	)]
	pub(crate) debounced: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		help = "Increase log verbosity; repeat for trace output"
	)]
	pub(crate) verbose: u8,
	#[arg(
		value_name = "KEYWORD",
		help = "Keywords to look up in order (default: read lines from stdin)"
	)]
	pub(crate) keywords: Vec<String>,
}
