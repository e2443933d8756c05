mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{CliArgs, OutputFormat, parse_cli, print_json, print_plain};
use selectable::logging;
use settings::ResolvedConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use workflow::LookupWorkflow;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(cli.verbose);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let keywords = collect_keywords(&cli).await?;
	run_lookups(&cli, resolved, keywords).await
}

/// Keywords from the command line, or one per stdin line when none were given.
async fn collect_keywords(cli: &CliArgs) -> Result<Vec<String>> {
	if !cli.keywords.is_empty() {
		return Ok(cli.keywords.clone());
	}

	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	let mut keywords = Vec::new();
	while let Some(line) = lines.next_line().await? {
		keywords.push(line.trim_end_matches('\r').to_string());
	}
	Ok(keywords)
}

/// Execute the lookups and print output in the chosen format.
async fn run_lookups(cli: &CliArgs, settings: ResolvedConfig, keywords: Vec<String>) -> Result<()> {
	let workflow = LookupWorkflow::from_config(settings, cli.debounced)?;
	let reports = workflow.run(keywords).await?;

	match cli.output {
		OutputFormat::Plain => print_plain(&reports),
		OutputFormat::Json => print_json(&workflow.state())?,
	}

	Ok(())
}
