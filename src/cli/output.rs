use anyhow::Result;
use selectable::{LookupOutcome, LookupState, SelectOption};
use serde_json::Value;

/// Result of replaying one keyword through the coordinator.
#[derive(Debug, Clone)]
pub(crate) struct KeywordReport {
	pub(crate) keyword: String,
	/// `None` when the keyword was routed through the debounced entry point.
	pub(crate) outcome: Option<LookupOutcome>,
	pub(crate) filtered: Vec<SelectOption>,
}

fn describe(outcome: Option<LookupOutcome>) -> String {
	match outcome {
		None => "debounced".to_string(),
		Some(LookupOutcome::LocalHit { matches }) => format!("cached, {matches} matches"),
		Some(LookupOutcome::Fetched { received, matches }) => {
			format!("fetched {received}, {matches} matches")
		}
		Some(LookupOutcome::Empty) => "no results".to_string(),
		Some(LookupOutcome::Skipped) => "skipped".to_string(),
		Some(LookupOutcome::Stale) => "superseded".to_string(),
	}
}

fn display_value(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

pub(crate) fn format_plain(reports: &[KeywordReport]) -> String {
	let mut out = String::new();
	for report in reports {
		out.push_str(&format!("# {} ({})\n", report.keyword, describe(report.outcome)));
		for option in &report.filtered {
			out.push_str(&format!("{}\t{}\n", display_value(&option.value), option.sort_label()));
		}
	}
	out
}

/// Print each keyword followed by its filtered options.
pub(crate) fn print_plain(reports: &[KeywordReport]) {
	print!("{}", format_plain(reports));
}

/// Format the final coordinator state as a JSON string.
pub(crate) fn format_state_json(state: &LookupState) -> Result<String> {
	Ok(serde_json::to_string_pretty(state)?)
}

/// Print the final coordinator state as JSON.
pub(crate) fn print_json(state: &LookupState) -> Result<()> {
	println!("{}", format_state_json(state)?);
	Ok(())
}
