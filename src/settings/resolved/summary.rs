use std::fmt::Write;

use super::ResolvedConfig;

pub(super) fn render_summary(config: &ResolvedConfig) -> String {
	let lookup = &config.lookup;
	let mut out = String::from("Effective configuration:\n");
	let _ = writeln!(out, "  Source: {}", config.source.display());
	let _ = writeln!(out, "  Latency: {} ms", config.latency.as_millis());
	let _ = writeln!(out, "  Payload key: {}", lookup.payload_key);
	match &lookup.extra_payload {
		Some(extra) if !extra.is_empty() => {
			let fields: Vec<&str> = extra.keys().map(String::as_str).collect();
			let _ = writeln!(out, "  Extra payload: {}", fields.join(", "));
		}
		_ => {
			let _ = writeln!(out, "  Extra payload: (none, keyword sent bare)");
		}
	}
	let _ = writeln!(
		out,
		"  Filter field: {}",
		lookup.filter_field.as_deref().unwrap_or("(value and label)")
	);
	let _ = writeln!(out, "  Debounce: {} ms", lookup.debounce_ms);
	out
}
