//! Tracing subscriber setup for the `selectable` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the embedding application.

use tracing_subscriber::EnvFilter;

/// Install a formatted stderr subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` selects between info,
/// debug and trace output for this crate. Calling this more than once is a
/// no-op.
pub fn initialize(verbosity: u8) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}

fn default_directives(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "selectable=info,warn",
		1 => "selectable=debug,info",
		_ => "selectable=trace,debug",
	}
}
