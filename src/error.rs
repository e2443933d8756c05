//! Error types surfaced by fetchers and the lookup coordinator.

use thiserror::Error;

/// Failure reported by an [`OptionFetcher`](crate::OptionFetcher).
#[derive(Debug, Error)]
pub enum FetchError {
	/// The remote source could not be reached or refused the request.
	#[error("transport failure: {0}")]
	Transport(String),

	/// The source answered with data that is not a list of options.
	#[error("failed to decode options: {0}")]
	Decode(#[from] serde_json::Error),

	/// Reading a local option source failed.
	#[error("failed to read options: {0}")]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

/// Errors returned from [`OptionsCoordinator::lookup_now`](crate::OptionsCoordinator::lookup_now).
#[derive(Debug, Error)]
pub enum LookupError {
	#[error("fetch failed: {0}")]
	Fetch(#[from] FetchError),

	/// The coordinator was shut down before or during the lookup.
	#[error("coordinator has been shut down")]
	ShutDown,
}
