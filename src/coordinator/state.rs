use serde::Serialize;

use crate::options::OptionSet;
use crate::types::SelectOption;

/// Snapshot of everything a presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LookupState {
	/// Every option fetched so far, deduplicated and sorted by label.
	pub options: OptionSet,
	/// Options matching the most recently applied keyword.
	pub filtered_options: Vec<SelectOption>,
	/// Whether the latest remote request is still outstanding.
	pub is_loading: bool,
}

/// What a single lookup ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
	/// Cached options matched; no remote call was made.
	LocalHit { matches: usize },
	/// The fetcher returned options which were merged into the cache.
	Fetched { received: usize, matches: usize },
	/// The fetcher returned nothing; the keyword now guards its extensions.
	Empty,
	/// No remote call was made, either because no fetcher is configured or
	/// because an earlier empty keyword covers this one.
	Skipped,
	/// A newer lookup was issued while this one was in flight.
	Stale,
}
