//! Request coordination for remote-backed option lists.
//!
//! An [`OptionsCoordinator`] decides per keyword whether cached options are
//! enough, whether a remote call is known to be pointless, or whether a fresh
//! request must go out. Every request carries an epoch; a response is only
//! applied when its epoch is still the latest one, so the most recently
//! issued lookup always wins.

mod config;
mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

pub use config::{DEFAULT_DEBOUNCE_MS, DEFAULT_PAYLOAD_KEY, LookupConfig};
pub use state::{LookupOutcome, LookupState};

use crate::error::{FetchError, LookupError};
use crate::fetch::OptionFetcher;
use crate::options::{KeywordFilter, OptionSet, SkipGuard};
use crate::types::SelectOption;

#[derive(Default)]
struct Control {
	epoch: u64,
	skip_guard: Option<SkipGuard>,
	closed: bool,
}

impl Control {
	fn issue(&mut self) -> u64 {
		self.epoch = self.epoch.wrapping_add(1);
		self.epoch
	}

	fn is_current(&self, epoch: u64) -> bool {
		self.epoch == epoch
	}

	fn guard_blocks(&self, keyword: &str) -> bool {
		self.skip_guard
			.as_ref()
			.is_some_and(|guard| guard.blocks(keyword))
	}
}

enum Step {
	Done(LookupOutcome),
	Fetch {
		epoch: u64,
		fetcher: Arc<dyn OptionFetcher>,
	},
}

/// Debounce timer. `fired` flips once the quiet window has elapsed and the
/// lookup has been handed off.
struct PendingLookup {
	timer: JoinHandle<()>,
	fired: Arc<AtomicBool>,
}

impl PendingLookup {
	fn has_fired(&self) -> bool {
		self.fired.load(Ordering::Acquire)
	}
}

struct Shared {
	config: LookupConfig,
	fetcher: Option<Arc<dyn OptionFetcher>>,
	control: Mutex<Control>,
	state: watch::Sender<LookupState>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shared {
	async fn lookup(&self, keyword: &str) -> Result<LookupOutcome, LookupError> {
		let (epoch, fetcher) = match self.begin(keyword)? {
			Step::Done(outcome) => return Ok(outcome),
			Step::Fetch { epoch, fetcher } => (epoch, fetcher),
		};

		let result = fetcher.fetch(self.config.payload_for(keyword)).await;
		self.finish(keyword, epoch, result)
	}

	fn spawn_lookup(self: &Arc<Self>, keyword: String) -> JoinHandle<()> {
		let shared = Arc::clone(self);
		tokio::spawn(async move {
			if let Err(err) = shared.lookup(&keyword).await {
				debug!(keyword, error = %err, "lookup ended with an error");
			}
		})
	}

	fn filter<'a>(&'a self, keyword: &str) -> KeywordFilter<'a> {
		KeywordFilter::new(keyword, self.config.filter_field.as_deref())
	}

	/// Cached matches for `keyword`, or `None` while nothing has been fetched.
	fn local_matches(&self, keyword: &str) -> Option<Vec<SelectOption>> {
		let state = self.state.borrow();
		if state.options.is_empty() {
			return None;
		}
		Some(self.filter(keyword).apply(&state.options))
	}

	fn begin(&self, keyword: &str) -> Result<Step, LookupError> {
		let mut control = lock(&self.control);
		if control.closed {
			return Err(LookupError::ShutDown);
		}

		if let Some(matches) = self.local_matches(keyword) {
			if !matches.is_empty() {
				let count = matches.len();
				// A local answer supersedes any request still in flight.
				control.issue();
				control.skip_guard = None;
				self.state.send_modify(|state| {
					state.filtered_options = matches;
					state.is_loading = false;
				});
				debug!(keyword, matches = count, "served lookup from cache");
				return Ok(Step::Done(LookupOutcome::LocalHit { matches: count }));
			}

			if control.guard_blocks(keyword) {
				debug!(keyword, "no cached match and keyword is guarded");
				return Ok(Step::Done(LookupOutcome::Skipped));
			}
		}

		self.state.send_modify(|state| state.is_loading = true);
		let epoch = control.issue();

		let fetcher = match &self.fetcher {
			Some(fetcher) if !control.guard_blocks(keyword) => Arc::clone(fetcher),
			_ => {
				self.state.send_modify(|state| state.is_loading = false);
				debug!(keyword, epoch, "remote lookup skipped");
				return Ok(Step::Done(LookupOutcome::Skipped));
			}
		};

		trace!(keyword, epoch, "issuing remote lookup");
		Ok(Step::Fetch { epoch, fetcher })
	}

	fn finish(
		&self,
		keyword: &str,
		epoch: u64,
		result: Result<Vec<SelectOption>, FetchError>,
	) -> Result<LookupOutcome, LookupError> {
		let mut control = lock(&self.control);
		if control.closed {
			return Err(LookupError::ShutDown);
		}
		if !control.is_current(epoch) {
			debug!(keyword, epoch, latest = control.epoch, "discarding stale response");
			return Ok(LookupOutcome::Stale);
		}

		let received = match result {
			Ok(received) => received,
			Err(err) => {
				warn!(keyword, error = %err, "option fetch failed");
				self.state.send_modify(|state| state.is_loading = false);
				return Err(err.into());
			}
		};

		if received.is_empty() {
			control.skip_guard = Some(SkipGuard::new(keyword));
			self.state.send_modify(|state| {
				state.filtered_options.clear();
				state.is_loading = false;
			});
			debug!(keyword, "remote source returned nothing");
			return Ok(LookupOutcome::Empty);
		}

		control.skip_guard = None;
		let filter = self.filter(keyword);
		let count = received.len();
		let mut matches = 0;
		self.state.send_modify(|state| {
			let from_response = self
				.config
				.filter_field
				.is_some()
				.then(|| filter.apply(&received));
			state.options.merge(received);
			state.filtered_options = from_response.unwrap_or_else(|| filter.apply(&state.options));
			state.is_loading = false;
			matches = state.filtered_options.len();
		});
		trace!(keyword, epoch, received = count, matches, "applied remote response");

		Ok(LookupOutcome::Fetched {
			received: count,
			matches,
		})
	}
}

/// Keyword-driven option lookup with caching, debouncing and stale-response
/// discard.
///
/// Lookups are spawned on the ambient tokio runtime. Dropping the coordinator
/// shuts it down: pending debounce timers are cancelled and responses still in
/// flight are ignored.
pub struct OptionsCoordinator {
	shared: Arc<Shared>,
	pending: Mutex<Option<PendingLookup>>,
}

impl OptionsCoordinator {
	/// Create a coordinator without a remote source. Lookups only ever see
	/// the (empty) cache.
	#[must_use]
	pub fn new(config: LookupConfig) -> Self {
		Self::from_parts(config, None)
	}

	/// Create a coordinator backed by `fetcher`.
	#[must_use]
	pub fn with_fetcher<F>(config: LookupConfig, fetcher: F) -> Self
	where
		F: OptionFetcher + 'static,
	{
		Self::from_parts(config, Some(Arc::new(fetcher)))
	}

	#[must_use]
	pub fn from_parts(config: LookupConfig, fetcher: Option<Arc<dyn OptionFetcher>>) -> Self {
		let (state, _) = watch::channel(LookupState::default());
		Self {
			shared: Arc::new(Shared {
				config,
				fetcher,
				control: Mutex::new(Control::default()),
				state,
			}),
			pending: Mutex::new(None),
		}
	}

	#[must_use]
	pub fn config(&self) -> &LookupConfig {
		&self.shared.config
	}

	/// Run a lookup for `keyword` to completion and report what it did.
	///
	/// # Errors
	///
	/// Returns [`LookupError::Fetch`] when the fetcher fails for the latest
	/// request, and [`LookupError::ShutDown`] once the coordinator is shut down.
	pub async fn lookup_now(&self, keyword: &str) -> Result<LookupOutcome, LookupError> {
		self.shared.lookup(keyword).await
	}

	/// Start a lookup for `keyword` in the background.
	///
	/// # Panics
	///
	/// Panics when called outside a tokio runtime.
	pub fn lookup(&self, keyword: impl Into<String>) -> JoinHandle<()> {
		self.shared.spawn_lookup(keyword.into())
	}

	/// Schedule a lookup once input has been quiet for the configured
	/// debounce window. Each call restarts the window and replaces the keyword.
	///
	/// # Panics
	///
	/// Panics when called outside a tokio runtime.
	pub fn debounced_lookup(&self, keyword: impl Into<String>) {
		if self.is_shut_down() {
			return;
		}

		let keyword = keyword.into();
		let shared = Arc::clone(&self.shared);
		let delay = shared.config.debounce();

		let fired = Arc::new(AtomicBool::new(false));
		let flag = Arc::clone(&fired);

		let mut pending = lock(&self.pending);
		if let Some(previous) = pending.take() {
			previous.timer.abort();
		}
		*pending = Some(PendingLookup {
			timer: tokio::spawn(async move {
				tokio::time::sleep(delay).await;
				flag.store(true, Ordering::Release);
				// Resetting the timer must not cancel a lookup that already started.
				let _ = shared.spawn_lookup(keyword).await;
			}),
			fired,
		});
	}

	/// Cancel the pending debounced lookup if its quiet window is still
	/// running. Returns `false` when there was nothing left to cancel; a
	/// lookup that already fired keeps running and `settle` still awaits it.
	pub fn cancel_pending(&self) -> bool {
		let mut pending = lock(&self.pending);
		match pending.take() {
			Some(waiting) if !waiting.has_fired() => {
				waiting.timer.abort();
				true
			}
			fired => {
				*pending = fired;
				false
			}
		}
	}

	/// Wait for the pending debounced lookup to fire and complete.
	pub async fn settle(&self) {
		let pending = lock(&self.pending).take();
		if let Some(pending) = pending {
			let _ = pending.timer.await;
		}
	}

	/// Stop accepting lookups and ignore any response still in flight.
	pub fn shutdown(&self) {
		self.cancel_pending();

		let mut control = lock(&self.shared.control);
		if control.closed {
			return;
		}
		control.closed = true;
		control.issue();
		self.shared
			.state
			.send_if_modified(|state| std::mem::replace(&mut state.is_loading, false));
		debug!("options coordinator shut down");
	}

	#[must_use]
	pub fn is_shut_down(&self) -> bool {
		lock(&self.shared.control).closed
	}

	/// Subscribe to state changes. The receiver always holds the latest snapshot.
	#[must_use]
	pub fn subscribe(&self) -> watch::Receiver<LookupState> {
		self.shared.state.subscribe()
	}

	#[must_use]
	pub fn state(&self) -> LookupState {
		self.shared.state.borrow().clone()
	}

	#[must_use]
	pub fn options(&self) -> OptionSet {
		self.shared.state.borrow().options.clone()
	}

	#[must_use]
	pub fn filtered_options(&self) -> Vec<SelectOption> {
		self.shared.state.borrow().filtered_options.clone()
	}

	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.shared.state.borrow().is_loading
	}

	/// The keyword currently suppressing remote calls, if any.
	#[must_use]
	pub fn skip_guard(&self) -> Option<SkipGuard> {
		lock(&self.shared.control).skip_guard.clone()
	}
}

impl Drop for OptionsCoordinator {
	fn drop(&mut self) {
		self.shutdown();
	}
}
