//! Keyword-driven option lookups backed by a remote source.
//!
//! The crate centres on [`OptionsCoordinator`], which caches fetched options,
//! filters them locally where it can, skips remote calls known to come back
//! empty, and guarantees that only the latest request updates visible state.
//! Fetchers plug in through the [`OptionFetcher`] trait.

pub mod app_dirs;
pub mod coordinator;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod options;
pub mod types;

pub use coordinator::{LookupConfig, LookupOutcome, LookupState, OptionsCoordinator};
pub use error::{FetchError, LookupError};
pub use fetch::{FetchPayload, FnFetcher, OptionFetcher, StaticFetcher, fetcher_fn};
pub use options::{KeywordFilter, OptionSet, SkipGuard};
pub use types::{OptionKey, SelectOption};
