//! Remote option sources.
//!
//! The coordinator never talks to a transport directly; it hands a
//! [`FetchPayload`] to an injected [`OptionFetcher`] and merges whatever comes
//! back. Closures can be adapted with [`fetcher_fn`], and [`StaticFetcher`]
//! serves a fixed list from memory.

mod static_source;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

pub use static_source::StaticFetcher;

use crate::error::FetchError;
use crate::types::SelectOption;

/// Request sent to a fetcher for a single keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FetchPayload {
	/// The bare keyword, used when no extra payload is configured.
	Keyword(String),
	/// The keyword under the configured payload key plus any extra fields.
	Fields(Map<String, Value>),
}

impl FetchPayload {
	/// Extract the keyword, looking under `payload_key` for field payloads.
	#[must_use]
	pub fn keyword<'a>(&'a self, payload_key: &str) -> Option<&'a str> {
		match self {
			FetchPayload::Keyword(keyword) => Some(keyword),
			FetchPayload::Fields(fields) => fields.get(payload_key).and_then(Value::as_str),
		}
	}
}

/// Capability to retrieve options for a payload.
#[async_trait]
pub trait OptionFetcher: Send + Sync {
	async fn fetch(&self, payload: FetchPayload) -> Result<Vec<SelectOption>, FetchError>;
}

#[async_trait]
impl<T> OptionFetcher for Arc<T>
where
	T: OptionFetcher + ?Sized,
{
	async fn fetch(&self, payload: FetchPayload) -> Result<Vec<SelectOption>, FetchError> {
		(**self).fetch(payload).await
	}
}

/// Fetcher backed by an async closure. Build one with [`fetcher_fn`].
pub struct FnFetcher<F> {
	fetch: F,
}

/// Adapt an async closure into an [`OptionFetcher`].
pub fn fetcher_fn<F, Fut>(fetch: F) -> FnFetcher<F>
where
	F: Fn(FetchPayload) -> Fut + Send + Sync,
	Fut: Future<Output = Result<Vec<SelectOption>, FetchError>> + Send + 'static,
{
	FnFetcher { fetch }
}

#[async_trait]
impl<F, Fut> OptionFetcher for FnFetcher<F>
where
	F: Fn(FetchPayload) -> Fut + Send + Sync,
	Fut: Future<Output = Result<Vec<SelectOption>, FetchError>> + Send + 'static,
{
	async fn fetch(&self, payload: FetchPayload) -> Result<Vec<SelectOption>, FetchError> {
		(self.fetch)(payload).await
	}
}
