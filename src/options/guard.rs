/// Remembers a keyword for which the fetcher returned nothing.
///
/// Any keyword extending the remembered one is assumed to be empty as well,
/// so remote calls for it are skipped. This only holds for sources doing
/// substring or prefix matching; fuzzy or ranked sources can produce false
/// negatives under this rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipGuard {
	keyword: String,
}

impl SkipGuard {
	#[must_use]
	pub fn new(keyword: impl Into<String>) -> Self {
		Self {
			keyword: keyword.into(),
		}
	}

	#[must_use]
	pub fn keyword(&self) -> &str {
		&self.keyword
	}

	/// Return whether a remote lookup for `keyword` should be skipped.
	#[must_use]
	pub fn blocks(&self, keyword: &str) -> bool {
		keyword.starts_with(&self.keyword)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blocks_extensions_of_the_keyword() {
		let guard = SkipGuard::new("ab");
		assert!(guard.blocks("ab"));
		assert!(guard.blocks("abc"));
		assert!(!guard.blocks("b"));
		assert!(!guard.blocks("a"));
	}

	#[test]
	fn prefix_match_is_case_sensitive() {
		assert!(!SkipGuard::new("ab").blocks("ABC"));
	}
}
