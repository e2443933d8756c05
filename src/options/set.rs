use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::types::{OptionKey, SelectOption};

/// Deduplicated, label-sorted collection of every option fetched so far.
///
/// Merges only ever add or overwrite entries; nothing is removed, so the set
/// grows monotonically over the lifetime of a coordinator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OptionSet {
	entries: Vec<SelectOption>,
}

impl OptionSet {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a set from an arbitrary sequence of options.
	#[must_use]
	pub fn from_options(options: impl IntoIterator<Item = SelectOption>) -> Self {
		let mut set = Self::new();
		set.merge(options);
		set
	}

	/// Merge `incoming` into the set.
	///
	/// Entries are keyed by `value`; an incoming entry replaces any existing
	/// one with the same key. Entries without a value are dropped. Returns the
	/// number of entries accepted.
	pub fn merge(&mut self, incoming: impl IntoIterator<Item = SelectOption>) -> usize {
		let mut by_key: IndexMap<OptionKey, SelectOption> = self
			.entries
			.drain(..)
			.filter_map(|option| option.key().map(|key| (key, option)))
			.collect();

		let mut accepted = 0;
		let mut dropped = 0;
		for option in incoming {
			match option.key() {
				Some(key) => {
					by_key.insert(key, option);
					accepted += 1;
				}
				None => dropped += 1,
			}
		}
		if dropped > 0 {
			warn!(dropped, "ignoring options without a value");
		}

		self.entries = by_key.into_values().collect();
		self.entries
			.sort_by_cached_key(|option| LabelKey::new(option.sort_label()));
		accepted
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
		self.entries.iter()
	}

	#[must_use]
	pub fn as_slice(&self) -> &[SelectOption] {
		&self.entries
	}

	/// Return the option stored under `key`, if any.
	#[must_use]
	pub fn get(&self, key: &OptionKey) -> Option<&SelectOption> {
		self.entries
			.iter()
			.find(|option| option.key().as_ref() == Some(key))
	}
}

impl<'a> IntoIterator for &'a OptionSet {
	type Item = &'a SelectOption;
	type IntoIter = std::slice::Iter<'a, SelectOption>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

/// Collation key for option labels.
///
/// Compared field by field: base letters with accents and case folded away,
/// then the accented lowercase form, then the raw label. "Éclair" therefore
/// sorts among the E's, after a plain "eclair".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LabelKey {
	base: String,
	accented: String,
	raw: String,
}

impl LabelKey {
	#[must_use]
	pub fn new(label: &str) -> Self {
		let accented: String = label.nfkd().flat_map(char::to_lowercase).collect();
		let base = accented.chars().filter(|c| !is_combining_mark(*c)).collect();
		Self {
			base,
			accented,
			raw: label.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn labels(set: &OptionSet) -> Vec<&str> {
		set.iter().map(SelectOption::sort_label).collect()
	}

	#[test]
	fn later_duplicates_win() {
		let mut set = OptionSet::from_options([
			SelectOption::new(1, "Apple"),
			SelectOption::new(2, "Banana"),
		]);
		set.merge([SelectOption::new(1, "Apricot").with_field("fresh", true)]);

		assert_eq!(set.len(), 2);
		let apple = set.get(&SelectOption::new(1, "").key().unwrap()).unwrap();
		assert_eq!(apple.sort_label(), "Apricot");
		assert_eq!(apple.extra["fresh"], json!(true));
	}

	#[test]
	fn duplicates_within_one_batch_keep_the_last() {
		let set = OptionSet::from_options([
			SelectOption::new("a", "First"),
			SelectOption::new("a", "Second"),
		]);
		assert_eq!(labels(&set), vec!["Second"]);
	}

	#[test]
	fn sorted_case_insensitively() {
		let set = OptionSet::from_options([
			SelectOption::new(1, "banana"),
			SelectOption::new(2, "Cherry"),
			SelectOption::new(3, "apple"),
			SelectOption::new(4, "Banana"),
		]);
		assert_eq!(labels(&set), vec!["apple", "Banana", "banana", "Cherry"]);
	}

	#[test]
	fn accented_labels_sort_with_their_base_letter() {
		let set = OptionSet::from_options([
			SelectOption::new(1, "Zucchini"),
			SelectOption::new(2, "Éclair"),
			SelectOption::new(3, "Date"),
			SelectOption::new(4, "eclair"),
			SelectOption::new(5, "Ångström"),
		]);
		assert_eq!(
			labels(&set),
			vec!["Ångström", "Date", "eclair", "Éclair", "Zucchini"]
		);
	}

	#[test]
	fn label_keys_fold_case_and_width() {
		assert_eq!(LabelKey::new("ＡＢＣ").base, "abc");
		assert!(LabelKey::new("über") < LabelKey::new("Zebra"));
		assert!(LabelKey::new("eclair") < LabelKey::new("Éclair"));
	}

	#[test]
	fn merge_never_shrinks() {
		let mut set = OptionSet::from_options([SelectOption::new(1, "One")]);
		set.merge([SelectOption::new(2, "Two")]);
		set.merge(Vec::new());
		assert_eq!(set.len(), 2);
	}

	#[test]
	fn missing_labels_sort_first_and_valueless_entries_are_dropped() {
		let unlabeled: SelectOption = serde_json::from_value(json!({ "value": 9 })).unwrap();
		let valueless: SelectOption = serde_json::from_value(json!({ "label": "ghost" })).unwrap();
		let mut set = OptionSet::from_options([SelectOption::new(1, "Alpha")]);
		let accepted = set.merge([unlabeled, valueless]);

		assert_eq!(accepted, 1);
		assert_eq!(labels(&set), vec!["", "Alpha"]);
	}
}
