use crate::types::{FieldRef, SelectOption};

/// Case-insensitive substring predicate applied to option fields.
///
/// Without a filter field the predicate inspects `value` and `label`. With
/// one, it inspects only that field, which may hold a string or a record of
/// strings.
#[derive(Debug, Clone)]
pub struct KeywordFilter<'a> {
	needle: String,
	field: Option<&'a str>,
}

impl<'a> KeywordFilter<'a> {
	#[must_use]
	pub fn new(keyword: &str, field: Option<&'a str>) -> Self {
		Self {
			needle: keyword.to_lowercase(),
			field,
		}
	}

	/// Return whether `option` has a candidate string containing the keyword.
	#[must_use]
	pub fn matches(&self, option: &SelectOption) -> bool {
		let mut hit = |text: &str| text.to_lowercase().contains(&self.needle);
		match self.field {
			Some(name) => option
				.field(name)
				.is_some_and(|field| field.any_str(&mut hit)),
			None => {
				FieldRef::Json(&option.value).any_str(&mut hit)
					|| option.label.as_deref().is_some_and(&mut hit)
			}
		}
	}

	/// Collect the matching options, preserving input order.
	pub fn apply<'o>(&self, options: impl IntoIterator<Item = &'o SelectOption>) -> Vec<SelectOption> {
		options
			.into_iter()
			.filter(|option| self.matches(option))
			.cloned()
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn fruit() -> Vec<SelectOption> {
		vec![
			SelectOption::new(1, "Apple"),
			SelectOption::new(2, "Banana"),
			SelectOption::new("grape-id", "Vine fruit"),
		]
	}

	#[test]
	fn matches_label_ignoring_case() {
		let found = KeywordFilter::new("AP", None).apply(&fruit());
		assert_eq!(found, vec![SelectOption::new(1, "Apple")]);
	}

	#[test]
	fn matches_string_values() {
		let found = KeywordFilter::new("grape", None).apply(&fruit());
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].sort_label(), "Vine fruit");
	}

	#[test]
	fn numeric_values_are_not_searched() {
		assert!(KeywordFilter::new("2", None).apply(&fruit()).is_empty());
	}

	#[test]
	fn filter_field_inspects_nested_record() {
		let options = vec![
			SelectOption::new(1, "One").with_field("meta", json!({ "code": "ABC", "rank": 1 })),
			SelectOption::new(2, "Two").with_field("meta", json!({ "code": "XYZ" })),
			SelectOption::new(3, "abc label"),
		];

		let found = KeywordFilter::new("abc", Some("meta")).apply(&options);
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].value, json!(1));
	}

	#[test]
	fn filter_field_accepts_plain_strings() {
		let options = vec![SelectOption::new(1, "One").with_field("alias", "uno")];
		assert_eq!(KeywordFilter::new("UN", Some("alias")).apply(&options).len(), 1);
	}

	#[test]
	fn empty_keyword_matches_everything_with_text() {
		assert_eq!(KeywordFilter::new("", None).apply(&fruit()).len(), 3);
	}
}
