//! Predicate set: free-text search plus per-field filters, combined by AND.
//!
//! Raw filter values are plain strings (CLI flags, query parameters,
//! dropdown selections). They are coerced to the field's declared kind in
//! one place, [`FieldSpec::coerce_filter`](crate::fields::FieldSpec::coerce_filter),
//! right before comparison.

use crate::record::Record;
use std::collections::BTreeMap;

/// One field filter: either no constraint, or a raw value to match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterChoice {
    /// Predicate always true
    #[default]
    All,
    Value(String),
}

impl FilterChoice {
    /// Read a dropdown-style selection: blank or "all" (any case) means no
    /// constraint.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            FilterChoice::All
        } else {
            FilterChoice::Value(trimmed.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_text: String,
    pub field_filters: BTreeMap<String, FilterChoice>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, raw: &str) -> Self {
        self.set_filter(field, FilterChoice::parse(raw));
        self
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn set_filter(&mut self, field: impl Into<String>, choice: FilterChoice) {
        self.field_filters.insert(field.into(), choice);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether this state lets every record through.
    pub fn is_identity(&self) -> bool {
        self.search_text.trim().is_empty()
            && self
                .field_filters
                .values()
                .all(|choice| *choice == FilterChoice::All)
    }

    /// Field filters that constrain something.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.field_filters
            .iter()
            .filter_map(|(field, choice)| match choice {
                FilterChoice::All => None,
                FilterChoice::Value(raw) => Some((field.as_str(), raw.as_str())),
            })
    }
}

/// Whether `record` passes the search and every field filter.
pub fn matches<R: Record>(record: &R, filter: &FilterState) -> bool {
    matches_search(record, &filter.search_text)
        && filter
            .active_filters()
            .all(|(field, raw)| matches_field(record, field, raw))
}

fn matches_search<R: Record>(record: &R, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    R::config().searchable().any(|spec| {
        record
            .get_field(spec.name)
            .map(|value| value.to_form_string().to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}

fn matches_field<R: Record>(record: &R, field: &str, raw: &str) -> bool {
    let Some(spec) = R::config().field(field) else {
        return false;
    };
    let Some(wanted) = spec.coerce_filter(raw) else {
        return false;
    };
    record
        .get_field(field)
        .map(|value| value.satisfies(&wanted))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{demo, Application, InternshipPost};

    fn matching_ids<R: Record>(records: &[R], filter: &FilterState) -> Vec<u64> {
        records
            .iter()
            .filter(|r| matches(*r, filter))
            .map(Record::id)
            .collect()
    }

    #[test]
    fn identity_filter_matches_everything() {
        let apps = demo::applications();
        let filter = FilterState::new()
            .with_filter("status", "all")
            .with_filter("company", "All")
            .with_search("   ");
        assert!(filter.is_identity());
        assert_eq!(matching_ids(&apps, &filter), vec![1, 2, 3, 4]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let apps = demo::applications();
        let filter = FilterState::new().with_search("ahmed");
        assert_eq!(matching_ids(&apps, &filter), vec![1]);

        let filter = FilterState::new().with_search("INSTA");
        assert_eq!(matching_ids(&apps, &filter), vec![1, 4]);
    }

    #[test]
    fn status_filter_is_coerced_to_canonical_spelling() {
        let apps = demo::applications();
        let filter = FilterState::new().with_filter("status", "pending");
        assert_eq!(matching_ids(&apps, &filter), vec![1]);
    }

    #[test]
    fn numeric_filter_from_string() {
        let apps = demo::applications();
        let filter = FilterState::new().with_filter("postId", "1");
        assert_eq!(matching_ids(&apps, &filter), vec![1, 4]);

        let filter = FilterState::new().with_filter("postId", "one");
        assert!(matching_ids(&apps, &filter).is_empty());
    }

    #[test]
    fn list_filter_uses_contains() {
        let apps = demo::applications();
        let filter = FilterState::new().with_filter("skills", "Rust");
        assert_eq!(matching_ids(&apps, &filter), vec![3]);
    }

    #[test]
    fn bool_filter() {
        let posts = demo::posts();
        let filter = FilterState::new().with_filter("paid", "yes");
        assert_eq!(matching_ids(&posts, &filter), vec![1, 3]);
    }

    #[test]
    fn unknown_field_matches_nothing() {
        let apps = demo::applications();
        let filter = FilterState::new().with_filter("favouriteColour", "blue");
        assert!(matching_ids(&apps, &filter).is_empty());
    }

    #[test]
    fn absent_optional_value_fails_a_filter() {
        let students = demo::students();
        let filter = FilterState::new().with_filter("gpa", "3.4");
        assert_eq!(matching_ids(&students, &filter), vec![1]);
    }

    #[test]
    fn search_and_filters_combine_by_and() {
        let apps = demo::applications();
        let filter = FilterState::new()
            .with_search("frontend")
            .with_filter("status", "Rejected");
        assert_eq!(matching_ids(&apps, &filter), vec![4]);
    }

    #[test]
    fn search_looks_only_at_searchable_fields() {
        let mut post = InternshipPost::template();
        post.duration = "unique-duration".into();
        let filter = FilterState::new().with_search("unique-duration");
        assert!(!matches(&post, &filter));

        let app = Application::template();
        assert!(matches(&app, &FilterState::new()));
    }
}
