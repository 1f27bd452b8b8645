//! The pure filtering step.
//!
//! Given the same items, fields, query and minimum length, these functions
//! always return the same result. [`FilterEngine`](crate::FilterEngine)
//! calls them with its settled query; the CLI's one-shot search calls them
//! directly.
//!
//! # Rules
//!
//! - A query whose trimmed length (in characters) is below `min_chars` is
//!   inactive, and every item is returned in its original order.
//! - Otherwise the trimmed, lowercased query is the search term. An item
//!   survives if any listed field contains the term; list fields match when
//!   any element does.
//! - Surviving items keep their relative order.

use crate::field::Searchable;

/// Whether `query` is long enough to filter on.
pub fn is_active_query(query: &str, min_chars: usize) -> bool {
    query.trim().chars().count() >= min_chars
}

/// Normalize a raw query into the term that field values are compared to.
pub fn search_term(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether `item` has at least one field in `fields` containing `term`.
///
/// `term` must already be normalized with [`search_term`].
pub fn item_matches<T, S>(item: &T, fields: &[S], term: &str) -> bool
where
    T: Searchable + ?Sized,
    S: AsRef<str>,
{
    fields.iter().any(|name| {
        item.field(name.as_ref())
            .is_some_and(|value| value.contains_folded(term))
    })
}

/// Indices of the items that survive `query`, in ascending order.
pub fn matching_indices<T, S>(items: &[T], fields: &[S], query: &str, min_chars: usize) -> Vec<usize>
where
    T: Searchable,
    S: AsRef<str>,
{
    if !is_active_query(query, min_chars) {
        return (0..items.len()).collect();
    }

    let term = search_term(query);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item_matches(*item, fields, &term))
        .map(|(idx, _)| idx)
        .collect()
}

/// The items that survive `query`, borrowed from `items` in their original order.
pub fn filter_items<'a, T, S>(items: &'a [T], fields: &[S], query: &str, min_chars: usize) -> Vec<&'a T>
where
    T: Searchable,
    S: AsRef<str>,
{
    matching_indices(items, fields, query, min_chars)
        .into_iter()
        .map(|idx| &items[idx])
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;
    use proptest::prelude::*;
    use serde_json::{Value, json};

    fn guides() -> Vec<Value> {
        vec![
            json!({ "title": "Endomidface Guide" }),
            json!({ "title": "Browlift Basics" }),
        ]
    }

    fn tagged() -> Vec<Value> {
        vec![
            json!({ "tags": ["Surgery", "Face"] }),
            json!({ "tags": ["Recovery"] }),
        ]
    }

    #[test]
    fn test_is_active_query() {
        assert!(!is_active_query("", 2));
        assert!(!is_active_query("e", 2));
        assert!(!is_active_query("  e  ", 2));
        assert!(is_active_query("en", 2));
        assert!(is_active_query("", 0));
    }

    #[test]
    fn test_is_active_query_counts_characters_not_bytes() {
        // Two characters, four bytes.
        assert!(!is_active_query("çã", 3));
        assert!(is_active_query("çã", 2));
    }

    #[test]
    fn test_search_term_trims_and_lowercases() {
        assert_eq!(search_term("  EndoMid "), "endomid");
    }

    #[test]
    fn test_substring_case_insensitive() {
        let items = guides();
        let found = filter_items(&items, &["title"], "endo", 2);
        assert_eq!(found, vec![&items[0]]);
    }

    #[test]
    fn test_array_field_match() {
        let items = tagged();
        let found = filter_items(&items, &["tags"], "face", 2);
        assert_eq!(found, vec![&items[0]]);
    }

    #[test]
    fn test_query_is_trimmed_before_matching() {
        let items = guides();
        let found = filter_items(&items, &["title"], "   BASICS  ", 2);
        assert_eq!(found, vec![&items[1]]);
    }

    #[test]
    fn test_below_min_chars_returns_everything() {
        let items = guides();
        let found = filter_items(&items, &["title"], "z", 2);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let items = guides();
        assert!(filter_items(&items, &["title"], "rinoplastia", 2).is_empty());
    }

    #[test]
    fn test_any_listed_field_can_match() {
        let items = vec![
            json!({ "title": "Recovery week one", "tags": ["Lifting"] }),
            json!({ "title": "Lifting explained", "tags": ["Face"] }),
            json!({ "title": "Clinic news", "tags": [] }),
        ];
        assert_eq!(matching_indices(&items, &["title", "tags"], "lifting", 2), vec![0, 1]);
        assert_eq!(matching_indices(&items, &["tags"], "lifting", 2), vec![0]);
    }

    #[test]
    fn test_unlisted_field_is_ignored() {
        let items = vec![json!({ "title": "Browlift", "body": "endoscopic technique" })];
        assert!(matching_indices(&items, &["title"], "endo", 2).is_empty());
    }

    #[test]
    fn test_unsupported_field_type_is_non_matching() {
        let items = vec![
            json!({ "title": 42, "tags": ["42"] }),
            json!({ "title": "Room 42" }),
        ];
        assert_eq!(matching_indices(&items, &["title"], "42", 2), vec![1]);
        assert_eq!(matching_indices(&items, &["title", "tags"], "42", 2), vec![0, 1]);
    }

    #[test]
    fn test_zero_min_chars_empty_query_matches_string_fields_only() {
        let items = vec![json!({ "title": "" }), json!({ "views": 3 }), json!({ "tags": [] })];
        assert_eq!(matching_indices(&items, &["title", "views", "tags"], "", 0), vec![0]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = guides();
        let first = filter_items(&items, &["title"], "basics", 2);
        let second = filter_items(&items, &["title"], "basics", 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_searchable_type() {
        struct Procedure {
            name: &'static str,
            hours: u8,
        }

        impl Searchable for Procedure {
            fn field(&self, name: &str) -> Option<FieldValue<'_>> {
                match name {
                    "name" => Some(FieldValue::Text(self.name)),
                    "hours" => Some(FieldValue::Unsupported),
                    _ => None,
                }
            }
        }

        let items = vec![
            Procedure { name: "Blefaroplastia", hours: 2 },
            Procedure { name: "Lifting Facial", hours: 5 },
        ];
        let found = filter_items(&items, &["name", "hours"], "facial", 2);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].hours, 5);
    }

    fn title_records(titles: &[String]) -> Vec<Value> {
        titles.iter().map(|t| json!({ "title": t })).collect()
    }

    proptest! {
        #[test]
        fn prop_preserves_relative_order(
            titles in prop::collection::vec("[a-dA-D ]{0,8}", 0..24),
            query in "[a-d]{2,3}",
        ) {
            let items = title_records(&titles);
            let indices = matching_indices(&items, &["title"], &query, 2);
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));

            let term = search_term(&query);
            for (idx, title) in titles.iter().enumerate() {
                let expected = title.to_lowercase().contains(&term);
                prop_assert_eq!(indices.contains(&idx), expected);
            }
        }

        #[test]
        fn prop_short_queries_pass_everything(
            titles in prop::collection::vec("[a-z ]{0,8}", 0..16),
            query in " {0,3}[a-z]? {0,3}",
            min_chars in 2usize..5,
        ) {
            let items = title_records(&titles);
            let found = filter_items(&items, &["title"], &query, min_chars);
            let all: Vec<&Value> = items.iter().collect();
            prop_assert_eq!(found, all);
        }
    }
}
