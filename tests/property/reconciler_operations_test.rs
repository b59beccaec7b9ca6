//! Property-based tests for the optimistic add/delete flows.
//!
//! These verify that for arbitrary valid titles and URLs the reconciler
//! upholds its lifecycle invariants: an optimistic add is immediately
//! visible and searchable, a confirmation never duplicates the entry, and a
//! failed add always hands back the exact form input.

use proptest::prelude::*;
use smartmark::managers::list_reconciler::{ListReconciler, ListReconcilerTrait};
use smartmark::types::bookmark::Bookmark;

const OWNER: &str = "user-1";

/// Strategy for generating valid URL strings.
fn arb_url() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("https"), Just("http")],
        "[a-z][a-z0-9]{2,15}",
        prop_oneof![Just(".com"), Just(".org"), Just(".net"), Just(".io")],
        proptest::option::of("/[a-z0-9]{1,10}"),
    )
        .prop_map(|(scheme, host, tld, path)| {
            format!("{}://{}{}{}", scheme, host, tld, path.unwrap_or_default())
        })
}

/// Strategy for generating non-empty bookmark titles.
fn arb_title() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{1,30}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    // For any valid submission, the entry is visible and searchable by its
    // full title before any remote response arrives.
    #[test]
    fn add_then_search_finds_the_entry(url in arb_url(), title in arb_title()) {
        let mut rec = ListReconciler::new(OWNER);
        let temp_id = rec.add_optimistic(&title, &url)
            .expect("add_optimistic should accept valid input");

        prop_assert_eq!(rec.len(), 1);

        let results = rec.search(&title);
        prop_assert!(
            results.iter().any(|b| b.id == temp_id),
            "Searching for title '{}' should find the provisional entry",
            title
        );
    }

    // Confirmation replaces the provisional entry; at no point does the list
    // hold both forms of the same logical bookmark.
    #[test]
    fn confirm_never_duplicates(url in arb_url(), title in arb_title()) {
        let mut rec = ListReconciler::new(OWNER);
        let temp_id = rec.add_optimistic(&title, &url).unwrap();

        let confirmed = Bookmark {
            id: "real-1".to_string(),
            title: title.clone(),
            url: url.clone(),
            owner_id: OWNER.to_string(),
            created_at: 100,
        };
        prop_assert!(rec.confirm_add(&temp_id, confirmed));

        prop_assert_eq!(rec.len(), 1);
        prop_assert_eq!(rec.bookmarks()[0].id.as_str(), "real-1");
        prop_assert!(rec.bookmarks().iter().all(|b| b.id != temp_id));
    }

    // A failed add leaves no trace in the list and returns the exact input.
    #[test]
    fn fail_add_restores_exact_input(url in arb_url(), title in arb_title()) {
        let mut rec = ListReconciler::new(OWNER);
        let temp_id = rec.add_optimistic(&title, &url).unwrap();

        let restored = rec.fail_add(&temp_id)
            .expect("fail_add should return the pending form input");

        prop_assert!(rec.is_empty());
        prop_assert_eq!(restored.title, title);
        prop_assert_eq!(restored.url, url);
    }

    // Interleaved adds keep provisional ids unique and the list consistent.
    #[test]
    fn interleaved_adds_keep_ids_unique(
        submissions in proptest::collection::vec((arb_title(), arb_url()), 1..8)
    ) {
        let mut rec = ListReconciler::new(OWNER);
        let mut ids = Vec::new();
        for (title, url) in &submissions {
            ids.push(rec.add_optimistic(title, url).unwrap());
        }

        prop_assert_eq!(rec.len(), submissions.len());
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), ids.len(), "Provisional ids must be unique");
    }
}
