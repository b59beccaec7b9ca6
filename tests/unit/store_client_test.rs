//! Unit tests for StoreClient URL construction and record serialization.
//!
//! Request/response behavior against a live data API is out of reach here;
//! these cover the parts of the contract that are pure.

use smartmark::services::store_client::StoreClient;
use smartmark::types::bookmark::{Bookmark, NewBookmark};

#[test]
fn test_rows_url_appends_table_path() {
    assert_eq!(
        StoreClient::rows_url("https://backend.test"),
        "https://backend.test/rest/v1/bookmarks"
    );
}

#[test]
fn test_rows_url_trims_trailing_slash() {
    assert_eq!(
        StoreClient::rows_url("https://backend.test/"),
        "https://backend.test/rest/v1/bookmarks"
    );
}

#[test]
fn test_new_bookmark_serializes_to_insert_payload() {
    let record = NewBookmark {
        title: "Docs".to_string(),
        url: "https://docs.test".to_string(),
        owner_id: "user-1".to_string(),
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "title": "Docs",
            "url": "https://docs.test",
            "owner_id": "user-1"
        })
    );
}

#[test]
fn test_bookmark_decodes_from_row_representation() {
    let row = serde_json::json!({
        "id": "real-1",
        "title": "Docs",
        "url": "https://docs.test",
        "owner_id": "user-1",
        "created_at": 1700000000000i64
    });
    let bookmark: Bookmark = serde_json::from_value(row).unwrap();
    assert_eq!(bookmark.id, "real-1");
    assert_eq!(bookmark.created_at, 1_700_000_000_000);
    assert!(!bookmark.is_provisional());
}
