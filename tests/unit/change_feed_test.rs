//! Unit tests for the broadcast change feed and the decoded event boundary.

use smartmark::services::change_feed::{owner_channel, BroadcastFeed, ChangeFeedTrait};
use smartmark::types::bookmark::Bookmark;
use smartmark::types::errors::FeedError;
use smartmark::types::event::{FeedEvent, WireMessage, EVENT_ADDED};

fn bookmark(id: &str, owner: &str) -> Bookmark {
    Bookmark {
        id: id.to_string(),
        title: "Docs".to_string(),
        url: "https://docs.test".to_string(),
        owner_id: owner.to_string(),
        created_at: 100,
    }
}

#[test]
fn test_owner_channel_name() {
    assert_eq!(owner_channel("user-1"), "user-user-1-bookmarks");
}

#[test]
fn test_publish_reaches_subscriber() {
    let feed = BroadcastFeed::new(16);
    let mut sub = feed.subscribe("chan").unwrap();

    let event = FeedEvent::Added(bookmark("b1", "user-1"));
    let receivers = feed.publish("chan", &event).unwrap();
    assert_eq!(receivers, 1);

    let received = sub.try_next().unwrap().unwrap();
    assert_eq!(received, event);
    // Queue drained
    assert!(sub.try_next().unwrap().is_none());
}

#[test]
fn test_publish_without_subscribers_is_not_an_error() {
    let feed = BroadcastFeed::new(16);
    let receivers = feed
        .publish("idle", &FeedEvent::Added(bookmark("b1", "user-1")))
        .unwrap();
    assert_eq!(receivers, 0);
}

#[test]
fn test_channels_are_independent() {
    let feed = BroadcastFeed::new(16);
    let mut sub_a = feed.subscribe(&owner_channel("user-1")).unwrap();
    let mut sub_b = feed.subscribe(&owner_channel("user-2")).unwrap();

    feed.publish(
        &owner_channel("user-1"),
        &FeedEvent::Added(bookmark("b1", "user-1")),
    )
    .unwrap();

    assert!(sub_a.try_next().unwrap().is_some());
    assert!(sub_b.try_next().unwrap().is_none());
}

#[test]
fn test_dropped_subscription_stops_counting() {
    let feed = BroadcastFeed::new(16);
    let sub = feed.subscribe("chan").unwrap();
    sub.unsubscribe();

    let receivers = feed
        .publish("chan", &FeedEvent::Added(bookmark("b1", "user-1")))
        .unwrap();
    assert_eq!(receivers, 0);
}

#[test]
fn test_subscription_only_sees_events_after_subscribe() {
    let feed = BroadcastFeed::new(16);
    feed.publish("chan", &FeedEvent::Added(bookmark("early", "user-1")))
        .unwrap();

    let mut sub = feed.subscribe("chan").unwrap();
    assert!(sub.try_next().unwrap().is_none());
}

#[test]
fn test_slow_subscriber_reports_lag() {
    let feed = BroadcastFeed::new(2);
    let mut sub = feed.subscribe("chan").unwrap();

    for i in 0..4 {
        feed.publish(
            "chan",
            &FeedEvent::Deleted {
                id: format!("b{}", i),
                owner_id: "user-1".to_string(),
            },
        )
        .unwrap();
    }

    match sub.try_next() {
        Err(FeedError::Lagged(missed)) => assert_eq!(missed, 2),
        other => panic!("Expected Lagged, got {:?}", other),
    }
}

#[tokio::test]
async fn test_async_next_delivers_event() {
    let feed = BroadcastFeed::new(16);
    let mut sub = feed.subscribe("chan").unwrap();

    let event = FeedEvent::Updated(bookmark("b1", "user-1"));
    feed.publish("chan", &event).unwrap();

    let received = sub.next().await.unwrap();
    assert_eq!(received, event);
}

// === Wire decode boundary ===

#[test]
fn test_wire_roundtrip_for_each_variant() {
    let events = vec![
        FeedEvent::Added(bookmark("b1", "user-1")),
        FeedEvent::Updated(bookmark("b1", "user-1")),
        FeedEvent::Deleted {
            id: "b1".to_string(),
            owner_id: "user-1".to_string(),
        },
    ];
    for event in events {
        let wire = event.to_wire().unwrap();
        let decoded = FeedEvent::from_wire(&wire).unwrap();
        assert_eq!(decoded, event);
    }
}

#[test]
fn test_unknown_event_name_is_rejected() {
    let msg = WireMessage {
        event: "bookmark-exploded".to_string(),
        payload: serde_json::json!({}),
    };
    assert!(matches!(
        FeedEvent::from_wire(&msg),
        Err(FeedError::Decode(_))
    ));
}

#[test]
fn test_malformed_payload_is_rejected() {
    let msg = WireMessage {
        event: EVENT_ADDED.to_string(),
        payload: serde_json::json!({ "id": "b1" }),
    };
    assert!(matches!(
        FeedEvent::from_wire(&msg),
        Err(FeedError::Decode(_))
    ));
}

#[test]
fn test_event_accessors() {
    let deleted = FeedEvent::Deleted {
        id: "b1".to_string(),
        owner_id: "user-1".to_string(),
    };
    assert_eq!(deleted.bookmark_id(), "b1");
    assert_eq!(deleted.owner_id(), "user-1");

    let added = FeedEvent::Added(bookmark("b2", "user-2"));
    assert_eq!(added.bookmark_id(), "b2");
    assert_eq!(added.owner_id(), "user-2");
}
