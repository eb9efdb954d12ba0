//! End-to-end tests for the restock watcher loop against a stubbed
//! upstream: warm-up, failure skip, rising edge, no duplicate pings.
//!
//! Run with: cargo test --test restock_cycle_test

use std::sync::Arc;
use std::time::Duration;

use gardenwatch::stock::{Catalog, StockClient};
use gardenwatch::watcher::{start_scheduler, SchedulePolicy};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATEGORY_COUNT: u64 = 5;

fn client_for(server: &MockServer) -> Arc<StockClient> {
    Arc::new(
        StockClient::new(server.uri(), format!("{}/weather", server.uri()), None).unwrap(),
    )
}

#[tokio::test]
async fn test_rising_edge_fires_once_and_failure_cycles_are_skipped() {
    let server = MockServer::start().await;

    // Warm-up: everything out of stock (one response per category)
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(CATEGORY_COUNT)
        .mount(&server)
        .await;

    // Next cycle: upstream down. The first category burns the initial
    // attempt plus its single retry, fails the report, cycle is skipped.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    // From then on: grape is in stock
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"display_name": "grape", "multiplier": 2}
        ])))
        .mount(&server)
        .await;

    let catalog = Arc::new(Catalog::builtin().with_watch_list(["grape"]));
    let policy = SchedulePolicy::Interval(Duration::from_millis(100));
    let mut rx = start_scheduler(client_for(&server), Arc::clone(&catalog), policy);

    // Exactly one notification: the failed cycle emits nothing and the
    // second successful cycle sees grape already nonzero.
    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("watcher should emit a restock event")
        .expect("channel should stay open");
    assert_eq!(event.id, "grape");
    assert_eq!(event.quantity, 2);

    // Give the loop a few more cycles; no duplicate may arrive while the
    // quantity stays positive.
    let duplicate = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
    assert!(duplicate.is_err(), "no duplicate notification while grape stays stocked");
}

#[tokio::test]
async fn test_unwatched_items_never_notify() {
    let server = MockServer::start().await;

    // Warm-up sees an empty shop, then carrot appears
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(CATEGORY_COUNT)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"display_name": "carrot", "multiplier": 10}
        ])))
        .mount(&server)
        .await;

    let catalog = Arc::new(Catalog::builtin().with_watch_list(["grape"]));
    let policy = SchedulePolicy::Interval(Duration::from_millis(100));
    let mut rx = start_scheduler(client_for(&server), Arc::clone(&catalog), policy);

    let outcome = tokio::time::timeout(Duration::from_millis(700), rx.recv()).await;
    assert!(outcome.is_err(), "carrot is not on the watch-list");
}

#[tokio::test]
async fn test_warm_up_snapshot_suppresses_startup_spam() {
    let server = MockServer::start().await;

    // Grape is already in stock when the process starts
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"display_name": "grape", "multiplier": 4}
        ])))
        .mount(&server)
        .await;

    let catalog = Arc::new(Catalog::builtin().with_watch_list(["grape"]));
    let policy = SchedulePolicy::Interval(Duration::from_millis(100));
    let mut rx = start_scheduler(client_for(&server), Arc::clone(&catalog), policy);

    // The warm-up snapshot already contains grape, so no rising edge
    let outcome = tokio::time::timeout(Duration::from_millis(700), rx.recv()).await;
    assert!(outcome.is_err(), "items stocked at startup are not announced");
}
