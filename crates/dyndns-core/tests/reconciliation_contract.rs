//! Contract Test: Record Reconciliation
//!
//! This test verifies the fetch → compare → conditional update sequence.
//!
//! Constraints verified:
//! - An unchanged address answers `nochg` without writing
//! - A changed address is written exactly once with the fetched record id
//! - Any provider failure answers `911` and stops the sequence
//! - Provider calls are bounded by the handler's timeout
//! - The derived client address is used when `myip` is absent
//!
//! If this test fails, the handler is writing when it should not, or is
//! reporting success for records it never updated.

mod common;

use common::*;
use dyndns_core::provider::RecordedUpdate;
use dyndns_core::{ClientOrigin, MemoryProvider, UpdateHandler, UpdateOutcome, UpdateRequest};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn changed_address_is_updated_once() {
    let provider = seeded_provider("1.1.1.1").await;
    let handler = open_handler(&provider);

    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_myip("1.2.3.4"))
        .await;

    assert_eq!(outcome, UpdateOutcome::Updated("1.2.3.4".to_string()));
    assert_eq!(outcome.to_string(), "good 1.2.3.4");
    assert_eq!(outcome.status_code(), 200);

    assert_eq!(provider.update_calls(), 1);
    assert_eq!(
        provider.updates().await,
        vec![RecordedUpdate {
            record_id: RECORD_ID.to_string(),
            hostname: HOSTNAME.to_string(),
            address: "1.2.3.4".to_string(),
        }]
    );
    assert_eq!(provider.record(HOSTNAME).await.unwrap().address, "1.2.3.4");
}

#[tokio::test]
async fn unchanged_address_is_not_written() {
    let provider = seeded_provider("1.1.1.1").await;
    let handler = open_handler(&provider);

    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_myip("1.1.1.1"))
        .await;

    assert_eq!(outcome, UpdateOutcome::NoChange("1.1.1.1".to_string()));
    assert_eq!(outcome.to_string(), "nochg 1.1.1.1");
    assert_eq!(outcome.status_code(), 200);
    assert_eq!(provider.fetch_calls(), 1);
    assert_eq!(provider.update_calls(), 0);
}

#[tokio::test]
async fn comparison_is_exact_string_equality() {
    // Same IPv6 address, different spelling: still rewritten
    let provider = seeded_provider("2001:db8::1").await;
    let handler = open_handler(&provider);

    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_myip("2001:0db8::1"))
        .await;

    assert_eq!(outcome, UpdateOutcome::Updated("2001:0db8::1".to_string()));
    assert_eq!(provider.update_calls(), 1);
}

#[tokio::test]
async fn repeated_request_becomes_nochg() {
    let provider = seeded_provider("1.1.1.1").await;
    let handler = open_handler(&provider);
    let request = UpdateRequest::new(HOSTNAME).with_myip("1.2.3.4");

    assert!(matches!(handler.handle(request.clone()).await, UpdateOutcome::Updated(_)));
    assert!(matches!(handler.handle(request).await, UpdateOutcome::NoChange(_)));

    assert_eq!(provider.fetch_calls(), 2);
    assert_eq!(provider.update_calls(), 1);
}

#[tokio::test]
async fn missing_record_is_911() {
    let provider = MemoryProvider::new();
    let handler = open_handler(&provider);

    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_myip("1.2.3.4"))
        .await;

    assert_eq!(outcome, UpdateOutcome::RemoteFailure);
    assert_eq!(outcome.to_string(), "911");
    assert_eq!(outcome.status_code(), 500);
    assert_eq!(provider.update_calls(), 0);
}

#[tokio::test]
async fn fetch_failure_is_911_without_update() {
    let provider = seeded_provider("1.1.1.1").await;
    provider.set_fetch_failure(true);
    let handler = open_handler(&provider);

    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_myip("1.2.3.4"))
        .await;

    assert_eq!(outcome, UpdateOutcome::RemoteFailure);
    assert_eq!(provider.fetch_calls(), 1);
    assert_eq!(provider.update_calls(), 0);
}

#[tokio::test]
async fn update_failure_is_911() {
    let provider = seeded_provider("1.1.1.1").await;
    provider.set_update_failure(true);
    let handler = open_handler(&provider);

    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_myip("1.2.3.4"))
        .await;

    assert_eq!(outcome, UpdateOutcome::RemoteFailure);
    assert_eq!(provider.fetch_calls(), 1);
    assert_eq!(provider.update_calls(), 1);
    assert_eq!(provider.record(HOSTNAME).await.unwrap().address, "1.1.1.1");
}

#[tokio::test]
async fn derived_address_drives_the_update() {
    let provider = seeded_provider("1.1.1.1").await;
    let handler = open_handler(&provider);

    let origin = ClientOrigin::from_peer("192.168.1.1:12345")
        .with_forwarded_for("10.0.0.1, 10.0.0.2")
        .with_real_ip("10.0.0.3");
    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_origin(origin))
        .await;
    assert_eq!(outcome, UpdateOutcome::Updated("10.0.0.1".to_string()));

    let origin = ClientOrigin::from_peer("192.168.1.1:12345");
    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_origin(origin))
        .await;
    assert_eq!(outcome, UpdateOutcome::Updated("192.168.1.1".to_string()));
}

#[tokio::test]
async fn explicit_myip_beats_headers() {
    let provider = seeded_provider("1.1.1.1").await;
    let handler = open_handler(&provider);

    let origin = ClientOrigin::from_peer("192.168.1.1:12345").with_forwarded_for("10.0.0.1");
    let outcome = handler
        .handle(
            UpdateRequest::new(HOSTNAME)
                .with_myip("1.2.3.4")
                .with_origin(origin),
        )
        .await;

    assert_eq!(outcome, UpdateOutcome::Updated("1.2.3.4".to_string()));
}

#[tokio::test(start_paused = true)]
async fn hanging_provider_times_out_as_911() {
    let probe = HangingProvider::new();
    let handler = UpdateHandler::new(Arc::new(HangingProvider::sharing_counters_with(&probe)), None)
        .with_remote_timeout(Duration::from_secs(10));

    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_myip("1.2.3.4"))
        .await;

    assert_eq!(outcome, UpdateOutcome::RemoteFailure);
    assert_eq!(probe.fetch_call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_provider_times_out_as_911() {
    let provider = seeded_provider("1.1.1.1")
        .await
        .with_latency(Duration::from_secs(30));
    let handler = UpdateHandler::new(Arc::new(provider.clone()), None);

    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_myip("1.2.3.4"))
        .await;

    // The fetch itself exceeds the default 10 s budget
    assert_eq!(outcome, UpdateOutcome::RemoteFailure);
    assert_eq!(provider.update_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn latency_within_budget_succeeds() {
    let provider = seeded_provider("1.1.1.1")
        .await
        .with_latency(Duration::from_secs(2));
    let handler = UpdateHandler::new(Arc::new(provider.clone()), None);

    let outcome = handler
        .handle(UpdateRequest::new(HOSTNAME).with_myip("1.2.3.4"))
        .await;

    assert_eq!(outcome, UpdateOutcome::Updated("1.2.3.4".to_string()));
}

#[tokio::test]
async fn concurrent_requests_share_one_handler() {
    let provider = seeded_provider("1.1.1.1").await;
    let handler = open_handler(&provider);

    let mut tasks = Vec::new();
    for i in 0..8 {
        let handler = handler.clone();
        tasks.push(tokio::spawn(async move {
            handler
                .handle(UpdateRequest::new(HOSTNAME).with_myip(format!("10.0.0.{}", i)))
                .await
        }));
    }

    for task in tasks {
        assert!(task.await.unwrap().is_success());
    }
    assert_eq!(provider.fetch_calls(), 8);
}
