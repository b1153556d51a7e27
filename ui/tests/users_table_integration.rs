//! Integration tests for the user activity table.
//!
//! These tests verify that:
//! 1. Users fetched at startup are rendered with their raw dates and day counters
//! 2. The MFA filter narrows the rows without refetching
//! 3. A failed fetch still leaves the spinner, ending in an empty table

mod common;

use std::time::Duration;

use activity_business::MfaFilter;
use common::{TestCtx, USERS_PATH, is_loading, user_json, yield_wait_for_network};
use kittest::Queryable;
use wiremock::ResponseTemplate;

fn alice_and_bob() -> Vec<serde_json::Value> {
    vec![
        user_json("alice", true, 400, 3),
        user_json("bob", false, 10, 120),
    ]
}

#[tokio::test]
async fn test_fetched_users_are_displayed() {
    let mut ctx = TestCtx::with_users(alice_and_bob()).await;
    ctx.wait_for_load().await;
    let harness = ctx.harness_mut();

    assert!(harness.query_by_label("User Activity Dashboard").is_some());
    assert!(harness.query_by_label("alice").is_some());
    assert!(harness.query_by_label("bob").is_some());

    // Raw create date, shown as received.
    assert_eq!(harness.query_all_by_label("2019-10-01").count(), 2);

    // Day counters.
    assert!(harness.query_by_label("400").is_some());
    assert!(harness.query_by_label("120").is_some());

    assert!(harness.query_by_label("Enabled").is_some());
    assert!(harness.query_by_label("Disabled").is_some());
}

#[tokio::test]
async fn test_table_headers_and_filter_are_shown_once_loaded() {
    let mut ctx = TestCtx::with_users(alice_and_bob()).await;
    ctx.wait_for_load().await;
    let harness = ctx.harness_mut();

    for header in [
        "Name",
        "Create Date",
        "Password Changed",
        "Days Since Password Change",
        "Last Access",
        "Days Since Last Access",
        "MFA",
    ] {
        assert!(
            harness.query_by_label(header).is_some(),
            "missing header {header}"
        );
    }

    assert!(harness.query_by_label("MFA Status").is_some());
    assert!(harness.query_all_by_label_contains("All Users").next().is_some());
}

#[tokio::test]
async fn test_users_are_fetched_exactly_once() {
    let mut ctx = TestCtx::with_users(alice_and_bob()).await;
    ctx.wait_for_load().await;

    for _ in 0..5 {
        ctx.harness_mut().step();
    }

    let requests = ctx
        .mock_server()
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), USERS_PATH);
}

#[tokio::test]
async fn test_first_loaded_frame_shows_rows() {
    let mut ctx = TestCtx::with_users(alice_and_bob()).await;
    ctx.wait_for_load().await;
    let harness = ctx.harness();

    // No extra frame: the frame that applied the response already has the rows.
    assert!(harness.query_by_label("alice").is_some());
    assert!(harness.query_by_label("bob").is_some());
}

#[tokio::test]
async fn test_mfa_filter_narrows_rows() {
    let mut ctx = TestCtx::with_users(alice_and_bob()).await;
    ctx.wait_for_load().await;
    let harness = ctx.harness_mut();

    harness
        .state_mut()
        .state_mut()
        .ctx
        .update::<MfaFilter>(|filter| *filter = MfaFilter::Enabled);
    harness.step();

    assert!(harness.query_by_label("alice").is_some());
    assert!(harness.query_by_label("bob").is_none());

    harness
        .state_mut()
        .state_mut()
        .ctx
        .update::<MfaFilter>(|filter| *filter = MfaFilter::Disabled);
    harness.step();

    assert!(harness.query_by_label("alice").is_none());
    assert!(harness.query_by_label("bob").is_some());

    harness
        .state_mut()
        .state_mut()
        .ctx
        .update::<MfaFilter>(|filter| *filter = MfaFilter::All);
    harness.step();

    assert!(harness.query_by_label("alice").is_some());
    assert!(harness.query_by_label("bob").is_some());
}

#[tokio::test]
async fn test_selecting_filter_in_combo_box_narrows_rows() {
    let mut ctx = TestCtx::with_users(alice_and_bob()).await;
    ctx.wait_for_load().await;
    let harness = ctx.harness_mut();

    harness
        .query_by_label("All Users")
        .expect("filter selector should show the current choice")
        .click();
    harness.step();
    harness.step();

    harness
        .query_by_label("MFA Enabled")
        .expect("filter options should be open")
        .click();
    harness.step();

    assert_eq!(
        *harness.state().state().ctx.state::<MfaFilter>(),
        MfaFilter::Enabled
    );
    assert!(harness.query_by_label("alice").is_some());
    assert!(harness.query_by_label("bob").is_none());
}

#[tokio::test]
async fn test_spinner_replaces_table_while_loading() {
    let mut ctx = TestCtx::with_response(
        ResponseTemplate::new(200)
            .set_body_json(alice_and_bob())
            .set_delay(Duration::from_secs(2)),
    )
    .await;
    let harness = ctx.harness_mut();

    harness.step();
    yield_wait_for_network(20).await;
    harness.step();

    assert!(is_loading(harness));
    assert!(harness.query_by_label("Name").is_none());
    assert!(harness.query_by_label("MFA Status").is_none());
    assert!(harness.query_by_label("User Activity Dashboard").is_some());
}

#[tokio::test]
async fn test_server_error_shows_empty_table() {
    let mut ctx = TestCtx::with_response(ResponseTemplate::new(500)).await;
    ctx.wait_for_load().await;
    let harness = ctx.harness_mut();

    assert!(!is_loading(harness));
    assert!(harness.query_by_label("Name").is_some());
    assert!(harness.query_by_label("MFA Status").is_some());
    assert!(harness.query_by_label("Enabled").is_none());
    assert!(harness.query_by_label("Disabled").is_none());
}

#[tokio::test]
async fn test_malformed_body_shows_empty_table() {
    let mut ctx =
        TestCtx::with_response(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .await;
    ctx.wait_for_load().await;
    let harness = ctx.harness_mut();

    assert!(!is_loading(harness));
    assert!(harness.query_by_label("Name").is_some());
    assert!(harness.query_by_label("Enabled").is_none());
}

#[tokio::test]
async fn test_exit_drops_late_response() {
    let mut ctx = TestCtx::with_response(
        ResponseTemplate::new(200)
            .set_body_json(alice_and_bob())
            .set_delay(Duration::from_millis(300)),
    )
    .await;
    let harness = ctx.harness_mut();

    harness.step();
    yield_wait_for_network(50).await;
    eframe::App::on_exit(harness.state_mut(), None);

    yield_wait_for_network(400).await;
    harness.step();

    assert!(is_loading(harness));
    assert!(harness.query_by_label("alice").is_none());
}
