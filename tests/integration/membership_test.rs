//! Integration tests for the membership invitation and approval flow.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_invite_and_accept_flow() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let alice_token = app.token_for(alice, "alice");
    let bob_token = app.token_for(bob, "bob");

    let response = app
        .request(
            "POST",
            "/api/kitchen/membership",
            Some(json!({"username": "bob"})),
            Some(&alice_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["status"], "pending");
    assert_eq!(response.body["source_user"]["username"], "alice");
    assert_eq!(response.body["destination_user"]["username"], "bob");
    let membership_id = response.body["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            "/api/kitchen/membership",
            Some(json!({"id": membership_id, "status": "accepted"})),
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["status"], "accepted");

    // Both participants can fetch it.
    let response = app
        .request(
            "GET",
            &format!("/api/kitchen/membership/{membership_id}"),
            None,
            Some(&alice_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "accepted");
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_source_cannot_accept_own_invitation() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let membership_id = app.create_membership(alice, bob, "pending").await;
    let alice_token = app.token_for(alice, "alice");

    let response = app
        .request(
            "PUT",
            "/api/kitchen/membership",
            Some(json!({"id": membership_id, "status": "accepted"})),
            Some(&alice_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_nothing_returns_to_pending() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let membership_id = app.create_membership(alice, bob, "accepted").await;
    let bob_token = app.token_for(bob, "bob");

    let response = app
        .request(
            "PUT",
            "/api/kitchen/membership",
            Some(json!({"id": membership_id, "status": "pending"})),
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_destination_can_flip_between_accepted_and_denied() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let membership_id = app.create_membership(alice, bob, "accepted").await;
    let bob_token = app.token_for(bob, "bob");

    for status in ["denied", "accepted", "denied"] {
        let response = app
            .request(
                "PUT",
                "/api/kitchen/membership",
                Some(json!({"id": membership_id, "status": status})),
                Some(&bob_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        assert_eq!(response.body["status"], status);
    }
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_duplicate_invite_conflicts_in_either_direction() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let alice_token = app.token_for(alice, "alice");
    let bob_token = app.token_for(bob, "bob");

    let response = app
        .request(
            "POST",
            "/api/kitchen/membership",
            Some(json!({"username": "bob"})),
            Some(&alice_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Same direction.
    let response = app
        .request(
            "POST",
            "/api/kitchen/membership",
            Some(json!({"username": "bob"})),
            Some(&alice_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT, "{:?}", response.body);

    // Opposite direction.
    let response = app
        .request(
            "POST",
            "/api/kitchen/membership",
            Some(json!({"username": "alice"})),
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_denied_invitation_can_be_retried() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    app.create_membership(alice, bob, "denied").await;
    let alice_token = app.token_for(alice, "alice");

    let response = app
        .request(
            "POST",
            "/api/kitchen/membership",
            Some(json!({"username": "bob"})),
            Some(&alice_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["status"], "pending");
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_self_invite_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let alice_token = app.token_for(alice, "alice");

    let response = app
        .request(
            "POST",
            "/api/kitchen/membership",
            Some(json!({"username": "alice"})),
            Some(&alice_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_unknown_username_is_not_found() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let alice_token = app.token_for(alice, "alice");

    let response = app
        .request(
            "POST",
            "/api/kitchen/membership",
            Some(json!({"username": "nobody"})),
            Some(&alice_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_non_participant_sees_not_found() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let carol = app.create_user("carol").await;
    let membership_id = app.create_membership(alice, bob, "accepted").await;
    let carol_token = app.token_for(carol, "carol");

    let response = app
        .request(
            "GET",
            &format!("/api/kitchen/membership/{membership_id}"),
            None,
            Some(&carol_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "PUT",
            "/api/kitchen/membership",
            Some(json!({"id": membership_id, "status": "denied"})),
            Some(&carol_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_list_filters_by_side_and_status() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let carol = app.create_user("carol").await;
    app.create_membership(alice, bob, "accepted").await;
    app.create_membership(carol, alice, "pending").await;
    let alice_token = app.token_for(alice, "alice");

    // Default: both sides.
    let response = app
        .request("GET", "/api/kitchen/membership/list", None, Some(&alice_token))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"].as_array().unwrap().len(), 2);
    assert_eq!(response.body["page"], 0);
    assert_eq!(response.body["has_next_page"], false);

    // Only invitations alice sent.
    let response = app
        .request(
            "GET",
            "/api/kitchen/membership/list?from_self=true",
            None,
            Some(&alice_token),
        )
        .await;
    let data = response.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["destination_user"]["username"], "bob");

    // Only pending invitations targeting alice.
    let response = app
        .request(
            "GET",
            "/api/kitchen/membership/list?targeting_self=true&status=pending",
            None,
            Some(&alice_token),
        )
        .await;
    let data = response.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["source_user"]["username"], "carol");
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_counterpart_email_never_leaks() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let membership_id = app.create_membership(alice, bob, "accepted").await;
    let alice_token = app.token_for(alice, "alice");

    let response = app
        .request(
            "GET",
            &format!("/api/kitchen/membership/{membership_id}"),
            None,
            Some(&alice_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let raw = response.body.to_string();
    assert!(!raw.contains("email"), "membership payload leaked an email field: {raw}");

    // The requester's own profile does include their email.
    let response = app
        .request("GET", "/api/users/self", None, Some(&alice_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "alice@example.com");
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_requests_without_token_are_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/kitchen/membership/list", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
