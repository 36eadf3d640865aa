//! Integration tests for shopping list item ordering.
//!
//! The invariant under test: within each `completed` partition, order
//! values form a dense 1-based sequence, and every mutation answers with
//! the list already re-sorted.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use pantry_database::repositories::shopping_list::ShoppingListRepository;

use crate::helpers::TestApp;

async fn seed_items(app: &TestApp, list_id: Uuid, incomplete: i32, completed: i32) {
    for i in 1..=incomplete {
        app.create_item(list_id, &format!("item-{i}"), false, i).await;
    }
    for i in 1..=completed {
        app.create_item(list_id, &format!("done-{i}"), true, i).await;
    }
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_append_orders_after_incomplete_items_only() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let token = app.token_for(alice, "alice");
    let list_id = app.create_shopping_list(alice, "Groceries").await;
    seed_items(&app, list_id, 10, 5).await;

    let response = app
        .request(
            "POST",
            "/api/shopping-list/append-items",
            Some(json!({
                "shopping_list_id": list_id,
                "items": [{"content": "Milk"}],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let (incomplete, completed) = response.item_orders();
    assert_eq!(incomplete, (1..=11).collect::<Vec<i64>>());
    assert_eq!(completed, (1..=5).collect::<Vec<i64>>());

    let milk = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["content"] == "Milk")
        .expect("Appended item missing");
    assert_eq!(milk["order"], 11);
    assert_eq!(milk["completed"], false);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_append_to_empty_list_starts_at_one() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let token = app.token_for(alice, "alice");
    let list_id = app.create_shopping_list(alice, "Groceries").await;

    let response = app
        .request(
            "POST",
            "/api/shopping-list/append-items",
            Some(json!({
                "shopping_list_id": list_id,
                "items": [
                    {"content": "Eggs"},
                    {"content": "Bread", "notes": "sourdough"},
                ],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let (incomplete, completed) = response.item_orders();
    assert_eq!(incomplete, vec![1, 2]);
    assert!(completed.is_empty());
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_append_with_no_items_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let token = app.token_for(alice, "alice");
    let list_id = app.create_shopping_list(alice, "Groceries").await;

    let response = app
        .request(
            "POST",
            "/api/shopping-list/append-items",
            Some(json!({"shopping_list_id": list_id, "items": []})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_append_lands_after_a_gapped_partition() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let token = app.token_for(alice, "alice");
    let list_id = app.create_shopping_list(alice, "Groceries").await;
    // A gapped pre-state: the max order exceeds the row count.
    app.create_item(list_id, "a", false, 1).await;
    app.create_item(list_id, "b", false, 3).await;
    app.create_item(list_id, "c", false, 4).await;

    let response = app
        .request(
            "POST",
            "/api/shopping-list/append-items",
            Some(json!({
                "shopping_list_id": list_id,
                "items": [{"content": "d"}],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let (incomplete, completed) = response.item_orders();
    assert_eq!(incomplete, vec![1, 2, 3, 4]);
    assert!(completed.is_empty());

    // The appended item must land strictly after every pre-existing
    // item, never tied with one.
    let contents: Vec<&str> = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["a", "b", "c", "d"]);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_denied_membership_blocks_writes() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let bob_token = app.token_for(bob, "bob");
    let list_id = app.create_shopping_list(alice, "Groceries").await;
    let item_id = app.create_item(list_id, "a", false, 1).await;
    let membership_id = app.create_membership(alice, bob, "accepted").await;
    app.create_share("shopping_list", list_id, membership_id).await;

    let response = app
        .request(
            "POST",
            "/api/shopping-list/append-items",
            Some(json!({"shopping_list_id": list_id, "items": [{"content": "Milk"}]})),
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request(
            "PUT",
            "/api/kitchen/membership",
            Some(json!({"id": membership_id, "status": "denied"})),
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    // The write paths re-check the grant on the mutation's own
    // transaction, so a denied membership blocks every one of them.
    let response = app
        .request(
            "POST",
            "/api/shopping-list/append-items",
            Some(json!({"shopping_list_id": list_id, "items": [{"content": "Eggs"}]})),
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND, "{:?}", response.body);

    let response = app
        .request(
            "PUT",
            &format!("/api/shopping-list/{list_id}/items/{item_id}/completed"),
            Some(json!({"completed": true})),
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_collapse_closes_gaps_and_is_idempotent() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let list_id = app.create_shopping_list(alice, "Groceries").await;
    app.create_item(list_id, "a", false, 1).await;
    app.create_item(list_id, "b", false, 3).await;
    app.create_item(list_id, "c", false, 4).await;

    let repo = ShoppingListRepository::new(app.db_pool.clone());
    let rows = repo.collapse(list_id).await.expect("Collapse failed");
    let orders: Vec<i32> = rows.iter().map(|r| r.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    let contents: Vec<&str> = rows.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, vec!["a", "b", "c"]);

    // Collapsing an already-dense list changes nothing.
    let rows = repo.collapse(list_id).await.expect("Collapse failed");
    let orders: Vec<i32> = rows.iter().map(|r| r.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_completing_an_item_moves_it_to_the_tail_of_the_done_partition() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let token = app.token_for(alice, "alice");
    let list_id = app.create_shopping_list(alice, "Groceries").await;
    let target = app.create_item(list_id, "a", false, 1).await;
    app.create_item(list_id, "b", false, 2).await;
    app.create_item(list_id, "done-1", true, 1).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/shopping-list/{list_id}/items/{target}/completed"),
            Some(json!({"completed": true})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let (incomplete, completed) = response.item_orders();
    assert_eq!(incomplete, vec![1]);
    assert_eq!(completed, vec![1, 2]);

    let moved = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["content"] == "a")
        .unwrap();
    assert_eq!(moved["completed"], true);
    assert_eq!(moved["order"], 2);

    // Flip it back: it re-enters the incomplete partition at the tail,
    // not at its old slot.
    let response = app
        .request(
            "PUT",
            &format!("/api/shopping-list/{list_id}/items/{target}/completed"),
            Some(json!({"completed": false})),
            Some(&token),
        )
        .await;
    let (incomplete, completed) = response.item_orders();
    assert_eq!(incomplete, vec![1, 2]);
    assert_eq!(completed, vec![1]);
    let moved = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["content"] == "a")
        .unwrap();
    assert_eq!(moved["order"], 2);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_content_update_preserves_order() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let token = app.token_for(alice, "alice");
    let list_id = app.create_shopping_list(alice, "Groceries").await;
    app.create_item(list_id, "a", false, 1).await;
    let target = app.create_item(list_id, "b", false, 2).await;
    app.create_item(list_id, "c", false, 3).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/shopping-list/{list_id}/items/{target}"),
            Some(json!({"content": "b-renamed", "notes": "check the pantry"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let (incomplete, _) = response.item_orders();
    assert_eq!(incomplete, vec![1, 2, 3]);
    let renamed = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["content"] == "b-renamed")
        .unwrap();
    assert_eq!(renamed["order"], 2);
    assert_eq!(renamed["notes"], "check the pantry");
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_delete_closes_the_gap() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let token = app.token_for(alice, "alice");
    let list_id = app.create_shopping_list(alice, "Groceries").await;
    app.create_item(list_id, "a", false, 1).await;
    let target = app.create_item(list_id, "b", false, 2).await;
    app.create_item(list_id, "c", false, 3).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/shopping-list/{list_id}/items/{target}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let (incomplete, _) = response.item_orders();
    assert_eq!(incomplete, vec![1, 2]);
    let contents: Vec<&str> = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["a", "c"]);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_item_from_another_list_is_not_found() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let token = app.token_for(alice, "alice");
    let list_id = app.create_shopping_list(alice, "Groceries").await;
    let other_list = app.create_shopping_list(alice, "Hardware").await;
    let foreign_item = app.create_item(other_list, "nails", false, 1).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/shopping-list/{list_id}/items/{foreign_item}/completed"),
            Some(json!({"completed": true})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_access_follows_the_membership_and_share() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let alice_token = app.token_for(alice, "alice");
    let bob_token = app.token_for(bob, "bob");
    let list_id = app.create_shopping_list(alice, "Groceries").await;
    app.create_item(list_id, "a", false, 1).await;

    // No membership, no share: invisible.
    let response = app
        .request("GET", &format!("/api/shopping-list/{list_id}"), None, Some(&bob_token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let membership_id = app.create_membership(alice, bob, "accepted").await;

    // An accepted membership alone is not enough for a shopping list.
    let response = app
        .request("GET", &format!("/api/shopping-list/{list_id}"), None, Some(&bob_token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "POST",
            "/api/share/shopping-list",
            Some(json!({"resource_id": list_id, "membership_id": membership_id})),
            Some(&alice_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    // Shared: bob can read and write.
    let response = app
        .request("GET", &format!("/api/shopping-list/{list_id}"), None, Some(&bob_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/shopping-list/append-items",
            Some(json!({"shopping_list_id": list_id, "items": [{"content": "Milk"}]})),
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    // Denying the membership cuts access immediately, without touching
    // the share row.
    app.request(
        "PUT",
        "/api/kitchen/membership",
        Some(json!({"id": membership_id, "status": "denied"})),
        Some(&bob_token),
    )
    .await;

    let response = app
        .request("GET", &format!("/api/shopping-list/{list_id}"), None, Some(&bob_token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Re-accepting restores it.
    app.request(
        "PUT",
        "/api/kitchen/membership",
        Some(json!({"id": membership_id, "status": "accepted"})),
        Some(&bob_token),
    )
    .await;

    let response = app
        .request("GET", &format!("/api/shopping-list/{list_id}"), None, Some(&bob_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
