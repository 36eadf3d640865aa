//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use pantry_access::token::Claims;
use pantry_core::config::AppConfig;
use pantry_database::connection::DatabasePool;
use pantry_database::migration::run_migrations;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
    /// Application config.
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over a clean database.
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        let db_pool = db.into_pool();

        run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let state = pantry_api::build_state(config.clone(), db_pool.clone());
        let router = pantry_api::build_app(state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    /// Clean all test data from the database, children first.
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "resource_shares",
            "shopping_list_items",
            "shopping_lists",
            "meal_plans",
            "recipes",
            "cookbooks",
            "kitchen_memberships",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a test user and return their ID.
    pub async fn create_user(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, username, email) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(username)
            .bind(format!("{username}@example.com"))
            .execute(&self.db_pool)
            .await
            .expect("Failed to create test user");
        id
    }

    /// Mint a bearer token for a user, signed with the test secret.
    ///
    /// Token issuance is out of scope for the service itself, so tests
    /// act as the external identity provider.
    pub fn token_for(&self, user_id: Uuid, username: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now,
            exp: now + 3600,
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.auth.jwt_secret.as_bytes()),
        )
        .expect("Failed to encode test token")
    }

    /// Create a membership edge directly, bypassing the API.
    pub async fn create_membership(&self, source: Uuid, destination: Uuid, status: &str) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO kitchen_memberships (id, source_user_id, destination_user_id, status) \
             VALUES ($1, $2, $3, $4::membership_status)",
        )
        .bind(id)
        .bind(source)
        .bind(destination)
        .bind(status)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create membership");
        id
    }

    /// Create a shopping list and return its ID.
    pub async fn create_shopping_list(&self, owner: Uuid, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO shopping_lists (id, user_id, name) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(owner)
            .bind(name)
            .execute(&self.db_pool)
            .await
            .expect("Failed to create shopping list");
        id
    }

    /// Create a recipe and return its ID.
    pub async fn create_recipe(&self, owner: Uuid, name: &str, private: bool) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO recipes (id, user_id, name, private) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(owner)
            .bind(name)
            .bind(private)
            .execute(&self.db_pool)
            .await
            .expect("Failed to create recipe");
        id
    }

    /// Insert a share row directly, bypassing the API.
    pub async fn create_share(&self, kind: &str, resource_id: Uuid, membership_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO resource_shares (id, resource_kind, resource_id, membership_id) \
             VALUES ($1, $2::resource_kind, $3, $4)",
        )
        .bind(id)
        .bind(kind)
        .bind(resource_id)
        .bind(membership_id)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create share");
        id
    }

    /// Insert a shopping list item with an explicit order value.
    pub async fn create_item(
        &self,
        list_id: Uuid,
        content: &str,
        completed: bool,
        order: i32,
    ) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO shopping_list_items (id, shopping_list_id, content, completed, \"order\") \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(list_id)
        .bind(content)
        .bind(completed)
        .bind(order)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create item");
        id
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body (`Null` if the body was not JSON).
    pub body: Value,
}

impl TestResponse {
    /// The `order` values of the returned items, split by partition:
    /// `(incomplete, completed)`.
    pub fn item_orders(&self) -> (Vec<i64>, Vec<i64>) {
        let items = self.body["items"].as_array().expect("No items in body");
        let mut incomplete = Vec::new();
        let mut completed = Vec::new();
        for item in items {
            let order = item["order"].as_i64().expect("Item without order");
            if item["completed"].as_bool().expect("Item without completed") {
                completed.push(order);
            } else {
                incomplete.push(order);
            }
        }
        (incomplete, completed)
    }
}
